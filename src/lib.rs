pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use config::TomlConfig;
pub use crate::core::catalog::Catalog;
pub use crate::core::search::filter;
pub use domain::model::{CourseId, CourseRecord};
pub use server::Server;
pub use utils::error::{CatalogError, Result};
