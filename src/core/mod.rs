pub mod catalog;
pub mod search;

pub use crate::domain::model::{CourseId, CourseRecord};
pub use crate::domain::ports::CatalogSource;
pub use crate::utils::error::Result;
