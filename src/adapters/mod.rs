// Adapters: concrete catalog sources (built-in data, local file, http).

pub mod embedded;
pub mod file;
pub mod http;

pub use embedded::EmbeddedSource;
pub use file::FileSource;
pub use http::HttpSource;

use crate::core::CatalogSource;

/// Keyword selecting the built-in catalog.
pub const EMBEDDED: &str = "embedded";

/// Picks a source from a config value: `embedded`, an http(s) URL, or a file path.
pub fn source_from_spec(spec: &str) -> Box<dyn CatalogSource> {
    let spec = spec.trim();
    // 依設定值選擇：內建資料、遠端 URL 或本地檔案
    if spec == EMBEDDED {
        Box::new(EmbeddedSource)
    } else if spec.starts_with("http://") || spec.starts_with("https://") {
        Box::new(HttpSource::new(spec.to_string()))
    } else {
        Box::new(FileSource::new(spec))
    }
}
