use crate::core::CatalogSource;
use crate::utils::error::Result;
use async_trait::async_trait;

const COURSES_JSON: &[u8] = include_bytes!("../../data/courses.json");

/// The course list shipped with the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

#[async_trait]
impl CatalogSource for EmbeddedSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        Ok(COURSES_JSON.to_vec())
    }

    fn describe(&self) -> String {
        "built-in catalog".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;

    #[tokio::test]
    async fn test_embedded_catalog_is_valid() {
        let catalog = Catalog::load(&EmbeddedSource).await.unwrap();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.search(Some("next")).unwrap().len(), 1);
    }
}
