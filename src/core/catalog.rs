use crate::core::{search, CatalogSource, CourseRecord};
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_url};
use std::collections::HashSet;

/// Immutable, ordered collection of courses, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<CourseRecord>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate ids, blank titles and bad links.
    pub fn from_records(records: Vec<CourseRecord>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());

        for record in &records {
            // 檢查 ID 是否重複
            if !seen.insert(&record.id) {
                return Err(CatalogError::DuplicateCourseId {
                    id: record.id.to_string(),
                });
            }

            // 驗證標題與連結
            validate_non_empty_string("title", &record.title)
                .and_then(|_| validate_url("link", &record.link))
                .map_err(|e| CatalogError::InvalidCourse {
                    id: record.id.to_string(),
                    reason: e.to_string(),
                })?;
        }

        Ok(Self { records })
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let records: Vec<CourseRecord> = serde_json::from_slice(bytes)?;
        Self::from_records(records)
    }

    pub async fn load(source: &dyn CatalogSource) -> Result<Self> {
        tracing::debug!("Loading catalog from {}", source.describe());
        let bytes = source.fetch().await?;
        // 解析並驗證所有課程
        let catalog = Self::from_json_slice(&bytes)?;
        tracing::info!(
            "📚 Loaded {} courses from {}",
            catalog.len(),
            source.describe()
        );
        Ok(catalog)
    }

    pub fn records(&self) -> &[CourseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn search(&self, query: Option<&str>) -> Result<Vec<&CourseRecord>> {
        search::filter(&self.records, query)
    }
}
