use crate::core::CourseRecord;
use crate::utils::error::{CatalogError, Result};

/// Returns the records whose title contains `query`, ignoring case, in input order.
///
/// An empty query matches every record. A missing query is an error rather
/// than an implicit match-all, so callers can tell "no query" from "no hits".
pub fn filter<'a>(
    records: &'a [CourseRecord],
    query: Option<&str>,
) -> Result<Vec<&'a CourseRecord>> {
    // 查詢與標題都轉成小寫後比對
    let needle = query.ok_or(CatalogError::InvalidQuery)?.to_lowercase();

    Ok(records
        .iter()
        .filter(|record| record.title.to_lowercase().contains(&needle))
        .collect())
}
