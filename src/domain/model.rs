use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque course identifier. Catalog files use either numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CourseId {
    Number(u64),
    Text(String),
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseId::Number(n) => write!(f, "{}", n),
            CourseId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CourseId {
    fn from(value: &str) -> Self {
        CourseId::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: CourseId,
    /// The only field searched.
    pub title: String,
    pub level: String,
    pub description: String,
    pub link: String,
}

impl CourseRecord {
    /// Record with a numeric id, the form the bundled data uses.
    pub fn new(
        id: u64,
        title: impl Into<String>,
        level: impl Into<String>,
        description: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            id: CourseId::Number(id),
            title: title.into(),
            level: level.into(),
            description: description.into(),
            link: link.into(),
        }
    }
}
