use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A zone owns records. Deleting a zone stamps `deleted_at` instead of
/// removing the row; its records stop resolving but stay in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: i64,
    pub owner: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Zone {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
