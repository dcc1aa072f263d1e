use chrono::{DateTime, Utc};
use serde::Serialize;

/// A named partition of rounds.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WorkingGroup {
    pub id: i64,               // ⇔ working_groups.id
    pub name: String,          // ⇔ working_groups.name (UNIQUE, NOT NULL)
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkingGroup {
    /// Name shown to the user; falls back to `Group #<id>` for unnamed rows.
    pub fn display_name(&self) -> String {
        display_name(self.id, &self.name)
    }
}

pub fn display_name(id: i64, name: &str) -> String {
    if name.is_empty() {
        format!("Group #{id}")
    } else {
        name.to_string()
    }
}
