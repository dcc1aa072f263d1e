use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum RoundStatus {
    InProgress,
    Completed,
}

impl RoundStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundStatus::InProgress => "In Progress",
            RoundStatus::Completed => "Completed",
        }
    }
}
