pub mod day_summary;
pub mod round;
pub mod round_status;
pub mod working_group;

pub use day_summary::{DailySummary, GroupTotal, GroupTotals};
pub use round::Round;
pub use round_status::RoundStatus;
pub use working_group::WorkingGroup;
