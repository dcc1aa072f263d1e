pub mod aggregate;
pub mod export;
pub mod lifecycle;
pub mod log;
pub mod registry;
pub mod status;

pub use lifecycle::{RoundLifecycle, RoundState};
pub use registry::GroupRegistry;
