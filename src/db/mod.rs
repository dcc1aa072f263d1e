pub mod db_utils;
pub mod groups;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod rounds;
pub mod stats;
