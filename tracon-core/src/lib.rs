#![warn(clippy::pedantic)]

pub mod level;
pub mod load;
pub mod try_log;
pub use try_log::TryLog;
