//! Schema for airport files.

#![warn(clippy::pedantic)]
#![forbid(missing_docs)]

mod airport;
pub use airport::*;

mod procedure;
pub use procedure::*;

mod pattern;
pub use pattern::*;

mod weighted;
pub use weighted::*;

/// A generic range.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct Range<T> {
    /// Start of the range.
    pub min: T,
    /// End of the range.
    pub max: T,
}
