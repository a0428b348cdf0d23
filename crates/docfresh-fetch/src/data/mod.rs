//! Immutable data types for index loading and downloads.

pub mod index;
pub mod options;
pub mod progress;

pub use index::Index;
pub use options::{FetchOptions, ProgressCallback};
pub use progress::Progress;
