//! Staged file placement for docfresh.
//!
//! Files are written to a hidden temporary sibling of their destination and
//! only become visible at the destination through an atomic rename. A staged
//! file that is dropped without being committed is removed, so readers that
//! probe the destination never observe partial content.

mod error;
mod staged;

pub use error::{Error, Result};
pub use staged::{StageOptions, StagedFile};
