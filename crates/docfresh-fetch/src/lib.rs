//! Update index loading and streamed downloads for docfresh.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable configuration and types
//! - [`core`] - Pure transformations
//! - [`effects`] - I/O operations with trait abstraction
//!
//! # Key Features
//!
//! - **Best-effort index**: [`IndexLoader::load`] never fails; any problem
//!   yields an empty [`Index`]
//! - **Staged placement**: downloads land in a hidden sibling file and are
//!   renamed onto the destination only after the transfer completes
//! - **Honest progress**: progress is reported only when the server declares
//!   a content length
//! - **Mechanism-only**: no retry policy; the caller decides what a failure means

pub mod core;
pub mod data;
pub mod effects;
mod error;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use core::{parse_index, percentage};
pub use data::{FetchOptions, Index, Progress, ProgressCallback};
pub use effects::{BoxStream, Fetcher, HttpClient, HttpResponse, IndexLoader};

#[cfg(feature = "reqwest")]
pub use effects::ReqwestClient;

pub use error::{FetchError, Result};
