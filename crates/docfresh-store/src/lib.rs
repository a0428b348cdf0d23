//! Local replacement cache and the decision of which document to serve.
//!
//! [`CacheStore`] maps a [`Fingerprint`](docfresh_verify::Fingerprint) to a
//! deterministic file path under an externally supplied storage root.
//! [`resolve`] combines that mapping with the update
//! [`Index`](docfresh_fetch::Index) to pick one of three outcomes.
//!
//! Cache entries are never evicted. Nothing locks the storage root, so two
//! processes resolving the same fingerprint at once may both download it;
//! the later rename wins and both end up with a complete file.

mod cache;
mod resolve;

pub use cache::CacheStore;
pub use resolve::{Resolution, resolve};
