//! Content fingerprinting for input documents.
//!
//! A [`Fingerprint`] is the lowercase hex SHA-256 digest of a document's full
//! byte content. It is produced by streaming the document through an
//! incremental [`Hasher`] in fixed-size chunks, so memory use stays bounded
//! regardless of document size.
//!
//! # Example
//!
//! ```
//! use docfresh_verify::hash_reader;
//!
//! let fingerprint = hash_reader(&b"hello world"[..]).unwrap();
//! assert_eq!(
//!     fingerprint.as_str(),
//!     "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
//! );
//! assert_eq!(fingerprint.short(), "b94d27b9");
//! ```

pub use self::error::{HashError, ParseFingerprintError, Result};
pub use self::fingerprint::Fingerprint;
pub use self::hasher::{Hasher, Sha256Hasher};
pub use self::reader::{DEFAULT_CHUNK_SIZE, hash_reader, hash_reader_with_chunk_size};

mod error;
mod fingerprint;
mod hasher;
mod reader;
