//! I/O operations: HTTP access, index loading and file transfer.

mod fetcher;
mod http;
mod index;

pub use fetcher::Fetcher;
pub use http::{BoxStream, HttpClient, HttpResponse};
pub use index::IndexLoader;

#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
