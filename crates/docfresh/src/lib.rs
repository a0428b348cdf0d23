//! Open a document, or the newest known version of it.
//!
//! The [`FlowController`] fingerprints an input document, consults a remote
//! update index, and ends in one of three outcomes: a replacement already in
//! the local cache, a replacement downloaded into the cache, or the original
//! document unchanged. Every state change is reported to a [`StatusSink`];
//! the final [`Outcome`] is handed to the platform layer, which launches a
//! viewer.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use docfresh::{ChannelSink, FileDocument, FlowConfig};
//!
//! # async fn run() -> docfresh::Result<()> {
//! let (sink, mut statuses) = ChannelSink::new();
//! let mut flow = docfresh::spawn(FlowConfig::default(), "/var/cache/docfresh", sink)?;
//!
//! flow.open(Some(Arc::new(FileDocument::new("report.pdf"))))?;
//! tokio::spawn(async move {
//!     while let Some(status) = statuses.recv().await {
//!         println!("{}: {}", status.headline, status.detail);
//!     }
//! });
//!
//! if let Some(Ok(outcome)) = flow.wait_outcome().await {
//!     println!("open {:?}", outcome.local_path());
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod context;
mod document;
mod error;
mod flow;
mod status;

pub use config::FlowConfig;
pub use context::{AttemptId, FlowContext};
pub use document::{DocumentHandle, FileDocument};
pub use error::{Error, FlowFailure, Result};
pub use flow::{FlowController, FlowHandle};
pub use status::{ChannelSink, FlowState, Outcome, Status, StatusSink, TransferIndicator};

pub use docfresh_fetch::{HttpClient, Index};
pub use docfresh_store::{CacheStore, Resolution};
pub use docfresh_verify::Fingerprint;

/// Start a flow controller backed by `reqwest`.
///
/// Must be called from within a tokio runtime.
#[cfg(feature = "reqwest")]
pub fn spawn<S: StatusSink>(
    config: FlowConfig,
    storage_root: impl Into<std::path::PathBuf>,
    sink: S,
) -> Result<FlowHandle> {
    config.validate()?;
    let client = docfresh_fetch::ReqwestClient::with_connect_timeout(config.connect_timeout)
        .map_err(|e| Error::Client(e.to_string()))?;
    Ok(FlowController::new(client, sink, config, storage_root).spawn())
}
