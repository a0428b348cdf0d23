use std::path::{Path, PathBuf};

use tokio::sync::mpsc;

use crate::{AttemptId, FlowFailure};

/// Where the flow ended up: the document the platform layer should open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A replacement that was already in the cache.
    Cached(PathBuf),

    /// A replacement fetched during this flow.
    Downloaded(PathBuf),

    /// No newer version is known; open the input as supplied. Carries the
    /// input's display location.
    Original(String),
}

impl Outcome {
    pub fn local_path(&self) -> Option<&Path> {
        match self {
            Self::Cached(path) | Self::Downloaded(path) => Some(path),
            Self::Original(_) => None,
        }
    }

    pub fn use_original(&self) -> bool { matches!(self, Self::Original(_)) }
}

/// Position in the update flow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FlowState {
    #[default]
    Idle,
    Loading,
    Hashing,
    Resolving,
    CacheHit,
    Downloading,
    PassThrough,
    Ready(Outcome),
    Failed(FlowFailure),
}

impl FlowState {
    pub fn is_terminal(&self) -> bool { matches!(self, Self::Ready(_) | Self::Failed(_)) }
}

/// How far a download has come.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferIndicator {
    /// The server did not declare a size.
    Indeterminate,
    Percent(u8),
}

/// One update for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub attempt:   AttemptId,
    pub state:     FlowState,
    pub headline:  &'static str,
    pub detail:    &'static str,
    pub progress:  Option<TransferIndicator>,
    pub is_error:  bool,
    /// Whether the presentation layer should offer a retry.
    pub retryable: bool,
}

impl Status {
    pub fn new(attempt: AttemptId, state: FlowState, progress: Option<TransferIndicator>) -> Self {
        let (headline, detail) = match &state {
            FlowState::Idle => ("PDF Viewer", "Preparing document…"),
            FlowState::Loading => ("Opening PDF", "Loading file…"),
            FlowState::Hashing => ("Preparing PDF", "Reading document…"),
            FlowState::Resolving => ("Preparing PDF", "Checking for updates…"),
            FlowState::CacheHit => ("Opening PDF", "Using saved update…"),
            FlowState::PassThrough => ("Opening PDF", "Rendering document…"),
            FlowState::Downloading => ("Downloading", "Fetching latest version…"),
            FlowState::Ready(_) => ("Opening PDF", "Launching viewer…"),
            FlowState::Failed(FlowFailure::NoInput) => ("PDF Viewer", "No document selected"),
            FlowState::Failed(FlowFailure::Read(_)) => ("Error", "File could not be read"),
            FlowState::Failed(FlowFailure::Download(_)) => ("Download Failed", "Check your connection"),
        };
        let (is_error, retryable) = match &state {
            FlowState::Failed(failure) => (failure.is_error(), failure.is_retryable()),
            _ => (false, false),
        };

        Self {
            attempt,
            state,
            headline,
            detail,
            progress,
            is_error,
            retryable,
        }
    }
}

/// Receives every status update of a flow, in order, from a single task.
pub trait StatusSink: Send + 'static {
    fn emit(&self, status: Status);
}

impl<F: Fn(Status) + Send + 'static> StatusSink for F {
    fn emit(&self, status: Status) { self(status) }
}

/// Forwards status updates over an unbounded channel, typically to a UI loop.
pub struct ChannelSink(mpsc::UnboundedSender<Status>);

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Status>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self(tx), rx)
    }
}

impl StatusSink for ChannelSink {
    fn emit(&self, status: Status) {
        if self.0.send(status).is_err() {
            tracing::trace!("status receiver dropped");
        }
    }
}
