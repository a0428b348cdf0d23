use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to load configuration")]
    Config(#[from] figment::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("flow controller is no longer running")]
    ControllerStopped,
}

pub type Result<T> = std::result::Result<T, Error>;

/// Terminal failure of a flow attempt, as shown to the user.
///
/// An unreachable update index is not a failure: the flow continues with an
/// empty index and serves the original document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowFailure {
    /// No document was supplied. Informational, not an error.
    #[error("no document selected")]
    NoInput,

    /// The input could not be opened or read to the end.
    #[error("document could not be read: {0}")]
    Read(String),

    /// Fetching the newer version failed. The user may retry.
    #[error("download failed: {0}")]
    Download(String),
}

impl FlowFailure {
    pub fn is_error(&self) -> bool { !matches!(self, Self::NoInput) }

    pub fn is_retryable(&self) -> bool { matches!(self, Self::Download(_)) }
}
