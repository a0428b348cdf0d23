use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::progress::Progress;

pub type ProgressCallback = Arc<dyn Fn(&Progress) + Send + Sync>;

/// Configuration for a single download.
///
/// # Examples
///
/// ```
/// use docfresh_fetch::FetchOptions;
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let options = FetchOptions::default()
///     .connect_timeout(Duration::from_secs(5))
///     .on_progress(Arc::new(|progress| {
///         println!("{}%", progress.percentage());
///     }));
/// ```
#[derive(Clone)]
pub struct FetchOptions {
    /// Upper bound for obtaining the response headers.
    ///
    /// Default: 10s
    pub connect_timeout: Duration,

    /// Upper bound for waiting on any single body chunk.
    ///
    /// Default: 10s
    pub read_timeout: Duration,

    /// Invoked after every chunk write, only when the response declared a
    /// content length.
    ///
    /// Default: None
    pub on_progress: Option<ProgressCallback>,
}

impl fmt::Debug for FetchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchOptions")
            .field("connect_timeout", &self.connect_timeout)
            .field("read_timeout", &self.read_timeout)
            .field("on_progress", &self.on_progress.as_ref().map(|_| "{ ... }"))
            .finish()
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            read_timeout:    Duration::from_secs(10),
            on_progress:     None,
        }
    }
}

impl FetchOptions {
    #[must_use]
    pub fn connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    #[must_use]
    pub fn read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    #[must_use]
    pub fn on_progress(mut self, on_progress: ProgressCallback) -> Self {
        self.on_progress = Some(on_progress);
        self
    }
}
