use crate::core::percentage;

/// Transfer progress for a download whose size the server declared.
///
/// Transfers without a declared size produce no `Progress` values at all;
/// callers treat the absence of events as indeterminate progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Bytes written to the staging file so far.
    pub bytes_downloaded: u64,

    /// Size declared by the server's `Content-Length`.
    pub total_bytes: u64,
}

impl Progress {
    pub fn new(bytes_downloaded: u64, total_bytes: u64) -> Self {
        Self {
            bytes_downloaded,
            total_bytes,
        }
    }

    /// Whole percentage complete, clamped to `0..=100`.
    pub fn percentage(&self) -> u8 { percentage(self.bytes_downloaded, self.total_bytes) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        assert_eq!(Progress::new(0, 200).percentage(), 0);
        assert_eq!(Progress::new(80, 200).percentage(), 40);
        assert_eq!(Progress::new(200, 200).percentage(), 100);
    }
}
