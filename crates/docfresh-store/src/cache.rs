use std::path::{Path, PathBuf};

use docfresh_verify::Fingerprint;

/// Fingerprint-addressed files under a storage root.
///
/// The store never writes; downloads are placed at [`CacheStore::path_for`]
/// by the fetcher. Presence of a regular file at that path is the only
/// signal that an entry exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStore {
    root:      PathBuf,
    prefix:    String,
    extension: String,
}

impl CacheStore {
    pub const DEFAULT_PREFIX: &'static str = "cached_";
    pub const DEFAULT_EXTENSION: &'static str = "pdf";

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root:      root.into(),
            prefix:    Self::DEFAULT_PREFIX.to_string(),
            extension: Self::DEFAULT_EXTENSION.to_string(),
        }
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn root(&self) -> &Path { &self.root }

    /// `<root>/<prefix><first 8 hex chars>.<extension>`
    pub fn path_for(&self, fingerprint: &Fingerprint) -> PathBuf {
        self.root
            .join(format!("{}{}.{}", self.prefix, fingerprint.short(), self.extension))
    }

    pub fn exists(&self, path: &Path) -> bool { path.is_file() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn fingerprint() -> Fingerprint {
        "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
            .parse()
            .unwrap()
    }

    #[test]
    fn test_path_layout() {
        let store = CacheStore::new("/data/files");
        assert_eq!(
            store.path_for(&fingerprint()),
            PathBuf::from("/data/files/cached_b94d27b9.pdf")
        );
    }

    #[test]
    fn test_path_for_is_idempotent() {
        let store = CacheStore::new("/data/files");
        let a = store.path_for(&fingerprint());
        let b = store.path_for(&fingerprint());
        assert_eq!(a.as_os_str().as_encoded_bytes(), b.as_os_str().as_encoded_bytes());
    }

    #[test]
    fn test_custom_naming() {
        let store = CacheStore::new("/tmp").with_prefix("upd-").with_extension("bin");
        assert_eq!(store.path_for(&fingerprint()), PathBuf::from("/tmp/upd-b94d27b9.bin"));
    }

    #[test]
    fn test_exists_requires_regular_file() {
        let dir = tempdir().unwrap();
        let store = CacheStore::new(dir.path());
        let path = store.path_for(&fingerprint());

        assert!(!store.exists(&path));

        std::fs::create_dir(&path).unwrap();
        assert!(!store.exists(&path));

        std::fs::remove_dir(&path).unwrap();
        std::fs::write(&path, b"pdf").unwrap();
        assert!(store.exists(&path));
    }
}
