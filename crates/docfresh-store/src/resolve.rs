use std::path::PathBuf;

use docfresh_fetch::Index;
use docfresh_verify::Fingerprint;

use crate::CacheStore;

/// Which document to serve for a fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A replacement is already on disk.
    UseCache(PathBuf),

    /// A replacement exists remotely and should be fetched into `destination`.
    NeedsDownload { url: String, destination: PathBuf },

    /// No newer version is known.
    UseOriginal,
}

/// Decide between the cached replacement, a download, and the original.
///
/// Only the cache existence check touches the filesystem; a fingerprint
/// missing from the index resolves to [`Resolution::UseOriginal`] without
/// consulting the cache at all.
pub fn resolve(fingerprint: &Fingerprint, index: &Index, cache: &CacheStore) -> Resolution {
    let Some(url) = index.get(fingerprint.as_str()) else {
        tracing::debug!(%fingerprint, "no update listed");
        return Resolution::UseOriginal;
    };

    let path = cache.path_for(fingerprint);
    if cache.exists(&path) {
        tracing::debug!(%fingerprint, path = %path.display(), "update already cached");
        Resolution::UseCache(path)
    } else {
        tracing::debug!(%fingerprint, url, "update needs download");
        Resolution::NeedsDownload {
            url:         url.to_string(),
            destination: path,
        }
    }
}
