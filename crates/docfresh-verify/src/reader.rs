use std::io::{ErrorKind, Read};

use crate::{Fingerprint, HashError, Hasher, Result, Sha256Hasher};

/// Chunk size used when streaming documents through the hasher.
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// Fingerprint the full content of `reader` using [`DEFAULT_CHUNK_SIZE`] chunks.
pub fn hash_reader<R: Read>(reader: R) -> Result<Fingerprint> {
    hash_reader_with_chunk_size(reader, DEFAULT_CHUNK_SIZE)
}

/// Fingerprint the full content of `reader`, reading `chunk_size` bytes at a time.
///
/// Any read error other than [`ErrorKind::Interrupted`] aborts hashing; no
/// fingerprint is produced for partially read input.
pub fn hash_reader_with_chunk_size<R: Read>(mut reader: R, chunk_size: usize) -> Result<Fingerprint> {
    if chunk_size == 0 {
        return Err(HashError::ZeroChunkSize);
    }

    let mut hasher = Sha256Hasher::new();
    let mut buf = vec![0u8; chunk_size];
    let mut bytes_read = 0u64;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(source) => return Err(HashError::Read { bytes_read, source }),
        };
        hasher.update(&buf[..n]);
        bytes_read += n as u64;
    }

    tracing::debug!(bytes = bytes_read, "hashed input");

    // A SHA-256 digest is always 32 bytes.
    Fingerprint::from_digest(&hasher.finalize()).map_err(|e| HashError::Read {
        bytes_read,
        source: std::io::Error::new(ErrorKind::InvalidData, e),
    })
}
