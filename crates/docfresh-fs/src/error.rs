use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to create directory {path}")]
    CreateDir {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to stage file in {path}")]
    Stage {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to commit staged file to {path}")]
    Commit {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("destination {0} has no parent directory")]
    NoParent(PathBuf),

    #[error("destination {0} has no file name")]
    NoFileName(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
