use std::path::PathBuf;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// An I/O error not tied to a specific file (e.g. starting the runtime).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A file could not be read.
    #[error("could not read {}: {source}", path.display())]
    Read {
        /// The file that failed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file extension does not identify an image type.
    #[error("not an image file: {}", .0.display())]
    NotAnImage(PathBuf),

    /// The platform does not provide a data directory.
    #[error("could not determine XDG data directory")]
    NoDataDir,
}
