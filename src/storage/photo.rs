use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use futures::future::try_join_all;
use mime_guess::mime;
use tokio::runtime::{Builder, Runtime};

use super::error::StorageError;
use crate::model::Photo;

/// Reads an image file and embeds it as a `data:` URL.
///
/// The MIME type is guessed from the extension; anything that is not an
/// `image/*` type is rejected before the file is opened.
pub async fn read_photo(path: &Path) -> Result<Photo, StorageError> {
    let mime_type = mime_guess::from_path(path)
        .first()
        .filter(|m| m.type_() == mime::IMAGE)
        .ok_or_else(|| StorageError::NotAnImage(path.to_path_buf()))?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| StorageError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let encoded = STANDARD.encode(bytes);
    Ok(Photo::new(format!("data:{mime_type};base64,{encoded}")))
}

/// Reads several image files concurrently.
///
/// Photos come back in the order of `paths`, regardless of which read
/// finishes first. If any read fails, no photos are returned.
pub async fn read_photos(paths: &[PathBuf]) -> Result<Vec<Photo>, StorageError> {
    try_join_all(paths.iter().map(|p| read_photo(p))).await
}

/// Splits user input into file paths.
///
/// Paths are separated by `;`. Blank entries are skipped and a leading `~/`
/// expands to the home directory.
pub fn parse_path_list(input: &str) -> Vec<PathBuf> {
    input
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(expand_home)
        .collect()
}

fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

/// Drives photo reads from the synchronous UI loop.
///
/// Owns a single-threaded runtime; each [`load`](Self::load) call blocks
/// until the whole batch is read.
pub struct PhotoLoader {
    runtime: Runtime,
}

impl PhotoLoader {
    pub fn new() -> Result<Self, StorageError> {
        let runtime = Builder::new_current_thread().build()?;
        Ok(Self { runtime })
    }

    /// Reads every file in `paths`, in order.
    pub fn load(&self, paths: &[PathBuf]) -> Result<Vec<Photo>, StorageError> {
        let photos = self.runtime.block_on(read_photos(paths))?;
        tracing::debug!(count = photos.len(), "photos read from disk");
        Ok(photos)
    }
}
