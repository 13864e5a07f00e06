//! Disk access: reading court photos into embeddable `data:` URLs.
//!
//! Courts themselves live only in memory; the one thing read from disk is
//! the image files an administrator attaches to a court.

mod error;
mod photo;

pub use error::StorageError;
pub use photo::{PhotoLoader, parse_path_list, read_photo, read_photos};
