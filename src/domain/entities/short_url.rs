//! ShortUrl entity representing a path-to-destination mapping.

use serde::Serialize;

/// A shortened URL: the short `path` token and the absolute URL it forwards to.
///
/// The path is the unique identifier of the mapping. Both fields are checked
/// by [`ShortUrl::validate`](crate::domain::validation) before any write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortUrl {
    pub path: String,
    pub destination: String,
}

impl ShortUrl {
    /// Creates a new ShortUrl instance.
    pub fn new(path: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            destination: destination.into(),
        }
    }
}
