use std::path::PathBuf;

/// Failures surfaced by image loading and detection
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    /// The image path does not exist.
    #[error("image not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file exists but could not be opened.
    #[error("failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file contents are not a decodable image.
    #[error("failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The image has zero width or height.
    #[error("image is empty")]
    EmptyImage,
}
