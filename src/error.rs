use std::path::PathBuf;
use thiserror::Error;

/// Failures while turning a file into canvas pixels. These never reach the
/// drawing core; the file-handling layer logs them and drops the load.
#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("unsupported file type: {0}")]
    UnsupportedType(String),
}
