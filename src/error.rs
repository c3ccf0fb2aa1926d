use std::path::PathBuf;
use thiserror::Error;

/// The main error type for yolo-viewer operations.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(
        "Dataset directory '{}' was not found. Set DATASET_DIR or create the default ./dataset folder.",
        path.display()
    )]
    DatasetNotFound { path: PathBuf },

    #[error("Images directory '{}' is missing.", path.display())]
    ImagesDirMissing { path: PathBuf },

    #[error("Labels directory '{}' is missing.", path.display())]
    LabelsDirMissing { path: PathBuf },

    #[error("Classes file '{}' is missing.", path.display())]
    ClassesFileMissing { path: PathBuf },

    #[error("No classes defined in {}.", path.display())]
    EmptyClassList { path: PathBuf },

    #[error("Image '{image_id}' not found in {}.", images_dir.display())]
    ImageNotFound {
        image_id: String,
        images_dir: PathBuf,
    },

    #[error("Label file '{}' not found.", path.display())]
    LabelFileNotFound { path: PathBuf },

    #[error("Label file '{}' is not valid UTF-8: {source}", path.display())]
    LabelFileEncoding {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("Invalid label line at {}:{line} → '{content}'.", path.display())]
    MalformedLabelLine {
        path: PathBuf,
        line: usize,
        content: String,
    },

    #[error("Invalid numeric values at {}:{line} → '{content}'", path.display())]
    InvalidNumericValue {
        path: PathBuf,
        line: usize,
        content: String,
    },

    #[error("Invalid confidence at {}:{line} → '{content}'", path.display())]
    InvalidConfidence {
        path: PathBuf,
        line: usize,
        content: String,
    },

    #[error("Failed to read image dimensions from {}: {source}", path.display())]
    ImageDimensionRead {
        path: PathBuf,
        #[source]
        source: imagesize::ImageError,
    },

    #[error("Failed to serialize response: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to start HTTP server on {address}: {source}")]
    ServerStart {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

impl ViewerError {
    /// HTTP status this error maps to when it escapes a request handler.
    ///
    /// Lookup misses are 404, bad label content is 400, and everything else
    /// (including classes-file problems) is an internal error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ImageNotFound { .. } | Self::LabelFileNotFound { .. } => 404,
            Self::LabelFileEncoding { .. }
            | Self::MalformedLabelLine { .. }
            | Self::InvalidNumericValue { .. }
            | Self::InvalidConfidence { .. } => 400,
            _ => 500,
        }
    }
}
