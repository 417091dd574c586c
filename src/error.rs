use std::path::PathBuf;

pub type SegprepResult<T> = Result<T, SegprepError>;

#[derive(thiserror::Error, Debug)]
pub enum SegprepError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("failed to decode image '{path}'")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image '{0}' has no alpha channel")]
    MissingAlpha(PathBuf),

    #[error("background pool '{0}' contains no images")]
    EmptyPool(PathBuf),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SegprepError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn decode(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Decode {
            path: path.into(),
            source,
        }
    }

    /// Per-file data errors the batch driver skips over; everything else
    /// aborts the run.
    pub fn is_data_error(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::MissingAlpha(_))
    }
}
