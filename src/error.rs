use std::path::PathBuf;

/// Errors returned by the asset helpers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No file exists at the resolved asset path.
    #[error("asset not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// An argument is outside the range the operation can handle.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to decode image: {0}")]
    Decode(#[from] ::image::ImageError),

    #[error("failed to parse font {}: {message}", path.display())]
    Font { path: PathBuf, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("global assets not initialized")]
    NotInitialized,

    #[error("global assets already initialized")]
    AlreadyInitialized,
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    /// Maps an io error on `path` to [`Error::NotFound`] when the file is missing.
    pub(crate) fn from_io(path: &std::path::Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Error::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Error::Io(err)
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
