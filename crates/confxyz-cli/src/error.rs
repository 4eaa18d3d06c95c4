use confxyz::XyzError;
use confxyz::workflows::dedup::DedupError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: XyzError,
    },

    #[error(transparent)]
    Dedup(#[from] DedupError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    pub fn file_parsing(path: impl Into<PathBuf>, source: XyzError) -> Self {
        Self::FileParsing {
            path: path.into(),
            source,
        }
    }
}
