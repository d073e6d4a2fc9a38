use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::shot_division::ShotDivisionError;

/// Library-wide error type for shotframe operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure outside of image persistence.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Configuration values failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Required environment variable is not set.
    #[error("Environment variable '{0}' is not set")]
    EnvironmentVariableMissing(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// A shot marker line does not carry an identifier token.
    #[error("Malformed shot header on line {line_number}: '{line}'")]
    MalformedShotHeader { line_number: usize, line: String },

    /// A shot identifier cannot be turned into a file name.
    #[error("Shot id '{id}' on line {line_number} cannot be used in a file name")]
    UnsafeShotId { line_number: usize, id: String },

    /// Text- or image-generation service failure.
    #[error("{service} service error: {message}")]
    ExternalService { service: ServiceKind, message: String, status: Option<u16> },

    /// Failure creating the output directory or writing an image.
    #[error("Failed to persist '{}': {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// External collaborator that produced an `ExternalService` error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Text,
    Image,
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceKind::Text => write!(f, "Text-generation"),
            ServiceKind::Image => write!(f, "Image-generation"),
        }
    }
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn external<S: Into<String>>(
        service: ServiceKind,
        message: S,
        status: Option<u16>,
    ) -> Self {
        AppError::ExternalService { service, message: message.into(), status }
    }

    pub fn persistence(path: impl Into<PathBuf>, source: io::Error) -> Self {
        AppError::Persistence { path: path.into(), source }
    }
}

impl From<ShotDivisionError> for AppError {
    fn from(err: ShotDivisionError) -> Self {
        match err {
            ShotDivisionError::MalformedShotHeader { line_number, line } => {
                AppError::MalformedShotHeader { line_number, line }
            }
            ShotDivisionError::UnsafeShotId { line_number, id } => {
                AppError::UnsafeShotId { line_number, id }
            }
        }
    }
}
