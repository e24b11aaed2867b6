/// Error taxonomy for a pipeline run
///
/// Every variant carries a ready-to-show message so errors can travel
/// inside iced messages (which must be `Clone`) and be shown verbatim in a
/// dialog.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// URL or destination path missing
    #[error("{0}")]
    InputValidation(String),

    /// A run is already in flight
    #[error("{0}")]
    Busy(String),

    /// Connection failure or non-2xx status
    #[error("{0}")]
    Network(String),

    /// Bytes are not a supported image
    #[error("{0}")]
    Decode(String),

    /// Destination could not be created or written
    #[error("{0}")]
    Write(String),

    /// The saved file could not be reopened or thumbnailed
    #[error("{0}")]
    Preview(String),
}

impl PipelineError {
    /// Dialog title for this error
    pub fn title(&self) -> &'static str {
        match self {
            PipelineError::InputValidation(_) => "Input Error",
            PipelineError::Busy(_) => "Busy",
            _ => "Error",
        }
    }

    /// Input problems are warnings, everything else is an error
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            PipelineError::InputValidation(_) | PipelineError::Busy(_)
        )
    }
}

impl From<reqwest::Error> for PipelineError {
    fn from(err: reqwest::Error) -> Self {
        PipelineError::Network(err.to_string())
    }
}

/// Result type alias for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
