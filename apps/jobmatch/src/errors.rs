use thiserror::Error;

/// Library-level error type.
///
/// Only `Configuration` is fatal. `Input` is recovered inside the profile
/// builder and `Extraction` is isolated to a single posting by the pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    #[error("Input error: {0}")]
    Input(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Extraction failed for posting '{posting_id}': {reason}")]
    Extraction { posting_id: String, reason: String },
}

impl MatchError {
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn extraction(posting_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Extraction {
            posting_id: posting_id.into(),
            reason: reason.into(),
        }
    }

    /// Short machine-readable code, stable across releases.
    pub fn code(&self) -> &'static str {
        match self {
            MatchError::Input(_) => "INPUT_ERROR",
            MatchError::Configuration(_) => "CONFIGURATION_ERROR",
            MatchError::Extraction { .. } => "EXTRACTION_FAILURE",
        }
    }

    /// Whether the error should abort the caller rather than degrade.
    pub fn is_fatal(&self) -> bool {
        matches!(self, MatchError::Configuration(_))
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;
