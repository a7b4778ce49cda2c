//! Error handling for Entrain
//!
//! Composition-stage failures are wrapped in [`EntrainError::Stage`] so the
//! caller always knows which step of the pipeline went wrong.

use thiserror::Error;

/// Result type alias for Entrain operations
pub type Result<T> = std::result::Result<T, EntrainError>;

/// Stages of the composition pipeline, used for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeStage {
    /// Binaural tone generation and stereo pairing
    BinauralMix,
    /// Speech synthesis via the external adapter
    SpeechSynthesis,
    /// Looping/trimming the speech track to the base duration
    SpeechLoop,
}

impl std::fmt::Display for ComposeStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ComposeStage::BinauralMix => "binaural mix",
            ComposeStage::SpeechSynthesis => "speech synthesis",
            ComposeStage::SpeechLoop => "speech loop",
        };
        write!(f, "{}", name)
    }
}

/// Main error type for Entrain operations
#[derive(Error, Debug)]
pub enum EntrainError {
    #[error("Invalid parameter: {reason}")]
    InvalidParameter { reason: String },

    #[error("Speech adapter error: {reason}")]
    Adapter {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Invalid audio format: {reason}")]
    Format {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Unsupported audio format: {format}")]
    UnsupportedFormat { format: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Composition failed at {stage} stage")]
    Stage {
        stage: ComposeStage,
        #[source]
        source: Box<EntrainError>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EntrainError {
    /// Build an `InvalidParameter` error from any displayable reason
    pub fn invalid_parameter(reason: impl Into<String>) -> Self {
        EntrainError::InvalidParameter {
            reason: reason.into(),
        }
    }

    /// Build an `Adapter` error without an underlying source
    pub fn adapter(reason: impl Into<String>) -> Self {
        EntrainError::Adapter {
            reason: reason.into(),
            source: None,
        }
    }

    /// Wrap an error with the composition stage it occurred in
    pub fn stage(stage: ComposeStage, source: EntrainError) -> Self {
        EntrainError::Stage {
            stage,
            source: Box::new(source),
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            EntrainError::InvalidParameter { .. } => "INVALID_PARAMETER",
            EntrainError::Adapter { .. } => "ADAPTER_ERROR",
            EntrainError::Format { .. } => "FORMAT_ERROR",
            EntrainError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            EntrainError::FileNotFound { .. } => "FILE_NOT_FOUND",
            EntrainError::Stage { .. } => "STAGE_FAILED",
            EntrainError::Io(_) => "IO_ERROR",
            EntrainError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// The stage this error occurred in, if it is a stage failure
    pub fn failed_stage(&self) -> Option<ComposeStage> {
        match self {
            EntrainError::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = EntrainError::invalid_parameter("negative frequency");
        assert_eq!(err.error_code(), "INVALID_PARAMETER");

        let err = EntrainError::adapter("service unreachable");
        assert_eq!(err.error_code(), "ADAPTER_ERROR");
    }

    #[test]
    fn test_stage_wrapping() {
        let inner = EntrainError::adapter("timed out");
        let err = EntrainError::stage(ComposeStage::SpeechSynthesis, inner);

        assert_eq!(err.failed_stage(), Some(ComposeStage::SpeechSynthesis));
        assert!(err.to_string().contains("speech synthesis"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
