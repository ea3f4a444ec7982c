use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Unexpected error: {message}")]
    Unexpected { message: String },
}

impl AnalysisError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        AnalysisError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        AnalysisError::Unexpected {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AnalysisError::InvalidInput { .. } => "INVALID_INPUT",
            AnalysisError::Unexpected { .. } => "UNEXPECTED",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AnalysisError::InvalidInput { message } | AnalysisError::Unexpected { message } => {
                message
            }
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, AnalysisError::InvalidInput { .. })
    }
}
