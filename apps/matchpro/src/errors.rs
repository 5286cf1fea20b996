use thiserror::Error;

/// Message shown for every provider-side failure. Causes are logged, never shown.
pub const ANALYSIS_FAILED_MESSAGE: &str = "Analysis failed. Please check your API key and try again.";

/// Application-level error type.
/// `user_message` is the only text that reaches the terminal; internal detail
/// is logged by `report` instead.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("File read error: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Provider credential is not configured")]
    MissingCredential,

    #[error("LLM error: {0}")]
    Llm(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    /// Validation errors are actionable by the user; everything else is not.
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }

    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::FileRead(_) => "Failed to read file.".to_string(),
            AppError::MissingCredential => {
                "API key is missing. Set GEMINI_API_KEY or API_KEY.".to_string()
            }
            AppError::Llm(_) => ANALYSIS_FAILED_MESSAGE.to_string(),
        }
    }

    /// Logs the underlying cause at the appropriate level and returns the
    /// message to show the user.
    pub fn report(&self) -> String {
        match self {
            AppError::Validation(msg) => tracing::warn!("Validation failed: {msg}"),
            AppError::FileRead(e) => tracing::error!("File read error: {e}"),
            AppError::MissingCredential => tracing::error!("No provider API key configured"),
            AppError::Llm(msg) => tracing::error!("LLM error: {msg}"),
        }
        self.user_message()
    }
}
