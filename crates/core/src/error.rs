use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuizReelError {
    #[error("Missing API key: {env_var} environment variable is not set")]
    MissingApiKey { env_var: String },

    #[error("Missing configuration: {env_var} environment variable is not set")]
    MissingConfig { env_var: String },

    #[error("Lookup on {table} failed: {reason}")]
    LookupFailed { table: String, reason: String },

    #[error("Malformed {table} record: {reason}")]
    MalformedRecord { table: String, reason: String },

    #[error("No questions found for course {course_id}")]
    NoQuestions { course_id: String },

    #[error("Script generation failed: {reason}")]
    GenerationFailed { reason: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl QuizReelError {
    /// True for the "no content" outcome, as opposed to a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, QuizReelError::NoQuestions { .. })
    }
}

pub type Result<T> = std::result::Result<T, QuizReelError>;
