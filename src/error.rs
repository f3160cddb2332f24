use thiserror::Error;

/// Main error type for trip planning, budget tracking and the oracles
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Invalid {field}: {message}")]
    InvalidInput {
        field: &'static str,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Oracle request timed out: {0}")]
    Timeout(String),

    #[error("Rate limit exceeded. Please try again in {retry_after}s")]
    RateLimit { retry_after: u64 },

    #[error("AI service quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Oracle returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Malformed oracle response: {0}")]
    MalformedResponse(String),

    #[error("Oracle response failed validation: {0}")]
    SchemaViolation(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PlannerError>;

impl PlannerError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        PlannerError::InvalidInput {
            field,
            message: message.into(),
        }
    }

    /// True for input problems the user fixes by editing the form.
    pub fn is_validation(&self) -> bool {
        matches!(self, PlannerError::InvalidInput { .. })
    }

    /// True when repeating the same action by hand may succeed.
    ///
    /// Nothing in the crate retries on its own; this only drives the hint shown to the user.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PlannerError::Http(_)
                | PlannerError::Timeout(_)
                | PlannerError::RateLimit { .. }
                | PlannerError::QuotaExceeded(_)
                | PlannerError::MalformedResponse(_)
                | PlannerError::SchemaViolation(_)
        ) || matches!(self, PlannerError::Api { status, .. } if *status >= 500)
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            PlannerError::InvalidInput { .. } => "INVALID_INPUT",
            PlannerError::Config(_) => "CONFIG_ERROR",
            PlannerError::Serialization(_) => "SERIALIZATION_ERROR",
            PlannerError::Http(_) => "HTTP_ERROR",
            PlannerError::Timeout(_) => "TIMEOUT_ERROR",
            PlannerError::RateLimit { .. } => "RATE_LIMIT_ERROR",
            PlannerError::QuotaExceeded(_) => "QUOTA_EXCEEDED",
            PlannerError::Api { .. } => "API_ERROR",
            PlannerError::MalformedResponse(_) => "MALFORMED_RESPONSE",
            PlannerError::SchemaViolation(_) => "SCHEMA_VIOLATION",
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        let mut payload = serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "retryable": self.is_retryable()
            }
        });
        if let PlannerError::InvalidInput { field, .. } = self {
            payload["error"]["field"] = serde_json::json!(field);
        }
        payload
    }
}
