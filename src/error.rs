use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    /// The response did not carry a secondary signature matching any configured key.
    /// Nothing in such a response may be trusted or recorded.
    #[error("Invalid signature: response is not authentic")]
    InvalidSignature,
    #[error("Missing response field: {0}")]
    MissingField(&'static str),
    #[error("Malformed field '{field}': {reason}")]
    Malformed { field: &'static str, reason: String },
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Callback body error: {0}")]
    UrlEncodedError(#[from] serde_urlencoded::de::Error),
}

impl GatewayError {
    /// True when the error is a signature failure.
    ///
    /// Any other error (a missing or malformed field, for instance) is not a
    /// signature failure, but the response was not authenticated either and
    /// must not be recorded.
    pub fn is_untrusted(&self) -> bool {
        matches!(self, GatewayError::InvalidSignature)
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
