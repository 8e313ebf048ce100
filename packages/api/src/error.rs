use store::AuthError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<ApiError> for AuthError {
    fn from(value: ApiError) -> Self {
        match value {
            ApiError::Http(e) => AuthError::Network(e.to_string()),
            ApiError::Status { status, message } => AuthError::Rejected { status, message },
            ApiError::Decode(e) => AuthError::InvalidResponse(e.to_string()),
        }
    }
}
