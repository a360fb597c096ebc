use crate::application::ports::store_error::StoreError;

/// Credential failures. Display strings are shown to clients as-is.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("Access denied. No token provided.")]
    MissingToken,
    #[error("Invalid or expired token.")]
    InvalidToken,
    /// Unknown phone number and wrong password share this variant.
    #[error("Invalid credentials.")]
    InvalidCredentials,
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    /// Store or engine fault. Never shown to clients.
    #[error("Internal server error.")]
    Internal(#[source] anyhow::Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ConstraintViolation(reason) => {
                tracing::debug!(%reason, "unhandled constraint violation");
                AppError::conflict("Request conflicts with existing data.")
            }
            StoreError::Storage(source) => AppError::Internal(source),
        }
    }
}
