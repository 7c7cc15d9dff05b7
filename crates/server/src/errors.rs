use std::fmt;

use deadpool_sqlite::HookError;

/// Failure while preparing a pooled connection. Only lives long enough to
/// be turned into the pool's `HookError`
pub struct AppError {
    pub message: String,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AppError: {}", self.message)
    }
}

// Lets `?` collect any error type while configuring a connection
impl<E> From<E> for AppError
where
    E: Into<Box<dyn std::error::Error>>,
{
    #[track_caller]
    fn from(err: E) -> Self {
        AppError {
            message: format!("Connection setup failed: {:?}", err.into()),
        }
    }
}

impl From<AppError> for HookError {
    fn from(err: AppError) -> Self {
        Self::Message(err.to_string())
    }
}
