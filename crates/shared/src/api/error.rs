use std::{convert::Infallible, error::Error, fmt};

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use deadpool_sqlite::{InteractError, PoolError};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::model::StoreError;

/// Error type for routes that have no failure modes of their own
pub type Nothing = Infallible;

/// Body of every error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new<S: Into<String>>(error: S) -> Self {
        Self { error: error.into() }
    }
}

#[derive(Debug)]
pub enum ServerError<T> {
    /// A failure the route expects and reports to the client as is
    Inner { code: StatusCode, inner: T },
    /// Anything else. The message is logged, never sent
    Other { message: String },
}

#[macro_export]
macro_rules! other_error {
    ($($arg:tt)*) => {
        $crate::api::error::ServerError::Other { message: format!($($arg)*) }
    };
}

impl<T: fmt::Display> fmt::Display for ServerError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Inner { code, inner } => write!(f, "{code}: {inner}"),
            ServerError::Other { message } => write!(f, "{message}"),
        }
    }
}

impl<T: Error> Error for ServerError<T> {}

impl<T: fmt::Display> IntoResponse for ServerError<T> {
    fn into_response(self) -> Response {
        match self {
            ServerError::Inner { code, inner } => {
                (code, Json(ErrorBody::new(inner.to_string()))).into_response()
            }
            ServerError::Other { message } => {
                error!(message, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody::new("internal server error")),
                )
                    .into_response()
            }
        }
    }
}

impl From<Nothing> for ServerError<Nothing> {
    fn from(inner: Nothing) -> Self {
        match inner {}
    }
}

impl<T> From<rusqlite::Error> for ServerError<T> {
    fn from(err: rusqlite::Error) -> Self {
        other_error!("rusqlite: {err:?}")
    }
}

impl<T> From<InteractError> for ServerError<T> {
    fn from(err: InteractError) -> Self {
        other_error!("interact: {err:?}")
    }
}

impl<T> From<PoolError> for ServerError<T> {
    fn from(err: PoolError) -> Self {
        other_error!("pool: {err:?}")
    }
}

/// Lets a route's error type claim the store failures it knows how to
/// report. Unclaimed failures become `ServerError::Other`
pub trait FromStoreError: Sized {
    fn from_store_error(_err: &StoreError) -> Option<Self> {
        None
    }
}

impl FromStoreError for Nothing {}

impl<T> From<StoreError> for ServerError<T>
where
    T: FromStoreError,
    ServerError<T>: From<T>,
{
    fn from(err: StoreError) -> Self {
        match T::from_store_error(&err) {
            Some(inner) => inner.into(),
            None => other_error!("store: {err:?}"),
        }
    }
}
