use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::error::{FromStoreError, ServerError};
use crate::model::StoreError;

macro_rules! response_error {
    ($name:ident {
        $(
            #[code($variant_code:expr)]
            #[error($message:literal)]
            $variant:ident
            $({ $($var_struct_body_tt:tt)* })?
        ,)*
    }) => {

        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
        pub enum $name {
            $(
                #[error($message)]
                $variant $({
                    $($var_struct_body_tt)*
                })?,
            )*
        }

        impl $name {
            pub fn code(&self) -> StatusCode {
                match self {
                    $( $name::$variant { .. } => $variant_code, )*
                }
            }
        }

        impl From<$name> for ServerError<$name> {
            fn from(inner: $name) -> Self {
                let code = inner.code();
                Self::Inner { code, inner }
            }
        }
    };
}

response_error!(CreateUserError {
    #[code(StatusCode::BAD_REQUEST)]
    #[error("username required")]
    UsernameRequired,
    #[code(StatusCode::CONFLICT)]
    #[error("username already exists")]
    UsernameUnavailable,
});

impl FromStoreError for CreateUserError {
    fn from_store_error(err: &StoreError) -> Option<Self> {
        match err {
            StoreError::DuplicateUsername { .. } => Some(Self::UsernameUnavailable),
            _ => None,
        }
    }
}

response_error!(FetchUserError {
    #[code(StatusCode::BAD_REQUEST)]
    #[error("invalid user id")]
    InvalidUserId,
    #[code(StatusCode::NOT_FOUND)]
    #[error("user not found")]
    UserNotFound,
});

impl FromStoreError for FetchUserError {}

response_error!(AddExerciseError {
    #[code(StatusCode::BAD_REQUEST)]
    #[error("invalid user id")]
    InvalidUserId,
    #[code(StatusCode::NOT_FOUND)]
    #[error("user not found")]
    UserNotFound,
    #[code(StatusCode::BAD_REQUEST)]
    #[error("description is required")]
    DescriptionMissing,
    #[code(StatusCode::BAD_REQUEST)]
    #[error("description must be a string")]
    DescriptionNotString,
    #[code(StatusCode::BAD_REQUEST)]
    #[error("description required")]
    DescriptionBlank,
    #[code(StatusCode::BAD_REQUEST)]
    #[error("description too long")]
    DescriptionTooLong,
    #[code(StatusCode::BAD_REQUEST)]
    #[error("duration is required")]
    DurationMissing,
    #[code(StatusCode::BAD_REQUEST)]
    #[error("duration must be a non-negative integer")]
    DurationInvalid,
    #[code(StatusCode::BAD_REQUEST)]
    #[error("invalid date format")]
    InvalidDate,
});

impl FromStoreError for AddExerciseError {}

response_error!(LogError {
    #[code(StatusCode::BAD_REQUEST)]
    #[error("invalid user id")]
    InvalidUserId,
    #[code(StatusCode::NOT_FOUND)]
    #[error("user not found")]
    UserNotFound,
    #[code(StatusCode::BAD_REQUEST)]
    #[error("invalid from date format")]
    InvalidFromDate,
    #[code(StatusCode::BAD_REQUEST)]
    #[error("invalid to date format")]
    InvalidToDate,
    #[code(StatusCode::BAD_REQUEST)]
    #[error("invalid limit format")]
    InvalidLimit,
    #[code(StatusCode::BAD_REQUEST)]
    #[error("invalid date range")]
    InvalidDateRange,
});

impl FromStoreError for LogError {
    fn from_store_error(err: &StoreError) -> Option<Self> {
        match err {
            StoreError::InvalidLimit { .. } => Some(Self::InvalidLimit),
            _ => None,
        }
    }
}
