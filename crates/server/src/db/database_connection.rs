use std::ops::Deref;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use deadpool_sqlite::{Object, Pool};
use shared::api::error::{Nothing, ServerError};
use tracing::warn;

/// One pooled connection, checked out for the duration of a request.
///
/// Failing to get one is answered with the usual JSON 500 body.
#[derive(Debug)]
pub struct DatabaseConnection(pub Object);

impl Deref for DatabaseConnection {
    type Target = Object;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for DatabaseConnection
where
    S: Send + Sync,
    Pool: FromRef<S>,
{
    type Rejection = ServerError<Nothing>;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pool = Pool::from_ref(state);

        let conn = pool.get().await.map_err(|e| {
            warn!(status = ?pool.status(), "No database connection available");
            ServerError::from(e)
        })?;

        Ok(DatabaseConnection(conn))
    }
}
