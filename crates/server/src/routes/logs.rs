use axum::{
    extract::{Path, Query},
    Json,
};
use shared::{
    api::{error::ServerError, payloads::logs::LogParams, response_errors::LogError},
    model::{ExerciseLog, UserId},
};
use tracing::instrument;

use crate::db::DatabaseConnection;

#[instrument(skip(conn))]
pub async fn fetch_log(
    DatabaseConnection(conn): DatabaseConnection,
    Path(id): Path<String>,
    Query(params): Query<LogParams>,
) -> Result<Json<ExerciseLog>, ServerError<LogError>> {
    let user_id: UserId = id.parse().map_err(|_| LogError::InvalidUserId)?;
    let query = params.into_log_query()?;

    let log = conn
        .interact(move |conn| ExerciseLog::fetch(conn, user_id, &query))
        .await??
        .ok_or(LogError::UserNotFound)?;

    Ok(Json(log))
}
