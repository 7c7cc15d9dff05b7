use axum::{extract::Path, Json};
use chrono::Utc;
use shared::{
    api::{
        error::ServerError, payloads::exercises::AddExercise, response_errors::AddExerciseError,
    },
    model::{Exercise, UserId},
};
use tracing::{info, instrument};

use super::Payload;
use crate::db::DatabaseConnection;

#[instrument(skip(conn))]
pub async fn add_exercise(
    DatabaseConnection(conn): DatabaseConnection,
    Path(id): Path<String>,
    Payload(payload): Payload<AddExercise>,
) -> Result<Json<Exercise>, ServerError<AddExerciseError>> {
    let user_id: UserId = id.parse().map_err(|_| AddExerciseError::InvalidUserId)?;
    let new_exercise = payload.into_new_exercise(user_id, Utc::now().date_naive())?;

    let exercise = conn
        .interact(move |conn| Exercise::create_for_user(conn, new_exercise))
        .await??
        .ok_or(AddExerciseError::UserNotFound)?;

    info!(id = exercise.id, user_id = exercise.user_id, "Logged exercise");
    Ok(Json(exercise))
}
