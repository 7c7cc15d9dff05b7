use axum::{extract::Path, http::StatusCode, Json};
use shared::{
    api::{
        error::{Nothing, ServerError},
        payloads::users::CreateUser,
        response_errors::{CreateUserError, FetchUserError},
    },
    model::{User, UserId},
};
use tracing::{info, instrument};

use super::Payload;
use crate::db::DatabaseConnection;

#[instrument(skip(conn))]
pub async fn create_user(
    DatabaseConnection(conn): DatabaseConnection,
    Payload(payload): Payload<CreateUser>,
) -> Result<(StatusCode, Json<User>), ServerError<CreateUserError>> {
    let new_user = payload.into_new_user()?;

    let user = conn
        .interact(move |conn| User::create(conn, new_user))
        .await??;

    info!(id = user.id, username = %user.username, "Registered user");
    Ok((StatusCode::CREATED, Json(user)))
}

#[instrument(skip(conn))]
pub async fn list_users(
    DatabaseConnection(conn): DatabaseConnection,
) -> Result<Json<Vec<User>>, ServerError<Nothing>> {
    let users = conn.interact(|conn| User::fetch_all(conn)).await??;
    Ok(Json(users))
}

#[instrument(skip(conn))]
pub async fn fetch_user(
    DatabaseConnection(conn): DatabaseConnection,
    Path(id): Path<String>,
) -> Result<Json<User>, ServerError<FetchUserError>> {
    let id: UserId = id.parse().map_err(|_| FetchUserError::InvalidUserId)?;

    let user = conn
        .interact(move |conn| User::fetch_by_id(conn, id))
        .await??
        .ok_or(FetchUserError::UserNotFound)?;

    Ok(Json(user))
}
