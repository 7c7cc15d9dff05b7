use std::path::Path;

use axum::{
    routing::{get, post},
    Router,
};
use shared::api::Object;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::AppState;

mod payload;
pub use payload::*;

mod users;
pub use users::*;

mod exercises;
pub use exercises::*;

mod logs;
pub use logs::*;

/// The whole http surface: the users api plus static files from `assets_dir`
/// for every other path
pub fn router(state: AppState, assets_dir: &Path) -> Router {
    Router::new()
        .route(Object::Users.path(), get(list_users).post(create_user))
        .route(Object::UserId.path(), get(fetch_user))
        .route(Object::UserExercises.path(), post(add_exercise))
        .route(Object::UserLogs.path(), get(fetch_log))
        .fallback_service(ServeDir::new(assets_dir))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
