//! User API endpoints.

use api_types::user::{UserNew, UserView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

pub(crate) fn user_view(member: &engine::Member) -> UserView {
    UserView {
        id: member.id,
        name: member.name.clone(),
        email: member.email.clone(),
        created_at: member.created_at,
    }
}

/// Handle requests for registering a new user.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UserNew>,
) -> Result<(StatusCode, Json<UserView>), ServerError> {
    let mut engine = state.engine.write().await;
    let member = engine.create_user(&payload.name, &payload.email)?;
    Ok((StatusCode::CREATED, Json(user_view(&member))))
}

/// Handle requests for listing all users.
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<UserView>>, ServerError> {
    let engine = state.engine.read().await;
    Ok(Json(engine.users().into_iter().map(user_view).collect()))
}

/// Handle requests for one user by id.
pub async fn get(
    Path(user_id): Path<Uuid>,
    State(state): State<ServerState>,
) -> Result<Json<UserView>, ServerError> {
    let engine = state.engine.read().await;
    Ok(Json(user_view(engine.user(user_id)?)))
}
