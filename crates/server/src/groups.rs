//! Group API endpoints.

use api_types::group::{GroupDetails, GroupNew, GroupView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use engine::{Engine, Group};

use crate::{ServerError, expenses::expense_view, server::ServerState, users::user_view};

pub(crate) fn group_view(engine: &Engine, group: &Group) -> Result<GroupView, ServerError> {
    let members = engine
        .members_of(group.id)?
        .into_iter()
        .map(user_view)
        .collect();

    Ok(GroupView {
        id: group.id,
        name: group.name.clone(),
        created_at: group.created_at,
        members,
    })
}

pub(crate) fn group_details(engine: &Engine, group: &Group) -> Result<GroupDetails, ServerError> {
    let view = group_view(engine, group)?;

    Ok(GroupDetails {
        id: view.id,
        name: view.name,
        created_at: view.created_at,
        members: view.members,
        expenses: group.ledger().expenses().iter().map(expense_view).collect(),
        total_spent_minor: group.ledger().total_spent()?.cents(),
    })
}

/// Handle requests for creating a new group.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<GroupNew>,
) -> Result<(StatusCode, Json<GroupView>), ServerError> {
    let mut engine = state.engine.write().await;
    let group = engine.create_group(&payload.name, &payload.member_ids)?;
    let view = group_view(&engine, &group)?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// Handle requests for listing all groups with their details.
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<GroupDetails>>, ServerError> {
    let engine = state.engine.read().await;
    let details = engine
        .groups()
        .into_iter()
        .map(|group| group_details(&engine, group))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(details))
}

/// Handle requests for one group by id.
pub async fn get(
    Path(group_id): Path<Uuid>,
    State(state): State<ServerState>,
) -> Result<Json<GroupDetails>, ServerError> {
    let engine = state.engine.read().await;
    let group = engine.group(group_id)?;
    Ok(Json(group_details(&engine, group)?))
}
