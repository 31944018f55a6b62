//! Expense API endpoints.

use std::collections::BTreeMap;

use api_types::expense::{ExpenseNew, ExpenseView, SplitKind, SplitView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use engine::{ExpenseRecord, MoneyCents, SplitPolicy};

use crate::{ServerError, server::ServerState};

pub(crate) fn expense_view(record: &ExpenseRecord) -> ExpenseView {
    ExpenseView {
        id: record.id,
        group_id: record.group_id,
        description: record.description.clone(),
        amount_minor: record.amount.cents(),
        paid_by: record.paid_by,
        split: match record.policy {
            SplitPolicy::Equal => SplitKind::Equal,
            SplitPolicy::Percentage(_) => SplitKind::Percentage,
        },
        splits: record
            .splits
            .iter()
            .map(|split| SplitView {
                member_id: split.member_id,
                amount_minor: split.amount.cents(),
            })
            .collect(),
        created_at: record.created_at,
    }
}

/// Converts the wire payload into the closed policy variant, exactly once at
/// the boundary.
fn split_policy(payload: &ExpenseNew) -> Result<SplitPolicy, ServerError> {
    match payload.split {
        SplitKind::Equal => {
            if payload.weights.is_some() {
                return Err(ServerError::Generic(
                    "weights only apply to percentage splits".to_string(),
                ));
            }
            Ok(SplitPolicy::Equal)
        }
        SplitKind::Percentage => {
            let weights = payload.weights.as_ref().ok_or_else(|| {
                ServerError::Generic("percentage splits require weights".to_string())
            })?;

            let map: BTreeMap<Uuid, u32> = weights
                .iter()
                .map(|w| (w.member_id, w.weight_bp))
                .collect();
            if map.len() != weights.len() {
                return Err(ServerError::Generic(
                    "duplicate member in weights".to_string(),
                ));
            }
            Ok(SplitPolicy::Percentage(map))
        }
    }
}

/// Handle requests for recording a new expense.
pub async fn create(
    Path(group_id): Path<Uuid>,
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseNew>,
) -> Result<(StatusCode, Json<ExpenseView>), ServerError> {
    let policy = split_policy(&payload)?;

    let mut engine = state.engine.write().await;
    let record = engine.create_expense(
        group_id,
        &payload.description,
        MoneyCents::new(payload.amount_minor),
        payload.paid_by,
        policy,
        payload.participants.clone(),
    )?;

    Ok((StatusCode::CREATED, Json(expense_view(&record))))
}

/// Handle requests for listing a group's expenses in insertion order.
pub async fn list(
    Path(group_id): Path<Uuid>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    let engine = state.engine.read().await;
    let expenses = engine.expenses_of(group_id)?;
    Ok(Json(expenses.iter().map(expense_view).collect()))
}
