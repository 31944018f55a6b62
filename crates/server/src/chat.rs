//! Assistant API endpoints.

use api_types::chat::{ChatQuery, ChatReply, ChatStats, RecentExpense};
use axum::{Json, extract::State};
use chrono::Utc;

use assistant::{GroupDigest, LedgerDigest};
use engine::Engine;

use crate::{ServerError, balances, server::ServerState};

const RECENT_EXPENSE_LIMIT: usize = 5;

fn chat_stats(engine: &Engine) -> ChatStats {
    ChatStats {
        total_users: engine.users().len(),
        total_groups: engine.groups().len(),
        total_expenses: engine.expense_count(),
        recent_expenses: engine
            .recent_expenses(RECENT_EXPENSE_LIMIT)
            .into_iter()
            .map(|(group_name, record)| RecentExpense {
                description: record.description.clone(),
                amount_minor: record.amount.cents(),
                group_name: group_name.to_string(),
                paid_by_name: balances::name_of(engine, record.paid_by),
                created_at: record.created_at,
            })
            .collect(),
    }
}

fn ledger_digest(engine: &Engine) -> Result<LedgerDigest, ServerError> {
    let groups = engine
        .groups()
        .into_iter()
        .map(|group| {
            let balances = balances::group_balances_response(engine, group.id)?;
            Ok(GroupDigest {
                name: group.name.clone(),
                total_spent_minor: group.ledger().total_spent()?.cents(),
                balances: balances.balances,
            })
        })
        .collect::<Result<Vec<_>, ServerError>>()?;

    Ok(LedgerDigest {
        stats: chat_stats(engine),
        groups,
    })
}

/// Handle assistant queries over the computed balance views.
pub async fn query(
    State(state): State<ServerState>,
    Json(payload): Json<ChatQuery>,
) -> Result<Json<ChatReply>, ServerError> {
    if payload.query.trim().is_empty() {
        return Err(ServerError::Generic("query cannot be empty".to_string()));
    }

    let digest = {
        let engine = state.engine.read().await;
        ledger_digest(&engine)?
    };

    // The engine lock is released before the (possibly slow) assistant call.
    let response = state.assistant.reply(&payload.query, &digest).await;

    Ok(Json(ChatReply {
        query: payload.query,
        response,
        timestamp: Utc::now(),
    }))
}

/// Handle requests for quick ledger statistics.
pub async fn stats(State(state): State<ServerState>) -> Result<Json<ChatStats>, ServerError> {
    let engine = state.engine.read().await;
    Ok(Json(chat_stats(&engine)))
}
