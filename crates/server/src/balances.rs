//! Balance API endpoints.
//!
//! These handlers reshape engine views into wire DTOs; no amounts are
//! computed here.

use api_types::balance::{
    CounterpartyView, GroupBalancesResponse, GroupNetView, MemberBalanceView, UserBalancesResponse,
};
use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use engine::{CounterpartyAmount, Engine, MemberBalance};

use crate::{ServerError, server::ServerState};

pub(crate) fn name_of(engine: &Engine, member_id: Uuid) -> String {
    engine
        .user(member_id)
        .map(|member| member.name.clone())
        .unwrap_or_else(|_| member_id.to_string())
}

fn counterparty_views(engine: &Engine, entries: &[CounterpartyAmount]) -> Vec<CounterpartyView> {
    entries
        .iter()
        .map(|entry| CounterpartyView {
            member_id: entry.member_id,
            member_name: name_of(engine, entry.member_id),
            amount_minor: entry.amount.cents(),
        })
        .collect()
}

pub(crate) fn member_balance_view(
    engine: &Engine,
    member_id: Uuid,
    balance: &MemberBalance,
) -> MemberBalanceView {
    MemberBalanceView {
        member_id,
        member_name: name_of(engine, member_id),
        owes_to: counterparty_views(engine, &balance.owes_to),
        owed_by: counterparty_views(engine, &balance.owed_by),
        net_minor: balance.net.cents(),
    }
}

pub(crate) fn group_balances_response(
    engine: &Engine,
    group_id: Uuid,
) -> Result<GroupBalancesResponse, ServerError> {
    let view = engine.group_balances(group_id)?;
    Ok(GroupBalancesResponse {
        group_id,
        balances: view
            .members
            .iter()
            .map(|(member_id, balance)| member_balance_view(engine, *member_id, balance))
            .collect(),
    })
}

/// Handle requests for a group's balance view.
pub async fn group(
    Path(group_id): Path<Uuid>,
    State(state): State<ServerState>,
) -> Result<Json<GroupBalancesResponse>, ServerError> {
    let engine = state.engine.read().await;
    Ok(Json(group_balances_response(&engine, group_id)?))
}

/// Handle requests for a user's balances across all their groups.
pub async fn user(
    Path(user_id): Path<Uuid>,
    State(state): State<ServerState>,
) -> Result<Json<UserBalancesResponse>, ServerError> {
    let engine = state.engine.read().await;
    let view = engine.user_balances(user_id)?;

    Ok(Json(UserBalancesResponse {
        member_id: user_id,
        member_name: name_of(&engine, user_id),
        groups: view
            .per_group
            .into_iter()
            .map(|group| GroupNetView {
                group_id: group.group_id,
                group_name: group.group_name,
                net_minor: group.net.cents(),
                owes_to: counterparty_views(&engine, &group.owes_to),
                owed_by: counterparty_views(&engine, &group.owed_by),
            })
            .collect(),
        total_net_minor: view.total.cents(),
    }))
}
