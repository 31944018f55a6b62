//! Read-only balance projections.
//!
//! Both views are pure reshapes of [`pair_balances`] output: they partition
//! and sum, they never re-derive amounts from the ledger, so they cannot
//! disagree with the aggregator.

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::{EngineError, Group, MoneyCents, ResultEngine, pair_balances};

/// One directional entry: a counterparty and the (positive) amount involved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterpartyAmount {
    pub member_id: Uuid,
    pub amount: MoneyCents,
}

/// What one member owes and is owed inside a single group.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemberBalance {
    /// Debts of this member, ascending counterparty id. Amounts are positive.
    pub owes_to: Vec<CounterpartyAmount>,
    /// Credits of this member, ascending counterparty id. Amounts are positive.
    pub owed_by: Vec<CounterpartyAmount>,
    /// Sum of `owed_by` minus sum of `owes_to`.
    pub net: MoneyCents,
}

/// The balance view of a whole group: one entry per current member.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GroupBalances {
    pub members: BTreeMap<Uuid, MemberBalance>,
}

/// One group's contribution to a member's cross-group view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupNet {
    pub group_id: Uuid,
    pub group_name: String,
    pub net: MoneyCents,
    pub owes_to: Vec<CounterpartyAmount>,
    pub owed_by: Vec<CounterpartyAmount>,
}

/// A member's balances across all their groups.
///
/// Groups are never merged: a debt in one group does not offset a debt in
/// another. `total` sums the per-group nets and is purely informational.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserBalances {
    pub member_id: Uuid,
    pub per_group: Vec<GroupNet>,
    pub total: MoneyCents,
}

/// Builds the per-member view of one group from its pair balances.
///
/// Every current member appears, including fully settled ones (empty lists,
/// zero net). Settled pairs were already dropped by the aggregator, so the
/// directional lists only carry reportable amounts.
pub fn group_balances(group: &Group) -> ResultEngine<GroupBalances> {
    let pairs = pair_balances(group.ledger())?;

    let mut members: BTreeMap<Uuid, MemberBalance> = group
        .members
        .iter()
        .map(|id| (*id, MemberBalance::default()))
        .collect();

    for (pair, net) in pairs {
        // Positive: `first` is owed by `second`. Negative: the reverse.
        let (creditor, debtor, amount) = if net.is_positive() {
            (pair.first(), pair.second(), net)
        } else {
            (pair.second(), pair.first(), -net)
        };

        members
            .entry(creditor)
            .or_default()
            .owed_by
            .push(CounterpartyAmount {
                member_id: debtor,
                amount,
            });
        members
            .entry(debtor)
            .or_default()
            .owes_to
            .push(CounterpartyAmount {
                member_id: creditor,
                amount,
            });
    }

    for balance in members.values_mut() {
        let mut net = MoneyCents::ZERO;
        for credit in &balance.owed_by {
            net = net.checked_add(credit.amount).ok_or_else(overflow)?;
        }
        for debt in &balance.owes_to {
            net = net.checked_sub(debt.amount).ok_or_else(overflow)?;
        }
        balance.net = net;
    }

    Ok(GroupBalances { members })
}

/// Composes the group view over every group the member belongs to.
pub fn user_balances<'a, I>(member_id: Uuid, groups: I) -> ResultEngine<UserBalances>
where
    I: IntoIterator<Item = &'a Group>,
{
    let mut per_group = Vec::new();
    let mut total = MoneyCents::ZERO;

    for group in groups {
        let view = group_balances(group)?;
        let balance = view.members.get(&member_id).cloned().unwrap_or_default();

        total = total.checked_add(balance.net).ok_or_else(overflow)?;
        per_group.push(GroupNet {
            group_id: group.id,
            group_name: group.name.clone(),
            net: balance.net,
            owes_to: balance.owes_to,
            owed_by: balance.owed_by,
        });
    }

    Ok(UserBalances {
        member_id,
        per_group,
        total,
    })
}

fn overflow() -> EngineError {
    EngineError::ArithmeticOverflow("net balance out of range".to_string())
}
