//! Expense primitives.
//!
//! An [`ExpenseRecord`] is an immutable event: once appended to a group's
//! ledger it is never updated or deleted. Corrections are new records.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, MoneyCents, ResultEngine, SplitPolicy};

/// The owed sub-amount of one participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    pub member_id: Uuid,
    pub amount: MoneyCents,
}

/// One recorded expense: who paid, how much, and how the total divides.
///
/// Invariant: the split amounts sum exactly to `amount`. The constructor
/// refuses anything else, so a record in a ledger is always balanced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: Uuid,
    pub group_id: Uuid,
    pub description: String,
    pub amount: MoneyCents,
    pub paid_by: Uuid,
    pub policy: SplitPolicy,
    /// Splits in ascending member-id order.
    pub splits: Vec<Split>,
    pub created_at: DateTime<Utc>,
}

impl ExpenseRecord {
    pub fn new(
        group_id: Uuid,
        description: String,
        amount: MoneyCents,
        paid_by: Uuid,
        policy: SplitPolicy,
        splits: BTreeMap<Uuid, MoneyCents>,
    ) -> ResultEngine<Self> {
        let mut allocated = MoneyCents::ZERO;
        for share in splits.values() {
            allocated = allocated.checked_add(*share).ok_or_else(|| {
                EngineError::ArithmeticOverflow("split amounts overflow".to_string())
            })?;
        }
        if allocated != amount {
            return Err(EngineError::InvalidSplit(format!(
                "splits sum to {allocated}, expected {amount}"
            )));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            group_id,
            description,
            amount,
            paid_by,
            policy,
            splits: splits
                .into_iter()
                .map(|(member_id, amount)| Split { member_id, amount })
                .collect(),
            created_at: Utc::now(),
        })
    }

    /// The share owed by `member_id`, if they participate in this expense.
    #[must_use]
    pub fn split_of(&self, member_id: Uuid) -> Option<MoneyCents> {
        self.splits
            .iter()
            .find(|split| split.member_id == member_id)
            .map(|split| split.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute_splits;

    #[test]
    fn record_is_balanced() {
        let group = Uuid::new_v4();
        let payer = Uuid::new_v4();
        let participants = vec![payer, Uuid::new_v4(), Uuid::new_v4()];
        let total = MoneyCents::new(10_000);
        let splits = compute_splits(total, &SplitPolicy::Equal, &participants).unwrap();

        let record = ExpenseRecord::new(
            group,
            "Dinner".to_string(),
            total,
            payer,
            SplitPolicy::Equal,
            splits,
        )
        .unwrap();

        let sum: i64 = record.splits.iter().map(|s| s.amount.cents()).sum();
        assert_eq!(sum, total.cents());
        assert!(record.split_of(payer).is_some());
        assert_eq!(record.split_of(Uuid::new_v4()), None);
    }

    #[test]
    fn unbalanced_splits_are_rejected() {
        let member = Uuid::new_v4();
        let splits: BTreeMap<Uuid, MoneyCents> =
            [(member, MoneyCents::new(999))].into_iter().collect();

        let err = ExpenseRecord::new(
            Uuid::new_v4(),
            "Taxi".to_string(),
            MoneyCents::new(1000),
            member,
            SplitPolicy::Equal,
            splits,
        )
        .unwrap_err();

        assert!(matches!(err, EngineError::InvalidSplit(_)));
    }
}
