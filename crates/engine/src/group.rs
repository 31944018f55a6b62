//! The `Group` holds its member set and its expense ledger.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, ExpenseRecord, GroupLedger, MoneyCents, ResultEngine, SplitPolicy, compute_splits,
};

/// A set of members sharing expenses.
///
/// Membership is owned by the identity side of the system; the engine treats
/// it as the authority for who may pay or participate. Past expenses are not
/// re-split when membership changes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub members: BTreeSet<Uuid>,
    ledger: GroupLedger,
}

impl Group {
    pub fn new(name: String, members: BTreeSet<Uuid>) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            name,
            created_at: Utc::now(),
            members,
            ledger: GroupLedger::new(id),
        }
    }

    #[must_use]
    pub fn is_member(&self, member_id: Uuid) -> bool {
        self.members.contains(&member_id)
    }

    #[must_use]
    pub fn ledger(&self) -> &GroupLedger {
        &self.ledger
    }

    /// Validates, splits, and appends one expense.
    ///
    /// The payer and every participant must currently be group members; the
    /// payer may pay without participating. Either a fully balanced record is
    /// appended or the ledger is untouched.
    pub fn record_expense(
        &mut self,
        description: String,
        total: MoneyCents,
        paid_by: Uuid,
        policy: SplitPolicy,
        participants: &[Uuid],
    ) -> ResultEngine<&ExpenseRecord> {
        if !self.is_member(paid_by) {
            return Err(EngineError::UnknownMember(paid_by.to_string()));
        }
        for participant in participants {
            if !self.is_member(*participant) {
                return Err(EngineError::UnknownMember(participant.to_string()));
            }
        }

        let splits = compute_splits(total, &policy, participants)?;
        let record = ExpenseRecord::new(self.id, description, total, paid_by, policy, splits)?;
        self.ledger.append(record)
    }
}
