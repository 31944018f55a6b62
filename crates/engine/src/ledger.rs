//! The append-only expense ledger of one group.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ExpenseRecord, MoneyCents, ResultEngine};

/// Ordered collection of a group's expenses.
///
/// Append-only: records enter in insertion order and are never updated or
/// removed, so every read replays the same sequence.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GroupLedger {
    group_id: Uuid,
    expenses: Vec<ExpenseRecord>,
}

impl GroupLedger {
    pub fn new(group_id: Uuid) -> Self {
        Self {
            group_id,
            expenses: Vec::new(),
        }
    }

    /// Appends a balanced record. The record must belong to this group.
    pub fn append(&mut self, record: ExpenseRecord) -> ResultEngine<&ExpenseRecord> {
        if record.group_id != self.group_id {
            return Err(EngineError::UnknownGroup(record.group_id.to_string()));
        }
        let index = self.expenses.len();
        self.expenses.push(record);
        Ok(&self.expenses[index])
    }

    /// All records in insertion order.
    #[must_use]
    pub fn expenses(&self) -> &[ExpenseRecord] {
        &self.expenses
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Sum of all expense totals ever recorded.
    pub fn total_spent(&self) -> ResultEngine<MoneyCents> {
        let mut total = MoneyCents::ZERO;
        for record in &self.expenses {
            total = total.checked_add(record.amount).ok_or_else(|| {
                EngineError::ArithmeticOverflow("group total out of range".to_string())
            })?;
        }
        Ok(total)
    }
}
