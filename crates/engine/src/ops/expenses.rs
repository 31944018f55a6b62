use uuid::Uuid;

use crate::{ExpenseRecord, MoneyCents, ResultEngine, SplitPolicy};

use super::{Engine, normalize_required_name};

impl Engine {
    /// Records one expense against a group's ledger.
    ///
    /// `participants: None` splits across the full current membership, the
    /// common case for an equal split. Validation and the split computation
    /// happen before anything is appended, so a failed call leaves the
    /// ledger exactly as it was.
    pub fn create_expense(
        &mut self,
        group_id: Uuid,
        description: &str,
        total: MoneyCents,
        paid_by: Uuid,
        policy: SplitPolicy,
        participants: Option<Vec<Uuid>>,
    ) -> ResultEngine<ExpenseRecord> {
        let description = normalize_required_name(description, "description")?;

        let group = self.group_mut(group_id)?;
        let participants =
            participants.unwrap_or_else(|| group.members.iter().copied().collect());

        let record =
            group.record_expense(description, total, paid_by, policy, &participants)?;
        Ok(record.clone())
    }

    /// The group's expenses in insertion order.
    pub fn expenses_of(&self, group_id: Uuid) -> ResultEngine<&[ExpenseRecord]> {
        Ok(self.group_ref(group_id)?.ledger().expenses())
    }

    /// The most recent expenses across all groups, newest first, paired with
    /// their group's name.
    #[must_use]
    pub fn recent_expenses(&self, limit: usize) -> Vec<(&str, &ExpenseRecord)> {
        let mut recent: Vec<(&str, &ExpenseRecord)> = self
            .groups
            .values()
            .flat_map(|group| {
                group
                    .ledger()
                    .expenses()
                    .iter()
                    .map(|record| (group.name.as_str(), record))
            })
            .collect();
        recent.sort_by(|a, b| b.1.created_at.cmp(&a.1.created_at).then(a.1.id.cmp(&b.1.id)));
        recent.truncate(limit);
        recent
    }

    /// Count of expenses across all groups.
    #[must_use]
    pub fn expense_count(&self) -> usize {
        self.groups.values().map(|group| group.ledger().len()).sum()
    }
}
