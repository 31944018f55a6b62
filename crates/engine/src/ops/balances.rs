use uuid::Uuid;

use crate::{GroupBalances, ResultEngine, UserBalances, views};

use super::Engine;

impl Engine {
    /// The group balance view, rebuilt from the ledger on every call.
    ///
    /// The ledger is append-only and small, so re-folding on read is cheaper
    /// than managing cache staleness.
    pub fn group_balances(&self, group_id: Uuid) -> ResultEngine<GroupBalances> {
        views::group_balances(self.group_ref(group_id)?)
    }

    /// The member's balances across every group they belong to.
    pub fn user_balances(&self, member_id: Uuid) -> ResultEngine<UserBalances> {
        self.user(member_id)?;
        views::user_balances(member_id, self.groups_of(member_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EngineError, MoneyCents, SplitPolicy};

    #[test]
    fn balances_of_unknown_group_fail() {
        let engine = Engine::new();
        let id = Uuid::new_v4();
        assert_eq!(
            engine.group_balances(id).unwrap_err(),
            EngineError::UnknownGroup(id.to_string())
        );
    }

    #[test]
    fn balances_of_unknown_member_fail() {
        let engine = Engine::new();
        let id = Uuid::new_v4();
        assert_eq!(
            engine.user_balances(id).unwrap_err(),
            EngineError::UnknownMember(id.to_string())
        );
    }

    #[test]
    fn member_without_groups_has_empty_view() {
        let mut engine = Engine::new();
        let member = engine.create_user("Solo", "solo@example.com").unwrap();

        let view = engine.user_balances(member.id).unwrap();
        assert!(view.per_group.is_empty());
        assert_eq!(view.total, MoneyCents::ZERO);
    }

    #[test]
    fn views_are_idempotent() {
        let mut engine = Engine::new();
        let a = engine.create_user("A", "a@example.com").unwrap().id;
        let b = engine.create_user("B", "b@example.com").unwrap().id;
        let group = engine.create_group("Pair", &[a, b]).unwrap().id;
        engine
            .create_expense(
                group,
                "Dinner",
                MoneyCents::new(3333),
                a,
                SplitPolicy::Equal,
                None,
            )
            .unwrap();

        let first = engine.group_balances(group).unwrap();
        let second = engine.group_balances(group).unwrap();
        assert_eq!(first, second);

        let user_first = engine.user_balances(a).unwrap();
        let user_second = engine.user_balances(a).unwrap();
        assert_eq!(user_first, user_second);
    }
}
