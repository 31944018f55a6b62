use std::collections::BTreeSet;

use uuid::Uuid;

use crate::{EngineError, Group, Member, ResultEngine};

use super::{Engine, normalize_required_name};

impl Engine {
    /// Creates a group from existing members.
    ///
    /// Every id must already be registered; duplicates collapse into the
    /// member set.
    pub fn create_group(&mut self, name: &str, member_ids: &[Uuid]) -> ResultEngine<Group> {
        let name = normalize_required_name(name, "group name")?;

        let mut members = BTreeSet::new();
        for id in member_ids {
            if !self.members.contains_key(id) {
                return Err(EngineError::UnknownMember(id.to_string()));
            }
            members.insert(*id);
        }
        if members.is_empty() {
            return Err(EngineError::InvalidAmount(
                "group needs at least one member".to_string(),
            ));
        }

        let group = Group::new(name, members);
        self.groups.insert(group.id, group.clone());
        Ok(group)
    }

    pub fn group(&self, group_id: Uuid) -> ResultEngine<&Group> {
        self.group_ref(group_id)
    }

    /// All groups, oldest first.
    #[must_use]
    pub fn groups(&self) -> Vec<&Group> {
        let mut groups: Vec<&Group> = self.groups.values().collect();
        groups.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        groups
    }

    /// The groups a member belongs to, oldest first.
    #[must_use]
    pub fn groups_of(&self, member_id: Uuid) -> Vec<&Group> {
        let mut groups: Vec<&Group> = self
            .groups
            .values()
            .filter(|group| group.is_member(member_id))
            .collect();
        groups.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        groups
    }

    /// The member records of a group, ascending id.
    pub fn members_of(&self, group_id: Uuid) -> ResultEngine<Vec<&Member>> {
        let group = self.group_ref(group_id)?;
        group
            .members
            .iter()
            .map(|id| self.user(*id))
            .collect::<ResultEngine<Vec<_>>>()
    }
}
