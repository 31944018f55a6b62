use std::collections::HashMap;

use uuid::Uuid;

use crate::{EngineError, Group, Member, ResultEngine};

mod balances;
mod expenses;
mod groups;
mod users;

/// The engine facade: owns the member directory and the per-group ledgers.
///
/// One instance per process, injected where needed — an explicit ownership
/// handle instead of ambient global state, so tests can run parallel engines
/// against disjoint groups. All operations are synchronous in-memory
/// computation; callers that share an engine across tasks serialize writers
/// around it.
#[derive(Debug, Default)]
pub struct Engine {
    members: HashMap<Uuid, Member>,
    groups: HashMap<Uuid, Group>,
}

impl Engine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn group_ref(&self, group_id: Uuid) -> ResultEngine<&Group> {
        self.groups
            .get(&group_id)
            .ok_or_else(|| EngineError::UnknownGroup(group_id.to_string()))
    }

    pub(crate) fn group_mut(&mut self, group_id: Uuid) -> ResultEngine<&mut Group> {
        self.groups
            .get_mut(&group_id)
            .ok_or_else(|| EngineError::UnknownGroup(group_id.to_string()))
    }
}

fn normalize_required_name(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidAmount(format!(
            "{label} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}
