use uuid::Uuid;

use crate::{EngineError, Member, ResultEngine};

use super::{Engine, normalize_required_name};

impl Engine {
    /// Registers a member. Emails are unique across the directory.
    pub fn create_user(&mut self, name: &str, email: &str) -> ResultEngine<Member> {
        let name = normalize_required_name(name, "user name")?;
        let email = normalize_required_name(email, "email")?.to_lowercase();

        if self.members.values().any(|member| member.email == email) {
            return Err(EngineError::ExistingKey(email));
        }

        let member = Member::new(name, email);
        self.members.insert(member.id, member.clone());
        Ok(member)
    }

    pub fn user(&self, member_id: Uuid) -> ResultEngine<&Member> {
        self.members
            .get(&member_id)
            .ok_or_else(|| EngineError::UnknownMember(member_id.to_string()))
    }

    /// All members, oldest first.
    #[must_use]
    pub fn users(&self) -> Vec<&Member> {
        let mut users: Vec<&Member> = self.members.values().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        users
    }
}
