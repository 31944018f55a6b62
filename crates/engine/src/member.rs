//! Members of the ledger: the people that pay and owe.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered person.
///
/// The engine treats the id as an opaque, immutable key; the ascending-id
/// order of `Uuid` is the canonical ordering used everywhere determinism
/// matters (remainder cents, pair orientation, view listing).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl Member {
    pub fn new(name: String, email: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            created_at: Utc::now(),
        }
    }
}
