//! Wire types shared by the HTTP server and its clients.
//!
//! Monetary amounts always travel as scaled integers (`*_minor` fields,
//! i.e. cents) and percentage weights as basis points — never as native
//! floating-point numbers, which would reintroduce the precision loss the
//! engine exists to prevent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserNew {
        pub name: String,
        pub email: String,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub id: Uuid,
        pub name: String,
        pub email: String,
        pub created_at: DateTime<Utc>,
    }
}

pub mod group {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupNew {
        pub name: String,
        pub member_ids: Vec<Uuid>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct GroupView {
        pub id: Uuid,
        pub name: String,
        pub created_at: DateTime<Utc>,
        pub members: Vec<super::user::UserView>,
    }

    /// A group plus its full expense history and running total.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct GroupDetails {
        pub id: Uuid,
        pub name: String,
        pub created_at: DateTime<Utc>,
        pub members: Vec<super::user::UserView>,
        pub expenses: Vec<super::expense::ExpenseView>,
        pub total_spent_minor: i64,
    }
}

pub mod expense {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum SplitKind {
        Equal,
        Percentage,
    }

    /// One percentage weight, in basis points (10_000 = 100%).
    #[derive(Clone, Copy, Debug, Serialize, Deserialize)]
    pub struct WeightInput {
        pub member_id: Uuid,
        pub weight_bp: u32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub description: String,
        pub amount_minor: i64,
        pub paid_by: Uuid,
        pub split: SplitKind,
        /// Required for `percentage`, rejected for `equal`.
        pub weights: Option<Vec<WeightInput>>,
        /// Defaults to the full group membership.
        pub participants: Option<Vec<Uuid>>,
    }

    #[derive(Clone, Copy, Debug, Serialize, Deserialize)]
    pub struct SplitView {
        pub member_id: Uuid,
        pub amount_minor: i64,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: Uuid,
        pub group_id: Uuid,
        pub description: String,
        pub amount_minor: i64,
        pub paid_by: Uuid,
        pub split: SplitKind,
        pub splits: Vec<SplitView>,
        pub created_at: DateTime<Utc>,
    }
}

pub mod balance {
    use super::*;

    /// A counterparty and a (positive) amount owed one way.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct CounterpartyView {
        pub member_id: Uuid,
        pub member_name: String,
        pub amount_minor: i64,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct MemberBalanceView {
        pub member_id: Uuid,
        pub member_name: String,
        pub owes_to: Vec<CounterpartyView>,
        pub owed_by: Vec<CounterpartyView>,
        pub net_minor: i64,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct GroupBalancesResponse {
        pub group_id: Uuid,
        pub balances: Vec<MemberBalanceView>,
    }

    /// One group's slice of a user's cross-group view.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct GroupNetView {
        pub group_id: Uuid,
        pub group_name: String,
        pub net_minor: i64,
        pub owes_to: Vec<CounterpartyView>,
        pub owed_by: Vec<CounterpartyView>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct UserBalancesResponse {
        pub member_id: Uuid,
        pub member_name: String,
        pub groups: Vec<GroupNetView>,
        /// Informational sum across groups; groups never settle each other.
        pub total_net_minor: i64,
    }
}

pub mod chat {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ChatQuery {
        pub query: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ChatReply {
        pub query: String,
        pub response: String,
        pub timestamp: DateTime<Utc>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct RecentExpense {
        pub description: String,
        pub amount_minor: i64,
        pub group_name: String,
        pub paid_by_name: String,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct ChatStats {
        pub total_users: usize,
        pub total_groups: usize,
        pub total_expenses: usize,
        pub recent_expenses: Vec<RecentExpense>,
    }
}
