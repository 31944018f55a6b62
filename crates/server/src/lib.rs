use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{run_with_listener, spawn_with_listener};

mod balances;
mod chat;
mod expenses;
mod groups;
mod server;
mod users;

pub mod types {
    pub mod user {
        pub use api_types::user::{UserNew, UserView};
    }

    pub mod group {
        pub use api_types::group::{GroupDetails, GroupNew, GroupView};
    }

    pub mod expense {
        pub use api_types::expense::{ExpenseNew, ExpenseView, SplitKind, SplitView, WeightInput};
    }

    pub mod balance {
        pub use api_types::balance::{
            CounterpartyView, GroupBalancesResponse, GroupNetView, MemberBalanceView,
            UserBalancesResponse,
        };
    }

    pub mod chat {
        pub use api_types::chat::{ChatQuery, ChatReply, ChatStats, RecentExpense};
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::UnknownMember(_) | EngineError::UnknownGroup(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::InvalidSplit(_)
        | EngineError::InvalidAmount(_)
        | EngineError::ArithmeticOverflow(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), err.to_string()),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
