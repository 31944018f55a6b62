use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Serialize;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

use assistant::Assistant;
use engine::Engine;

use crate::{balances, chat, expenses, groups, users};

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<RwLock<Engine>>,
    pub assistant: Arc<Assistant>,
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    message: &'static str,
}

async fn health() -> axum::Json<Health> {
    axum::Json(Health {
        status: "healthy",
        message: "divvi API is running",
    })
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/users", post(users::create).get(users::list))
        .route("/users/{user_id}", get(users::get))
        .route("/users/{user_id}/balances", get(balances::user))
        .route("/groups", post(groups::create).get(groups::list))
        .route("/groups/{group_id}", get(groups::get))
        .route(
            "/groups/{group_id}/expenses",
            post(expenses::create).get(expenses::list),
        )
        .route("/groups/{group_id}/balances", get(balances::group))
        .route("/chat", post(chat::query))
        .route("/chat/stats", get(chat::stats))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    assistant: Assistant,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(RwLock::new(engine)),
        assistant: Arc::new(assistant),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    assistant: Assistant,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, assistant, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::types::{
        balance::{GroupBalancesResponse, UserBalancesResponse},
        chat::ChatStats,
        expense::ExpenseView,
        group::{GroupDetails, GroupView},
        user::UserView,
    };

    fn test_router() -> Router {
        let state = ServerState {
            engine: Arc::new(RwLock::new(Engine::new())),
            assistant: Arc::new(Assistant::new(None).expect("assistant build failed")),
        };
        router(state)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request build failed")
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request build failed")
    }

    async fn body_of<T: serde::de::DeserializeOwned>(
        response: axum::response::Response,
    ) -> T {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body read failed")
            .to_bytes();
        serde_json::from_slice(&bytes).expect("body parse failed")
    }

    async fn create_user(app: &Router, name: &str, email: &str) -> UserView {
        let response = app
            .clone()
            .oneshot(post_json("/users", json!({ "name": name, "email": email })))
            .await
            .expect("request failed");
        assert_eq!(response.status(), StatusCode::CREATED);
        body_of(response).await
    }

    #[tokio::test]
    async fn health_answers() {
        let response = test_router()
            .oneshot(get_req("/health"))
            .await
            .expect("request failed");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let app = test_router();
        create_user(&app, "Alice", "alice@example.com").await;

        let response = app
            .oneshot(post_json(
                "/users",
                json!({ "name": "Alias", "email": "alice@example.com" }),
            ))
            .await
            .expect("request failed");
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn group_with_unknown_member_is_404() {
        let app = test_router();
        let response = app
            .oneshot(post_json(
                "/groups",
                json!({ "name": "Ghosts", "member_ids": [uuid::Uuid::new_v4()] }),
            ))
            .await
            .expect("request failed");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn expense_flow_produces_balances() {
        let app = test_router();
        let alice = create_user(&app, "Alice", "alice@example.com").await;
        let bob = create_user(&app, "Bob", "bob@example.com").await;

        let response = app
            .clone()
            .oneshot(post_json(
                "/groups",
                json!({ "name": "Flat", "member_ids": [alice.id, bob.id] }),
            ))
            .await
            .expect("request failed");
        assert_eq!(response.status(), StatusCode::CREATED);
        let group: GroupView = body_of(response).await;

        let response = app
            .clone()
            .oneshot(post_json(
                &format!("/groups/{}/expenses", group.id),
                json!({
                    "description": "Rent",
                    "amount_minor": 10000,
                    "paid_by": alice.id,
                    "split": "equal",
                    "weights": null,
                    "participants": null,
                }),
            ))
            .await
            .expect("request failed");
        assert_eq!(response.status(), StatusCode::CREATED);
        let expense: ExpenseView = body_of(response).await;
        let split_sum: i64 = expense.splits.iter().map(|s| s.amount_minor).sum();
        assert_eq!(split_sum, 10000);

        let response = app
            .clone()
            .oneshot(get_req(&format!("/groups/{}/balances", group.id)))
            .await
            .expect("request failed");
        assert_eq!(response.status(), StatusCode::OK);
        let balances: GroupBalancesResponse = body_of(response).await;
        let net_sum: i64 = balances.balances.iter().map(|b| b.net_minor).sum();
        assert_eq!(net_sum, 0);

        let bob_balance = balances
            .balances
            .iter()
            .find(|b| b.member_id == bob.id)
            .expect("bob missing");
        assert_eq!(bob_balance.net_minor, -5000);
        assert_eq!(bob_balance.owes_to[0].member_name, "Alice");

        let response = app
            .clone()
            .oneshot(get_req(&format!("/users/{}/balances", alice.id)))
            .await
            .expect("request failed");
        let user_balances: UserBalancesResponse = body_of(response).await;
        assert_eq!(user_balances.total_net_minor, 5000);
        assert_eq!(user_balances.groups.len(), 1);

        let response = app
            .clone()
            .oneshot(get_req(&format!("/groups/{}", group.id)))
            .await
            .expect("request failed");
        let details: GroupDetails = body_of(response).await;
        assert_eq!(details.total_spent_minor, 10000);
        assert_eq!(details.expenses.len(), 1);
    }

    #[tokio::test]
    async fn invalid_percentages_are_422_and_append_nothing() {
        let app = test_router();
        let alice = create_user(&app, "Alice", "alice@example.com").await;
        let bob = create_user(&app, "Bob", "bob@example.com").await;

        let response = app
            .clone()
            .oneshot(post_json(
                "/groups",
                json!({ "name": "Flat", "member_ids": [alice.id, bob.id] }),
            ))
            .await
            .expect("request failed");
        let group: GroupView = body_of(response).await;

        // 99.5% in total.
        let response = app
            .clone()
            .oneshot(post_json(
                &format!("/groups/{}/expenses", group.id),
                json!({
                    "description": "Broken",
                    "amount_minor": 1000,
                    "paid_by": alice.id,
                    "split": "percentage",
                    "weights": [
                        { "member_id": alice.id, "weight_bp": 4975 },
                        { "member_id": bob.id, "weight_bp": 4975 },
                    ],
                    "participants": null,
                }),
            ))
            .await
            .expect("request failed");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = app
            .clone()
            .oneshot(get_req(&format!("/groups/{}/expenses", group.id)))
            .await
            .expect("request failed");
        let expenses: Vec<ExpenseView> = body_of(response).await;
        assert!(expenses.is_empty());
    }

    #[tokio::test]
    async fn chat_answers_from_computed_views() {
        let app = test_router();
        let alice = create_user(&app, "Alice", "alice@example.com").await;
        let bob = create_user(&app, "Bob", "bob@example.com").await;

        let response = app
            .clone()
            .oneshot(post_json(
                "/groups",
                json!({ "name": "Flat", "member_ids": [alice.id, bob.id] }),
            ))
            .await
            .expect("request failed");
        let group: GroupView = body_of(response).await;

        app.clone()
            .oneshot(post_json(
                &format!("/groups/{}/expenses", group.id),
                json!({
                    "description": "Rent",
                    "amount_minor": 10000,
                    "paid_by": alice.id,
                    "split": "equal",
                    "weights": null,
                    "participants": null,
                }),
            ))
            .await
            .expect("request failed");

        let response = app
            .clone()
            .oneshot(post_json("/chat", json!({ "query": "current balances?" })))
            .await
            .expect("request failed");
        assert_eq!(response.status(), StatusCode::OK);
        let reply: Value = body_of(response).await;
        let text = reply["response"].as_str().expect("response missing");
        assert!(text.contains("Alice is owed $50.00"));

        let response = app
            .oneshot(get_req("/chat/stats"))
            .await
            .expect("request failed");
        let stats: ChatStats = body_of(response).await;
        assert_eq!(stats.total_users, 2);
        assert_eq!(stats.total_groups, 1);
        assert_eq!(stats.total_expenses, 1);
        assert_eq!(stats.recent_expenses.len(), 1);
    }
}
