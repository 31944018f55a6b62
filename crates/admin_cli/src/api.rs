//! Thin client for the divvi HTTP API.

use api_types::{
    balance::{GroupBalancesResponse, UserBalancesResponse},
    expense::{ExpenseNew, ExpenseView},
    group::{GroupDetails, GroupNew, GroupView},
    user::{UserNew, UserView},
};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{status}: {message}")]
    Server { status: StatusCode, message: String },
}

impl ApiClient {
    pub(crate) fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn decode<T: for<'de> serde::Deserialize<'de>>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(err) => err.error,
            Err(_) => "server error".to_string(),
        };
        Err(ApiError::Server { status, message })
    }

    async fn post_json<TReq: serde::Serialize + ?Sized, TResp: for<'de> serde::Deserialize<'de>>(
        &self,
        path: &str,
        body: &TReq,
    ) -> Result<TResp, ApiError> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::decode(response).await
    }

    async fn get_json<TResp: for<'de> serde::Deserialize<'de>>(
        &self,
        path: &str,
    ) -> Result<TResp, ApiError> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::decode(response).await
    }

    pub(crate) async fn user_create(&self, body: &UserNew) -> Result<UserView, ApiError> {
        self.post_json("/users", body).await
    }

    pub(crate) async fn user_list(&self) -> Result<Vec<UserView>, ApiError> {
        self.get_json("/users").await
    }

    pub(crate) async fn group_create(&self, body: &GroupNew) -> Result<GroupView, ApiError> {
        self.post_json("/groups", body).await
    }

    pub(crate) async fn group_show(&self, group_id: Uuid) -> Result<GroupDetails, ApiError> {
        self.get_json(&format!("/groups/{group_id}")).await
    }

    pub(crate) async fn expense_add(
        &self,
        group_id: Uuid,
        body: &ExpenseNew,
    ) -> Result<ExpenseView, ApiError> {
        self.post_json(&format!("/groups/{group_id}/expenses"), body)
            .await
    }

    pub(crate) async fn group_balances(
        &self,
        group_id: Uuid,
    ) -> Result<GroupBalancesResponse, ApiError> {
        self.get_json(&format!("/groups/{group_id}/balances")).await
    }

    pub(crate) async fn user_balances(
        &self,
        user_id: Uuid,
    ) -> Result<UserBalancesResponse, ApiError> {
        self.get_json(&format!("/users/{user_id}/balances")).await
    }
}
