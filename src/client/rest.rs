//! GitLab REST v4 implementation of [`TrackerClient`].

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::{
    EpicCreatePayload, EpicUpdatePayload, IssueCreatePayload, IssueUpdatePayload, TrackerClient,
    WireEpic, WireIssue, WireLabel, WireMilestone, WireUser,
};
use crate::config::Config;
use crate::error::Error;

/// HTTP client for one GitLab instance. Holds no mutable state; safe to
/// share across concurrent callers.
pub struct RestClient {
    base_url: String,
    token: String,
    client: Client,
}

impl RestClient {
    pub fn new(config: &Config) -> Self {
        RestClient {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v4{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(query)
            .header("PRIVATE-TOKEN", &self.token)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| Error::unexpected(format!("network error: {e}")))?;

        Self::decode(path, response).await
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::unexpected(format!("network error: {e}")))?;

        Self::decode(path, response).await
    }

    async fn put_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("PUT {}", url);

        let response = self
            .client
            .put(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::unexpected(format!("network error: {e}")))?;

        Self::decode(path, response).await
    }

    async fn decode<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, Error> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status.as_u16(), path, &body));
        }

        response
            .json()
            .await
            .map_err(|e| Error::unexpected(format!("parse error: {e}")))
    }
}

/// Classify a non-2xx remote response. 404 is always its own variant;
/// everything else the remote reports keeps its status code and message.
fn classify_failure(status: u16, path: &str, body: &str) -> Error {
    if status == 404 {
        return Error::not_found(format!("remote returned 404 for {path}"));
    }

    // GitLab error bodies carry a "message" (string, array, or object) or
    // an "error" field; fall back to the raw body.
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error"))
                .map(render_message)
        })
        .unwrap_or_else(|| body.to_string());

    Error::remote(status, message)
}

fn render_message(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl TrackerClient for RestClient {
    async fn list_issues(&self, project_id: i64) -> Result<Vec<WireIssue>, Error> {
        self.get_json(&format!("/projects/{project_id}/issues"), &[])
            .await
    }

    async fn search_issues(
        &self,
        project_id: i64,
        query: &[(String, String)],
    ) -> Result<Vec<WireIssue>, Error> {
        self.get_json(&format!("/projects/{project_id}/issues"), query)
            .await
    }

    async fn get_issue(&self, project_id: i64, iid: i64) -> Result<WireIssue, Error> {
        self.get_json(&format!("/projects/{project_id}/issues/{iid}"), &[])
            .await
    }

    async fn create_issue(
        &self,
        project_id: i64,
        payload: &IssueCreatePayload,
    ) -> Result<WireIssue, Error> {
        self.post_json(&format!("/projects/{project_id}/issues"), payload)
            .await
    }

    async fn update_issue(
        &self,
        project_id: i64,
        iid: i64,
        payload: &IssueUpdatePayload,
    ) -> Result<WireIssue, Error> {
        self.put_json(&format!("/projects/{project_id}/issues/{iid}"), payload)
            .await
    }

    async fn list_epics(&self, group_id: i64) -> Result<Vec<WireEpic>, Error> {
        self.get_json(&format!("/groups/{group_id}/epics"), &[]).await
    }

    async fn search_epics(
        &self,
        group_id: i64,
        query: &[(String, String)],
    ) -> Result<Vec<WireEpic>, Error> {
        self.get_json(&format!("/groups/{group_id}/epics"), query)
            .await
    }

    async fn get_epic(&self, group_id: i64, iid: i64) -> Result<WireEpic, Error> {
        self.get_json(&format!("/groups/{group_id}/epics/{iid}"), &[])
            .await
    }

    async fn create_epic(
        &self,
        group_id: i64,
        payload: &EpicCreatePayload,
    ) -> Result<WireEpic, Error> {
        self.post_json(&format!("/groups/{group_id}/epics"), payload)
            .await
    }

    async fn update_epic(
        &self,
        group_id: i64,
        iid: i64,
        payload: &EpicUpdatePayload,
    ) -> Result<WireEpic, Error> {
        self.put_json(&format!("/groups/{group_id}/epics/{iid}"), payload)
            .await
    }

    async fn search_users(&self, text: &str) -> Result<Vec<WireUser>, Error> {
        let query = [("search".to_string(), text.to_string())];
        self.get_json("/users", &query).await
    }

    async fn get_user(&self, id: i64) -> Result<WireUser, Error> {
        self.get_json(&format!("/users/{id}"), &[]).await
    }

    async fn list_users(&self) -> Result<Vec<WireUser>, Error> {
        self.get_json("/users", &[]).await
    }

    async fn project_labels(&self, project_id: i64) -> Result<Vec<WireLabel>, Error> {
        self.get_json(&format!("/projects/{project_id}/labels"), &[])
            .await
    }

    async fn group_labels(&self, group_id: i64) -> Result<Vec<WireLabel>, Error> {
        self.get_json(&format!("/groups/{group_id}/labels"), &[])
            .await
    }

    async fn project_milestones(&self, project_id: i64) -> Result<Vec<WireMilestone>, Error> {
        self.get_json(&format!("/projects/{project_id}/milestones"), &[])
            .await
    }

    async fn group_milestones(&self, group_id: i64) -> Result<Vec<WireMilestone>, Error> {
        self.get_json(&format!("/groups/{group_id}/milestones"), &[])
            .await
    }
}
