//! Remote tracker collaborator: the trait the services talk to, plus the
//! wire types that mirror the remote JSON.
//!
//! The facade treats the remote as a black box offering CRUD and filtered
//! search for issues/epics and read access to users, labels, and milestones.
//! [`rest::RestClient`] is the production implementation; tests plug in
//! their own.

mod rest;

pub use rest::RestClient;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

// Wire entities (remote responses)

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireUserRef {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireMilestone {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireEpicRef {
    #[serde(default)]
    pub id: i64,
    pub iid: Option<i64>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireReferences {
    pub short: Option<String>,
    pub relative: Option<String>,
    pub full: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireIssue {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub iid: i64,
    #[serde(default)]
    pub project_id: i64,
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    pub milestone: Option<WireMilestone>,
    #[serde(default)]
    pub assignees: Vec<WireUserRef>,
    pub assignee: Option<WireUserRef>,
    pub author: Option<WireUserRef>,
    #[serde(default)]
    pub state: String,
    pub due_date: Option<NaiveDate>,
    pub weight: Option<i64>,
    #[serde(default)]
    pub confidential: bool,
    pub epic: Option<WireEpicRef>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub references: Option<WireReferences>,
    #[serde(default)]
    pub user_notes_count: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireEpic {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub iid: i64,
    #[serde(default)]
    pub group_id: i64,
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub state: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub web_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireUser {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub username: String,
    pub email: Option<String>,
    #[serde(default)]
    pub name: String,
    pub state: Option<String>,
    #[serde(default)]
    pub identities: Vec<WireIdentity>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireIdentity {
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub extern_uid: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireLabel {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

// Wire payloads (remote requests). Absent fields are not sent, which the
// remote treats as "leave unchanged".

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueCreatePayload {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<i64>,
    /// Comma-joined label names; an empty string clears all labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidential: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epic_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueUpdatePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidential: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epic_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_event: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EpicCreatePayload {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EpicUpdatePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_event: Option<String>,
}

/// Remote tracker API surface consumed by the resource services.
///
/// Each call is single-request/single-response. Implementations classify
/// failures into [`Error::NotFound`], [`Error::RemoteApi`], or
/// [`Error::Unexpected`] so no caller ever inspects a transport error.
#[async_trait]
pub trait TrackerClient: Send + Sync {
    async fn list_issues(&self, project_id: i64) -> Result<Vec<WireIssue>, Error>;
    async fn search_issues(
        &self,
        project_id: i64,
        query: &[(String, String)],
    ) -> Result<Vec<WireIssue>, Error>;
    async fn get_issue(&self, project_id: i64, iid: i64) -> Result<WireIssue, Error>;
    async fn create_issue(
        &self,
        project_id: i64,
        payload: &IssueCreatePayload,
    ) -> Result<WireIssue, Error>;
    async fn update_issue(
        &self,
        project_id: i64,
        iid: i64,
        payload: &IssueUpdatePayload,
    ) -> Result<WireIssue, Error>;

    async fn list_epics(&self, group_id: i64) -> Result<Vec<WireEpic>, Error>;
    async fn search_epics(
        &self,
        group_id: i64,
        query: &[(String, String)],
    ) -> Result<Vec<WireEpic>, Error>;
    async fn get_epic(&self, group_id: i64, iid: i64) -> Result<WireEpic, Error>;
    async fn create_epic(
        &self,
        group_id: i64,
        payload: &EpicCreatePayload,
    ) -> Result<WireEpic, Error>;
    async fn update_epic(
        &self,
        group_id: i64,
        iid: i64,
        payload: &EpicUpdatePayload,
    ) -> Result<WireEpic, Error>;

    async fn search_users(&self, text: &str) -> Result<Vec<WireUser>, Error>;
    async fn get_user(&self, id: i64) -> Result<WireUser, Error>;
    async fn list_users(&self) -> Result<Vec<WireUser>, Error>;

    async fn project_labels(&self, project_id: i64) -> Result<Vec<WireLabel>, Error>;
    async fn group_labels(&self, group_id: i64) -> Result<Vec<WireLabel>, Error>;
    async fn project_milestones(&self, project_id: i64) -> Result<Vec<WireMilestone>, Error>;
    async fn group_milestones(&self, group_id: i64) -> Result<Vec<WireMilestone>, Error>;
}
