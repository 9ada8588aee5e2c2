//! Issue resource service: CRUD, filtered search, and guarded lifecycle
//! transitions.

use std::sync::Arc;

use tracing::warn;

use super::{ensure_non_blank, ensure_positive};
use crate::client::TrackerClient;
use crate::envelope::Envelope;
use crate::error::Error;
use crate::executor;
use crate::model::{Issue, IssueDraft, IssueEdit, IssueFilter, State};
use crate::translate;

pub struct IssueService {
    client: Arc<dyn TrackerClient>,
}

impl IssueService {
    pub(crate) fn new(client: Arc<dyn TrackerClient>) -> Self {
        IssueService { client }
    }

    /// Envelope view over this service: same operations, but every outcome
    /// is a terminating envelope and no error escapes.
    pub fn enveloped(&self) -> EnvelopedIssues<'_> {
        EnvelopedIssues(self)
    }

    pub async fn get_all(&self, project_id: i64) -> Result<Vec<Issue>, Error> {
        ensure_positive(project_id, "project id")?;

        let wires = executor::run(
            self.client.list_issues(project_id),
            &format!("getting issues for project {project_id}"),
        )
        .await?;
        wires.into_iter().map(translate::issue_from_wire).collect()
    }

    pub async fn search(
        &self,
        project_id: i64,
        filter: &IssueFilter,
    ) -> Result<Vec<Issue>, Error> {
        ensure_positive(project_id, "project id")?;

        let query = translate::issue_query(filter);
        let wires = executor::run(
            self.client.search_issues(project_id, &query),
            &format!("searching issues in project {project_id}"),
        )
        .await?;
        wires.into_iter().map(translate::issue_from_wire).collect()
    }

    pub async fn get(&self, project_id: i64, iid: i64) -> Result<Issue, Error> {
        ensure_positive(project_id, "project id")?;
        ensure_positive(iid, "issue iid")?;

        let wire = executor::run(
            self.client.get_issue(project_id, iid),
            &format!("getting issue {iid} for project {project_id}"),
        )
        .await?;
        translate::issue_from_wire(wire)
    }

    pub async fn create(&self, draft: &IssueDraft) -> Result<Issue, Error> {
        ensure_positive(draft.project_id, "project id")?;
        ensure_non_blank(&draft.title, "issue title")?;

        let payload = translate::issue_create_payload(draft);
        let wire = executor::run(
            self.client.create_issue(draft.project_id, &payload),
            &format!("creating issue in project {}", draft.project_id),
        )
        .await?;
        translate::issue_from_wire(wire)
    }

    pub async fn update(&self, edit: &IssueEdit) -> Result<Issue, Error> {
        ensure_positive(edit.project_id, "project id")?;
        ensure_positive(edit.iid, "issue iid")?;

        let payload = translate::issue_update_payload(edit);
        let wire = executor::run(
            self.client.update_issue(edit.project_id, edit.iid, &payload),
            &format!("updating issue {} in project {}", edit.iid, edit.project_id),
        )
        .await?;
        translate::issue_from_wire(wire)
    }

    /// Close the issue. Fails with `Conflict` when it is already closed.
    pub async fn close(&self, project_id: i64, iid: i64) -> Result<(), Error> {
        self.transition(project_id, iid, State::Closed).await
    }

    /// Reopen the issue. Fails with `Conflict` when it is already open.
    pub async fn open(&self, project_id: i64, iid: i64) -> Result<(), Error> {
        self.transition(project_id, iid, State::Opened).await
    }

    /// Guarded lifecycle transition: fetch, compare state, then write only
    /// the state event. The fetch and the write are ordered but not
    /// isolated; a concurrent writer can still race past the guard between
    /// the two steps (accepted lost-update hazard).
    async fn transition(&self, project_id: i64, iid: i64, target: State) -> Result<(), Error> {
        let current = self.get(project_id, iid).await?;

        if current.iid != iid {
            return Err(Error::not_found(format!(
                "issue {iid} in project {project_id}"
            )));
        }
        if current.state == target {
            warn!(
                "issue {iid} in project {project_id} is already {}",
                target.as_wire()
            );
            return Err(Error::conflict(format!(
                "issue {iid} is already {}",
                target.as_wire()
            )));
        }

        let edit = IssueEdit {
            project_id,
            iid,
            state_event: Some(target.event()),
            ..IssueEdit::default()
        };
        self.update(&edit).await.map(|_| ())
    }
}

/// Envelope-policy view of [`IssueService`].
pub struct EnvelopedIssues<'a>(&'a IssueService);

impl EnvelopedIssues<'_> {
    pub async fn get_all(&self, project_id: i64) -> Envelope<Vec<Issue>> {
        executor::envelope(self.0.get_all(project_id)).await
    }

    pub async fn search(&self, project_id: i64, filter: &IssueFilter) -> Envelope<Vec<Issue>> {
        executor::envelope(self.0.search(project_id, filter)).await
    }

    pub async fn get(&self, project_id: i64, iid: i64) -> Envelope<Issue> {
        executor::envelope(self.0.get(project_id, iid)).await
    }

    pub async fn create(&self, draft: &IssueDraft) -> Envelope<Issue> {
        executor::envelope(self.0.create(draft)).await
    }

    pub async fn update(&self, edit: &IssueEdit) -> Envelope<Issue> {
        executor::envelope(self.0.update(edit)).await
    }

    pub async fn close(&self, project_id: i64, iid: i64) -> Envelope<()> {
        executor::envelope(self.0.close(project_id, iid)).await
    }

    pub async fn open(&self, project_id: i64, iid: i64) -> Envelope<()> {
        executor::envelope(self.0.open(project_id, iid)).await
    }
}
