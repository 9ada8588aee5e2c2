//! Epic resource service: CRUD, filtered search, and guarded lifecycle
//! transitions, scoped to a group.

use std::sync::Arc;

use tracing::warn;

use super::{ensure_non_blank, ensure_positive};
use crate::client::TrackerClient;
use crate::envelope::Envelope;
use crate::error::Error;
use crate::executor;
use crate::model::{Epic, EpicDraft, EpicEdit, EpicFilter, State};
use crate::translate;

pub struct EpicService {
    client: Arc<dyn TrackerClient>,
}

impl EpicService {
    pub(crate) fn new(client: Arc<dyn TrackerClient>) -> Self {
        EpicService { client }
    }

    pub fn enveloped(&self) -> EnvelopedEpics<'_> {
        EnvelopedEpics(self)
    }

    pub async fn get_all(&self, group_id: i64) -> Result<Vec<Epic>, Error> {
        ensure_positive(group_id, "group id")?;

        let wires = executor::run(
            self.client.list_epics(group_id),
            &format!("getting epics for group {group_id}"),
        )
        .await?;
        wires.into_iter().map(translate::epic_from_wire).collect()
    }

    pub async fn search(&self, group_id: i64, filter: &EpicFilter) -> Result<Vec<Epic>, Error> {
        ensure_positive(group_id, "group id")?;

        let query = translate::epic_query(filter);
        let wires = executor::run(
            self.client.search_epics(group_id, &query),
            &format!("searching epics in group {group_id}"),
        )
        .await?;
        wires.into_iter().map(translate::epic_from_wire).collect()
    }

    pub async fn get(&self, group_id: i64, iid: i64) -> Result<Epic, Error> {
        ensure_positive(group_id, "group id")?;
        ensure_positive(iid, "epic iid")?;

        let wire = executor::run(
            self.client.get_epic(group_id, iid),
            &format!("getting epic {iid} for group {group_id}"),
        )
        .await?;
        translate::epic_from_wire(wire)
    }

    pub async fn create(&self, draft: &EpicDraft) -> Result<Epic, Error> {
        ensure_positive(draft.group_id, "group id")?;
        ensure_non_blank(&draft.title, "epic title")?;

        let payload = translate::epic_create_payload(draft);
        let wire = executor::run(
            self.client.create_epic(draft.group_id, &payload),
            &format!("creating epic in group {}", draft.group_id),
        )
        .await?;
        translate::epic_from_wire(wire)
    }

    pub async fn update(&self, edit: &EpicEdit) -> Result<Epic, Error> {
        ensure_positive(edit.group_id, "group id")?;
        ensure_positive(edit.iid, "epic iid")?;

        let payload = translate::epic_update_payload(edit);
        let wire = executor::run(
            self.client.update_epic(edit.group_id, edit.iid, &payload),
            &format!("updating epic {} in group {}", edit.iid, edit.group_id),
        )
        .await?;
        translate::epic_from_wire(wire)
    }

    /// Close the epic. Fails with `Conflict` when it is already closed.
    pub async fn close(&self, group_id: i64, iid: i64) -> Result<(), Error> {
        self.transition(group_id, iid, State::Closed).await
    }

    /// Reopen the epic. Fails with `Conflict` when it is already open.
    pub async fn open(&self, group_id: i64, iid: i64) -> Result<(), Error> {
        self.transition(group_id, iid, State::Opened).await
    }

    /// Same fetch/compare/write protocol as the issue service, with the
    /// same unprotected window between the fetch and the write.
    async fn transition(&self, group_id: i64, iid: i64, target: State) -> Result<(), Error> {
        let current = self.get(group_id, iid).await?;

        if current.iid != iid {
            return Err(Error::not_found(format!("epic {iid} in group {group_id}")));
        }
        if current.state == target {
            warn!(
                "epic {iid} in group {group_id} is already {}",
                target.as_wire()
            );
            return Err(Error::conflict(format!(
                "epic {iid} is already {}",
                target.as_wire()
            )));
        }

        let edit = EpicEdit {
            group_id,
            iid,
            state_event: Some(target.event()),
            ..EpicEdit::default()
        };
        self.update(&edit).await.map(|_| ())
    }
}

/// Envelope-policy view of [`EpicService`].
pub struct EnvelopedEpics<'a>(&'a EpicService);

impl EnvelopedEpics<'_> {
    pub async fn get_all(&self, group_id: i64) -> Envelope<Vec<Epic>> {
        executor::envelope(self.0.get_all(group_id)).await
    }

    pub async fn search(&self, group_id: i64, filter: &EpicFilter) -> Envelope<Vec<Epic>> {
        executor::envelope(self.0.search(group_id, filter)).await
    }

    pub async fn get(&self, group_id: i64, iid: i64) -> Envelope<Epic> {
        executor::envelope(self.0.get(group_id, iid)).await
    }

    pub async fn create(&self, draft: &EpicDraft) -> Envelope<Epic> {
        executor::envelope(self.0.create(draft)).await
    }

    pub async fn update(&self, edit: &EpicEdit) -> Envelope<Epic> {
        executor::envelope(self.0.update(edit)).await
    }

    pub async fn close(&self, group_id: i64, iid: i64) -> Envelope<()> {
        executor::envelope(self.0.close(group_id, iid)).await
    }

    pub async fn open(&self, group_id: i64, iid: i64) -> Envelope<()> {
        executor::envelope(self.0.open(group_id, iid)).await
    }
}
