//! Label and milestone lookup service. Read-only.

use std::sync::Arc;

use super::ensure_positive;
use crate::client::TrackerClient;
use crate::envelope::Envelope;
use crate::error::Error;
use crate::executor;
use crate::model::{Label, Milestone};
use crate::translate;

pub struct MetaService {
    client: Arc<dyn TrackerClient>,
}

impl MetaService {
    pub(crate) fn new(client: Arc<dyn TrackerClient>) -> Self {
        MetaService { client }
    }

    pub fn enveloped(&self) -> EnvelopedMeta<'_> {
        EnvelopedMeta(self)
    }

    pub async fn labels_for_project(&self, project_id: i64) -> Result<Vec<Label>, Error> {
        ensure_positive(project_id, "project id")?;

        let wires = executor::run(
            self.client.project_labels(project_id),
            &format!("getting labels for project {project_id}"),
        )
        .await?;
        Ok(wires.into_iter().map(translate::label_from_wire).collect())
    }

    pub async fn labels_for_group(&self, group_id: i64) -> Result<Vec<Label>, Error> {
        ensure_positive(group_id, "group id")?;

        let wires = executor::run(
            self.client.group_labels(group_id),
            &format!("getting labels for group {group_id}"),
        )
        .await?;
        Ok(wires.into_iter().map(translate::label_from_wire).collect())
    }

    pub async fn milestones_for_project(&self, project_id: i64) -> Result<Vec<Milestone>, Error> {
        ensure_positive(project_id, "project id")?;

        let wires = executor::run(
            self.client.project_milestones(project_id),
            &format!("getting milestones for project {project_id}"),
        )
        .await?;
        Ok(wires
            .into_iter()
            .map(translate::milestone_from_wire)
            .collect())
    }

    pub async fn milestones_for_group(&self, group_id: i64) -> Result<Vec<Milestone>, Error> {
        ensure_positive(group_id, "group id")?;

        let wires = executor::run(
            self.client.group_milestones(group_id),
            &format!("getting milestones for group {group_id}"),
        )
        .await?;
        Ok(wires
            .into_iter()
            .map(translate::milestone_from_wire)
            .collect())
    }
}

/// Envelope-policy view of [`MetaService`].
pub struct EnvelopedMeta<'a>(&'a MetaService);

impl EnvelopedMeta<'_> {
    pub async fn labels_for_project(&self, project_id: i64) -> Envelope<Vec<Label>> {
        executor::envelope(self.0.labels_for_project(project_id)).await
    }

    pub async fn labels_for_group(&self, group_id: i64) -> Envelope<Vec<Label>> {
        executor::envelope(self.0.labels_for_group(group_id)).await
    }

    pub async fn milestones_for_project(&self, project_id: i64) -> Envelope<Vec<Milestone>> {
        executor::envelope(self.0.milestones_for_project(project_id)).await
    }

    pub async fn milestones_for_group(&self, group_id: i64) -> Envelope<Vec<Milestone>> {
        executor::envelope(self.0.milestones_for_group(group_id)).await
    }
}
