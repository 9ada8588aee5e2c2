//! User lookup service. Read-only.

use std::sync::Arc;

use super::{ensure_non_blank, ensure_positive};
use crate::client::TrackerClient;
use crate::envelope::Envelope;
use crate::error::Error;
use crate::executor;
use crate::model::User;
use crate::translate;

pub struct UserService {
    client: Arc<dyn TrackerClient>,
}

impl UserService {
    pub(crate) fn new(client: Arc<dyn TrackerClient>) -> Self {
        UserService { client }
    }

    pub fn enveloped(&self) -> EnvelopedUsers<'_> {
        EnvelopedUsers(self)
    }

    pub async fn search(&self, text: &str) -> Result<Vec<User>, Error> {
        ensure_non_blank(text, "search text")?;

        let wires = executor::run(
            self.client.search_users(text),
            &format!("searching users with query '{text}'"),
        )
        .await?;
        wires.into_iter().map(translate::user_from_wire).collect()
    }

    pub async fn get_by_id(&self, user_id: i64) -> Result<User, Error> {
        ensure_positive(user_id, "user id")?;

        let wire = executor::run(
            self.client.get_user(user_id),
            &format!("getting user {user_id}"),
        )
        .await?;
        translate::user_from_wire(wire)
    }

    pub async fn get_all(&self) -> Result<Vec<User>, Error> {
        let wires = executor::run(self.client.list_users(), "listing users").await?;
        wires.into_iter().map(translate::user_from_wire).collect()
    }
}

/// Envelope-policy view of [`UserService`].
pub struct EnvelopedUsers<'a>(&'a UserService);

impl EnvelopedUsers<'_> {
    pub async fn search(&self, text: &str) -> Envelope<Vec<User>> {
        executor::envelope(self.0.search(text)).await
    }

    pub async fn get_by_id(&self, user_id: i64) -> Envelope<User> {
        executor::envelope(self.0.get_by_id(user_id)).await
    }

    pub async fn get_all(&self) -> Envelope<Vec<User>> {
        executor::envelope(self.0.get_all()).await
    }
}
