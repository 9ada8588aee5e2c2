//! Resource services and the facade that aggregates them.

mod epics;
mod issues;
mod meta;
mod users;

pub use epics::{EnvelopedEpics, EpicService};
pub use issues::{EnvelopedIssues, IssueService};
pub use meta::{EnvelopedMeta, MetaService};
pub use users::{EnvelopedUsers, UserService};

use std::sync::Arc;

use crate::client::{RestClient, TrackerClient};
use crate::config::Config;
use crate::error::Error;

/// Entry point: one instance per configured remote endpoint + credential.
///
/// Holds one read-only client handle shared by all services, so concurrent
/// callers need no additional locking.
pub struct GitBridge {
    issues: IssueService,
    epics: EpicService,
    users: UserService,
    meta: MetaService,
}

impl std::fmt::Debug for GitBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitBridge").finish_non_exhaustive()
    }
}

impl GitBridge {
    /// Build the facade against a real remote instance. Fails immediately
    /// with a configuration error when the endpoint or credential is blank.
    pub fn new(config: &Config) -> Result<Self, Error> {
        config.validate()?;
        let client: Arc<dyn TrackerClient> = Arc::new(RestClient::new(config));
        Ok(Self::with_client(client))
    }

    /// Wire the facade onto any [`TrackerClient`] implementation. This is
    /// the injection seam used by tests and alternative transports.
    pub fn with_client(client: Arc<dyn TrackerClient>) -> Self {
        GitBridge {
            issues: IssueService::new(Arc::clone(&client)),
            epics: EpicService::new(Arc::clone(&client)),
            users: UserService::new(Arc::clone(&client)),
            meta: MetaService::new(client),
        }
    }

    pub fn issues(&self) -> &IssueService {
        &self.issues
    }

    pub fn epics(&self) -> &EpicService {
        &self.epics
    }

    pub fn users(&self) -> &UserService {
        &self.users
    }

    pub fn meta(&self) -> &MetaService {
        &self.meta
    }
}

/// Precondition check shared by all services: ids must be positive.
pub(crate) fn ensure_positive(value: i64, what: &str) -> Result<(), Error> {
    if value <= 0 {
        return Err(Error::validation(format!("{what} must be positive")));
    }
    Ok(())
}

/// Precondition check: titles and search text must not be blank.
pub(crate) fn ensure_non_blank(value: &str, what: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(Error::validation(format!("{what} cannot be blank")));
    }
    Ok(())
}
