//! gitbridge - facade over GitLab issue and epic tracking.
//!
//! Exposes CRUD and lifecycle operations for issues, epics, and users, and
//! normalizes the remote API's heterogeneous failure modes into one uniform
//! result contract: a throwing variant (`Result<T, Error>`) and an envelope
//! variant ([`Envelope`]) that never lets an error escape.
//!
//! ```no_run
//! use gitbridge::{Config, GitBridge, IssueDraft};
//!
//! # async fn demo() -> Result<(), gitbridge::Error> {
//! let bridge = GitBridge::new(&Config::new("https://gitlab.com", "glpat-..."))?;
//!
//! let draft = IssueDraft {
//!     project_id: 39,
//!     title: "first Issue".to_string(),
//!     ..IssueDraft::default()
//! };
//! let created = bridge.issues().enveloped().create(&draft).await;
//! assert!(created.is_success());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod model;
pub mod translate;

mod executor;
mod services;

pub use client::{RestClient, TrackerClient};
pub use config::Config;
pub use envelope::{Envelope, Status};
pub use error::Error;
pub use model::{
    AssigneeSelector, Epic, EpicDraft, EpicEdit, EpicFilter, Issue, IssueDraft, IssueEdit,
    IssueFilter, Label, Milestone, State, StateEvent, User,
};
pub use services::{EpicService, GitBridge, IssueService, MetaService, UserService};
