//! Internal data objects, decoupled from the remote wire format.
//!
//! Objects are constructed per call and discarded once a result is produced;
//! nothing here is cached across calls.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Canonical two-value entity state.
///
/// The remote wire uses several spellings ("open", "opened", "close",
/// "closed") plus separate state-change events. All of those map through
/// here; no untyped state string crosses a layer boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    Opened,
    Closed,
}

impl State {
    /// Parse the remote's state field. Accepts both the state spellings and
    /// the event spellings the historical API leaks into responses.
    pub fn parse_wire(value: &str) -> Option<State> {
        match value {
            "opened" | "open" | "reopen" => Some(State::Opened),
            "closed" | "close" => Some(State::Closed),
            _ => None,
        }
    }

    /// The canonical wire spelling of this state.
    pub fn as_wire(&self) -> &'static str {
        match self {
            State::Opened => "opened",
            State::Closed => "closed",
        }
    }

    /// The state-change event that transitions an entity into this state.
    pub fn event(&self) -> StateEvent {
        match self {
            State::Opened => StateEvent::Reopen,
            State::Closed => StateEvent::Close,
        }
    }
}

/// State-change event sent on update; distinct from the state itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateEvent {
    Close,
    Reopen,
}

impl StateEvent {
    pub fn as_wire(&self) -> &'static str {
        match self {
            StateEvent::Close => "close",
            StateEvent::Reopen => "reopen",
        }
    }
}

/// Minimal reference to a user carried on issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: i64,
    pub username: String,
    pub name: String,
}

/// Minimal reference to a milestone carried on issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneRef {
    pub id: i64,
    pub title: String,
}

/// Minimal reference to the epic an issue belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpicRef {
    pub id: i64,
    pub iid: Option<i64>,
    pub title: Option<String>,
}

/// Short/relative/full reference strings for an entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct References {
    pub short: Option<String>,
    pub relative: Option<String>,
    pub full: Option<String>,
}

/// An issue, scoped to a project. `(project_id, iid)` identifies it and is
/// immutable once fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub project_id: i64,
    pub iid: i64,
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub labels: Vec<String>,
    pub milestone: Option<MilestoneRef>,
    /// Preserves the remote's ordering.
    pub assignees: Vec<UserRef>,
    pub author: Option<UserRef>,
    pub state: State,
    pub due_date: Option<NaiveDate>,
    pub weight: Option<i64>,
    pub confidential: bool,
    pub epic: Option<EpicRef>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub references: Option<References>,
    pub user_notes_count: i64,
}

/// An epic, scoped to a group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Epic {
    pub group_id: i64,
    pub iid: i64,
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub labels: Vec<String>,
    pub state: State,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub web_url: Option<String>,
}

/// A user account on the remote instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub name: String,
    pub state: Option<String>,
    pub identities: Vec<Identity>,
}

/// External identity attached to a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub provider: String,
    pub extern_uid: String,
}

/// A label name scoped to the group or project it was looked up in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
}

/// A milestone scoped to the group or project it was looked up in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: i64,
    pub title: String,
}

/// Assignee selector for searches: a specific user, anyone, or nobody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssigneeSelector {
    Id(i64),
    Any,
    None,
}

/// Search filter for issues. Absent fields do not constrain the search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueFilter {
    pub state: Option<State>,
    pub labels: Option<Vec<String>>,
    pub milestone: Option<String>,
    pub search: Option<String>,
    pub assignee: Option<AssigneeSelector>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    pub updated_after: Option<DateTime<Utc>>,
    pub updated_before: Option<DateTime<Utc>>,
    pub order_by: Option<String>,
    pub sort: Option<String>,
}

/// Search filter for epics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EpicFilter {
    pub state: Option<State>,
    pub labels: Option<Vec<String>>,
    pub search: Option<String>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    pub updated_after: Option<DateTime<Utc>>,
    pub updated_before: Option<DateTime<Utc>>,
    pub order_by: Option<String>,
    pub sort: Option<String>,
}

/// Fields for creating an issue.
///
/// Collection fields use `Option`: `None` leaves the remote value untouched,
/// `Some` (even when empty) replaces it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueDraft {
    pub project_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub labels: Option<Vec<String>>,
    /// Explicit assignee list; wins over `assignee_id` when non-empty.
    pub assignee_ids: Option<Vec<i64>>,
    /// Single-assignee fallback when no list is given.
    pub assignee_id: Option<i64>,
    pub milestone_id: Option<i64>,
    pub due_date: Option<NaiveDate>,
    pub weight: Option<i64>,
    pub confidential: Option<bool>,
    pub epic_id: Option<i64>,
}

/// Fields for updating an issue. Same merge rules as [`IssueDraft`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueEdit {
    pub project_id: i64,
    pub iid: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub labels: Option<Vec<String>>,
    pub assignee_ids: Option<Vec<i64>>,
    pub assignee_id: Option<i64>,
    pub milestone_id: Option<i64>,
    pub due_date: Option<NaiveDate>,
    pub weight: Option<i64>,
    pub confidential: Option<bool>,
    pub epic_id: Option<i64>,
    pub state_event: Option<StateEvent>,
}

/// Fields for creating an epic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EpicDraft {
    pub group_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub labels: Option<Vec<String>>,
}

/// Fields for updating an epic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EpicEdit {
    pub group_id: i64,
    pub iid: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub labels: Option<Vec<String>>,
    pub state_event: Option<StateEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_parses_all_wire_spellings() {
        assert_eq!(State::parse_wire("opened"), Some(State::Opened));
        assert_eq!(State::parse_wire("open"), Some(State::Opened));
        assert_eq!(State::parse_wire("reopen"), Some(State::Opened));
        assert_eq!(State::parse_wire("closed"), Some(State::Closed));
        assert_eq!(State::parse_wire("close"), Some(State::Closed));
        assert_eq!(State::parse_wire("merged"), None);
    }

    #[test]
    fn test_state_event_mapping() {
        assert_eq!(State::Closed.event(), StateEvent::Close);
        assert_eq!(State::Opened.event(), StateEvent::Reopen);
        assert_eq!(StateEvent::Close.as_wire(), "close");
        assert_eq!(StateEvent::Reopen.as_wire(), "reopen");
    }

    #[test]
    fn test_state_canonical_wire_form() {
        assert_eq!(State::Opened.as_wire(), "opened");
        assert_eq!(State::Closed.as_wire(), "closed");
    }
}
