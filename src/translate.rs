//! Entity translation between the remote wire representation and internal
//! data objects, plus filter-to-query translation for search.
//!
//! Translation is deterministic and total over optional fields: an absent
//! optional on one side becomes the empty/absent representation on the
//! other. Only a missing required identifying field (container id or
//! internal id) is an error.

use crate::client::{
    EpicCreatePayload, EpicUpdatePayload, IssueCreatePayload, IssueUpdatePayload, WireEpic,
    WireIssue, WireLabel, WireMilestone, WireUser,
};
use crate::error::Error;
use crate::model::{
    AssigneeSelector, Epic, EpicDraft, EpicEdit, EpicFilter, EpicRef, Identity, Issue, IssueDraft,
    IssueEdit, IssueFilter, Label, Milestone, MilestoneRef, References, State, User, UserRef,
};

pub fn issue_from_wire(wire: WireIssue) -> Result<Issue, Error> {
    if wire.project_id <= 0 || wire.iid <= 0 {
        return Err(Error::unexpected(format!(
            "remote issue is missing its identifying pair (project_id={}, iid={})",
            wire.project_id, wire.iid
        )));
    }

    Ok(Issue {
        project_id: wire.project_id,
        iid: wire.iid,
        id: wire.id,
        title: wire.title,
        description: wire.description,
        labels: wire.labels,
        milestone: wire.milestone.map(|m| MilestoneRef {
            id: m.id,
            title: m.title,
        }),
        // Assignee order comes from the remote and is preserved.
        assignees: wire.assignees.into_iter().map(user_ref_from_wire).collect(),
        author: wire.author.map(user_ref_from_wire),
        state: State::parse_wire(&wire.state).unwrap_or(State::Opened),
        due_date: wire.due_date,
        weight: wire.weight,
        confidential: wire.confidential,
        epic: wire.epic.map(|e| EpicRef {
            id: e.id,
            iid: e.iid,
            title: e.title,
        }),
        created_at: wire.created_at,
        updated_at: wire.updated_at,
        references: wire.references.map(|r| References {
            short: r.short,
            relative: r.relative,
            full: r.full,
        }),
        user_notes_count: wire.user_notes_count,
    })
}

pub fn epic_from_wire(wire: WireEpic) -> Result<Epic, Error> {
    if wire.group_id <= 0 || wire.iid <= 0 {
        return Err(Error::unexpected(format!(
            "remote epic is missing its identifying pair (group_id={}, iid={})",
            wire.group_id, wire.iid
        )));
    }

    Ok(Epic {
        group_id: wire.group_id,
        iid: wire.iid,
        id: wire.id,
        title: wire.title,
        description: wire.description,
        labels: wire.labels,
        state: State::parse_wire(&wire.state).unwrap_or(State::Opened),
        created_at: wire.created_at,
        updated_at: wire.updated_at,
        web_url: wire.web_url,
    })
}

pub fn user_from_wire(wire: WireUser) -> Result<User, Error> {
    if wire.id <= 0 {
        return Err(Error::unexpected("remote user is missing its id"));
    }

    Ok(User {
        id: wire.id,
        username: wire.username,
        email: wire.email,
        name: wire.name,
        state: wire.state,
        identities: wire
            .identities
            .into_iter()
            .map(|i| Identity {
                provider: i.provider,
                extern_uid: i.extern_uid,
            })
            .collect(),
    })
}

pub fn label_from_wire(wire: WireLabel) -> Label {
    Label { name: wire.name }
}

pub fn milestone_from_wire(wire: WireMilestone) -> Milestone {
    Milestone {
        id: wire.id,
        title: wire.title,
    }
}

fn user_ref_from_wire(wire: crate::client::WireUserRef) -> UserRef {
    UserRef {
        id: wire.id,
        username: wire.username,
        name: wire.name,
    }
}

/// Comma-join a label set for the wire. `Some(vec![])` becomes `Some("")`,
/// which the remote reads as "clear all labels"; `None` sends nothing and
/// leaves the remote labels untouched.
fn join_labels(labels: Option<&Vec<String>>) -> Option<String> {
    labels.map(|l| l.join(","))
}

/// Assignee resolution precedence: an explicit non-empty list wins, then a
/// single assignee reference, else nothing is sent.
fn resolve_assignees(list: Option<&Vec<i64>>, single: Option<i64>) -> Option<Vec<i64>> {
    match list {
        Some(ids) if !ids.is_empty() => Some(ids.clone()),
        _ => single.map(|id| vec![id]),
    }
}

pub fn issue_create_payload(draft: &IssueDraft) -> IssueCreatePayload {
    IssueCreatePayload {
        title: draft.title.clone(),
        description: draft.description.clone(),
        assignee_ids: resolve_assignees(draft.assignee_ids.as_ref(), draft.assignee_id),
        milestone_id: draft.milestone_id,
        labels: join_labels(draft.labels.as_ref()),
        confidential: draft.confidential,
        due_date: draft.due_date,
        epic_id: draft.epic_id,
        weight: draft.weight,
    }
}

pub fn issue_update_payload(edit: &IssueEdit) -> IssueUpdatePayload {
    IssueUpdatePayload {
        title: edit.title.clone(),
        description: edit.description.clone(),
        assignee_ids: resolve_assignees(edit.assignee_ids.as_ref(), edit.assignee_id),
        milestone_id: edit.milestone_id,
        labels: join_labels(edit.labels.as_ref()),
        confidential: edit.confidential,
        due_date: edit.due_date,
        epic_id: edit.epic_id,
        weight: edit.weight,
        state_event: edit.state_event.map(|e| e.as_wire().to_string()),
    }
}

pub fn epic_create_payload(draft: &EpicDraft) -> EpicCreatePayload {
    EpicCreatePayload {
        title: draft.title.clone(),
        description: draft.description.clone(),
        labels: join_labels(draft.labels.as_ref()),
    }
}

pub fn epic_update_payload(edit: &EpicEdit) -> EpicUpdatePayload {
    EpicUpdatePayload {
        title: edit.title.clone(),
        description: edit.description.clone(),
        labels: join_labels(edit.labels.as_ref()),
        state_event: edit.state_event.map(|e| e.as_wire().to_string()),
    }
}

pub fn issue_query(filter: &IssueFilter) -> Vec<(String, String)> {
    let mut query = Vec::new();

    if let Some(state) = filter.state {
        query.push(("state".to_string(), state.as_wire().to_string()));
    }
    if let Some(labels) = &filter.labels {
        query.push(("labels".to_string(), labels.join(",")));
    }
    if let Some(milestone) = &filter.milestone {
        query.push(("milestone".to_string(), milestone.clone()));
    }
    if let Some(search) = &filter.search {
        query.push(("search".to_string(), search.clone()));
    }
    if let Some(assignee) = filter.assignee {
        let value = match assignee {
            AssigneeSelector::Id(id) => id.to_string(),
            AssigneeSelector::Any => "Any".to_string(),
            AssigneeSelector::None => "None".to_string(),
        };
        query.push(("assignee_id".to_string(), value));
    }
    push_date_ranges(
        &mut query,
        filter.created_after,
        filter.created_before,
        filter.updated_after,
        filter.updated_before,
    );
    if let Some(order_by) = &filter.order_by {
        query.push(("order_by".to_string(), order_by.clone()));
    }
    if let Some(sort) = &filter.sort {
        query.push(("sort".to_string(), sort.clone()));
    }

    query
}

pub fn epic_query(filter: &EpicFilter) -> Vec<(String, String)> {
    let mut query = Vec::new();

    if let Some(state) = filter.state {
        query.push(("state".to_string(), state.as_wire().to_string()));
    }
    if let Some(labels) = &filter.labels {
        query.push(("labels".to_string(), labels.join(",")));
    }
    if let Some(search) = &filter.search {
        query.push(("search".to_string(), search.clone()));
    }
    push_date_ranges(
        &mut query,
        filter.created_after,
        filter.created_before,
        filter.updated_after,
        filter.updated_before,
    );
    if let Some(order_by) = &filter.order_by {
        query.push(("order_by".to_string(), order_by.clone()));
    }
    if let Some(sort) = &filter.sort {
        query.push(("sort".to_string(), sort.clone()));
    }

    query
}

fn push_date_ranges(
    query: &mut Vec<(String, String)>,
    created_after: Option<chrono::DateTime<chrono::Utc>>,
    created_before: Option<chrono::DateTime<chrono::Utc>>,
    updated_after: Option<chrono::DateTime<chrono::Utc>>,
    updated_before: Option<chrono::DateTime<chrono::Utc>>,
) {
    if let Some(ts) = created_after {
        query.push(("created_after".to_string(), ts.to_rfc3339()));
    }
    if let Some(ts) = created_before {
        query.push(("created_before".to_string(), ts.to_rfc3339()));
    }
    if let Some(ts) = updated_after {
        query.push(("updated_after".to_string(), ts.to_rfc3339()));
    }
    if let Some(ts) = updated_before {
        query.push(("updated_before".to_string(), ts.to_rfc3339()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::WireUserRef;
    use crate::model::StateEvent;

    fn wire_issue(project_id: i64, iid: i64) -> WireIssue {
        WireIssue {
            project_id,
            iid,
            id: iid * 100,
            title: "a title".to_string(),
            state: "opened".to_string(),
            ..WireIssue::default()
        }
    }

    #[test]
    fn test_issue_from_wire_requires_identifying_pair() {
        let err = issue_from_wire(wire_issue(0, 7)).expect_err("missing project id");
        assert!(matches!(err, Error::Unexpected(_)));

        let err = issue_from_wire(wire_issue(5, 0)).expect_err("missing iid");
        assert!(matches!(err, Error::Unexpected(_)));

        assert!(issue_from_wire(wire_issue(5, 7)).is_ok());
    }

    #[test]
    fn test_issue_from_wire_absent_optionals_map_to_absent() {
        let issue = issue_from_wire(wire_issue(5, 7)).expect("translate");
        assert!(issue.description.is_none());
        assert!(issue.labels.is_empty());
        assert!(issue.milestone.is_none());
        assert!(issue.assignees.is_empty());
        assert!(issue.epic.is_none());
        assert!(issue.due_date.is_none());
    }

    #[test]
    fn test_issue_from_wire_preserves_assignee_order() {
        let mut wire = wire_issue(5, 7);
        wire.assignees = vec![
            WireUserRef {
                id: 3,
                username: "carol".to_string(),
                name: "Carol".to_string(),
            },
            WireUserRef {
                id: 1,
                username: "alice".to_string(),
                name: "Alice".to_string(),
            },
        ];

        let issue = issue_from_wire(wire).expect("translate");
        let ids: Vec<i64> = issue.assignees.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_epic_from_wire_requires_identifying_pair() {
        let wire = WireEpic {
            group_id: 0,
            iid: 3,
            title: "epic".to_string(),
            state: "opened".to_string(),
            ..WireEpic::default()
        };
        assert!(epic_from_wire(wire).is_err());
    }

    #[test]
    fn test_assignee_precedence_list_wins() {
        let draft = IssueDraft {
            project_id: 1,
            title: "t".to_string(),
            assignee_ids: Some(vec![4, 5]),
            assignee_id: Some(9),
            ..IssueDraft::default()
        };
        let payload = issue_create_payload(&draft);
        assert_eq!(payload.assignee_ids, Some(vec![4, 5]));
    }

    #[test]
    fn test_assignee_precedence_empty_list_falls_back_to_single() {
        let draft = IssueDraft {
            project_id: 1,
            title: "t".to_string(),
            assignee_ids: Some(vec![]),
            assignee_id: Some(9),
            ..IssueDraft::default()
        };
        let payload = issue_create_payload(&draft);
        assert_eq!(payload.assignee_ids, Some(vec![9]));
    }

    #[test]
    fn test_assignee_precedence_nothing_sent_when_absent() {
        let draft = IssueDraft {
            project_id: 1,
            title: "t".to_string(),
            ..IssueDraft::default()
        };
        let payload = issue_create_payload(&draft);
        assert!(payload.assignee_ids.is_none());
    }

    #[test]
    fn test_labels_absent_not_sent_present_empty_clears() {
        let edit = IssueEdit {
            project_id: 1,
            iid: 2,
            ..IssueEdit::default()
        };
        assert!(issue_update_payload(&edit).labels.is_none());

        let edit = IssueEdit {
            project_id: 1,
            iid: 2,
            labels: Some(vec![]),
            ..IssueEdit::default()
        };
        assert_eq!(issue_update_payload(&edit).labels, Some(String::new()));

        let edit = IssueEdit {
            project_id: 1,
            iid: 2,
            labels: Some(vec!["bug".to_string(), "p1".to_string()]),
            ..IssueEdit::default()
        };
        assert_eq!(
            issue_update_payload(&edit).labels,
            Some("bug,p1".to_string())
        );
    }

    #[test]
    fn test_state_event_serialized_as_wire_word() {
        let edit = IssueEdit {
            project_id: 1,
            iid: 2,
            state_event: Some(StateEvent::Close),
            ..IssueEdit::default()
        };
        assert_eq!(
            issue_update_payload(&edit).state_event,
            Some("close".to_string())
        );
    }

    #[test]
    fn test_issue_query_translation() {
        let filter = IssueFilter {
            state: Some(State::Opened),
            labels: Some(vec!["bug".to_string(), "p1".to_string()]),
            assignee: Some(AssigneeSelector::None),
            search: Some("login".to_string()),
            ..IssueFilter::default()
        };
        let query = issue_query(&filter);

        assert!(query.contains(&("state".to_string(), "opened".to_string())));
        assert!(query.contains(&("labels".to_string(), "bug,p1".to_string())));
        assert!(query.contains(&("assignee_id".to_string(), "None".to_string())));
        assert!(query.contains(&("search".to_string(), "login".to_string())));
    }

    #[test]
    fn test_issue_query_assignee_id() {
        let filter = IssueFilter {
            assignee: Some(AssigneeSelector::Id(42)),
            ..IssueFilter::default()
        };
        let query = issue_query(&filter);
        assert_eq!(query, vec![("assignee_id".to_string(), "42".to_string())]);
    }

    #[test]
    fn test_empty_filter_translates_to_empty_query() {
        assert!(issue_query(&IssueFilter::default()).is_empty());
        assert!(epic_query(&EpicFilter::default()).is_empty());
    }
}
