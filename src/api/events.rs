//
//  labctl
//  api/events.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Project events: `GET /projects/{ref}/events`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{Pagination, Resource};
use super::projects::ProjectRef;
use super::query::QueryFilters;
use super::request::RequestDescriptor;

/// One entry of a project's activity feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub project_id: Option<u64>,

    /// What happened, e.g. `"pushed to"`, `"opened"`, `"joined"`.
    #[serde(default)]
    pub action_name: Option<String>,

    #[serde(default)]
    pub target_id: Option<u64>,

    /// Kind of object acted on, e.g. `"Issue"` or `"MergeRequest"`.
    #[serde(default)]
    pub target_type: Option<String>,

    #[serde(default)]
    pub target_title: Option<String>,

    #[serde(default)]
    pub author_id: Option<u64>,

    #[serde(default)]
    pub author_username: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Push payload (commits, refs); absent for other actions.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl Resource for Event {
    const TYPE_NAME: &'static str = "Event";
}

impl Event {
    /// A one-line summary: `"<author> <action> <target>"`.
    pub fn summary(&self) -> String {
        let author = self.author_username.as_deref().unwrap_or("someone");
        let action = self.action_name.as_deref().unwrap_or("updated");
        let target = self
            .target_title
            .as_deref()
            .or(self.target_type.as_deref())
            .or(self.title.as_deref());

        match target {
            Some(target) => format!("{} {} {}", author, action, target),
            None => format!("{} {}", author, action),
        }
    }
}

/// `GET /projects/{ref}/events`, optionally paged.
pub fn list_project_events(project: &ProjectRef, pagination: Pagination) -> RequestDescriptor {
    RequestDescriptor::get(format!("/projects/{}/events", project.path_segment()))
        .query(pagination.apply(QueryFilters::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_path() {
        let request = list_project_events(&ProjectRef::Id(15), Pagination::new());
        assert_eq!(request.path_and_query(), "/projects/15/events");

        let request = list_project_events(
            &ProjectRef::Namespace("group/app".into()),
            Pagination::new().per_page(5),
        );
        assert_eq!(request.path_and_query(), "/projects/group%2Fapp/events?per_page=5");
    }

    #[test]
    fn test_event_summary() {
        let json = r#"{
            "title": null,
            "project_id": 15,
            "action_name": "opened",
            "target_id": 830,
            "target_type": "Issue",
            "target_title": "Public project search field",
            "author_id": 1,
            "author_username": "root",
            "created_at": "2016-06-17T07:47:25.578Z"
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.summary(), "root opened Public project search field");

        let push: Event = serde_json::from_str(
            r#"{"action_name": "pushed to", "author_username": "dev", "data": {"ref": "refs/heads/main"}}"#,
        )
        .unwrap();
        assert_eq!(push.summary(), "dev pushed to");
        assert!(push.data.is_some());
    }
}
