//
//  labctl
//  api/projects.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Project API
//!
//! Types and request builders for project resources. The functions here only
//! build [`RequestDescriptor`]s; dispatching is the gateway's job.
//!
//! ## API Endpoints
//!
//! ```text
//! GET    /projects                 projects visible to the user
//! GET    /projects/owned           projects owned by the user
//! GET    /projects/all             every project (administrators)
//! GET    /projects/{id|namespace}  a single project
//! POST   /projects                 create a project
//! DELETE /projects/{id|namespace}  remove a project
//! ```
//!
//! ## Example
//!
//! ```rust
//! use labctl::api::projects::{ListProjects, ProjectScope, SortDirection};
//!
//! let request = ListProjects {
//!     scope: ProjectScope::Owned,
//!     archived: true,
//!     sort: Some(SortDirection::Desc),
//!     ..Default::default()
//! }
//! .descriptor();
//!
//! assert_eq!(request.path_and_query(), "/projects/owned?archived=true&sort=desc");
//! ```
//!
//! ## Notes
//!
//! - Namespaced references (`group/project`) are sent with `/` encoded as `%2F`
//! - Visibility levels are numeric on the wire: 0 private, 10 internal, 20 public

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{Pagination, Resource};
use super::query::QueryFilters;
use super::request::RequestDescriptor;

/// A project as returned by the API.
///
/// Only `id` and `name` are guaranteed; everything else defaults when the
/// server omits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique numeric identifier.
    pub id: u64,

    /// Display name.
    pub name: String,

    /// Display name prefixed with the owning namespace, e.g. `"Group / Project"`.
    #[serde(default)]
    pub name_with_namespace: Option<String>,

    /// URL slug.
    #[serde(default)]
    pub path: Option<String>,

    /// Slug prefixed with the namespace path, e.g. `"group/project"`.
    #[serde(default)]
    pub path_with_namespace: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub default_branch: Option<String>,

    #[serde(default)]
    pub public: bool,

    /// 0 private, 10 internal, 20 public.
    #[serde(default)]
    pub visibility_level: Option<u8>,

    #[serde(default)]
    pub archived: bool,

    #[serde(default)]
    pub web_url: Option<String>,

    #[serde(default)]
    pub ssh_url_to_repo: Option<String>,

    #[serde(default)]
    pub http_url_to_repo: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub last_activity_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub namespace: Option<Namespace>,
}

impl Resource for Project {
    const TYPE_NAME: &'static str = "Project";
}

impl Project {
    /// The most specific name available: `path_with_namespace`, else `name`.
    pub fn full_path(&self) -> &str {
        self.path_with_namespace.as_deref().unwrap_or(&self.name)
    }

    /// Visibility derived from `visibility_level`, falling back to `public`.
    pub fn visibility(&self) -> Visibility {
        self.visibility_level
            .and_then(Visibility::from_level)
            .unwrap_or(if self.public {
                Visibility::Public
            } else {
                Visibility::Private
            })
    }
}

/// The group or user a project belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Namespace {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
}

/// Project visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Private,
    Internal,
    Public,
}

impl Visibility {
    /// Numeric level used on the wire.
    pub fn level(&self) -> u8 {
        match self {
            Self::Private => 0,
            Self::Internal => 10,
            Self::Public => 20,
        }
    }

    /// Maps a numeric level back; unknown levels yield `None`.
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(Self::Private),
            10 => Some(Self::Internal),
            20 => Some(Self::Public),
            _ => None,
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Private => "private",
            Self::Internal => "internal",
            Self::Public => "public",
        })
    }
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "private" => Ok(Self::Private),
            "internal" => Ok(Self::Internal),
            "public" => Ok(Self::Public),
            other => Err(format!(
                "unknown visibility '{}' (expected private, internal or public)",
                other
            )),
        }
    }
}

/// Which project listing to query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProjectScope {
    /// Projects the user can access: `/projects`.
    #[default]
    Accessible,
    /// Projects the user owns: `/projects/owned`.
    Owned,
    /// Every project on the instance: `/projects/all`. Requires admin.
    All,
}

impl ProjectScope {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Accessible => "/projects",
            Self::Owned => "/projects/owned",
            Self::All => "/projects/all",
        }
    }
}

/// Field to order project listings by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectOrderBy {
    Id,
    Name,
    Path,
    CreatedAt,
    LastActivityAt,
}

impl ProjectOrderBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Path => "path",
            Self::CreatedAt => "created_at",
            Self::LastActivityAt => "last_activity_at",
        }
    }
}

impl fmt::Display for ProjectOrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectOrderBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(Self::Id),
            "name" => Ok(Self::Name),
            "path" => Ok(Self::Path),
            "created_at" => Ok(Self::CreatedAt),
            "last_activity_at" => Ok(Self::LastActivityAt),
            other => Err(format!("unknown order field '{}'", other)),
        }
    }
}

/// Sort direction for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown sort direction '{}' (expected asc or desc)", other)),
        }
    }
}

/// Reference to a single project, by numeric id or by namespaced path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectRef {
    Id(u64),
    /// A `namespace/project` path, unencoded.
    Namespace(String),
}

impl ProjectRef {
    /// The path segment identifying this project.
    ///
    /// # Example
    ///
    /// ```rust
    /// use labctl::api::projects::ProjectRef;
    ///
    /// assert_eq!(ProjectRef::Id(42).path_segment(), "42");
    /// assert_eq!(
    ///     ProjectRef::Namespace("my group/my project".into()).path_segment(),
    ///     "mygroup%2Fmyproject"
    /// );
    /// ```
    pub fn path_segment(&self) -> String {
        match self {
            Self::Id(id) => id.to_string(),
            Self::Namespace(namespace) => encode_namespace(namespace),
        }
    }
}

impl From<u64> for ProjectRef {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}

impl FromStr for ProjectRef {
    type Err = String;

    /// All-digit input is an id, anything else a namespace path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("project reference must not be empty".to_string());
        }
        Ok(match s.parse::<u64>() {
            Ok(id) => Self::Id(id),
            Err(_) => Self::Namespace(s.to_string()),
        })
    }
}

impl fmt::Display for ProjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{}", id),
            Self::Namespace(namespace) => f.write_str(namespace),
        }
    }
}

/// Prepares a namespace path for use as a single path segment.
///
/// Spaces are stripped and `/` becomes `%2F`.
pub fn encode_namespace(namespace: &str) -> String {
    namespace.replace(' ', "").replace('/', "%2F")
}

/// Parameters for listing projects.
///
/// Filters are emitted in a fixed order: `archived`, `order_by`, `sort`,
/// `search`, then pagination. `archived=true` is only sent when `archived`
/// is set.
#[derive(Debug, Clone, Default)]
pub struct ListProjects {
    pub scope: ProjectScope,
    /// Only return archived projects.
    pub archived: bool,
    pub order_by: Option<ProjectOrderBy>,
    pub sort: Option<SortDirection>,
    /// Match against project names. Percent-encoded when the filter is built.
    pub search: Option<String>,
    pub pagination: Pagination,
}

impl ListProjects {
    /// The ordered query filters for this listing.
    pub fn filters(&self) -> QueryFilters {
        let filters = QueryFilters::new()
            .with_if(self.archived, "archived", true)
            .with_opt("order_by", self.order_by)
            .with_opt("sort", self.sort)
            .with_opt(
                "search",
                self.search
                    .as_deref()
                    .map(|s| url::form_urlencoded::byte_serialize(s.as_bytes()).collect::<String>()),
            );
        self.pagination.apply(filters)
    }

    pub fn descriptor(&self) -> RequestDescriptor {
        RequestDescriptor::get(self.scope.path()).query(self.filters())
    }
}

/// Request body for creating a project.
///
/// Only `name` is required; unset options are left out of the payload so the
/// server defaults apply.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewProject {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility_level: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues_enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_requests_enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub wiki_enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippets_enabled: Option<bool>,
}

impl NewProject {
    /// A payload with just a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// `GET /projects/{ref}`
pub fn get_project(project: &ProjectRef) -> RequestDescriptor {
    RequestDescriptor::get(format!("/projects/{}", project.path_segment()))
}

/// `POST /projects` with `project` as the JSON body.
///
/// # Errors
///
/// Returns the serialization error if the payload cannot be encoded.
pub fn create_project(project: &NewProject) -> Result<RequestDescriptor, serde_json::Error> {
    RequestDescriptor::post("/projects").json(project)
}

/// `DELETE /projects/{ref}`
pub fn delete_project(project: &ProjectRef) -> RequestDescriptor {
    RequestDescriptor::delete(format!("/projects/{}", project.path_segment()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::request::Method;

    #[test]
    fn test_scope_paths() {
        assert_eq!(ListProjects::default().descriptor().path(), "/projects");
        let owned = ListProjects {
            scope: ProjectScope::Owned,
            ..Default::default()
        };
        assert_eq!(owned.descriptor().path(), "/projects/owned");
        let all = ListProjects {
            scope: ProjectScope::All,
            ..Default::default()
        };
        assert_eq!(all.descriptor().path(), "/projects/all");
    }

    #[test]
    fn test_list_filter_order() {
        let list = ListProjects {
            scope: ProjectScope::Accessible,
            archived: true,
            order_by: Some(ProjectOrderBy::LastActivityAt),
            sort: Some(SortDirection::Asc),
            search: Some("api".to_string()),
            pagination: Pagination::new().page(2).per_page(10),
        };
        assert_eq!(
            list.descriptor().path_and_query(),
            "/projects?archived=true&order_by=last_activity_at&sort=asc&search=api&page=2&per_page=10"
        );
    }

    #[test]
    fn test_archived_only_when_set() {
        let list = ListProjects {
            search: Some("x".to_string()),
            ..Default::default()
        };
        assert_eq!(list.filters().build(), "?search=x");
        assert_eq!(ListProjects::default().filters().build(), "");
    }

    #[test]
    fn test_search_is_encoded() {
        let list = ListProjects {
            search: Some("my group/app&co".to_string()),
            ..Default::default()
        };
        assert_eq!(list.filters().build(), "?search=my+group%2Fapp%26co");
    }

    #[test]
    fn test_namespace_encoding() {
        assert_eq!(encode_namespace("group/sub group/project"), "group%2Fsubgroup%2Fproject");
        assert_eq!(
            get_project(&ProjectRef::Namespace("group/project".into())).path(),
            "/projects/group%2Fproject"
        );
    }

    #[test]
    fn test_project_ref_parsing() {
        assert_eq!("42".parse::<ProjectRef>().unwrap(), ProjectRef::Id(42));
        assert_eq!(
            "group/app".parse::<ProjectRef>().unwrap(),
            ProjectRef::Namespace("group/app".to_string())
        );
        assert!("  ".parse::<ProjectRef>().is_err());
        assert_eq!(ProjectRef::from(7).to_string(), "7");
    }

    #[test]
    fn test_create_and_delete_descriptors() {
        let mut new = NewProject::named("demo");
        new.visibility_level = Some(Visibility::Internal.level());
        let request = create_project(&new).unwrap();

        assert_eq!(request.method(), Method::Post);
        assert_eq!(request.path(), "/projects");
        assert_eq!(
            request.body(),
            Some(&serde_json::json!({"name": "demo", "visibility_level": 10}))
        );

        let request = delete_project(&ProjectRef::Id(9));
        assert_eq!(request.method(), Method::Delete);
        assert_eq!(request.path(), "/projects/9");
        assert!(request.body().is_none());
    }

    #[test]
    fn test_project_deserializes_with_sparse_fields() {
        let json = r#"{
            "id": 4,
            "name": "Diaspora Client",
            "path_with_namespace": "diaspora/diaspora-client",
            "visibility_level": 10,
            "created_at": "2013-09-30T13:46:02Z",
            "namespace": {"id": 3, "name": "Diaspora", "path": "diaspora"}
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();

        assert_eq!(project.id, 4);
        assert_eq!(project.full_path(), "diaspora/diaspora-client");
        assert_eq!(project.visibility(), Visibility::Internal);
        assert!(!project.archived);
        assert!(project.created_at.is_some());
        assert_eq!(project.namespace.unwrap().name, "Diaspora");
    }

    #[test]
    fn test_visibility_parsing() {
        assert_eq!("PUBLIC".parse::<Visibility>().unwrap(), Visibility::Public);
        assert!("secret".parse::<Visibility>().is_err());
        assert_eq!(Visibility::from_level(20), Some(Visibility::Public));
        assert_eq!(Visibility::from_level(5), None);
    }
}
