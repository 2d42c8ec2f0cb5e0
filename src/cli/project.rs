//
//  labctl
//  cli/project.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Project commands
//!
//! Projects are addressed either by numeric id or by their
//! `namespace/project` path.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;
use dialoguer::Confirm;

use crate::api::projects::{
    self, ListProjects, NewProject, Project, ProjectOrderBy, ProjectRef, ProjectScope,
    SortDirection, Visibility,
};
use crate::api::Pagination;
use crate::output::{format_bool, format_timestamp, truncate, TableOutput};

use super::{dispatch, GlobalOptions};

/// Manage projects
#[derive(Args, Debug)]
pub struct ProjectCommand {
    #[command(subcommand)]
    pub command: ProjectSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProjectSubcommand {
    /// List projects
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// View project details
    View(ViewArgs),

    /// Create a project
    Create(CreateArgs),

    /// Delete a project
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only projects you own
    #[arg(long, conflicts_with = "all")]
    pub owned: bool,

    /// Every project on the server (administrators only)
    #[arg(long)]
    pub all: bool,

    /// Only archived projects
    #[arg(long)]
    pub archived: bool,

    /// Order by field
    #[arg(long, value_parser = ["id", "name", "path", "created_at", "last_activity_at"])]
    pub order_by: Option<String>,

    /// Sort direction
    #[arg(long, value_parser = ["asc", "desc"])]
    pub sort: Option<String>,

    /// Match project names
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Page number
    #[arg(long)]
    pub page: Option<u32>,

    /// Results per page (max 100)
    #[arg(long)]
    pub per_page: Option<u32>,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Project id or namespace/project path
    pub project: ProjectRef,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Project name
    #[arg(long, short = 'n')]
    pub name: String,

    /// URL slug, defaults to one derived from the name
    #[arg(long, short = 'p')]
    pub path: Option<String>,

    /// Namespace to create the project in
    #[arg(long)]
    pub namespace_id: Option<u64>,

    /// Project description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Project visibility
    #[arg(long, value_parser = ["private", "internal", "public"])]
    pub visibility: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Project id or namespace/project path
    pub project: ProjectRef,

    /// Skip confirmation
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl ProjectCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ProjectSubcommand::List(args) => self.list(args, global).await,
            ProjectSubcommand::View(args) => self.view(args, global).await,
            ProjectSubcommand::Create(args) => self.create(args, global).await,
            ProjectSubcommand::Delete(args) => self.delete(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let list = list_request(args)?;
        let gateway = global.gateway()?;

        match dispatch::<Project>(&gateway, &list.descriptor(), global).await? {
            Some(projects) => global.writer().write_list(&projects),
            None => Ok(()),
        }
    }

    async fn view(&self, args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
        let gateway = global.gateway()?;

        let request = projects::get_project(&args.project);
        let Some(projects) = dispatch::<Project>(&gateway, &request, global).await? else {
            return Ok(());
        };

        match projects.first() {
            Some(project) => global.writer().write_detail(project),
            None => global.writer().write_list(&projects),
        }
    }

    async fn create(&self, args: &CreateArgs, global: &GlobalOptions) -> Result<()> {
        let visibility = args
            .visibility
            .as_deref()
            .map(str::parse::<Visibility>)
            .transpose()
            .map_err(anyhow::Error::msg)?;

        let payload = NewProject {
            name: args.name.clone(),
            path: args.path.clone(),
            namespace_id: args.namespace_id,
            description: args.description.clone(),
            visibility_level: visibility.map(|v| v.level()),
            ..Default::default()
        };

        let gateway = global.gateway()?;
        let request = projects::create_project(&payload)?;
        let Some(created) = dispatch::<Project>(&gateway, &request, global).await? else {
            return Ok(());
        };

        let writer = global.writer();
        match created.first() {
            Some(project) if global.json => writer.write_detail(project),
            Some(project) => {
                writer.write_success(&format!(
                    "Created project {} (id {})",
                    project.item.full_path(),
                    project.item.id
                ));
                Ok(())
            }
            None => Ok(()),
        }
    }

    async fn delete(&self, args: &DeleteArgs, global: &GlobalOptions) -> Result<()> {
        if !args.yes {
            let confirmed = Confirm::new()
                .with_prompt(format!(
                    "Delete project {}? This cannot be undone",
                    style(&args.project).red()
                ))
                .default(false)
                .interact()?;
            if !confirmed {
                bail!("Deletion cancelled");
            }
        }

        let gateway = global.gateway()?;
        let request = projects::delete_project(&args.project);

        if global.strict {
            gateway.fetch::<serde_json::Value>(&request).await?;
        } else if gateway
            .fetch_or_warn::<serde_json::Value>(&request)
            .await?
            .warning
            .is_some()
        {
            return Ok(());
        }

        global
            .writer()
            .write_success(&format!("Deleted project {}", args.project));
        Ok(())
    }
}

/// Builds the listing parameters from the command line.
fn list_request(args: &ListArgs) -> Result<ListProjects> {
    let scope = if args.owned {
        ProjectScope::Owned
    } else if args.all {
        ProjectScope::All
    } else {
        ProjectScope::Accessible
    };

    let mut pagination = Pagination::new();
    if let Some(page) = args.page {
        pagination = pagination.page(page);
    }
    if let Some(per_page) = args.per_page {
        pagination = pagination.per_page(per_page);
    }

    Ok(ListProjects {
        scope,
        archived: args.archived,
        order_by: args
            .order_by
            .as_deref()
            .map(str::parse::<ProjectOrderBy>)
            .transpose()
            .map_err(anyhow::Error::msg)?,
        sort: args
            .sort
            .as_deref()
            .map(str::parse::<SortDirection>)
            .transpose()
            .map_err(anyhow::Error::msg)?,
        search: args.search.clone(),
        pagination,
    })
}

impl TableOutput for Project {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Path", "Visibility", "Archived", "Last activity"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.full_path().to_string(),
            self.visibility().to_string(),
            format_bool(self.archived),
            format_timestamp(self.last_activity_at.as_ref()),
        ]
    }

    fn title(&self) -> String {
        self.name_with_namespace
            .clone()
            .unwrap_or_else(|| self.name.clone())
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("ID", self.id.to_string()),
            ("Path", self.full_path().to_string()),
            ("Visibility", self.visibility().to_string()),
            ("Archived", format_bool(self.archived)),
        ];

        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            fields.push(("Description", truncate(description, 72)));
        }
        if let Some(branch) = &self.default_branch {
            fields.push(("Default branch", branch.clone()));
        }
        if let Some(url) = &self.web_url {
            fields.push(("Web URL", url.clone()));
        }
        if let Some(url) = &self.ssh_url_to_repo {
            fields.push(("SSH", url.clone()));
        }
        if let Some(url) = &self.http_url_to_repo {
            fields.push(("HTTP", url.clone()));
        }

        fields.push(("Created", format_timestamp(self.created_at.as_ref())));
        fields.push(("Last activity", format_timestamp(self.last_activity_at.as_ref())));
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(subcommand)]
        command: ProjectSubcommand,
    }

    fn parse_list(args: &[&str]) -> ListArgs {
        let argv = std::iter::once("labctl").chain(std::iter::once("list")).chain(args.iter().copied());
        match Harness::parse_from(argv).command {
            ProjectSubcommand::List(args) => args,
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_list_flags_become_filters() {
        let args = parse_list(&[
            "--owned",
            "--archived",
            "--order-by",
            "name",
            "--sort",
            "desc",
            "--per-page",
            "500",
        ]);
        let list = list_request(&args).unwrap();

        assert_eq!(list.scope, ProjectScope::Owned);
        assert_eq!(
            list.descriptor().path_and_query(),
            "/projects/owned?archived=true&order_by=name&sort=desc&per_page=100"
        );
    }

    #[test]
    fn test_owned_conflicts_with_all() {
        let argv = ["labctl", "list", "--owned", "--all"];
        assert!(Harness::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_project_ref_argument() {
        let harness = Harness::parse_from(["labctl", "view", "group/app"]);
        match harness.command {
            ProjectSubcommand::View(args) => {
                assert_eq!(args.project, ProjectRef::Namespace("group/app".to_string()))
            }
            _ => panic!("expected view"),
        }
    }

    #[test]
    fn test_project_row() {
        let project: Project = serde_json::from_str(
            r#"{"id": 3, "name": "app", "path_with_namespace": "group/app", "public": true}"#,
        )
        .unwrap();
        let row = project.row();
        assert_eq!(row.len(), Project::headers().len());
        assert_eq!(row[1], "group/app");
        assert_eq!(row[2], "public");
        assert_eq!(row[4], "-");
    }
}
