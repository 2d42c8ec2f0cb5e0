//
//  labctl
//  cli/event.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Project activity commands

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::events::{self, Event};
use crate::api::projects::ProjectRef;
use crate::api::Pagination;
use crate::output::{format_timestamp, truncate, TableOutput};

use super::{dispatch, GlobalOptions};

/// View project activity
#[derive(Args, Debug)]
pub struct EventCommand {
    #[command(subcommand)]
    pub command: EventSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum EventSubcommand {
    /// List recent events of a project
    #[command(visible_alias = "ls")]
    List(ListArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Project id or namespace/project path
    pub project: ProjectRef,

    /// Page number
    #[arg(long)]
    pub page: Option<u32>,

    /// Results per page (max 100)
    #[arg(long)]
    pub per_page: Option<u32>,
}

impl EventCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            EventSubcommand::List(args) => self.list(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let mut pagination = Pagination::new();
        if let Some(page) = args.page {
            pagination = pagination.page(page);
        }
        if let Some(per_page) = args.per_page {
            pagination = pagination.per_page(per_page);
        }

        let gateway = global.gateway()?;
        let request = events::list_project_events(&args.project, pagination);
        match dispatch::<Event>(&gateway, &request, global).await? {
            Some(events) => global.writer().write_list(&events),
            None => Ok(()),
        }
    }
}

impl TableOutput for Event {
    fn headers() -> Vec<&'static str> {
        vec!["When", "Author", "Action", "Target"]
    }

    fn row(&self) -> Vec<String> {
        let target = self
            .target_title
            .as_deref()
            .or(self.target_type.as_deref())
            .or(self.title.as_deref())
            .unwrap_or("-");

        vec![
            format_timestamp(self.created_at.as_ref()),
            self.author_username.clone().unwrap_or_else(|| "-".to_string()),
            self.action_name.clone().unwrap_or_else(|| "-".to_string()),
            truncate(target, 50),
        ]
    }

    fn title(&self) -> String {
        self.summary()
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("When", format_timestamp(self.created_at.as_ref()))];
        if let Some(kind) = &self.target_type {
            fields.push(("Target type", kind.clone()));
        }
        if let Some(id) = self.target_id {
            fields.push(("Target id", id.to_string()));
        }
        if let Some(project) = self.project_id {
            fields.push(("Project", project.to_string()));
        }
        fields
    }
}
