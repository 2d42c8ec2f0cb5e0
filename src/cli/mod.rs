//
//  labctl
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod config;
mod event;
mod project;

pub use config::ConfigCommand;
pub use event::EventCommand;
pub use project::ProjectCommand;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;

use crate::api::{ApiGateway, RequestDescriptor, Resource, Tagged};
use crate::config::ConfigStore;
use crate::output::{OutputFormat, OutputWriter};

/// labctl - Manage GitLab-style projects from the command line
#[derive(Parser, Debug)]
#[command(
    name = "labctl",
    version,
    about = "Manage GitLab-style projects from the command line",
    long_about = "labctl stores your server URL and private token once, then lists, \n\
                  inspects, creates and deletes projects and reads their activity.",
    propagate_version = true,
    after_help = "Use 'labctl <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Fail on API errors instead of warning and printing nothing
    ///
    /// `LABCTL_STRICT` counts as off when empty, `0`, `false`, `no`, `n` or
    /// `off`, and as on for any other value.
    #[arg(
        long,
        global = true,
        env = "LABCTL_STRICT",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub strict: bool,

    /// Directory holding the labctl configuration folder
    #[arg(long, global = true, env = "LABCTL_CONFIG_DIR", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}

impl GlobalOptions {
    /// The configuration store selected by `--config-dir` or the platform default.
    pub fn store(&self) -> Result<ConfigStore> {
        match &self.config_dir {
            Some(dir) => Ok(ConfigStore::new(dir)),
            None => Ok(ConfigStore::from_default_location()?),
        }
    }

    pub fn gateway(&self) -> Result<ApiGateway> {
        ApiGateway::new(self.store()?).context("Failed to initialise HTTP client")
    }

    pub fn writer(&self) -> OutputWriter {
        if self.json {
            OutputWriter::new(OutputFormat::Json)
        } else {
            OutputWriter::new(OutputFormat::Table)
        }
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the saved server URL and token
    Config(ConfigCommand),

    /// Manage projects
    #[command(visible_alias = "proj")]
    Project(ProjectCommand),

    /// View project activity
    Event(EventCommand),

    /// Print version information
    Version,
}

/// Sends `request` through the gateway, honouring `--strict`.
///
/// Without `--strict` an API failure is logged as a warning and yields
/// `None`, so the caller prints nothing; with it the failure becomes the
/// command's error. Missing or broken configuration is an error either way.
pub(crate) async fn dispatch<T>(
    gateway: &ApiGateway,
    request: &RequestDescriptor,
    global: &GlobalOptions,
) -> Result<Option<Vec<Tagged<T>>>>
where
    T: Resource + DeserializeOwned,
{
    if global.strict {
        return Ok(Some(gateway.fetch::<T>(request).await?));
    }

    let lenient = gateway.fetch_or_warn::<T>(request).await?;
    match lenient.warning {
        Some(_) => Ok(None),
        None => Ok(Some(lenient.items)),
    }
}
