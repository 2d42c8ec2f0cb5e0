//
//  labctl
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Configuration commands
//!
//! Saves and shows the server URL and private token every other command
//! authenticates with. Values missing from the command line are prompted for
//! interactively.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;
use dialoguer::{Input, Password};

use crate::output::print_field;

use super::GlobalOptions;

/// Manage the saved server URL and token
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Save the server URL and private token
    Set(SetArgs),

    /// Show the saved configuration with the token masked
    Show,

    /// Show configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Private token sent as PRIVATE-TOKEN
    #[arg(long, short = 't', env = "LABCTL_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Server URL, e.g. https://gitlab.example.com
    #[arg(long, short = 'd')]
    pub domain: Option<String>,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Set(args) => self.set(args, global),
            ConfigSubcommand::Show => self.show(global),
            ConfigSubcommand::Path => self.path(global),
        }
    }

    /// Validate and persist the credential pair
    fn set(&self, args: &SetArgs, global: &GlobalOptions) -> Result<()> {
        let store = global.store()?;

        let domain = match &args.domain {
            Some(domain) => domain.clone(),
            None => Input::<String>::new()
                .with_prompt("Server URL")
                .interact_text()?,
        };
        let token = match &args.token {
            Some(token) => token.clone(),
            None => Password::new().with_prompt("Private token").interact()?,
        };

        let credentials = store.save(&token, &domain)?;

        if global.json {
            let result = serde_json::json!({
                "domain": credentials.domain(),
                "token": credentials.masked_token(),
                "path": store.path(),
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!(
                "{} Saved configuration for {} to {}",
                style("✓").green(),
                style(credentials.domain()).cyan(),
                store.path().display()
            );
        }

        Ok(())
    }

    /// Show the saved pair
    fn show(&self, global: &GlobalOptions) -> Result<()> {
        let store = global.store()?;
        let credentials = store.load()?;

        if global.json {
            let result = serde_json::json!({
                "domain": credentials.domain(),
                "token": credentials.masked_token(),
                "path": store.path(),
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            let color = console::colors_enabled();
            print_field("Domain", credentials.domain(), color);
            print_field("Token", &credentials.masked_token(), color);
            print_field("File", &store.path().display().to_string(), color);
        }

        Ok(())
    }

    /// Show config file path
    fn path(&self, global: &GlobalOptions) -> Result<()> {
        let store = global.store()?;
        let path = store.path();

        if global.json {
            let result = serde_json::json!({
                "path": path,
                "exists": store.exists(),
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{}", path.display());
        }

        Ok(())
    }
}
