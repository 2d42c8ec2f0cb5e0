//
//  labctl
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # labctl Library
//!
//! A command-line client library for the v3 REST API of GitLab-style
//! project hosting servers.
//!
//! ## Overview
//!
//! This library provides the core functionality for the `labctl` CLI tool:
//! it persists a server URL and private token, and sends authenticated
//! requests for project resources through a single gateway.
//!
//! ## Features
//!
//! - **Persistent credentials**: one validated `{token, domain}` pair per user
//! - **Single request pipeline**: every call is authenticated, dispatched and
//!   classified the same way
//! - **Tagged results**: every decoded item carries the resource type name
//! - **Lenient or strict**: API failures can be reported as warnings or errors
//! - **Interactive & Scriptable**: terminal tables or JSON output
//!
//! ## Module Structure
//!
//! - [`cli`]: Command-line interface definitions using clap
//! - [`api`]: Query building, request descriptors, the gateway and resources
//! - [`config`]: Credential persistence
//! - [`output`]: Output formatting (Table, JSON)
//! - [`error`]: The library-wide error type
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use labctl::api::{projects::{ListProjects, Project}, ApiGateway};
//! use labctl::config::ConfigStore;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let store = ConfigStore::from_default_location()?;
//! store.save("glpat-example-token", "https://gitlab.example.com")?;
//!
//! let gateway = ApiGateway::new(store)?;
//! for project in gateway.fetch::<Project>(&ListProjects::default().descriptor()).await? {
//!     println!("{} {}", project.type_name, project.item.full_path());
//! }
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
///
/// Contains all CLI commands, arguments, and subcommands defined using the clap derive API.
pub mod cli;

/// API request pipeline and resources.
///
/// Builds query strings and request descriptors, authenticates and dispatches
/// them, and decodes tagged results.
pub mod api;

/// Credential persistence.
///
/// Manages the `{token, domain}` pair stored in a platform-specific location:
/// - Linux: `~/.config/labctl/Configuration.toml`
/// - macOS: `~/Library/Application Support/labctl/Configuration.toml`
/// - Windows: `%APPDATA%\labctl\Configuration.toml`
pub mod config;

/// Library-wide error type.
pub mod error;

/// Output formatting for different modes.
pub mod output;

pub use cli::Cli;
pub use error::{Error, Result};

/// Application name constant.
///
/// The name of the CLI binary, used for display purposes and configuration paths.
pub const APP_NAME: &str = "labctl";

/// Application version constant, taken from Cargo.toml at compile time.
///
/// # Example
///
/// ```rust
/// use labctl::VERSION;
///
/// println!("labctl version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Lets scripts tell configuration problems apart from API failures.
///
/// # Example
///
/// ```rust,no_run
/// use labctl::exit_codes;
/// use std::process;
///
/// process::exit(exit_codes::NOT_CONFIGURED);
/// ```
pub mod exit_codes {
    use crate::api::ApiError;
    use crate::config::ConfigError;
    use crate::error::Error;

    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error.
    ///
    /// An unspecified error occurred during execution, including invalid
    /// configuration values. Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments, as reported by clap.
    pub const USAGE: i32 = 2;

    /// No configuration has been saved.
    ///
    /// Run `labctl config set` first.
    pub const NOT_CONFIGURED: i32 = 3;

    /// An API call failed while running with `--strict`.
    pub const API_ERROR: i32 = 4;

    /// Maps an error raised by a command to its exit code.
    ///
    /// The whole error chain is searched, so context added with
    /// `anyhow::Context` does not hide the underlying cause.
    pub fn for_error(err: &anyhow::Error) -> i32 {
        for cause in err.chain() {
            if let Some(err) = cause.downcast_ref::<Error>() {
                return match err {
                    Error::Config(err) => for_config_error(err),
                    Error::Api(_) => API_ERROR,
                };
            }
            if let Some(err) = cause.downcast_ref::<ConfigError>() {
                return for_config_error(err);
            }
            if cause.downcast_ref::<ApiError>().is_some() {
                return API_ERROR;
            }
        }
        ERROR
    }

    fn for_config_error(err: &ConfigError) -> i32 {
        match err {
            ConfigError::NotConfigured { .. } => NOT_CONFIGURED,
            _ => ERROR,
        }
    }

}
