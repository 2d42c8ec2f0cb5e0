//
//  labctl
//  error.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Crate-level error returned by [`ApiGateway::execute`](crate::api::ApiGateway::execute).

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// Either the credentials could not be loaded, or the API call failed.
///
/// The two halves are kept apart because callers treat them differently:
/// a configuration failure always aborts the command, while an API failure
/// may be reported as a warning.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Shorthand for results carrying [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
