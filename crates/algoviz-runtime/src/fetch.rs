#![forbid(unsafe_code)]

//! Fetch requests and their outcomes.
//!
//! A sample fetch is identified by a [`FetchToken`]: the generation the
//! explorer was at when it asked, plus the algorithm name. The explorer bumps
//! its generation on every selection, so a token from an earlier selection
//! can never match again and its late result is dropped.

use std::fmt;

use algoviz_core::catalog::{Catalog, SampleRun};
use serde::{Deserialize, Serialize};

/// Identity of one outstanding sample fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FetchToken {
    pub generation: u64,
    pub name: String,
}

impl FetchToken {
    pub fn new(generation: u64, name: impl Into<String>) -> Self {
        Self {
            generation,
            name: name.into(),
        }
    }
}

impl fmt::Display for FetchToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.generation)
    }
}

/// A request the host must fulfil.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "fetch", rename_all = "snake_case")]
pub enum FetchRequest {
    /// Load the algorithm catalog.
    Catalog,
    /// Load the sample run for the token's algorithm.
    Sample { token: FetchToken },
}

impl FetchRequest {
    pub fn sample(token: FetchToken) -> Self {
        Self::Sample { token }
    }
}

/// The completed result of a [`FetchRequest`].
///
/// Errors are carried as display strings: a failed sample only degrades the
/// view, and a failed catalog is shown to the user verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Catalog(Result<Catalog, String>),
    Sample {
        token: FetchToken,
        result: Result<SampleRun, String>,
    },
}

impl FetchOutcome {
    /// Build a catalog outcome from any displayable error.
    pub fn catalog<E: fmt::Display>(result: Result<Catalog, E>) -> Self {
        Self::Catalog(result.map_err(|e| e.to_string()))
    }

    /// Build a sample outcome from any displayable error.
    pub fn sample<E: fmt::Display>(token: FetchToken, result: Result<SampleRun, E>) -> Self {
        Self::Sample {
            token,
            result: result.map_err(|e| e.to_string()),
        }
    }

    /// The request this outcome answers.
    pub fn request(&self) -> FetchRequest {
        match self {
            Self::Catalog(_) => FetchRequest::Catalog,
            Self::Sample { token, .. } => FetchRequest::sample(token.clone()),
        }
    }
}
