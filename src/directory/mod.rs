//! User directory module.
//!
//! The directory is the full list of candidate recipients. It is fetched
//! once per form session from a remote endpoint and never mutated locally.

pub mod http;

use std::fmt;
use std::future::Future;

use serde::{Deserialize, Serialize};

pub use http::HttpDirectory;

/// A candidate recipient as returned by the directory endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Directory-unique identifier
    pub id: u64,
    /// Display name
    pub name: String,
    /// Email address, unique per directory
    pub email: String,
}

impl User {
    pub fn new(id: u64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// Common interface for directory sources.
///
/// Fetching never fails from the caller's point of view: implementations
/// log whatever went wrong and resolve to an empty list instead.
pub trait UserSource: Send + Sync {
    fn fetch_users(&self) -> impl Future<Output = Vec<User>> + Send;
}

/// A fixed, in-memory directory
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    users: Vec<User>,
}

impl StaticDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }
}

impl UserSource for StaticDirectory {
    async fn fetch_users(&self) -> Vec<User> {
        self.users.clone()
    }
}
