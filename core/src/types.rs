//! Identifiers, outcomes and the GitHub DTOs decoded by the fetcher.
//!
//! # Design
//! The DTOs mirror the subset of the GitHub REST schema this crate reads.
//! Unknown fields are ignored so the same types decode both the real API and
//! the mock server. The mock server defines its own copies; integration tests
//! catch schema drift between the two crates.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FetchResult, InvalidArgument};

/// Opaque, non-empty name of a remote resource (for example a user handle).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(raw: &str) -> Result<Self, InvalidArgument> {
        if raw.is_empty() {
            return Err(InvalidArgument::new("identifier must not be empty"));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate a whole batch, failing on the first malformed entry.
    pub fn parse_all<S: AsRef<str>>(raw: &[S]) -> Result<Vec<Self>, InvalidArgument> {
        raw.iter().map(|s| Self::new(s.as_ref())).collect()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for Identifier {
    type Error = InvalidArgument;

    fn try_from(raw: &str) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

/// An identifier paired with the result of fetching it.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome<T> {
    pub id: Identifier,
    pub result: FetchResult<T>,
}

impl<T> FetchOutcome<T> {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// A GitHub user profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub login: String,
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub public_repos: u32,
}

/// A repository as listed under `/users/{login}/repos`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Repo {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub fork: bool,
}

/// Error payload GitHub sends alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_identifier_is_rejected() {
        let err = Identifier::new("").unwrap_err();
        assert_eq!(err.reason, "identifier must not be empty");
    }

    #[test]
    fn parse_all_stops_at_first_empty_entry() {
        assert!(Identifier::parse_all(&["alice", "", "bob"]).is_err());
        let ids = Identifier::parse_all(&["alice", "bob"]).unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[1].as_str(), "bob");
    }

    #[test]
    fn user_ignores_unknown_fields() {
        let user: User = serde_json::from_str(
            r#"{"login":"alice","id":1,"name":"Alice","public_repos":3,"avatar_url":"x"}"#,
        )
        .unwrap();
        assert_eq!(user.name.as_deref(), Some("Alice"));
        assert_eq!(user.public_repos, 3);
    }

    #[test]
    fn user_name_may_be_null() {
        let user: User = serde_json::from_str(r#"{"login":"ghost","id":2,"name":null}"#).unwrap();
        assert!(user.name.is_none());
        assert_eq!(user.public_repos, 0);
    }
}
