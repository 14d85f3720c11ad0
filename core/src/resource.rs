//! Remote resource kinds the fetcher knows how to address and decode.

use serde::de::DeserializeOwned;

use crate::types::{Identifier, Repo, User};

/// A kind of remote resource: where it lives relative to the base URL and
/// what its JSON decodes into.
pub trait Resource {
    type Output: DeserializeOwned + Send;

    /// Path segments below the base URL. Each segment is percent-encoded on
    /// its own, so an identifier can never span more than one segment.
    fn path_segments(id: &Identifier) -> Vec<&str>;
}

/// `GET /users/{login}`.
#[derive(Debug, Clone, Copy)]
pub struct UserProfile;

impl Resource for UserProfile {
    type Output = User;

    fn path_segments(id: &Identifier) -> Vec<&str> {
        vec!["users", id.as_str()]
    }
}

/// `GET /users/{login}/repos`.
#[derive(Debug, Clone, Copy)]
pub struct UserRepos;

impl Resource for UserRepos {
    type Output = Vec<Repo>;

    fn path_segments(id: &Identifier) -> Vec<&str> {
        vec!["users", id.as_str(), "repos"]
    }
}
