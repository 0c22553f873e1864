//! Access to the Profilarr backend.
//!
//! The [`Backend`] trait is the seam between the page core and whatever serves profile data.
//! [`HttpBackend`] talks to the real JSON API; tests use an in-memory mock.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::Result;

mod http;
mod models;

pub use http::HttpBackend;
pub use models::{
    Format, GitStatus, GitStatusData, MergeConflict, Profile, ProfileFormat, parse_timestamp,
};

#[async_trait]
pub trait Backend: Debug + Send + Sync {
    async fn profiles(&self) -> Result<Vec<Profile>>;

    async fn formats(&self) -> Result<Vec<Format>>;

    async fn git_status(&self) -> Result<GitStatus>;

    /// Create the profile when it is unsaved, otherwise update it in place.
    async fn save_profile(&self, profile: &Profile) -> Result<()>;
}
