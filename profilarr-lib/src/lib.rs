//! Core of the Profilarr profile page.
//!
//! Holds the data model and backend client, the client configuration, and the view core that
//! gates, loads, projects and edits the profile collection independently of any renderer.

pub mod api;
pub mod config;
pub mod fs;
pub mod page;

mod error;

pub use api::{Backend, Format, GitStatus, HttpBackend, MergeConflict, Profile, ProfileFormat};
pub use error::{Error, Result};
