use std::{collections::BTreeSet, fmt::Display};

use tracing::{debug, error};

use crate::api::{Format, Profile};

/// Distinct tags across every profile, sorted for stable display.
pub fn collect_tags(profiles: &[Profile]) -> Vec<String> {
    profiles
        .iter()
        .flat_map(|p| p.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Snapshot of the profile collection for one activation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileSnapshot {
    pub profiles: Vec<Profile>,
    pub tags: Vec<String>,
}

impl ProfileSnapshot {
    pub fn new(profiles: Vec<Profile>) -> Self {
        let tags = collect_tags(&profiles);
        Self { profiles, tags }
    }

    /// Apply a fetch outcome. A failure keeps whatever was held before.
    pub fn update<E: Display>(&mut self, result: Result<Vec<Profile>, E>) {
        match result {
            Ok(profiles) => {
                debug!("Loaded {} profiles", profiles.len());
                *self = Self::new(profiles);
            }
            Err(err) => error!("Error fetching profiles: {err}"),
        }
    }
}

/// Apply a format fetch outcome. A failure keeps whatever was held before.
pub fn update_formats<E: Display>(formats: &mut Vec<Format>, result: Result<Vec<Format>, E>) {
    match result {
        Ok(fetched) => {
            debug!("Loaded {} formats", fetched.len());
            *formats = fetched;
        }
        Err(err) => error!("Error fetching formats: {err}"),
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::Error;

    fn tagged(name: &str, tags: &[&str]) -> Profile {
        let mut profile = Profile::new(name);
        profile.tags = tags.iter().map(|t| t.to_string()).collect();
        profile
    }

    #[test]
    fn test_collect_tags_deduplicates() {
        let profiles = vec![
            tagged("Remux", &["4k", "hdr"]),
            tagged("Web", &["hdr", "1080p"]),
            tagged("Untagged", &[]),
        ];

        assert_eq!(collect_tags(&profiles), vec!["1080p", "4k", "hdr"]);
    }

    fn bad_gateway(url: &str) -> Error {
        Error::Status {
            url: url.into(),
            status: reqwest::StatusCode::BAD_GATEWAY,
        }
    }

    #[test]
    fn test_update_replaces_profiles_and_tags() {
        let mut snapshot = ProfileSnapshot::new(vec![tagged("Remux", &["4k"])]);

        snapshot.update(Ok::<_, Error>(vec![tagged("Web", &["1080p"])]));

        assert_eq!(snapshot.profiles.len(), 1);
        assert_eq!(snapshot.tags, vec!["1080p"]);
    }

    #[test]
    fn test_failed_fetch_keeps_snapshot() {
        let mut empty = ProfileSnapshot::default();
        empty.update(Err(bad_gateway("http://localhost:5000/profile")));
        assert_eq!(empty, ProfileSnapshot::default());

        let loaded = ProfileSnapshot::new(vec![tagged("Remux", &["4k"])]);
        let mut snapshot = loaded.clone();
        snapshot.update(Err(bad_gateway("http://localhost:5000/profile")));
        assert_eq!(snapshot, loaded);
    }

    #[test]
    fn test_failed_format_fetch_keeps_formats() {
        let mut formats = Vec::new();
        update_formats(&mut formats, Err(bad_gateway("http://localhost:5000/format")));
        assert!(formats.is_empty());

        let held = vec![Format {
            id: 1,
            name: "DV HDR10".into(),
            description: String::new(),
            extra: Default::default(),
        }];
        let mut formats = held.clone();
        update_formats(&mut formats, Err(bad_gateway("http://localhost:5000/format")));
        assert_eq!(formats, held);
    }
}
