//! JSON shapes served by the Profilarr backend.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A named quality profile referencing zero or more custom formats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, with = "timestamp")]
    pub date_created: Option<DateTime<Local>>,
    #[serde(default, with = "timestamp")]
    pub date_modified: Option<DateTime<Local>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub custom_formats: Vec<ProfileFormat>,
    /// Fields this client doesn't interpret, kept so saves don't drop them
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Profile {
    /// Identifier carried by a profile the backend hasn't assigned an id to yet.
    pub const UNSAVED_ID: i64 = 0;

    /// A blank, unsaved profile with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Self::UNSAVED_ID,
            name: name.into(),
            description: String::new(),
            tags: Vec::new(),
            date_created: None,
            date_modified: None,
            custom_formats: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id != Self::UNSAVED_ID
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn references_format(&self, format_id: i64) -> bool {
        self.custom_formats.iter().any(|f| f.id == format_id)
    }
}

/// A custom format reference held by a [`Profile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFormat {
    pub id: i64,
    #[serde(default)]
    pub score: i64,
}

/// A custom format. Only the identifier and labels are read here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Format {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of the repository status endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitStatus {
    pub success: bool,
    #[serde(default)]
    pub data: Option<GitStatusData>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitStatusData {
    #[serde(default)]
    pub merge_conflicts: Option<Vec<MergeConflict>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeConflict {
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl MergeConflict {
    /// Best available label for display.
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.file_path.as_deref())
            .unwrap_or("unknown file")
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a backend timestamp.
///
/// Accepts RFC 3339, a naive date-time (interpreted in local time) or a bare date (local
/// midnight). Returns `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Local.from_local_datetime(&naive).earliest();
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
}

/// Lenient (de)serialization for optional timestamps: unknown shapes become `None`.
mod timestamp {
    use super::*;

    pub fn serialize<S>(value: &Option<DateTime<Local>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Local>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::String(raw)) => parse_timestamp(&raw),
            _ => None,
        })
    }
}

#[cfg(test)]
mod test {
    use chrono::{Datelike, Timelike};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_missing_lists_become_empty() {
        let profile: Profile = serde_json::from_value(json!({
            "id": 3,
            "name": "1080p Balanced",
            "tags": null,
        }))
        .unwrap();

        assert!(profile.tags.is_empty());
        assert!(profile.custom_formats.is_empty());
        assert_eq!(profile.date_created, None);
    }

    #[test]
    fn test_unknown_fields_survive() {
        let raw = json!({
            "id": 1,
            "name": "Remux",
            "upgradesAllowed": true,
            "custom_formats": [{ "id": 4, "score": 100 }],
        });

        let profile: Profile = serde_json::from_value(raw).unwrap();
        let back = serde_json::to_value(&profile).unwrap();

        assert_eq!(back["upgradesAllowed"], json!(true));
        assert_eq!(back["custom_formats"][0]["score"], json!(100));
    }

    #[test]
    fn test_parse_timestamp_shapes() {
        let naive = parse_timestamp("2024-03-09T17:45:12.123456").unwrap();
        assert_eq!((naive.year(), naive.month(), naive.day()), (2024, 3, 9));
        assert_eq!(naive.hour(), 17);

        let bare = parse_timestamp("2024-03-09").unwrap();
        assert_eq!(bare.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());

        assert!(parse_timestamp("2024-03-09T10:00:00Z").is_some());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_unparseable_timestamp_is_unknown() {
        let profile: Profile = serde_json::from_value(json!({
            "id": 2,
            "name": "Anime",
            "date_created": "not a date",
            "date_modified": 1700000000,
        }))
        .unwrap();

        assert_eq!(profile.date_created, None);
        assert_eq!(profile.date_modified, None);
    }

    #[test]
    fn test_git_status_without_conflict_list() {
        let status: GitStatus = serde_json::from_value(json!({
            "success": true,
            "data": { "branch": "main" },
        }))
        .unwrap();

        assert_eq!(status.data.unwrap().merge_conflicts, None);
    }

    #[test]
    fn test_conflict_label() {
        let conflict = MergeConflict {
            file_path: Some("profiles/remux.yml".into()),
            name: None,
            status: None,
        };
        assert_eq!(conflict.label(), "profiles/remux.yml");
    }
}
