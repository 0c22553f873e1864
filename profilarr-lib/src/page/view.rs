//! Sorting and filtering of the profile collection.

use std::cmp::Ordering;

use chrono::{DateTime, Local, NaiveDate};
use strum::{Display, EnumIter, EnumString};

use crate::api::{Profile, parse_timestamp};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum SortKey {
    /// Backend order
    #[default]
    Title,
    Name,
    DateCreated,
    DateModified,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum FilterKind {
    #[default]
    None,
    Tag,
    Date,
}

/// The user's current sort and filter choices. Reset on every page activation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ViewSelection {
    pub sort: SortKey,
    pub filter: FilterKind,
    pub filter_value: String,
}

impl ViewSelection {
    /// Filter then sort `profiles`, leaving the collection itself untouched.
    pub fn project<'a>(&self, profiles: &'a [Profile]) -> Vec<&'a Profile> {
        let filter = Filter::new(self.filter, &self.filter_value);

        let mut visible: Vec<&Profile> = profiles.iter().filter(|p| filter.matches(p)).collect();

        // `sort_by` is stable, so equal keys keep backend order
        match self.sort {
            SortKey::Title => {}
            SortKey::Name => visible.sort_by(|a, b| locale_cmp(&a.name, &b.name)),
            SortKey::DateCreated => visible.sort_by(|a, b| b.date_created.cmp(&a.date_created)),
            SortKey::DateModified => visible.sort_by(|a, b| b.date_modified.cmp(&a.date_modified)),
        }

        visible
    }

    /// Cards show dates unless they are ordered by name.
    pub fn show_date(&self) -> bool {
        self.sort != SortKey::Name
    }
}

/// A filter with its value parsed once up front.
enum Filter<'a> {
    All,
    Tag(&'a str),
    /// `None` when the value isn't a date; nothing matches
    Day(Option<NaiveDate>),
}

impl<'a> Filter<'a> {
    fn new(kind: FilterKind, value: &'a str) -> Self {
        match kind {
            FilterKind::None => Filter::All,
            FilterKind::Tag => Filter::Tag(value),
            FilterKind::Date => Filter::Day(parse_timestamp(value).map(|dt| dt.date_naive())),
        }
    }

    fn matches(&self, profile: &Profile) -> bool {
        match self {
            Filter::All => true,
            Filter::Tag(tag) => profile.has_tag(tag),
            Filter::Day(day) => match (day, profile.date_modified) {
                (Some(day), Some(modified)) => modified.date_naive() == *day,
                _ => false,
            },
        }
    }
}

/// Case-insensitive ordering with lowercase sorting before uppercase on ties, approximating
/// a user-locale collation.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Render a timestamp for display on a profile card.
pub fn format_timestamp(timestamp: &DateTime<Local>) -> String {
    timestamp.format("%x, %X").to_string()
}

#[cfg(test)]
mod test {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn profile(id: i64, name: &str) -> Profile {
        let mut profile = Profile::new(name);
        profile.id = id;
        profile
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> Option<DateTime<Local>> {
        Local.with_ymd_and_hms(y, m, d, h, 0, 0).earliest()
    }

    fn names(profiles: Vec<&Profile>) -> Vec<&str> {
        profiles.into_iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_default_selection_keeps_order() {
        let profiles = vec![profile(1, "Web"), profile(2, "Anime"), profile(3, "Remux")];

        let view = ViewSelection::default().project(&profiles);

        assert_eq!(names(view), vec!["Web", "Anime", "Remux"]);
    }

    #[test]
    fn test_sort_by_name_is_case_insensitive() {
        let profiles = vec![profile(1, "Banana"), profile(2, "apple")];
        let selection = ViewSelection {
            sort: SortKey::Name,
            ..Default::default()
        };

        assert_eq!(names(selection.project(&profiles)), vec!["apple", "Banana"]);
    }

    #[test]
    fn test_locale_cmp_ties() {
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("Remux", "remux"), Ordering::Greater);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_sort_by_date_created_newest_first() {
        let mut old = profile(1, "Old");
        old.date_created = at(2024, 1, 1, 12);
        let mut new = profile(2, "New");
        new.date_created = at(2024, 6, 1, 12);
        let unknown = profile(3, "Unknown");

        let profiles = vec![old, unknown, new];
        let selection = ViewSelection {
            sort: SortKey::DateCreated,
            ..Default::default()
        };

        assert_eq!(names(selection.project(&profiles)), vec!["New", "Old", "Unknown"]);
    }

    #[test]
    fn test_sort_by_date_modified_newest_first() {
        let mut a = profile(1, "A");
        a.date_modified = at(2023, 5, 5, 8);
        let mut b = profile(2, "B");
        b.date_modified = at(2023, 5, 5, 9);

        let profiles = vec![a, b];
        let selection = ViewSelection {
            sort: SortKey::DateModified,
            ..Default::default()
        };

        assert_eq!(names(selection.project(&profiles)), vec!["B", "A"]);
    }

    #[test]
    fn test_filter_by_tag() {
        let mut remux = profile(1, "Remux");
        remux.tags = vec!["4k".into(), "x".into()];
        let mut web = profile(2, "Web");
        web.tags = vec!["X".into()];
        let untagged = profile(3, "Untagged");

        let profiles = vec![remux, web, untagged];
        let selection = ViewSelection {
            filter: FilterKind::Tag,
            filter_value: "x".into(),
            ..Default::default()
        };

        assert_eq!(names(selection.project(&profiles)), vec!["Remux"]);
    }

    #[test]
    fn test_filter_by_day_ignores_time() {
        let mut morning = profile(1, "Morning");
        morning.date_modified = at(2024, 3, 9, 1);
        let mut evening = profile(2, "Evening");
        evening.date_modified = at(2024, 3, 9, 23);
        let mut other = profile(3, "Other");
        other.date_modified = at(2024, 3, 10, 1);

        let profiles = vec![morning, evening, other];
        let selection = ViewSelection {
            filter: FilterKind::Date,
            filter_value: "2024-03-09".into(),
            ..Default::default()
        };

        assert_eq!(names(selection.project(&profiles)), vec!["Morning", "Evening"]);
    }

    #[test]
    fn test_invalid_date_filter_matches_nothing() {
        let mut p = profile(1, "Remux");
        p.date_modified = at(2024, 3, 9, 1);

        let profiles = vec![p, profile(2, "Undated")];
        let selection = ViewSelection {
            filter: FilterKind::Date,
            filter_value: "next tuesday".into(),
            ..Default::default()
        };

        assert!(selection.project(&profiles).is_empty());
    }

    #[test]
    fn test_no_filter_ignores_value() {
        let profiles = vec![profile(1, "Remux"), profile(2, "Web")];
        let selection = ViewSelection {
            filter: FilterKind::None,
            filter_value: "garbage".into(),
            ..Default::default()
        };

        assert_eq!(selection.project(&profiles).len(), 2);
    }

    #[test]
    fn test_filter_applies_before_sort() {
        let mut b = profile(1, "beta");
        b.tags = vec!["keep".into()];
        let mut a = profile(2, "Alpha");
        a.tags = vec!["keep".into()];
        let c = profile(3, "aardvark");

        let profiles = vec![b, c, a];
        let selection = ViewSelection {
            sort: SortKey::Name,
            filter: FilterKind::Tag,
            filter_value: "keep".into(),
        };

        assert_eq!(names(selection.project(&profiles)), vec!["Alpha", "beta"]);
    }

    #[test]
    fn test_show_date() {
        let mut selection = ViewSelection::default();
        assert!(selection.show_date());

        selection.sort = SortKey::Name;
        assert!(!selection.show_date());
    }

    #[test]
    fn test_sort_key_strings() {
        assert_eq!(SortKey::DateCreated.to_string(), "dateCreated");
        assert_eq!("dateModified".parse::<SortKey>().unwrap(), SortKey::DateModified);
        assert_eq!("tag".parse::<FilterKind>().unwrap(), FilterKind::Tag);
    }
}
