use std::fmt::{self, Display};

use iced::{
    Element,
    widget::{pick_list, row, text, text_input},
};
use profilarr_lib::page::{FilterKind, SortKey, ViewSelection};
use strum::IntoEnumIterator;

use crate::components::profile_page::Message;

/// Human readable wrapper for selector options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Choice<T>(T);

impl Display for Choice<SortKey> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self.0 {
            SortKey::Title => "Title",
            SortKey::Name => "Name",
            SortKey::DateCreated => "Date created",
            SortKey::DateModified => "Date modified",
        })
    }
}

impl Display for Choice<FilterKind> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self.0 {
            FilterKind::None => "No filter",
            FilterKind::Tag => "Tag",
            FilterKind::Date => "Date modified",
        })
    }
}

/// Sort selector plus tag/date filter selector.
pub fn toolbar<'a>(selection: &'a ViewSelection, tags: &'a [String]) -> Element<'a, Message> {
    let sort = pick_list(
        SortKey::iter().map(Choice).collect::<Vec<_>>(),
        Some(Choice(selection.sort)),
        |Choice(key)| Message::SortSelected(key),
    );

    let filter = pick_list(
        FilterKind::iter().map(Choice).collect::<Vec<_>>(),
        Some(Choice(selection.filter)),
        |Choice(kind)| Message::FilterSelected(kind),
    );

    let mut bar = row![text("Sort by"), sort, text("Filter"), filter].spacing(12);

    match selection.filter {
        FilterKind::None => {}
        FilterKind::Tag => {
            let selected = Some(selection.filter_value.clone()).filter(|value| !value.is_empty());
            bar = bar.push(
                pick_list(tags, selected, Message::FilterValueChanged)
                    .placeholder("Select a tag..."),
            );
        }
        FilterKind::Date => {
            bar = bar.push(
                text_input("YYYY-MM-DD", &selection.filter_value)
                    .on_input(Message::FilterValueChanged)
                    .width(160),
            );
        }
    }

    bar.into()
}
