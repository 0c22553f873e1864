use iced::{
    Element,
    widget::{Row, button, center, column, container, row, space, text},
};
use profilarr_lib::{Profile, page::format_timestamp};

use crate::components::profile_page::Message;

const CARD_WIDTH: f32 = 260.0;
const CARD_HEIGHT: f32 = 170.0;

/// A single profile with its edit and clone affordances.
pub fn card(profile: &Profile, show_date: bool) -> Element<'_, Message> {
    let tags = Row::with_children(profile.tags.iter().map(|tag| {
        container(text(tag.as_str()).size(12))
            .padding([2, 6])
            .style(container::rounded_box)
            .into()
    }))
    .spacing(4)
    .wrap();

    let mut content = column![
        text(profile.name.as_str()).size(18),
        text(profile.description.as_str()).size(13),
        tags,
        text(format!("{} custom formats", profile.custom_formats.len())).size(12),
    ]
    .spacing(6);

    if show_date && let Some(modified) = &profile.date_modified {
        content = content.push(text(format!("Modified {}", format_timestamp(modified))).size(12));
    }

    content = content.push(space::vertical()).push(
        row![
            space::horizontal(),
            button("Clone").on_press(Message::ClonePressed(profile.clone())),
            button("Edit").on_press(Message::EditPressed(profile.clone())),
        ]
        .spacing(8),
    );

    container(content)
        .padding(12)
        .width(CARD_WIDTH)
        .height(CARD_HEIGHT)
        .style(container::bordered_box)
        .into()
}

/// The "add new" affordance shown after the last card.
pub fn add_card<'a>() -> Element<'a, Message> {
    button(center(text("+ Add New Profile")))
        .width(CARD_WIDTH)
        .height(CARD_HEIGHT)
        .style(button::subtle)
        .on_press(Message::AddPressed)
        .into()
}
