use iced::{
    Element, Length,
    widget::{Column, button, checkbox, column, container, row, scrollable, space, text, text_input},
};
use profilarr_lib::{
    Format, Profile, ProfileFormat,
    page::ModalState,
};

#[derive(Debug, Clone)]
pub enum Message {
    NameInput(String),
    DescriptionInput(String),
    TagsInput(String),
    FormatToggled(i64, bool),
    CancelPressed,
    SavePressed,
}

pub enum Action {
    None,
    Cancel,
    /// Save `Profile`, started from the given dialog session
    Save(u64, Profile),
}

/// Create, edit and clone dialog for a single [`Profile`].
pub struct ProfileDialog {
    /// Bumped on every load and cancel
    session: u64,
    profile: Profile,
    tags: String,
    formats: Vec<Format>,
    cloning: bool,
    saving: bool,
    error: Option<String>,
}

impl ProfileDialog {
    pub fn new() -> Self {
        Self {
            session: 0,
            profile: Profile::new(""),
            tags: String::new(),
            formats: Vec::new(),
            cloning: false,
            saving: false,
            error: None,
        }
    }

    /// Load the payload of a freshly opened dialog.
    pub fn load(&mut self, modal: &ModalState, formats: &[Format]) {
        self.session = self.session.wrapping_add(1);
        self.profile = modal.profile().cloned().unwrap_or_else(|| Profile::new(""));
        self.tags = self.profile.tags.join(", ");
        self.formats = formats.to_vec();
        self.cloning = modal.is_cloning();
        self.saving = false;
        self.error = None;
    }

    /// Whether a save started in `session` still belongs to what the user sees.
    pub fn owns(&self, session: u64) -> bool {
        self.saving && self.session == session
    }

    /// The save request failed; let the user retry.
    pub fn save_failed(&mut self, error: String) {
        self.saving = false;
        self.error = Some(error);
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::NameInput(content) => {
                self.profile.name = content;
                Action::None
            }
            Message::DescriptionInput(content) => {
                self.profile.description = content;
                Action::None
            }
            Message::TagsInput(content) => {
                self.tags = content;
                Action::None
            }
            Message::FormatToggled(id, enabled) => {
                if enabled {
                    if !self.profile.references_format(id) {
                        self.profile.custom_formats.push(ProfileFormat { id, score: 0 });
                    }
                } else {
                    self.profile.custom_formats.retain(|f| f.id != id);
                }
                Action::None
            }
            Message::CancelPressed => {
                self.session = self.session.wrapping_add(1);
                self.saving = false;
                Action::Cancel
            }
            Message::SavePressed => {
                if !self.validate() || self.saving {
                    return Action::None;
                }

                self.saving = true;
                self.error = None;

                let mut profile = self.profile.clone();
                profile.name = profile.name.trim().to_owned();
                profile.tags = parse_tags(&self.tags);

                Action::Save(self.session, profile)
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let title = if self.cloning {
            "Clone Profile"
        } else if self.profile.is_persisted() {
            "Edit Profile"
        } else {
            "Add Profile"
        };

        let formats = Column::with_children(self.formats.iter().map(|format| {
            let id = format.id;
            row![
                checkbox(self.profile.references_format(id))
                    .on_toggle(move |enabled| Message::FormatToggled(id, enabled)),
                text(format.name.as_str()),
            ]
            .spacing(8)
            .into()
        }))
        .spacing(4);

        let mut content = column![
            text(title).size(20),
            row![
                text("Name"),
                text_input("...", &self.profile.name).on_input(Message::NameInput),
            ]
            .spacing(8),
            row![
                text("Description"),
                text_input("...", &self.profile.description).on_input(Message::DescriptionInput),
            ]
            .spacing(8),
            row![
                text("Tags"),
                text_input("comma separated", &self.tags).on_input(Message::TagsInput),
            ]
            .spacing(8),
            text("Custom formats"),
            scrollable(formats).height(Length::Fill),
        ]
        .spacing(12);

        if let Some(error) = &self.error {
            content = content.push(text(error.as_str()).style(text::danger));
        }

        content = content.push(
            row![
                space::horizontal(),
                button("Cancel").on_press(Message::CancelPressed),
                button(if self.saving { "Saving..." } else { "Save" })
                    .on_press_maybe((self.validate() && !self.saving).then_some(Message::SavePressed)),
            ]
            .spacing(8),
        );

        container(content)
            .padding(20)
            .width(480)
            .height(600)
            .style(container::rounded_box)
            .into()
    }

    fn validate(&self) -> bool {
        !self.profile.name.trim().is_empty()
    }
}

/// Split comma separated tags, dropping blanks and repeats.
fn parse_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();

    for tag in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_owned());
        }
    }

    tags
}
