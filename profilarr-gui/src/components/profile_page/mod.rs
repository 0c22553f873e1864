use std::sync::Arc;

use iced::{
    Element, Length, Task,
    widget::{Column, Row, button, center, column, container, row, scrollable, space, text},
};
use profilarr_lib::{
    Backend, MergeConflict, Profile,
    page::{Destination, Effect, Event, FilterKind, Page, Response, Screen, SortKey},
};
use tracing::{debug, error};

use crate::{
    components::profile_page::{
        card::{add_card, card},
        dialog::ProfileDialog,
        toolbar::toolbar,
    },
    modal,
};

mod card;
mod dialog;
mod toolbar;

#[derive(Debug, Clone)]
pub enum Message {
    Page(Event),
    SortSelected(SortKey),
    FilterSelected(FilterKind),
    FilterValueChanged(String),
    AddPressed,
    EditPressed(Profile),
    ClonePressed(Profile),
    ResolveConflictsPressed,
    /// A save finished; tagged with the dialog session that started it
    Saved(u64, Response<()>),
    // Child messages
    Dialog(dialog::Message),
}

/// Action used for communicating with the parent component
pub enum Action {
    None,
    Run(Task<Message>),
    Navigate(Destination),
}

pub struct ProfilePage {
    backend: Arc<dyn Backend>,
    page: Page,
    // Components
    dialog: ProfileDialog,
}

impl ProfilePage {
    pub fn new(backend: Arc<dyn Backend>) -> (Self, Task<Message>) {
        let mut page = Self {
            backend,
            page: Page::new(),
            dialog: ProfileDialog::new(),
        };
        let task = page.activate();

        (page, task)
    }

    /// Start loading from scratch, beginning with the repository gate.
    pub fn activate(&mut self) -> Task<Message> {
        let effects = self.page.activate();
        self.run(effects)
    }

    pub fn deactivate(&mut self) {
        self.page.deactivate();
    }

    /// Point the page at a different backend. Takes effect on the next activation.
    pub fn set_backend(&mut self, backend: Arc<dyn Backend>) {
        self.backend = backend;
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::Page(event) => {
                let effects = self.page.handle(event);
                Action::Run(self.run(effects))
            }
            Message::SortSelected(key) => {
                self.page.set_sort(key);
                Action::None
            }
            Message::FilterSelected(kind) => {
                self.page.set_filter(kind);
                Action::None
            }
            Message::FilterValueChanged(value) => {
                self.page.set_filter_value(value);
                Action::None
            }
            Message::AddPressed => {
                if self.page.open_create() {
                    self.load_dialog();
                }
                Action::None
            }
            Message::EditPressed(profile) => {
                self.page.open_edit(profile);
                self.load_dialog();
                Action::None
            }
            Message::ClonePressed(profile) => {
                self.page.open_clone(&profile);
                self.load_dialog();
                Action::None
            }
            Message::ResolveConflictsPressed => match self.page.resolve_conflicts() {
                Some(Effect::Navigate(destination)) => Action::Navigate(destination),
                _ => Action::None,
            },
            Message::Saved(session, result) if !self.dialog.owns(session) => match result {
                Ok(()) => {
                    debug!("Save from a closed dialog finished, reloading");
                    let effects = self.page.reload();
                    Action::Run(self.run(effects))
                }
                Err(err) => {
                    error!("Error saving profile from a closed dialog: {err}");
                    Action::None
                }
            },
            Message::Saved(_, Ok(())) => {
                let effects = self.page.save_complete();
                Action::Run(self.run(effects))
            }
            Message::Saved(_, Err(err)) => {
                error!("Error saving profile: {err}");
                self.dialog.save_failed(err.to_string());
                Action::None
            }
            Message::Dialog(message) => match self.dialog.update(message) {
                dialog::Action::None => Action::None,
                dialog::Action::Cancel => {
                    self.page.close_modal();
                    Action::None
                }
                dialog::Action::Save(session, profile) => {
                    let backend = self.backend.clone();
                    Action::Run(Task::perform(
                        async move { backend.save_profile(&profile).await.map_err(Arc::new) },
                        move |result| Message::Saved(session, result),
                    ))
                }
            },
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        match self.page.screen() {
            Screen::Loading { message } => center(
                column![text("Loading...").size(24), text(message).size(16)]
                    .spacing(12)
                    .align_x(iced::Alignment::Center),
            )
            .into(),
            Screen::Locked { conflicts } => locked(conflicts),
            Screen::Ready => {
                let selection = self.page.selection();
                let show_date = selection.show_date();

                let cards = self
                    .page
                    .visible_profiles()
                    .into_iter()
                    .map(|profile| card(profile, show_date))
                    .chain(std::iter::once(add_card()));

                let content = column![
                    text("Manage Profiles").size(24),
                    toolbar(selection, self.page.tags()),
                    scrollable(Row::with_children(cards).spacing(16).wrap()).height(Length::Fill),
                ]
                .spacing(16);

                if self.page.modal().is_open() {
                    modal(
                        content,
                        self.dialog.view().map(Message::Dialog),
                        Some(Message::Dialog(dialog::Message::CancelPressed)),
                    )
                } else {
                    content.into()
                }
            }
        }
    }

    fn load_dialog(&mut self) {
        self.dialog.load(self.page.modal(), self.page.formats());
    }

    fn run(&self, effects: Vec<Effect>) -> Task<Message> {
        Task::batch(effects.into_iter().filter_map(|effect| self.perform(effect)))
    }

    fn perform(&self, effect: Effect) -> Option<Task<Message>> {
        let backend = self.backend.clone();

        let task = match effect {
            Effect::CheckGate(activation) => Task::perform(
                async move { backend.git_status().await.map_err(Arc::new) },
                move |result| Message::Page(Event::GateChecked(activation, result)),
            ),
            Effect::FetchProfiles(fetch) => Task::perform(
                async move { backend.profiles().await.map_err(Arc::new) },
                move |result| Message::Page(Event::ProfilesFetched(fetch, result)),
            ),
            Effect::FetchFormats(fetch) => Task::perform(
                async move { backend.formats().await.map_err(Arc::new) },
                move |result| Message::Page(Event::FormatsFetched(fetch, result)),
            ),
            Effect::Navigate(destination) => {
                debug!("Ignoring navigation to {destination} outside of a user action");
                return None;
            }
        };

        Some(task)
    }
}

/// The notice shown while merge conflicts lock the page.
fn locked(conflicts: &[MergeConflict]) -> Element<'_, Message> {
    let files = Column::with_children(
        conflicts
            .iter()
            .map(|conflict| text(format!("• {}", conflict.label())).into()),
    )
    .spacing(4);

    column![
        row![
            text("Merge Conflicts Detected").size(22),
            space::horizontal(),
            button("Resolve Conflicts").on_press(Message::ResolveConflictsPressed),
        ],
        container(
            column![
                text("What Happened?").size(18),
                text(
                    "This page is locked because there are unresolved merge conflicts. \
                     You need to address these conflicts in the settings page before continuing."
                ),
                files,
            ]
            .spacing(8)
        )
        .padding(16)
        .width(Length::Fill)
        .style(container::rounded_box),
    ]
    .spacing(24)
    .into()
}
