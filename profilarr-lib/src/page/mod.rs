//! The profile page's view core.
//!
//! [`Page`] owns all state behind the page: the repository gate, the profile and format
//! snapshots, the user's sort/filter selection and the dialog lifecycle. It never performs I/O
//! itself. Transitions return [`Effect`]s for the host to execute, and the host feeds the
//! outcomes back in as [`Event`]s tagged with the [`Activation`] that requested them. Outcomes
//! belonging to an older activation, or to a fetch round that has since been reissued, are
//! discarded.

use std::sync::Arc;

use derive_more::Display;
use getset::{CopyGetters, Getters};
use tracing::debug;

use crate::{
    Error,
    api::{Format, GitStatus, MergeConflict, Profile},
};

pub mod gate;
pub mod loader;
pub mod loading;
pub mod modal;
pub mod sequence;
pub mod view;

pub use gate::Gate;
pub use loader::ProfileSnapshot;
pub use loading::{LOADING_MESSAGES, pick_loading_message};
pub use modal::{COPY_SUFFIX, ModalState};
pub use view::{FilterKind, SortKey, ViewSelection, format_timestamp};

/// Outcome of a backend call as carried by an [`Event`].
pub type Response<T> = std::result::Result<T, Arc<Error>>;

/// Identifies one activation of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display("activation #{_0}")]
pub struct Activation(u64);

/// Identifies one round of profile and format fetches within an activation.
///
/// Every save reissues both fetches, so only the latest round may update the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display("{activation} round #{round}")]
pub struct Fetch {
    activation: Activation,
    round: u64,
}

impl Fetch {
    pub fn activation(&self) -> Activation {
        self.activation
    }
}

/// Where the user can be sent from the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Destination {
    /// Where merge conflicts get resolved
    #[display("/settings")]
    Settings,
}

/// Work the host must carry out on the page's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    CheckGate(Activation),
    FetchProfiles(Fetch),
    FetchFormats(Fetch),
    Navigate(Destination),
}

/// Completion of an [`Effect`].
#[derive(Debug, Clone)]
pub enum Event {
    GateChecked(Activation, Response<GitStatus>),
    ProfilesFetched(Fetch, Response<Vec<Profile>>),
    FormatsFetched(Fetch, Response<Vec<Format>>),
}

impl Event {
    pub fn activation(&self) -> Activation {
        match self {
            Event::GateChecked(activation, _) => *activation,
            Event::ProfilesFetched(fetch, _) | Event::FormatsFetched(fetch, _) => fetch.activation,
        }
    }
}

/// What the page should present.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen<'a> {
    Loading { message: &'static str },
    Locked { conflicts: &'a [MergeConflict] },
    Ready,
}

#[derive(Debug, Getters, CopyGetters)]
pub struct Page {
    /// The live activation; `None` while the page is inactive
    #[getset(get_copy = "pub")]
    activation: Option<Activation>,
    next_activation: u64,
    /// The latest fetch round issued
    round: u64,
    #[getset(get = "pub")]
    gate: Gate,
    #[getset(get_copy = "pub")]
    loading: bool,
    #[getset(get_copy = "pub")]
    loading_message: &'static str,
    #[getset(get = "pub")]
    snapshot: ProfileSnapshot,
    #[getset(get = "pub")]
    formats: Vec<Format>,
    #[getset(get = "pub")]
    selection: ViewSelection,
    #[getset(get = "pub")]
    modal: ModalState,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    pub fn new() -> Self {
        Self {
            activation: None,
            next_activation: 0,
            round: 0,
            gate: Gate::default(),
            loading: false,
            loading_message: LOADING_MESSAGES[0],
            snapshot: ProfileSnapshot::default(),
            formats: Vec::new(),
            selection: ViewSelection::default(),
            modal: ModalState::default(),
        }
    }

    // Lifecycle

    /// Start a fresh activation: reset all state and ask for the repository status.
    pub fn activate(&mut self) -> Vec<Effect> {
        let activation = Activation(self.next_activation);
        self.next_activation = self.next_activation.wrapping_add(1);

        debug!("Starting {activation}");

        self.activation = Some(activation);
        self.gate = Gate::Pending;
        self.loading = true;
        self.loading_message = pick_loading_message(&mut rand::thread_rng());
        self.snapshot = ProfileSnapshot::default();
        self.formats.clear();
        self.selection = ViewSelection::default();
        self.modal.close();

        vec![Effect::CheckGate(activation)]
    }

    /// Stop accepting responses for the current activation.
    pub fn deactivate(&mut self) {
        if let Some(activation) = self.activation.take() {
            debug!("Deactivated {activation}");
        }
    }

    /// Apply the outcome of an earlier [`Effect`].
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        if self.activation != Some(event.activation()) {
            debug!("Discarding stale response for {}", event.activation());
            return Vec::new();
        }

        match event {
            Event::GateChecked(activation, result) => {
                self.gate = Gate::evaluate(result);
                if self.gate.is_unlocked() {
                    self.fetch(activation)
                } else {
                    self.loading = false;
                    Vec::new()
                }
            }
            Event::ProfilesFetched(fetch, _) | Event::FormatsFetched(fetch, _)
                if fetch.round != self.round =>
            {
                debug!("Discarding superseded response for {fetch}");
                Vec::new()
            }
            Event::ProfilesFetched(_, result) => {
                self.snapshot.update(result);
                self.loading = false;
                Vec::new()
            }
            Event::FormatsFetched(_, result) => {
                loader::update_formats(&mut self.formats, result);
                Vec::new()
            }
        }
    }

    // Presentation

    pub fn screen(&self) -> Screen<'_> {
        if self.loading {
            return Screen::Loading {
                message: self.loading_message,
            };
        }

        match &self.gate {
            Gate::Locked(conflicts) => Screen::Locked { conflicts },
            _ => Screen::Ready,
        }
    }

    /// The profiles to display, filtered and ordered by the current selection.
    pub fn visible_profiles(&self) -> Vec<&Profile> {
        self.selection.project(&self.snapshot.profiles)
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.snapshot.profiles
    }

    pub fn tags(&self) -> &[String] {
        &self.snapshot.tags
    }

    /// Send the user to resolve conflicts. Only available while conflicts lock the page.
    pub fn resolve_conflicts(&self) -> Option<Effect> {
        matches!(self.gate, Gate::Locked(_)).then_some(Effect::Navigate(Destination::Settings))
    }

    // Selection

    pub fn set_sort(&mut self, sort: SortKey) {
        self.selection.sort = sort;
    }

    /// Switching the filter kind clears the previous value.
    pub fn set_filter(&mut self, filter: FilterKind) {
        if self.selection.filter != filter {
            self.selection.filter = filter;
            self.selection.filter_value.clear();
        }
    }

    pub fn set_filter_value(&mut self, value: impl Into<String>) {
        self.selection.filter_value = value.into();
    }

    // Dialog

    pub fn open_create(&mut self) -> bool {
        self.modal.open_create()
    }

    pub fn open_edit(&mut self, profile: Profile) {
        self.modal.open_edit(profile);
    }

    pub fn open_clone(&mut self, profile: &Profile) {
        self.modal.open_clone(profile);
    }

    pub fn close_modal(&mut self) {
        self.modal.close();
    }

    /// The dialog saved its profile: close it and reload both collections.
    pub fn save_complete(&mut self) -> Vec<Effect> {
        self.modal.close();
        self.reload()
    }

    /// Reload both collections without touching the dialog.
    pub fn reload(&mut self) -> Vec<Effect> {
        match self.activation {
            Some(activation) if self.gate.is_unlocked() => self.fetch(activation),
            _ => {
                debug!("Page is gated, not reloading");
                Vec::new()
            }
        }
    }

    /// Start a new fetch round, superseding any still in flight.
    fn fetch(&mut self, activation: Activation) -> Vec<Effect> {
        self.round = self.round.wrapping_add(1);
        let fetch = Fetch {
            activation,
            round: self.round,
        };

        vec![Effect::FetchProfiles(fetch), Effect::FetchFormats(fetch)]
    }
}
