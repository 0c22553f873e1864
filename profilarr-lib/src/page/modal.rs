use tracing::debug;

use crate::api::Profile;

/// Appended to the name of a cloned profile.
pub const COPY_SUFFIX: &str = " [COPY]";

/// Lifecycle of the create/edit/clone dialog.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum ModalState {
    #[default]
    Closed,
    Create,
    Edit(Profile),
    Clone(Profile),
}

impl ModalState {
    /// Open an empty dialog. Ignored unless the dialog is closed.
    pub fn open_create(&mut self) -> bool {
        if *self != ModalState::Closed {
            debug!("Ignoring create request, dialog already open");
            return false;
        }

        *self = ModalState::Create;
        true
    }

    /// Open the dialog on `profile`, replacing whatever it currently holds.
    pub fn open_edit(&mut self, profile: Profile) {
        debug!("Editing profile {} ({})", profile.name, profile.id);
        *self = ModalState::Edit(profile);
    }

    /// Open the dialog on an unsaved copy of `source`, replacing whatever it currently holds.
    pub fn open_clone(&mut self, source: &Profile) {
        debug!("Cloning profile {} ({})", source.name, source.id);
        *self = ModalState::Clone(clone_of(source));
    }

    pub fn close(&mut self) {
        *self = ModalState::Closed;
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, ModalState::Closed)
    }

    pub fn is_cloning(&self) -> bool {
        matches!(self, ModalState::Clone(_))
    }

    /// The profile the dialog was opened on, if any.
    pub fn profile(&self) -> Option<&Profile> {
        match self {
            ModalState::Edit(profile) | ModalState::Clone(profile) => Some(profile),
            ModalState::Closed | ModalState::Create => None,
        }
    }
}

/// An unsaved copy of `source` with a marked name.
pub fn clone_of(source: &Profile) -> Profile {
    Profile {
        id: Profile::UNSAVED_ID,
        name: format!("{}{COPY_SUFFIX}", source.name),
        ..source.clone()
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::api::ProfileFormat;

    fn default_profile() -> Profile {
        let mut profile = Profile::new("Default");
        profile.id = 7;
        profile.tags = vec!["1080p".into()];
        profile
    }

    #[test]
    fn test_clone_marks_copy() {
        let source = default_profile();

        let copy = clone_of(&source);

        assert_eq!(copy.id, Profile::UNSAVED_ID);
        assert_eq!(copy.name, "Default [COPY]");
        assert_eq!(copy.tags, source.tags);
        assert!(!copy.is_persisted());
    }

    #[test]
    fn test_clone_keeps_format_references() {
        let mut source = default_profile();
        source.custom_formats = vec![ProfileFormat { id: 3, score: 50 }];

        let copy = clone_of(&source);

        assert_eq!(copy.custom_formats, source.custom_formats);
    }

    #[test]
    fn test_clone_without_formats_has_empty_list() {
        let source: Profile =
            serde_json::from_str(r#"{ "id": 7, "name": "Default" }"#).unwrap();

        let mut modal = ModalState::default();
        modal.open_clone(&source);

        assert!(modal.is_cloning());
        assert_eq!(modal.profile().unwrap().custom_formats, Vec::new());
    }

    #[test]
    fn test_create_only_from_closed() {
        let mut modal = ModalState::default();

        assert!(modal.open_create());
        assert_eq!(modal, ModalState::Create);

        assert!(!modal.open_create());
        assert_eq!(modal, ModalState::Create);

        modal.open_edit(default_profile());
        assert!(!modal.open_create());
        assert!(matches!(modal, ModalState::Edit(_)));
    }

    #[test]
    fn test_edit_and_clone_override_open_dialog() {
        let mut modal = ModalState::default();
        modal.open_create();

        modal.open_edit(default_profile());
        assert_eq!(modal.profile().unwrap().id, 7);
        assert!(!modal.is_cloning());

        modal.open_clone(&default_profile());
        assert!(modal.is_cloning());
        assert_eq!(modal.profile().unwrap().id, Profile::UNSAVED_ID);

        modal.open_edit(default_profile());
        assert!(!modal.is_cloning());
    }

    #[test]
    fn test_close_clears_payload() {
        let mut modal = ModalState::default();
        modal.open_clone(&default_profile());

        modal.close();

        assert!(!modal.is_open());
        assert!(!modal.is_cloning());
        assert_eq!(modal.profile(), None);
    }
}
