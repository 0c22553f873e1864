use std::fmt::Display;

use tracing::{debug, error, warn};

use crate::api::{GitStatus, MergeConflict};

/// Whether the page may touch profile data, as decided by the repository's merge state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Gate {
    /// Status request in flight
    #[default]
    Pending,
    Unlocked,
    /// Unresolved merge conflicts block the page
    Locked(Vec<MergeConflict>),
    /// The status could not be determined; treated as locked
    LockedUnknown,
}

impl Gate {
    /// Decide the gate from the outcome of a status request.
    pub fn evaluate<E: Display>(result: Result<GitStatus, E>) -> Self {
        let status = match result {
            Ok(status) => status,
            Err(err) => {
                error!("Error fetching repository status: {err}");
                return Gate::LockedUnknown;
            }
        };

        if !status.success {
            warn!(
                "Repository status check was unsuccessful: {}",
                status.error.as_deref().unwrap_or("no reason given")
            );
            return Gate::LockedUnknown;
        }

        match status.data.and_then(|data| data.merge_conflicts) {
            Some(conflicts) if conflicts.is_empty() => {
                debug!("Repository clean, unlocking profiles");
                Gate::Unlocked
            }
            Some(conflicts) => {
                warn!("{} unresolved merge conflicts, locking profiles", conflicts.len());
                Gate::Locked(conflicts)
            }
            None => {
                error!("Repository status response carried no merge conflict list");
                Gate::LockedUnknown
            }
        }
    }

    pub fn is_unlocked(&self) -> bool {
        matches!(self, Gate::Unlocked)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Gate::Pending)
    }

    pub fn conflicts(&self) -> &[MergeConflict] {
        match self {
            Gate::Locked(conflicts) => conflicts,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{Error, api::GitStatusData};

    fn status(conflicts: Option<Vec<MergeConflict>>) -> GitStatus {
        GitStatus {
            success: true,
            data: Some(GitStatusData {
                merge_conflicts: conflicts,
                extra: Default::default(),
            }),
            error: None,
        }
    }

    fn conflict(path: &str) -> MergeConflict {
        MergeConflict {
            file_path: Some(path.into()),
            name: None,
            status: Some("CONFLICT".into()),
        }
    }

    #[test]
    fn test_clean_repository_unlocks() {
        assert_eq!(Gate::evaluate(Ok::<_, Error>(status(Some(Vec::new())))), Gate::Unlocked);
    }

    #[test]
    fn test_conflicts_lock() {
        let gate = Gate::evaluate(Ok::<_, Error>(status(Some(vec![conflict("profiles/a.yml")]))));

        assert!(!gate.is_unlocked());
        assert_eq!(gate.conflicts().len(), 1);
    }

    #[test]
    fn test_request_failure_is_locked_unknown() {
        let err = Error::Status {
            url: "http://localhost:5000/git/status".into(),
            status: reqwest::StatusCode::BAD_GATEWAY,
        };
        assert_eq!(Gate::evaluate(Err(err)), Gate::LockedUnknown);
    }

    #[test]
    fn test_unsuccessful_status_is_locked_unknown() {
        let result = GitStatus {
            success: false,
            data: None,
            error: Some("not a git repository".into()),
        };
        assert_eq!(Gate::evaluate(Ok::<_, Error>(result)), Gate::LockedUnknown);
    }

    #[test]
    fn test_missing_conflict_list_is_locked_unknown() {
        assert_eq!(Gate::evaluate(Ok::<_, Error>(status(None))), Gate::LockedUnknown);
    }
}
