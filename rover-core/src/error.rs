use thiserror::Error;

use crate::action::Action;

/// Failure to apply an action against a state.
///
/// Carries the offending action and a short, human-readable reason so
/// that callers (the search engine's successor generator, and the
/// verifier) can report something more useful than "not applicable".
#[derive(Error, Debug, Clone)]
#[error("action not applicable: {action} ({reason})")]
pub struct NotApplicable {
    pub action: Action,
    pub reason: &'static str,
}

#[derive(Error, Debug, Clone)]
pub enum CoreError {
    #[error(transparent)]
    NotApplicable(#[from] NotApplicable),
    #[error("index out of range: {what} index {index} (max {max})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        max: usize,
    },
}
