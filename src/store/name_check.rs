//! Debounced collation name uniqueness check
//!
//! Every keystroke schedules a new ticket and supersedes the previous one.
//! A ticket resolves only after the debounce window has passed and only if
//! it is still the latest; older tickets come back `Stale`. Time is passed
//! in by the caller so the check never blocks or sleeps.

use serde::{Deserialize, Serialize};

use crate::models::Collation;
use crate::schema::{validate_name, ValidationError};

/// Quiet period after the last keystroke before the check runs
pub const NAME_CHECK_DEBOUNCE_MS: u64 = 250;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NameTicket {
    pub generation: u64,
    pub name: String,
    pub due_at_ms: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum NameCheckOutcome {
    /// The debounce window has not elapsed yet
    Pending,
    /// A later ticket superseded this one; discard
    Stale,
    Done(Result<(), ValidationError>),
}

#[derive(Clone, Debug, Default)]
pub struct NameCheck {
    latest: u64,
    own_id: Option<String>,
}

impl NameCheck {
    /// A checker for a new collation
    pub fn new() -> Self {
        Self::default()
    }

    /// A checker for an existing collation, whose own name is allowed
    pub fn for_collation(id: impl Into<String>) -> Self {
        Self {
            latest: 0,
            own_id: Some(id.into()),
        }
    }

    /// Schedule a check of `name`, superseding any earlier ticket
    pub fn schedule(&mut self, name: impl Into<String>, now_ms: u64) -> NameTicket {
        self.latest += 1;
        NameTicket {
            generation: self.latest,
            name: name.into(),
            due_at_ms: now_ms + NAME_CHECK_DEBOUNCE_MS,
        }
    }

    pub fn is_current(&self, ticket: &NameTicket) -> bool {
        ticket.generation == self.latest
    }

    /// Resolve a ticket against the current collections
    pub fn resolve(&self, ticket: &NameTicket, now_ms: u64, existing: &[Collation]) -> NameCheckOutcome {
        if !self.is_current(ticket) {
            return NameCheckOutcome::Stale;
        }
        if now_ms < ticket.due_at_ms {
            return NameCheckOutcome::Pending;
        }
        NameCheckOutcome::Done(validate_name(&ticket.name, existing, self.own_id.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Direction;

    #[test]
    fn test_latest_ticket_wins() {
        let existing = vec![Collation::new("Iliad", Direction::Ltr, None)];
        let mut check = NameCheck::new();

        let first = check.schedule("Ili", 0);
        let second = check.schedule("Iliad", 100);

        assert_eq!(check.resolve(&first, 1000, &existing), NameCheckOutcome::Stale);
        assert_eq!(check.resolve(&second, 200, &existing), NameCheckOutcome::Pending);
        assert_eq!(
            check.resolve(&second, 350, &existing),
            NameCheckOutcome::Done(Err(ValidationError::DuplicateName))
        );
    }

    #[test]
    fn test_own_name_allowed() {
        let existing = vec![Collation::new("Iliad", Direction::Ltr, None)];
        let mut check = NameCheck::for_collation(existing[0].id.clone());

        let ticket = check.schedule("Iliad", 0);
        assert_eq!(
            check.resolve(&ticket, NAME_CHECK_DEBOUNCE_MS, &existing),
            NameCheckOutcome::Done(Ok(()))
        );
    }
}
