//! Data structures for the roster view: participants, cached rosters, the search query, errors.

mod error;
mod participant;
mod query;
mod roster;

pub use error::SelectionError;
pub use participant::{EventId, Participant, ParticipantId};
pub use query::SearchQuery;
pub use roster::{RosterCache, RosterSnapshot, RosterState};
