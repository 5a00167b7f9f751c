//! Event roster admin: search participants, toggle who wants to play, and draw the bracket field.

pub mod config;
pub mod logic;
pub mod models;

pub use config::Config;
pub use logic::{
    check_eligibility, draw, filter_participants, sample, Collaborators, DrawOutcome, DrawState,
    EventView, FlagCommitter, InMemoryDirectory, ParticipantDirectory, RandomSource, RngSource,
    SelectionCommitter, SelectionSet, SharedRosterCache, DEFAULT_QUOTA,
};
pub use models::{
    EventId, Participant, ParticipantId, RosterCache, RosterSnapshot, RosterState, SearchQuery,
    SelectionError,
};
