//! Roster view logic: search filter, the random draw, collaborators, and the view itself.

mod event_view;
mod filter;
mod memory;
mod ports;
mod sampler;

pub use event_view::{Collaborators, DrawOutcome, DrawState, EventView, SharedRosterCache};
pub use filter::filter_participants;
pub use memory::InMemoryDirectory;
pub use ports::{FlagCommitter, ParticipantDirectory, SelectionCommitter};
pub use sampler::{check_eligibility, draw, sample, RandomSource, RngSource, SelectionSet, DEFAULT_QUOTA};
