//! Errors raised by roster fetches, draws, and commits.

use crate::models::participant::ParticipantId;

/// Errors that can occur while viewing or drawing from a roster.
///
/// None of these are fatal; each is scoped to the action that produced it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SelectionError {
    /// Fewer participants want to play than the draw quota.
    InsufficientCandidates { required: usize, eligible: usize },
    /// The selection or flag committer rejected the write.
    CommitFailure(String),
    /// The participant directory could not produce a roster.
    FetchFailure(String),
    /// No participant with this id in the event.
    ParticipantNotFound(ParticipantId),
    /// Draw quota must be at least 1.
    InvalidQuota,
}

impl std::fmt::Display for SelectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionError::InsufficientCandidates { required, eligible } => write!(
                f,
                "Need at least {} participants who want to play (found {})",
                required, eligible
            ),
            SelectionError::CommitFailure(reason) => write!(f, "Could not save changes: {}", reason),
            SelectionError::FetchFailure(reason) => write!(f, "Could not load participants: {}", reason),
            SelectionError::ParticipantNotFound(id) => write!(f, "Participant {} not found", id),
            SelectionError::InvalidQuota => write!(f, "Draw quota must be at least 1"),
        }
    }
}

impl std::error::Error for SelectionError {}
