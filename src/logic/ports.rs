//! Collaborators the roster view talks to: directory, selection committer, flag committer.

use crate::models::{Participant, ParticipantId, SelectionError};
use async_trait::async_trait;

/// Source of an event's participants.
#[async_trait]
pub trait ParticipantDirectory: Send + Sync {
    /// Current ordered roster. Errors are `FetchFailure`.
    async fn fetch(&self, event: &str) -> Result<Vec<Participant>, SelectionError>;
}

/// Persists the ids chosen by a draw.
#[async_trait]
pub trait SelectionCommitter: Send + Sync {
    async fn commit_selection(&self, event: &str, ids: &[ParticipantId]) -> Result<(), SelectionError>;
}

/// Persists a single participant's wants-to-play flag.
#[async_trait]
pub trait FlagCommitter: Send + Sync {
    async fn commit_flag(&self, participant: &str, event: &str, checked: bool) -> Result<(), SelectionError>;
}
