//! In-process participant store implementing all three collaborators.

use crate::logic::ports::{FlagCommitter, ParticipantDirectory, SelectionCommitter};
use crate::models::{EventId, Participant, ParticipantId, SelectionError};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

/// Rosters by event id. An event exists once it has had a participant added.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    events: RwLock<HashMap<EventId, Vec<Participant>>>,
}

fn lock_error() -> SelectionError {
    SelectionError::CommitFailure("lock error".to_string())
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a participant to an event's roster, creating the event if needed.
    /// Emails are unique per event (case-insensitive).
    pub fn add_participant(&self, event: &str, participant: Participant) -> Result<Participant, SelectionError> {
        let mut g = self.events.write().map_err(|_| lock_error())?;
        let roster = g.entry(event.to_string()).or_default();
        let email = participant.email.trim();
        if !email.is_empty() && roster.iter().any(|p| p.email.eq_ignore_ascii_case(email)) {
            return Err(SelectionError::CommitFailure(format!(
                "a participant with email {} already exists",
                email
            )));
        }
        roster.push(participant.clone());
        Ok(participant)
    }

    /// Ids currently marked selected, in roster order.
    pub fn selected_ids(&self, event: &str) -> Vec<ParticipantId> {
        self.events
            .read()
            .ok()
            .and_then(|g| {
                g.get(event)
                    .map(|r| r.iter().filter(|p| p.selected).map(|p| p.id.clone()).collect())
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl ParticipantDirectory for InMemoryDirectory {
    async fn fetch(&self, event: &str) -> Result<Vec<Participant>, SelectionError> {
        let g = self
            .events
            .read()
            .map_err(|_| SelectionError::FetchFailure("lock error".to_string()))?;
        g.get(event)
            .cloned()
            .ok_or_else(|| SelectionError::FetchFailure(format!("event {} not found", event)))
    }
}

#[async_trait]
impl SelectionCommitter for InMemoryDirectory {
    /// Replaces the event's selection. All ids are checked before anything is written.
    async fn commit_selection(&self, event: &str, ids: &[ParticipantId]) -> Result<(), SelectionError> {
        let mut g = self.events.write().map_err(|_| lock_error())?;
        let roster = g
            .get_mut(event)
            .ok_or_else(|| SelectionError::CommitFailure(format!("event {} not found", event)))?;
        let ids: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let known: HashSet<&str> = roster.iter().map(|p| p.id.as_str()).collect();
        if let Some(missing) = ids.iter().find(|id| !known.contains(*id)) {
            return Err(SelectionError::CommitFailure(format!(
                "participant {} is not in event {}",
                missing, event
            )));
        }
        for p in roster.iter_mut() {
            p.selected = ids.contains(p.id.as_str());
        }
        Ok(())
    }
}

#[async_trait]
impl FlagCommitter for InMemoryDirectory {
    async fn commit_flag(&self, participant: &str, event: &str, checked: bool) -> Result<(), SelectionError> {
        let mut g = self.events.write().map_err(|_| lock_error())?;
        let p = g
            .get_mut(event)
            .and_then(|r| r.iter_mut().find(|p| p.id == participant))
            .ok_or_else(|| SelectionError::ParticipantNotFound(participant.to_string()))?;
        p.wants_to_play = checked;
        Ok(())
    }
}
