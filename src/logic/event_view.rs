//! Administrative view of one event's roster: search, flag toggles, and the draw.

use crate::logic::filter::filter_participants;
use crate::logic::ports::{FlagCommitter, ParticipantDirectory, SelectionCommitter};
use crate::logic::sampler::{check_eligibility, sample, RandomSource};
use crate::models::{
    EventId, Participant, ParticipantId, RosterCache, RosterSnapshot, RosterState, SearchQuery,
    SelectionError,
};
use serde::Serialize;
use std::sync::{Arc, RwLock};

/// Shared roster cache, one entry per event.
pub type SharedRosterCache = Arc<RwLock<RosterCache>>;

/// The three persistence collaborators the view needs.
#[derive(Clone)]
pub struct Collaborators {
    pub directory: Arc<dyn ParticipantDirectory>,
    pub selections: Arc<dyn SelectionCommitter>,
    pub flags: Arc<dyn FlagCommitter>,
}

impl Collaborators {
    /// Use one store for all three roles.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: ParticipantDirectory + SelectionCommitter + FlagCommitter + 'static,
    {
        Self {
            directory: store.clone(),
            selections: store.clone(),
            flags: store,
        }
    }
}

/// Where the most recent draw request got to.
///
/// `Rejected`, `Refreshed` and `Failed` are idle states that remember the last outcome.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawState {
    #[default]
    Idle,
    Validating,
    Sampling,
    Committing,
    /// Gate refused the draw; nothing was committed.
    Rejected,
    /// Committed and the roster was re-fetched.
    Refreshed,
    /// Commit failed; the cached roster is unchanged.
    Failed,
}

/// Successful draw: the committed ids and the roster fetched afterwards.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DrawOutcome {
    /// Sorted for a stable payload.
    pub selected: Vec<ParticipantId>,
    pub roster: RosterState,
}

/// View over one event. Query state is local; the roster lives in the shared cache.
pub struct EventView {
    event: EventId,
    quota: usize,
    query: SearchQuery,
    draw_state: DrawState,
    cache: SharedRosterCache,
    collaborators: Collaborators,
}

impl EventView {
    pub fn new(
        event: impl Into<EventId>,
        quota: usize,
        cache: SharedRosterCache,
        collaborators: Collaborators,
    ) -> Self {
        Self {
            event: event.into(),
            quota,
            query: SearchQuery::new(),
            draw_state: DrawState::Idle,
            cache,
            collaborators,
        }
    }

    pub fn event(&self) -> &str {
        &self.event
    }

    pub fn quota(&self) -> usize {
        self.quota
    }

    pub fn draw_state(&self) -> DrawState {
        self.draw_state
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// Keystroke: update the immediate query only.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query.set(text);
    }

    /// Idle hook: let the filter catch up with the typed text.
    pub fn settle_query(&mut self) -> bool {
        self.query.settle()
    }

    /// Cached roster, fetching when missing, invalidated, or previously failed.
    pub async fn roster(&self) -> RosterState {
        let cached = self
            .cache
            .read()
            .ok()
            .and_then(|g| g.get(&self.event).cloned());
        match cached {
            Some(state @ RosterState::Loaded(_)) => state,
            _ => self.refresh().await,
        }
    }

    /// Fetch from the directory and replace the cache entry.
    /// Fetch errors are stored as `RosterState::Failed`, never returned.
    pub async fn refresh(&self) -> RosterState {
        let state = match self.collaborators.directory.fetch(&self.event).await {
            Ok(participants) => RosterState::Loaded(RosterSnapshot::new(participants)),
            Err(e) => {
                log::warn!("Fetching roster for event {} failed: {}", self.event, e);
                RosterState::failed(e.to_string())
            }
        };
        match self.cache.write() {
            Ok(mut g) => g.insert(self.event.clone(), state.clone()),
            Err(_) => log::warn!("Roster cache lock poisoned; event {} not cached", self.event),
        }
        state
    }

    /// Roster filtered by the deferred query.
    pub async fn filtered(&self) -> Vec<Participant> {
        let roster = self.roster().await;
        filter_participants(roster.participants(), self.query.deferred())
    }

    /// Draw `quota` participants from the filtered view and commit them.
    ///
    /// The filtered list is captured before sampling; a concurrent refresh does not affect it.
    /// On success the cached roster is invalidated and fetched exactly once more.
    pub async fn generate_groups<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<DrawOutcome, SelectionError> {
        let snapshot = self.filtered().await;

        self.transition(DrawState::Validating);
        if let Err(e) = check_eligibility(&snapshot, self.quota) {
            log::warn!("Draw for event {} rejected: {}", self.event, e);
            self.transition(DrawState::Rejected);
            return Err(e);
        }
        self.transition(DrawState::Sampling);
        let selected = sample(&snapshot, self.quota, rng);
        let mut ids: Vec<ParticipantId> = selected.into_iter().collect();
        ids.sort();

        self.transition(DrawState::Committing);
        if let Err(e) = self.collaborators.selections.commit_selection(&self.event, &ids).await {
            log::warn!("Committing selection for event {} failed: {}", self.event, e);
            self.transition(DrawState::Failed);
            return Err(match e {
                SelectionError::CommitFailure(_) => e,
                other => SelectionError::CommitFailure(other.to_string()),
            });
        }
        log::info!("Selected {} participants for event {}", ids.len(), self.event);

        if let Ok(mut g) = self.cache.write() {
            g.invalidate(&self.event);
        }
        let roster = self.refresh().await;
        self.transition(DrawState::Refreshed);
        Ok(DrawOutcome {
            selected: ids,
            roster,
        })
    }

    /// Persist a participant's wants-to-play flag. One committer call per invocation;
    /// the cached roster is not touched until the next refresh (see `invalidate`).
    pub async fn set_wants_to_play(&self, participant: &str, checked: bool) -> Result<(), SelectionError> {
        let result = self
            .collaborators
            .flags
            .commit_flag(participant, &self.event, checked)
            .await;
        if let Err(e) = &result {
            log::warn!(
                "Setting wants_to_play={} for {} in event {} failed: {}",
                checked,
                participant,
                self.event,
                e
            );
        }
        result
    }

    /// Mark this event's cached roster stale so the next `roster` call re-fetches it.
    pub fn invalidate(&self) -> bool {
        match self.cache.write() {
            Ok(mut g) => g.invalidate(&self.event),
            Err(_) => false,
        }
    }

    /// Drop this event's cached roster.
    pub fn teardown(self) {
        if let Ok(mut g) = self.cache.write() {
            g.evict(&self.event);
        }
    }

    fn transition(&mut self, next: DrawState) {
        log::debug!("Draw for event {}: {:?} -> {:?}", self.event, self.draw_state, next);
        self.draw_state = next;
    }
}
