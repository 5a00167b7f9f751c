//! Participant data structure as served by the participant directory.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier for a participant (unique within the directory).
pub type ParticipantId = String;

/// Identifier of the event whose roster is being viewed.
pub type EventId = String;

/// A participant in an event roster.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub email: String,
    /// External profile handle (GitHub username).
    pub github: String,
    /// Operator-controlled flag: only these participants can be drawn.
    pub wants_to_play: bool,
    /// Set by the selection committer once the participant has been drawn.
    #[serde(default)]
    pub selected: bool,
}

impl Participant {
    /// Create a new participant with a fresh id. Not selected, does not want to play.
    pub fn new(name: impl Into<String>, email: impl Into<String>, github: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            email: email.into(),
            github: github.into(),
            wants_to_play: false,
            selected: false,
        }
    }

    /// Builder-style setter for the wants-to-play flag.
    pub fn wanting_to_play(mut self, wants_to_play: bool) -> Self {
        self.wants_to_play = wants_to_play;
        self
    }

    /// Whether the participant can be drawn.
    pub fn is_eligible(&self) -> bool {
        self.wants_to_play
    }
}
