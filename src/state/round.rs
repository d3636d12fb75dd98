use thiserror::Error;

use crate::state::game::GameshowSnapshot;

/// Phases a round can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// No question accepts answers.
    Idle,
    /// The question at `index` accepts answers from team captains.
    Active {
        /// Position of the question in the registry.
        index: usize,
    },
}

/// Events driving the round state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEvent {
    /// Admin opens the question at `index`, from either phase.
    Start {
        /// Position of the question to open.
        index: usize,
    },
    /// Admin closes the current round.
    End,
}

/// Error returned when a round is started on a question that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid question index {index}: {count} question(s) available")]
pub struct InvalidIndex {
    /// Requested index.
    pub index: usize,
    /// Number of questions at the time of the request.
    pub count: usize,
}

impl RoundPhase {
    /// Compute the phase reached by applying `event` with `question_count` questions registered.
    ///
    /// Both events are accepted from either phase: starting while active moves straight to the
    /// new round, ending while idle stays idle.
    pub fn after(event: RoundEvent, question_count: usize) -> Result<Self, InvalidIndex> {
        match event {
            RoundEvent::Start { index } if index < question_count => {
                Ok(RoundPhase::Active { index })
            }
            RoundEvent::Start { index } => Err(InvalidIndex {
                index,
                count: question_count,
            }),
            RoundEvent::End => Ok(RoundPhase::Idle),
        }
    }

    /// Write the phase into the persisted round fields.
    ///
    /// Going idle keeps the round pointer so the last question can still be graded and shown.
    pub fn apply_to(self, snapshot: &mut GameshowSnapshot) {
        match self {
            RoundPhase::Active { index } => {
                snapshot.current_question_index = Some(index);
                snapshot.game_active = true;
            }
            RoundPhase::Idle => snapshot.game_active = false,
        }
    }
}
