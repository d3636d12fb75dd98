use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

use crate::{dao::storage::StorageError, state::round::InvalidIndex};

/// Result alias for gameshow operations.
pub type GameshowResult<T> = Result<T, GameshowError>;

/// Errors that can occur in gameshow operations.
///
/// Every variant is local and recoverable; callers decide how to surface it.
#[derive(Debug, Error)]
pub enum GameshowError {
    /// No question carries the requested id.
    #[error("question `{0}` not found")]
    QuestionNotFound(Uuid),
    /// No team carries the requested code.
    #[error("team `{0}` not found")]
    TeamNotFound(String),
    /// Someone other than the captain tried to answer for a team.
    #[error("only the captain of team `{team_code}` can answer")]
    NotCaptain {
        /// Team the answer was submitted for.
        team_code: String,
    },
    /// Captaincy was offered to someone outside the team.
    #[error("`{member_code}` is not a member of team `{team_code}`")]
    NotAMember {
        /// Team whose captaincy was requested.
        team_code: String,
        /// Code of the would-be captain.
        member_code: String,
    },
    /// Answers or points require a current question.
    #[error("no active question")]
    NoActiveRound,
    /// A round was started on a question that does not exist.
    #[error(transparent)]
    InvalidIndex(#[from] InvalidIndex),
    /// Invalid input provided by the caller.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The key-value store failed; the environment is at fault.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<ValidationErrors> for GameshowError {
    fn from(err: ValidationErrors) -> Self {
        GameshowError::InvalidInput(format!("validation failed: {err}"))
    }
}
