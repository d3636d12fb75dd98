use indexmap::IndexMap;
use serde::Serialize;

use crate::state::game::{AnswerRecord, LeaderboardEntry, Question, Team};

/// Everything a spectator screen needs, composed in one read.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameshowDisplayData {
    /// Question designated by the round pointer.
    pub question: Option<Question>,
    /// 1-based, 0 when no question was ever started.
    pub question_number: usize,
    /// Number of registered questions.
    pub total_questions: usize,
    /// Answers of the current round keyed by team code.
    pub answers: IndexMap<String, AnswerRecord>,
    /// Sorted by descending score.
    pub leaderboard: Vec<LeaderboardEntry>,
    /// Teams in creation order.
    pub teams: Vec<Team>,
    /// Whether the current round accepts answers.
    pub game_active: bool,
    /// Number of answers in the current round.
    pub answers_received: usize,
    /// Number of teams.
    pub total_teams: usize,
}

/// Counters shown on the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStats {
    /// Number of registered questions.
    pub total_questions: usize,
    /// Number of teams.
    pub total_teams: usize,
    /// 1-based, 0 when no question was ever started.
    pub current_question: usize,
    /// Number of answers in the current round.
    pub answers_received: usize,
    /// Whether the current round accepts answers.
    pub game_active: bool,
}
