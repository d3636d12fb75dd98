use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Closed set of question formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Teams type a free-form answer.
    Text,
    /// Teams pick one of the question's options.
    MultipleChoice,
    /// Teams answer true or false.
    TrueFalse,
}

/// A team's answer, or a question's expected answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnswerValue {
    /// Free-form answer.
    Text {
        /// Answer as typed.
        text: String,
    },
    /// Chosen option.
    MultipleChoice {
        /// Index into the question's `options`.
        selected: usize,
    },
    /// True or false.
    TrueFalse {
        /// Chosen truth value.
        value: bool,
    },
}

/// A quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Timestamp-prefixed random identifier (UUID v7).
    pub id: Uuid,
    /// Question as shown to the teams.
    pub text: String,
    /// Answer format.
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    /// Optional image reference (URL or data URI).
    pub image: Option<String>,
    /// Candidate answers for multiple-choice questions.
    pub options: Vec<String>,
    /// Expected answer, used for automatic grading.
    pub correct_answer: Option<AnswerValue>,
    /// Points awarded for a correct answer.
    pub points: u32,
    /// Creation time.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Question {
    /// Grade an answer against the expected one.
    ///
    /// Returns `None` when the question has no expected answer. Answers of another kind are
    /// never correct. Text answers compare trimmed and case-insensitively.
    pub fn grade(&self, answer: &AnswerValue) -> Option<bool> {
        let expected = self.correct_answer.as_ref()?;
        let correct = match (expected, answer) {
            (AnswerValue::Text { text: expected }, AnswerValue::Text { text: given }) => {
                expected.trim().to_lowercase() == given.trim().to_lowercase()
            }
            (
                AnswerValue::MultipleChoice { selected: expected },
                AnswerValue::MultipleChoice { selected: given },
            ) => expected == given,
            (
                AnswerValue::TrueFalse { value: expected },
                AnswerValue::TrueFalse { value: given },
            ) => expected == given,
            _ => false,
        };
        Some(correct)
    }
}

/// A team competing in the gameshow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// Internal identifier.
    pub id: Uuid,
    /// Short human-enterable join code, unique across teams.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Member code of the only member allowed to answer. Always listed in `members`.
    pub captain_code: String,
    /// Member codes in join order.
    pub members: Vec<String>,
    /// Accumulated points.
    pub score: u32,
    /// Creation time.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Team {
    /// Build a fresh team whose only member is its captain.
    pub fn new(code: String, name: String, captain_code: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            code,
            name,
            members: vec![captain_code.clone()],
            captain_code,
            score: 0,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    /// Whether `member_code` belongs to the team.
    pub fn has_member(&self, member_code: &str) -> bool {
        self.members.iter().any(|member| member == member_code)
    }

    /// Whether `guest_code` is the team captain.
    pub fn is_captain(&self, guest_code: &str) -> bool {
        self.captain_code == guest_code
    }
}

/// Answer submitted by a team for the current round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    /// Submitted answer.
    pub answer: AnswerValue,
    /// Epoch milliseconds.
    pub submitted_at: i64,
    /// Team name at submission time.
    pub team_name: String,
}

/// Persisted per-team scoring summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// Team name at creation time.
    pub team_name: String,
    /// Points accumulated by the team.
    pub score: u32,
    /// Number of awards received.
    pub correct_answers: u32,
}

impl LeaderboardEntry {
    /// Empty entry for a team.
    pub fn new(team_name: String) -> Self {
        Self {
            team_name,
            score: 0,
            correct_answers: 0,
        }
    }
}

/// Complete serializable state of a gameshow.
///
/// Maps keep insertion order so listings and leaderboard ties are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameshowSnapshot {
    /// Questions in registration order.
    pub questions: Vec<Question>,
    /// Teams keyed by join code.
    pub teams: IndexMap<String, Team>,
    /// Round pointer into `questions`; kept after the round ends.
    pub current_question_index: Option<usize>,
    /// Answers of the current round keyed by team code.
    pub answers: IndexMap<String, AnswerRecord>,
    /// Whether the current round accepts answers.
    pub game_active: bool,
    /// Start of the current round, in epoch milliseconds.
    pub question_start_time: Option<i64>,
    /// Scoring summary keyed by team code.
    pub leaderboard: IndexMap<String, LeaderboardEntry>,
    /// Whether the answers of the current round were already graded automatically.
    pub answers_graded: bool,
}

impl GameshowSnapshot {
    /// Question the round pointer currently designates, if any.
    pub fn current_question(&self) -> Option<&Question> {
        self.current_question_index
            .and_then(|index| self.questions.get(index))
    }
}
