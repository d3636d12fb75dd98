use indexmap::IndexMap;
use tracing::info;

use crate::{
    error::{GameshowError, GameshowResult},
    services::team_service::normalize_team_code,
    state::{
        Gameshow,
        game::{AnswerRecord, AnswerValue},
        now_millis,
    },
};

/// Record the team's answer for the open round, replacing any earlier one.
///
/// Only the team captain may answer, and only while a round is active.
pub fn submit_answer(
    gs: &mut Gameshow,
    team_code: &str,
    guest_code: &str,
    answer: AnswerValue,
) -> GameshowResult<AnswerRecord> {
    let team_code = normalize_team_code(team_code);

    let record = gs.mutate(|snapshot| {
        let team = snapshot
            .teams
            .get(&team_code)
            .ok_or_else(|| GameshowError::TeamNotFound(team_code.clone()))?;
        if !team.is_captain(guest_code) {
            return Err(GameshowError::NotCaptain {
                team_code: team_code.clone(),
            });
        }
        if !snapshot.game_active {
            return Err(GameshowError::NoActiveRound);
        }

        let record = AnswerRecord {
            answer,
            submitted_at: now_millis(),
            team_name: team.name.clone(),
        };
        snapshot.answers.insert(team_code.clone(), record.clone());
        Ok(record)
    })?;

    info!(team = %team_code, "answer submitted");
    Ok(record)
}

/// Answers of the current round keyed by team code, in first-submission order.
pub fn get_answers(gs: &Gameshow) -> IndexMap<String, AnswerRecord> {
    gs.snapshot().answers.clone()
}

/// Number of answers in the current round.
pub fn get_answer_count(gs: &Gameshow) -> usize {
    gs.snapshot().answers.len()
}

/// Whether the team already answered the current round.
pub fn has_team_answered(gs: &Gameshow, team_code: &str) -> bool {
    gs.snapshot()
        .answers
        .contains_key(&normalize_team_code(team_code))
}
