//! Points, automatic grading and the leaderboard.

use tracing::{debug, info};

use crate::{
    error::{GameshowError, GameshowResult},
    services::team_service::normalize_team_code,
    state::{
        Gameshow,
        game::{GameshowSnapshot, LeaderboardEntry, Team},
    },
};

/// Add `points` to a team and to its leaderboard entry.
///
/// Every award also counts as one correct answer on the leaderboard, whatever the amount.
pub fn award_points(gs: &mut Gameshow, team_code: &str, points: u32) -> GameshowResult<Team> {
    let team_code = normalize_team_code(team_code);
    let team = gs.mutate(|snapshot| credit_team(snapshot, &team_code, points))?;

    info!(team = %team_code, points, score = team.score, "points awarded");
    Ok(team)
}

/// Award the current question's points to a team.
///
/// Works after the round was ended, as long as a question is still designated.
pub fn mark_answer_correct(gs: &mut Gameshow, team_code: &str) -> GameshowResult<Team> {
    let points = gs
        .snapshot()
        .current_question()
        .map(|question| question.points)
        .ok_or(GameshowError::NoActiveRound)?;
    award_points(gs, team_code, points)
}

/// Grade every recorded answer against the current question and reward the correct ones.
///
/// Returns the codes of the rewarded teams. A round is graded at most once: later calls reward
/// nobody until the next round starts. A question without an expected answer rewards nobody
/// and leaves the round ungraded.
pub fn award_correct_answers(gs: &mut Gameshow) -> GameshowResult<Vec<String>> {
    let snapshot = gs.snapshot();
    let question = snapshot
        .current_question()
        .ok_or(GameshowError::NoActiveRound)?;
    if snapshot.answers_graded {
        debug!(question = %question.id, "round already graded");
        return Ok(Vec::new());
    }
    if question.correct_answer.is_none() {
        debug!(question = %question.id, "question has no expected answer");
        return Ok(Vec::new());
    }

    let points = question.points;
    let correct: Vec<String> = snapshot
        .answers
        .iter()
        .filter(|(_, record)| question.grade(&record.answer) == Some(true))
        .map(|(code, _)| code.clone())
        .collect();

    gs.mutate(|snapshot| {
        for code in &correct {
            credit_team(snapshot, code, points)?;
        }
        snapshot.answers_graded = true;
        Ok(())
    })?;

    info!(rewarded = correct.len(), points, "answers graded");
    Ok(correct)
}

fn credit_team(
    snapshot: &mut GameshowSnapshot,
    team_code: &str,
    points: u32,
) -> GameshowResult<Team> {
    let team = snapshot
        .teams
        .get_mut(team_code)
        .ok_or_else(|| GameshowError::TeamNotFound(team_code.to_owned()))?;
    team.score = team.score.saturating_add(points);

    let entry = snapshot
        .leaderboard
        .entry(team_code.to_owned())
        .or_insert_with(|| LeaderboardEntry::new(team.name.clone()));
    entry.score = entry.score.saturating_add(points);
    entry.correct_answers += 1;

    Ok(team.clone())
}

/// Leaderboard sorted by descending score; ties keep team creation order.
pub fn get_leaderboard(gs: &Gameshow) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = gs.snapshot().leaderboard.values().cloned().collect();
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries
}

/// Zero every score and rebuild the leaderboard from the current teams.
pub fn reset_scores(gs: &mut Gameshow) -> GameshowResult<()> {
    gs.mutate(|snapshot| {
        for team in snapshot.teams.values_mut() {
            team.score = 0;
        }
        snapshot.leaderboard = snapshot
            .teams
            .iter()
            .map(|(code, team)| (code.clone(), LeaderboardEntry::new(team.name.clone())))
            .collect();
        Ok(())
    })?;

    info!(teams = gs.snapshot().teams.len(), "scores reset");
    Ok(())
}
