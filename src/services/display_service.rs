use crate::{
    dto::display::{GameStats, GameshowDisplayData},
    services::scoring_service::get_leaderboard,
    state::Gameshow,
};

/// Compose the spectator view in one read.
pub fn get_gameshow_display_data(gs: &Gameshow) -> GameshowDisplayData {
    let snapshot = gs.snapshot();
    let teams: Vec<_> = snapshot.teams.values().cloned().collect();

    GameshowDisplayData {
        question: snapshot.current_question().cloned(),
        question_number: question_number(gs),
        total_questions: snapshot.questions.len(),
        answers: snapshot.answers.clone(),
        leaderboard: get_leaderboard(gs),
        total_teams: teams.len(),
        teams,
        game_active: snapshot.game_active,
        answers_received: snapshot.answers.len(),
    }
}

/// Counters for the admin dashboard.
pub fn get_game_stats(gs: &Gameshow) -> GameStats {
    let snapshot = gs.snapshot();
    GameStats {
        total_questions: snapshot.questions.len(),
        total_teams: snapshot.teams.len(),
        current_question: question_number(gs),
        answers_received: snapshot.answers.len(),
        game_active: snapshot.game_active,
    }
}

fn question_number(gs: &Gameshow) -> usize {
    gs.snapshot()
        .current_question_index
        .map_or(0, |index| index + 1)
}
