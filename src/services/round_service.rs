//! Round lifecycle on top of the [`RoundPhase`] model.

use tracing::info;

use crate::{
    error::GameshowResult,
    state::{
        Gameshow,
        game::Question,
        now_millis,
        round::{RoundEvent, RoundPhase},
    },
};

/// Open the question at `index` for answers, discarding every answer of the previous round.
///
/// Allowed while another round is active; the new round replaces it.
pub fn start_question(gs: &mut Gameshow, index: usize) -> GameshowResult<Question> {
    let question = gs.mutate(|snapshot| {
        RoundPhase::after(RoundEvent::Start { index }, snapshot.questions.len())?
            .apply_to(snapshot);
        snapshot.question_start_time = Some(now_millis());
        snapshot.answers.clear();
        snapshot.answers_graded = false;
        Ok(snapshot.questions[index].clone())
    })?;

    info!(index, question = %question.id, "round started");
    Ok(question)
}

/// Close the round. The question pointer and start time are kept for grading and display.
pub fn end_question(gs: &mut Gameshow) -> GameshowResult<()> {
    gs.mutate(|snapshot| {
        RoundPhase::after(RoundEvent::End, snapshot.questions.len())?.apply_to(snapshot);
        Ok(())
    })?;

    info!("round ended");
    Ok(())
}

/// Question designated by the round pointer, whether or not the round is still open.
pub fn get_current_question(gs: &Gameshow) -> Option<Question> {
    gs.snapshot().current_question().cloned()
}

/// Whether the current round accepts answers.
pub fn is_game_active(gs: &Gameshow) -> bool {
    gs.snapshot().game_active
}
