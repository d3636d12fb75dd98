//! Destructive administrative operations.

use tracing::{info, warn};

use crate::{error::GameshowResult, state::Gameshow, state::game::GameshowSnapshot};

const RESET_PROMPT: &str = "Are you sure? This will delete ALL questions, teams, and scores!";

/// Out-of-band confirmation asked before destructive operations.
pub trait ConfirmationGate {
    /// Return `true` to proceed.
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> ConfirmationGate for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Wipe every question, team, answer and score once `gate` confirms.
///
/// Returns `false` without touching anything when the gate declines.
pub fn reset_gameshow(gs: &mut Gameshow, gate: &dyn ConfirmationGate) -> GameshowResult<bool> {
    if !gate.confirm(RESET_PROMPT) {
        warn!("gameshow reset declined");
        return Ok(false);
    }

    gs.mutate(|snapshot| {
        *snapshot = GameshowSnapshot::default();
        Ok(())
    })?;

    info!("gameshow reset");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::{
        dto::question::NewQuestion,
        services::{question_service::create_question, team_service::create_team},
        state::{game::QuestionKind, test_support::gameshow},
    };

    fn populated() -> Gameshow {
        let mut gs = gameshow();
        create_question(&mut gs, NewQuestion::new("Q", QuestionKind::Text)).unwrap();
        create_team(&mut gs, "Red", "C1").unwrap();
        gs
    }

    #[test]
    fn declined_reset_changes_nothing() {
        let mut gs = populated();
        let before = gs.snapshot().clone();
        assert!(!reset_gameshow(&mut gs, &|_: &str| false).unwrap());
        assert_eq!(gs.snapshot(), &before);
    }

    #[test]
    fn confirmed_reset_wipes_and_persists() {
        let mut gs = populated();
        let prompts = RefCell::new(Vec::new());
        let gate = |prompt: &str| {
            prompts.borrow_mut().push(prompt.to_owned());
            true
        };

        assert!(reset_gameshow(&mut gs, &gate).unwrap());

        assert_eq!(gs.snapshot(), &GameshowSnapshot::default());
        assert_eq!(prompts.borrow().len(), 1);
        gs.reload().unwrap();
        assert_eq!(gs.snapshot(), &GameshowSnapshot::default());
    }
}
