use time::OffsetDateTime;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::question::{NewQuestion, QuestionPatch},
    error::{GameshowError, GameshowResult},
    state::{Gameshow, game::Question},
};

/// Register a new question at the end of the list.
pub fn create_question(gs: &mut Gameshow, input: NewQuestion) -> GameshowResult<Question> {
    input.validate()?;

    let question = Question {
        id: Uuid::now_v7(),
        text: input.text,
        kind: input.kind,
        image: input.image,
        options: input.options,
        correct_answer: input.correct_answer,
        points: input.points.unwrap_or(gs.settings().default_points),
        created_at: OffsetDateTime::now_utc(),
    };

    gs.mutate(|snapshot| {
        snapshot.questions.push(question.clone());
        Ok(())
    })?;

    info!(question = %question.id, kind = ?question.kind, "question created");
    Ok(question)
}

/// Shallow-merge `patch` over the stored question.
pub fn update_question(
    gs: &mut Gameshow,
    id: Uuid,
    patch: QuestionPatch,
) -> GameshowResult<Question> {
    patch.validate()?;

    let updated = gs.mutate(|snapshot| {
        let question = snapshot
            .questions
            .iter_mut()
            .find(|question| question.id == id)
            .ok_or(GameshowError::QuestionNotFound(id))?;
        patch.apply_to(question);
        Ok(question.clone())
    })?;

    info!(question = %id, "question updated");
    Ok(updated)
}

/// Remove a question. Unknown ids are ignored.
///
/// The round pointer follows the removal: deleting the current question ends the round, and
/// deleting an earlier one shifts the pointer so it keeps designating the same question.
pub fn delete_question(gs: &mut Gameshow, id: Uuid) -> GameshowResult<()> {
    let removed = gs.mutate(|snapshot| {
        let Some(position) = snapshot.questions.iter().position(|q| q.id == id) else {
            return Ok(false);
        };
        snapshot.questions.remove(position);

        match snapshot.current_question_index {
            Some(current) if current == position => {
                snapshot.current_question_index = None;
                snapshot.game_active = false;
            }
            Some(current) if current > position => {
                snapshot.current_question_index = Some(current - 1);
            }
            _ => {}
        }
        Ok(true)
    })?;

    if removed {
        info!(question = %id, "question deleted");
    } else {
        debug!(question = %id, "delete ignored; question not found");
    }
    Ok(())
}

/// Copy of the ordered question list.
pub fn get_questions(gs: &Gameshow) -> Vec<Question> {
    gs.snapshot().questions.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{
        game::{AnswerValue, QuestionKind},
        test_support::gameshow,
    };

    #[test]
    fn create_applies_defaults() {
        let mut gs = gameshow();
        let question =
            create_question(&mut gs, NewQuestion::new("2+2?", QuestionKind::Text)).unwrap();

        assert_eq!(question.points, 100);
        assert_eq!(question.image, None);
        assert!(question.options.is_empty());
        assert_eq!(question.correct_answer, None);
        assert_eq!(get_questions(&gs), vec![question]);
    }

    #[test]
    fn create_rejects_invalid_input_without_persisting() {
        let mut gs = gameshow();
        let err = create_question(&mut gs, NewQuestion::new("", QuestionKind::Text)).unwrap_err();
        assert!(matches!(err, GameshowError::InvalidInput(_)));
        assert!(get_questions(&gs).is_empty());
    }

    #[test]
    fn ids_are_unique() {
        let mut gs = gameshow();
        let a = create_question(&mut gs, NewQuestion::new("a", QuestionKind::Text)).unwrap();
        let b = create_question(&mut gs, NewQuestion::new("b", QuestionKind::Text)).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn update_replaces_options_wholesale() {
        let mut gs = gameshow();
        let question = create_question(
            &mut gs,
            NewQuestion::new("Pick one", QuestionKind::MultipleChoice)
                .with_options(["a", "b", "c"])
                .with_correct_answer(AnswerValue::MultipleChoice { selected: 2 })
                .with_image("cat.png"),
        )
        .unwrap();

        let patch = QuestionPatch {
            options: Some(vec!["x".into()]),
            image: Some(None),
            ..Default::default()
        };
        let updated = update_question(&mut gs, question.id, patch).unwrap();

        assert_eq!(updated.options, vec!["x".to_string()]);
        assert_eq!(updated.image, None);
        assert_eq!(updated.text, "Pick one");
        assert_eq!(
            updated.correct_answer,
            Some(AnswerValue::MultipleChoice { selected: 2 })
        );
        assert_eq!(get_questions(&gs)[0], updated);
    }

    #[test]
    fn update_unknown_question_is_not_found() {
        let mut gs = gameshow();
        let id = Uuid::now_v7();
        let err = update_question(&mut gs, id, QuestionPatch::default()).unwrap_err();
        assert!(matches!(err, GameshowError::QuestionNotFound(missing) if missing == id));
    }

    #[test]
    fn delete_is_idempotent() {
        let mut gs = gameshow();
        let question = create_question(&mut gs, NewQuestion::new("a", QuestionKind::Text)).unwrap();
        delete_question(&mut gs, question.id).unwrap();
        delete_question(&mut gs, question.id).unwrap();
        assert!(get_questions(&gs).is_empty());
    }

    #[test]
    fn delete_keeps_round_pointer_valid() {
        let mut gs = gameshow();
        let first = create_question(&mut gs, NewQuestion::new("a", QuestionKind::Text)).unwrap();
        let second = create_question(&mut gs, NewQuestion::new("b", QuestionKind::Text)).unwrap();
        gs.mutate(|snapshot| {
            snapshot.current_question_index = Some(1);
            snapshot.game_active = true;
            Ok(())
        })
        .unwrap();

        delete_question(&mut gs, first.id).unwrap();
        assert_eq!(gs.snapshot().current_question_index, Some(0));
        assert_eq!(gs.snapshot().current_question().map(|q| q.id), Some(second.id));
        assert!(gs.snapshot().game_active);

        delete_question(&mut gs, second.id).unwrap();
        assert_eq!(gs.snapshot().current_question_index, None);
        assert!(!gs.snapshot().game_active);
    }
}
