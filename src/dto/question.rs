use serde::Deserialize;
use validator::Validate;

use crate::{
    dto::validation::validate_not_blank,
    state::game::{AnswerValue, Question, QuestionKind},
};

/// Payload used to register a new question.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestion {
    /// Question text; must not be blank.
    #[validate(custom(function = "validate_not_blank"))]
    pub text: String,
    /// Answer format.
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    /// Optional image reference.
    #[serde(default)]
    pub image: Option<String>,
    /// Candidate answers for multiple-choice questions.
    #[serde(default)]
    pub options: Vec<String>,
    /// Expected answer used for automatic grading.
    #[serde(default)]
    pub correct_answer: Option<AnswerValue>,
    /// Falls back to the configured default when omitted.
    #[serde(default)]
    #[validate(range(min = 1))]
    pub points: Option<u32>,
}

impl NewQuestion {
    /// Question with no options, image or expected answer, worth the default points.
    pub fn new(text: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            text: text.into(),
            kind,
            image: None,
            options: Vec::new(),
            correct_answer: None,
            points: None,
        }
    }

    /// Set an explicit point value.
    pub fn with_points(mut self, points: u32) -> Self {
        self.points = Some(points);
        self
    }

    /// Replace the candidate answers.
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Set the expected answer.
    pub fn with_correct_answer(mut self, answer: AnswerValue) -> Self {
        self.correct_answer = Some(answer);
        self
    }

    /// Attach an image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Partial update for a question. Present fields replace the stored ones wholesale.
///
/// For `image` and `correctAnswer`: absent leaves the value alone, `null` clears it.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPatch {
    /// New text; must not be blank.
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub text: Option<String>,
    /// New answer format.
    #[serde(default, rename = "type")]
    pub kind: Option<QuestionKind>,
    /// New image reference, or `Some(None)` to remove it.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub image: Option<Option<String>>,
    /// New candidate answers.
    #[serde(default)]
    pub options: Option<Vec<String>>,
    /// New expected answer, or `Some(None)` to remove it.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub correct_answer: Option<Option<AnswerValue>>,
    /// New point value.
    #[serde(default)]
    #[validate(range(min = 1))]
    pub points: Option<u32>,
}

impl QuestionPatch {
    /// Shallow merge: no field is merged recursively.
    pub fn apply_to(self, question: &mut Question) {
        if let Some(text) = self.text {
            question.text = text;
        }
        if let Some(kind) = self.kind {
            question.kind = kind;
        }
        if let Some(image) = self.image {
            question.image = image;
        }
        if let Some(options) = self.options {
            question.options = options;
        }
        if let Some(correct_answer) = self.correct_answer {
            question.correct_answer = correct_answer;
        }
        if let Some(points) = self.points {
            question.points = points;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_distinguishes_absent_from_null() {
        let patch: QuestionPatch =
            serde_json::from_str(r#"{"image": null, "points": 250}"#).unwrap();
        assert_eq!(patch.image, Some(None));
        assert_eq!(patch.correct_answer, None);
        assert_eq!(patch.points, Some(250));
    }

    #[test]
    fn new_question_rejects_zero_points_and_blank_text() {
        assert!(NewQuestion::new("2+2?", QuestionKind::Text).validate().is_ok());
        assert!(
            NewQuestion::new("2+2?", QuestionKind::Text)
                .with_points(0)
                .validate()
                .is_err()
        );
        assert!(NewQuestion::new("  ", QuestionKind::Text).validate().is_err());
    }

    #[test]
    fn new_question_parses_camel_case_payload() {
        let input: NewQuestion = serde_json::from_str(
            r#"{
                "text": "Sky is blue?",
                "type": "true_false",
                "correctAnswer": {"type": "true_false", "value": true}
            }"#,
        )
        .unwrap();
        assert_eq!(input.kind, QuestionKind::TrueFalse);
        assert_eq!(input.points, None);
        assert_eq!(
            input.correct_answer,
            Some(AnswerValue::TrueFalse { value: true })
        );
    }
}
