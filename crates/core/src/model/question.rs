use crate::model::ids::QuestionId;
use crate::model::quiz::QuizError;

/// A multiple-choice question. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    options: Vec<String>,
    correct_answer: usize,
    explanation: Option<String>,
}

impl Question {
    /// Build a question, checking the option list against the correct answer.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyId` or `QuizError::EmptyQuestionText` for blank fields,
    /// `QuizError::TooFewOptions` for fewer than two options, and
    /// `QuizError::CorrectAnswerOutOfRange` if `correct_answer` is not an option index.
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        options: Vec<String>,
        correct_answer: usize,
        explanation: Option<String>,
    ) -> Result<Self, QuizError> {
        if id.is_blank() {
            return Err(QuizError::EmptyId);
        }
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuizError::EmptyQuestionText { question: id });
        }
        if options.len() < 2 {
            return Err(QuizError::TooFewOptions {
                question: id,
                count: options.len(),
            });
        }
        if correct_answer >= options.len() {
            return Err(QuizError::CorrectAnswerOutOfRange {
                question: id,
                index: correct_answer,
                count: options.len(),
            });
        }

        Ok(Self {
            id,
            text,
            options,
            correct_answer,
            explanation: explanation.filter(|e| !e.trim().is_empty()),
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn correct_answer(&self) -> usize {
        self.correct_answer
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    /// True when `choice` is the correct option. An unset choice never matches.
    #[must_use]
    pub fn is_correct(&self, choice: Option<usize>) -> bool {
        choice == Some(self.correct_answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("option {i}")).collect()
    }

    #[test]
    fn rejects_single_option() {
        let err = Question::new(QuestionId::new("1"), "Q", options(1), 0, None).unwrap_err();
        assert!(matches!(err, QuizError::TooFewOptions { count: 1, .. }));
    }

    #[test]
    fn rejects_correct_answer_past_the_end() {
        let err = Question::new(QuestionId::new("1"), "Q", options(4), 4, None).unwrap_err();
        assert!(matches!(
            err,
            QuizError::CorrectAnswerOutOfRange { index: 4, count: 4, .. }
        ));
    }

    #[test]
    fn blank_explanation_is_dropped() {
        let q = Question::new(QuestionId::new("1"), "Q", options(2), 1, Some("  ".into())).unwrap();
        assert_eq!(q.explanation(), None);
    }

    #[test]
    fn unset_choice_is_never_correct() {
        let q = Question::new(QuestionId::new("1"), "Q", options(3), 0, None).unwrap();
        assert!(q.is_correct(Some(0)));
        assert!(!q.is_correct(Some(2)));
        assert!(!q.is_correct(None));
    }
}
