use std::time::Duration;

use crate::model::{Quiz, QuizId};
use crate::session::progress::{RunningScore, SessionProgress};

/// Snapshot of one attempt at a quiz.
///
/// Only `SessionEngine` produces new states; everything here is read-only.
///
/// - `answers[i]` is committed for every `i < current_index` (a committed
///   answer may still be unset after a timeout).
/// - `selected` holds the locked, not yet committed choice for `current_index`.
/// - `score` counts committed answers equal to the question's correct option.
/// - Once `completed`, `current_index` is the last question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub(crate) quiz_id: QuizId,
    pub(crate) current_index: usize,
    pub(crate) answers: Vec<Option<usize>>,
    pub(crate) selected: Option<usize>,
    pub(crate) locked: bool,
    pub(crate) score: usize,
    pub(crate) elapsed: Duration,
    pub(crate) since_lock: Duration,
    pub(crate) completed: bool,
}

impl SessionState {
    /// Fresh state: first question, nothing answered, clock at zero.
    #[must_use]
    pub fn initial(quiz: &Quiz) -> Self {
        Self {
            quiz_id: quiz.id().clone(),
            current_index: 0,
            answers: vec![None; quiz.question_count()],
            selected: None,
            locked: false,
            score: 0,
            elapsed: Duration::ZERO,
            since_lock: Duration::ZERO,
            completed: false,
        }
    }

    #[must_use]
    pub fn quiz_id(&self) -> &QuizId {
        &self.quiz_id
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    #[must_use]
    pub fn answer(&self, index: usize) -> Option<usize> {
        self.answers.get(index).copied().flatten()
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    /// Session-wide elapsed time, or time spent on the current question when
    /// a per-question countdown is configured.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 >= self.answers.len()
    }

    /// Number of questions whose answer has been committed.
    #[must_use]
    pub fn committed_count(&self) -> usize {
        if self.completed {
            self.answers.len()
        } else {
            self.current_index
        }
    }

    #[must_use]
    pub fn running_score(&self) -> RunningScore {
        RunningScore {
            correct: self.score,
            answered: self.committed_count(),
        }
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.answers.len();
        let position = (self.current_index + 1).min(total);
        SessionProgress {
            position,
            total,
            answered: self.committed_count(),
            percent: crate::results::percentage(position, total),
            is_complete: self.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CategoryId, Difficulty, Question, QuestionId};

    fn quiz(n: usize) -> Quiz {
        let questions = (0..n)
            .map(|i| {
                Question::new(
                    QuestionId::new(i.to_string()),
                    format!("Q{i}"),
                    vec!["a".into(), "b".into()],
                    0,
                    None,
                )
                .unwrap()
            })
            .collect();
        Quiz::new(
            QuizId::new("q"),
            "Quiz",
            "",
            CategoryId::new("c"),
            questions,
            Difficulty::Easy,
        )
        .unwrap()
    }

    #[test]
    fn initial_state_is_blank() {
        let state = SessionState::initial(&quiz(3));
        assert_eq!(state.current_index(), 0);
        assert_eq!(state.answers(), &[None, None, None]);
        assert_eq!(state.score(), 0);
        assert!(!state.is_locked());
        assert!(!state.is_completed());
        assert_eq!(state.elapsed(), Duration::ZERO);
    }

    #[test]
    fn progress_reports_one_based_position() {
        let state = SessionState::initial(&quiz(4));
        let progress = state.progress();
        assert_eq!(progress.position, 1);
        assert_eq!(progress.total, 4);
        assert_eq!(progress.answered, 0);
        assert_eq!(progress.percent, 25);
    }
}
