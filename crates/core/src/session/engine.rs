use std::time::Duration;

use thiserror::Error;

use crate::model::{Question, Quiz, QuizId};
use crate::results::{ResultsSummarizer, ResultsSummary};
use crate::session::config::{SessionConfig, TimerMode};
use crate::session::progress::AnswerFeedback;
use crate::session::state::SessionState;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// A transition requested in a state that does not allow it.
///
/// These point at a caller bug (a button that should have been disabled), not
/// at a user mistake.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransitionError {
    #[error("session belongs to quiz {expected}, not {actual}")]
    QuizMismatch { expected: QuizId, actual: QuizId },

    #[error("session already completed")]
    Completed,

    #[error("answer for question {index} is already locked")]
    AlreadyLocked { index: usize },

    #[error("question {index} has no locked answer")]
    NotLocked { index: usize },

    #[error("option {option} is out of range for question {index} ({count} options)")]
    OptionOutOfRange {
        index: usize,
        option: usize,
        count: usize,
    },

    #[error("answer for question {question} arrived after moving on to question {current}")]
    StaleQuestion { question: usize, current: usize },

    #[error("session is not completed yet")]
    NotCompleted,
}

//
// ─── INTENTS ───────────────────────────────────────────────────────────────────
//

/// User-driven requests forwarded by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionIntent {
    /// Pick an option on whatever question is current.
    Select(usize),
    /// Pick an option on the question the user was looking at. Dropped if the
    /// session has moved on since, e.g. because that question timed out.
    Answer { question: usize, option: usize },
    Next,
    Restart,
}

/// What a scheduler tick did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing is running (self-paced, completed, or countdown frozen on a lock).
    Idle,
    /// A clock moved forward.
    Elapsed,
    /// The countdown ran out and "no answer" was committed.
    TimedOut,
    /// The post-answer delay ran out and the locked answer was committed.
    AutoAdvanced,
}

impl TickOutcome {
    /// True when the tick committed an answer.
    #[must_use]
    pub fn committed(self) -> bool {
        matches!(self, TickOutcome::TimedOut | TickOutcome::AutoAdvanced)
    }
}

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

/// The quiz session state machine.
///
/// Every transition takes the current `SessionState` by reference and returns
/// a new one. The plain variants (`select_answer`, `advance`, `timeout`) are
/// total and hand back an unchanged copy when a precondition fails; the
/// `try_` variants report the violated precondition instead.
#[derive(Debug, Clone, Default)]
pub struct SessionEngine {
    config: SessionConfig,
}

impl SessionEngine {
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn start(&self, quiz: &Quiz) -> SessionState {
        SessionState::initial(quiz)
    }

    /// Discards all progress. Always succeeds.
    #[must_use]
    pub fn restart(&self, quiz: &Quiz) -> SessionState {
        SessionState::initial(quiz)
    }

    /// Locks `option` as the answer to the current question.
    ///
    /// Returns `state` unchanged if the question is already locked or the
    /// session is over; a locked answer can never be replaced.
    #[must_use]
    pub fn select_answer(&self, quiz: &Quiz, state: &SessionState, option: usize) -> SessionState {
        self.try_select_answer(quiz, state, option)
            .unwrap_or_else(|_| state.clone())
    }

    /// # Errors
    ///
    /// Returns `TransitionError::Completed`, `TransitionError::AlreadyLocked`,
    /// `TransitionError::OptionOutOfRange` or `TransitionError::QuizMismatch`.
    pub fn try_select_answer(
        &self,
        quiz: &Quiz,
        state: &SessionState,
        option: usize,
    ) -> Result<SessionState, TransitionError> {
        ensure_same_quiz(quiz, state)?;
        if state.completed {
            return Err(TransitionError::Completed);
        }
        if state.locked {
            return Err(TransitionError::AlreadyLocked {
                index: state.current_index,
            });
        }
        let count = current_question(quiz, state)?.option_count();
        if option >= count {
            return Err(TransitionError::OptionOutOfRange {
                index: state.current_index,
                option,
                count,
            });
        }

        let mut next = state.clone();
        next.selected = Some(option);
        next.locked = true;
        next.since_lock = Duration::ZERO;
        Ok(next)
    }

    /// Like `select_answer`, but only for the question at `question`.
    ///
    /// A click that was made on a question the session has already left
    /// (typically one that just timed out) returns `state` unchanged.
    #[must_use]
    pub fn select_answer_for(
        &self,
        quiz: &Quiz,
        state: &SessionState,
        question: usize,
        option: usize,
    ) -> SessionState {
        self.try_select_answer_for(quiz, state, question, option)
            .unwrap_or_else(|_| state.clone())
    }

    /// # Errors
    ///
    /// Returns `TransitionError::StaleQuestion` if `question` is no longer the
    /// current question, otherwise as `try_select_answer`.
    pub fn try_select_answer_for(
        &self,
        quiz: &Quiz,
        state: &SessionState,
        question: usize,
        option: usize,
    ) -> Result<SessionState, TransitionError> {
        ensure_same_quiz(quiz, state)?;
        if question != state.current_index {
            return Err(TransitionError::StaleQuestion {
                question,
                current: state.current_index,
            });
        }
        self.try_select_answer(quiz, state, option)
    }

    /// Commits the locked answer and moves on, or completes the session on
    /// the last question. No-op when nothing is locked or already completed.
    #[must_use]
    pub fn advance(&self, quiz: &Quiz, state: &SessionState) -> SessionState {
        self.try_advance(quiz, state)
            .unwrap_or_else(|_| state.clone())
    }

    /// # Errors
    ///
    /// Returns `TransitionError::Completed`, `TransitionError::NotLocked` or
    /// `TransitionError::QuizMismatch`.
    pub fn try_advance(
        &self,
        quiz: &Quiz,
        state: &SessionState,
    ) -> Result<SessionState, TransitionError> {
        ensure_same_quiz(quiz, state)?;
        if state.completed {
            return Err(TransitionError::Completed);
        }
        if !state.locked {
            return Err(TransitionError::NotLocked {
                index: state.current_index,
            });
        }
        Ok(self.commit(quiz, state.clone(), state.selected))
    }

    /// Commits "no answer" for the current question and advances.
    ///
    /// A timeout racing a user answer loses: if the question is already
    /// locked (or the session is over) the state comes back unchanged.
    #[must_use]
    pub fn timeout(&self, quiz: &Quiz, state: &SessionState) -> SessionState {
        if ensure_same_quiz(quiz, state).is_err() || state.completed || state.locked {
            return state.clone();
        }
        let mut next = state.clone();
        next.selected = None;
        next.locked = true;
        self.commit(quiz, next, None)
    }

    /// Applies a user intent.
    ///
    /// # Errors
    ///
    /// Propagates the `TransitionError` of the underlying transition.
    pub fn apply(
        &self,
        quiz: &Quiz,
        state: &SessionState,
        intent: SessionIntent,
    ) -> Result<SessionState, TransitionError> {
        match intent {
            SessionIntent::Select(option) => self.try_select_answer(quiz, state, option),
            SessionIntent::Answer { question, option } => {
                self.try_select_answer_for(quiz, state, question, option)
            }
            SessionIntent::Next => self.try_advance(quiz, state),
            SessionIntent::Restart => Ok(self.restart(quiz)),
        }
    }

    /// Feeds one scheduler tick of `tick_interval` into the session.
    #[must_use]
    pub fn tick(&self, quiz: &Quiz, state: &SessionState) -> (SessionState, TickOutcome) {
        if state.completed || ensure_same_quiz(quiz, state).is_err() {
            return (state.clone(), TickOutcome::Idle);
        }

        let step = self.config.tick_interval();
        let mut next = state.clone();
        let mut outcome = TickOutcome::Idle;

        match self.config.timer() {
            TimerMode::None => {}
            TimerMode::SessionClock => {
                next.elapsed = next.elapsed.saturating_add(step);
                outcome = TickOutcome::Elapsed;
            }
            // The countdown freezes once the question is locked.
            TimerMode::PerQuestionCountdown { budget } if !next.locked => {
                next.elapsed = next.elapsed.saturating_add(step);
                if next.elapsed >= budget {
                    return (self.timeout(quiz, &next), TickOutcome::TimedOut);
                }
                outcome = TickOutcome::Elapsed;
            }
            TimerMode::PerQuestionCountdown { .. } => {}
        }

        if next.locked {
            if let Some(delay) = self.config.auto_advance_after() {
                next.since_lock = next.since_lock.saturating_add(step);
                if next.since_lock >= delay {
                    let choice = next.selected;
                    return (self.commit(quiz, next, choice), TickOutcome::AutoAdvanced);
                }
                outcome = TickOutcome::Elapsed;
            }
        }

        (next, outcome)
    }

    /// Remaining countdown for the current question, if a countdown is configured.
    #[must_use]
    pub fn time_left(&self, state: &SessionState) -> Option<Duration> {
        self.config
            .timer()
            .countdown_budget()
            .map(|budget| budget.saturating_sub(state.elapsed))
    }

    /// Correct/incorrect feedback for the locked current question.
    #[must_use]
    pub fn feedback(&self, quiz: &Quiz, state: &SessionState) -> Option<AnswerFeedback> {
        if !state.locked || ensure_same_quiz(quiz, state).is_err() {
            return None;
        }
        let question = quiz.question(state.current_index)?;
        Some(AnswerFeedback {
            selected: state.selected,
            correct_answer: question.correct_answer(),
            is_correct: question.is_correct(state.selected),
            explanation: question.explanation().map(str::to_owned),
        })
    }

    /// # Errors
    ///
    /// Returns `TransitionError::NotCompleted` for a session still in progress.
    pub fn summarize(
        &self,
        quiz: &Quiz,
        state: &SessionState,
    ) -> Result<ResultsSummary, TransitionError> {
        ResultsSummarizer::new(self.config.rating_bands().clone()).summarize(quiz, state)
    }

    fn commit(&self, quiz: &Quiz, mut next: SessionState, choice: Option<usize>) -> SessionState {
        let index = next.current_index;
        if let Some(slot) = next.answers.get_mut(index) {
            *slot = choice;
        }
        if quiz.question(index).is_some_and(|q| q.is_correct(choice)) {
            next.score += 1;
        }
        next.since_lock = Duration::ZERO;

        if next.is_last_question() {
            next.completed = true;
            return next;
        }

        next.current_index += 1;
        next.selected = None;
        next.locked = false;
        if self.config.timer().countdown_budget().is_some() {
            next.elapsed = Duration::ZERO;
        }
        next
    }
}

pub(crate) fn ensure_same_quiz(quiz: &Quiz, state: &SessionState) -> Result<(), TransitionError> {
    if quiz.id() != state.quiz_id() || quiz.question_count() != state.question_count() {
        return Err(TransitionError::QuizMismatch {
            expected: state.quiz_id().clone(),
            actual: quiz.id().clone(),
        });
    }
    Ok(())
}

fn current_question<'q>(
    quiz: &'q Quiz,
    state: &SessionState,
) -> Result<&'q Question, TransitionError> {
    quiz.question(state.current_index)
        .ok_or_else(|| TransitionError::QuizMismatch {
            expected: state.quiz_id().clone(),
            actual: quiz.id().clone(),
        })
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
