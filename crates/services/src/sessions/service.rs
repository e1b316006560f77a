use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use quiz_core::model::{Question, Quiz, SessionId};
use quiz_core::{
    AnswerFeedback, Clock, RunningScore, SessionConfig, SessionEngine, SessionIntent,
    SessionProgress, SessionState, TickOutcome, TransitionError,
};

use super::report::SessionReport;
use super::ticker::{ManualTicker, Ticker};
use crate::error::SessionError;

/// One live attempt at a quiz.
///
/// Owns the current `SessionState` and the ticker feeding its timers. All
/// transitions go through the pure `SessionEngine`; this type only swaps the
/// state in, stamps start/completion times and keeps the ticker in step with
/// the session (running while ticks matter, stopped once completed or dropped).
pub struct QuizSession<T: Ticker> {
    id: SessionId,
    quiz: Arc<Quiz>,
    engine: SessionEngine,
    state: SessionState,
    ticker: T,
    clock: Clock,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl<T: Ticker> QuizSession<T> {
    /// Start a fresh session. The ticker is started if the configured timer needs it.
    ///
    /// `clock` only stamps wall-clock times; session timing is tick-driven.
    #[must_use]
    pub fn start(quiz: Arc<Quiz>, config: SessionConfig, ticker: T, clock: Clock) -> Self {
        let engine = SessionEngine::new(config);
        let state = engine.start(&quiz);
        let mut session = Self {
            id: SessionId::random(),
            quiz,
            engine,
            state,
            ticker,
            clock,
            started_at: clock.now(),
            completed_at: None,
        };
        session.start_ticker();
        log::info!(
            "session {} started: quiz {} ({} questions, timer {:?})",
            session.id,
            session.quiz.id(),
            session.quiz.question_count(),
            session.engine.config().timer()
        );
        session
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        self.engine.config()
    }

    #[must_use]
    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state.is_completed()
    }

    /// The question currently shown; the last one once completed.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.quiz.question(self.state.current_index())
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        self.state.progress()
    }

    #[must_use]
    pub fn running_score(&self) -> RunningScore {
        self.state.running_score()
    }

    #[must_use]
    pub fn feedback(&self) -> Option<AnswerFeedback> {
        self.engine.feedback(&self.quiz, &self.state)
    }

    #[must_use]
    pub fn time_left(&self) -> Option<Duration> {
        self.engine.time_left(&self.state)
    }

    /// Lock an answer for the current question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Transition` if the question is already locked,
    /// the option does not exist or the session is completed.
    pub fn select_answer(&mut self, option: usize) -> Result<&SessionState, SessionError> {
        self.apply(SessionIntent::Select(option))
    }

    /// Commit the locked answer and move on (or complete).
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Transition` if no answer is locked or the session
    /// is completed.
    pub fn next(&mut self) -> Result<&SessionState, SessionError> {
        self.apply(SessionIntent::Next)
    }

    /// Discard all progress and start over on the same quiz.
    pub fn restart(&mut self) -> &SessionState {
        self.state = self.engine.restart(&self.quiz);
        self.started_at = self.clock.now();
        self.completed_at = None;
        self.ticker.stop();
        self.start_ticker();
        log::info!("session {} restarted", self.id);
        &self.state
    }

    /// Route a user intent to the matching transition.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Transition` when the intent is not allowed in the
    /// current state. The state is left untouched in that case. An answer for a
    /// question the timer already moved past is a race, not an error: it is
    /// dropped and the unchanged state is returned.
    ///
    /// Rejections never panic, in debug builds either. The typed error is the
    /// only signal: callers that treat a rejected intent as a bug should abort
    /// on it, everyone else can show it and carry on.
    pub fn apply(&mut self, intent: SessionIntent) -> Result<&SessionState, SessionError> {
        if intent == SessionIntent::Restart {
            return Ok(self.restart());
        }
        match self.engine.apply(&self.quiz, &self.state, intent) {
            Ok(next) => {
                self.replace_state(next);
                Ok(&self.state)
            }
            Err(err @ TransitionError::StaleQuestion { .. }) => {
                log::debug!("session {}: dropping {intent:?}: {err}", self.id);
                Ok(&self.state)
            }
            Err(err) => {
                log::warn!("session {}: rejected {intent:?}: {err}", self.id);
                Err(err.into())
            }
        }
    }

    /// Feed one ticker period into the session timers.
    ///
    /// Ticks that arrive while the ticker is stopped are dropped.
    pub fn on_tick(&mut self) -> TickOutcome {
        if !self.ticker.is_running() {
            log::debug!("session {}: dropping tick from stopped ticker", self.id);
            return TickOutcome::Idle;
        }
        let index = self.state.current_index();
        let (next, outcome) = self.engine.tick(&self.quiz, &self.state);
        match outcome {
            TickOutcome::TimedOut => {
                log::info!("session {}: question {} timed out", self.id, index + 1);
            }
            TickOutcome::AutoAdvanced => {
                log::debug!("session {}: auto-advanced past question {}", self.id, index + 1);
            }
            TickOutcome::Idle | TickOutcome::Elapsed => {}
        }
        self.replace_state(next);
        outcome
    }

    /// Stop the timers without completing, e.g. when the user leaves the quiz.
    pub fn abandon(&mut self) {
        if !self.is_complete() {
            log::info!(
                "session {} abandoned at question {}",
                self.id,
                self.state.current_index() + 1
            );
        }
        self.ticker.stop();
    }

    /// Final report of a completed session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Transition(NotCompleted)` while the session is running.
    pub fn report(&self) -> Result<SessionReport, SessionError> {
        let summary = self.engine.summarize(&self.quiz, &self.state)?;
        let completed_at = self.completed_at.ok_or(TransitionError::NotCompleted)?;
        Ok(SessionReport {
            session_id: self.id,
            summary,
            started_at: self.started_at,
            completed_at,
        })
    }

    fn start_ticker(&mut self) {
        if self.engine.config().needs_ticks() && !self.ticker.is_running() {
            self.ticker.start(self.engine.config().tick_interval());
        }
    }

    fn replace_state(&mut self, next: SessionState) {
        let finished = next.is_completed() && !self.state.is_completed();
        self.state = next;
        if finished {
            self.ticker.stop();
            self.completed_at = Some(self.clock.now());
            log::info!(
                "session {} completed: {}/{}",
                self.id,
                self.state.score(),
                self.quiz.question_count()
            );
        }
    }
}

impl QuizSession<ManualTicker> {
    /// Move virtual time forward and deliver every tick that fell due.
    ///
    /// Ticks after the one that completes the session are discarded.
    pub fn advance_time(&mut self, by: Duration) -> Vec<TickOutcome> {
        let due = self.ticker.advance(by);
        let mut outcomes = Vec::new();
        for _ in 0..due {
            if !self.ticker.is_running() {
                break;
            }
            outcomes.push(self.on_tick());
        }
        outcomes
    }
}

impl<T: Ticker> Drop for QuizSession<T> {
    fn drop(&mut self) {
        self.ticker.stop();
    }
}

impl<T: Ticker> fmt::Debug for QuizSession<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("id", &self.id)
            .field("quiz_id", self.quiz.id())
            .field("current_index", &self.state.current_index())
            .field("score", &self.state.score())
            .field("completed", &self.state.is_completed())
            .field("ticking", &self.ticker.is_running())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use quiz_core::Rating;
    use quiz_core::model::{CategoryId, Difficulty, QuestionId, QuizId};
    use quiz_core::time::fixed_clock;

    fn build_quiz(count: usize) -> Arc<Quiz> {
        let questions = (0..count)
            .map(|i| {
                Question::new(
                    QuestionId::new(format!("q{i}")),
                    format!("Question {i}"),
                    vec!["a".into(), "b".into(), "c".into()],
                    1,
                    Some("because b".into()),
                )
                .unwrap()
            })
            .collect();
        Arc::new(
            Quiz::new(
                QuizId::new("unit"),
                "Unit",
                "",
                CategoryId::new("tests"),
                questions,
                Difficulty::Easy,
            )
            .unwrap(),
        )
    }

    fn self_paced(count: usize) -> QuizSession<ManualTicker> {
        QuizSession::start(
            build_quiz(count),
            SessionConfig::self_paced(),
            ManualTicker::new(),
            fixed_clock(),
        )
    }

    #[test]
    fn self_paced_session_never_starts_the_ticker() {
        let session = self_paced(2);
        assert!(!session.ticker().is_running());
        assert_eq!(session.time_left(), None);
    }

    #[test]
    fn answering_shows_feedback_until_next() {
        let mut session = self_paced(2);
        session.select_answer(0).unwrap();

        let feedback = session.feedback().unwrap();
        assert!(!feedback.is_correct);
        assert_eq!(feedback.correct_answer, 1);
        assert_eq!(feedback.explanation.as_deref(), Some("because b"));

        session.next().unwrap();
        assert!(session.feedback().is_none());
        assert_eq!(session.progress().position, 2);
    }

    #[test]
    fn rejected_intent_keeps_state() {
        let mut session = self_paced(2);
        let before = session.state().clone();
        let err = session.next().unwrap_err();
        assert!(matches!(
            err,
            SessionError::Transition(TransitionError::NotLocked { index: 0 })
        ));
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn completion_stamps_time_and_builds_report() {
        let mut clock = fixed_clock();
        let started = clock.now();
        clock.advance(TimeDelta::seconds(42));

        let mut session = QuizSession::start(
            build_quiz(1),
            SessionConfig::self_paced(),
            ManualTicker::new(),
            Clock::fixed(started),
        );
        assert!(session.report().is_err());

        session.clock = clock;
        session.select_answer(1).unwrap();
        session.next().unwrap();

        let report = session.report().unwrap();
        assert_eq!(report.summary.rating, Rating::Perfect);
        assert_eq!(report.started_at, started);
        assert_eq!(report.wall_time(), TimeDelta::seconds(42));
        assert_eq!(session.completed_at(), Some(clock.now()));
    }

    #[test]
    fn countdown_times_out_and_stops_on_completion() {
        let mut session = QuizSession::start(
            build_quiz(2),
            SessionConfig::countdown(Duration::from_secs(3)).unwrap(),
            ManualTicker::new(),
            fixed_clock(),
        );
        assert!(session.ticker().is_running());

        let outcomes = session.advance_time(Duration::from_secs(3));
        assert_eq!(outcomes.last(), Some(&TickOutcome::TimedOut));
        assert_eq!(session.state().current_index(), 1);
        assert_eq!(session.time_left(), Some(Duration::from_secs(3)));

        // Ten seconds worth of ticks, but the session ends after three.
        let outcomes = session.advance_time(Duration::from_secs(10));
        assert_eq!(outcomes.len(), 3);
        assert!(session.is_complete());
        assert!(!session.ticker().is_running());
        assert_eq!(session.report().unwrap().summary.score, 0);
    }

    #[test]
    fn late_answer_after_timeout_is_dropped() {
        let mut session = QuizSession::start(
            build_quiz(2),
            SessionConfig::countdown(Duration::from_secs(2)).unwrap(),
            ManualTicker::new(),
            fixed_clock(),
        );
        session.advance_time(Duration::from_secs(2));
        assert_eq!(session.state().current_index(), 1);

        let state = session
            .apply(SessionIntent::Answer { question: 0, option: 1 })
            .unwrap()
            .clone();
        assert!(!state.is_locked());
        assert_eq!(state.answer(0), None);
    }

    #[test]
    fn locked_countdown_freezes_until_next() {
        let mut session = QuizSession::start(
            build_quiz(2),
            SessionConfig::countdown(Duration::from_secs(5)).unwrap(),
            ManualTicker::new(),
            fixed_clock(),
        );
        session.advance_time(Duration::from_secs(2));
        session.select_answer(1).unwrap();

        let outcomes = session.advance_time(Duration::from_secs(20));
        assert!(outcomes.iter().all(|o| *o == TickOutcome::Idle));
        assert_eq!(session.time_left(), Some(Duration::from_secs(3)));
        assert_eq!(session.state().current_index(), 0);
    }

    #[test]
    fn auto_advance_commits_locked_answer() {
        let config = SessionConfig::self_paced()
            .with_auto_advance(Duration::from_secs(2))
            .unwrap();
        let mut session =
            QuizSession::start(build_quiz(2), config, ManualTicker::new(), fixed_clock());
        session.select_answer(1).unwrap();

        let outcomes = session.advance_time(Duration::from_secs(2));
        assert_eq!(outcomes.last(), Some(&TickOutcome::AutoAdvanced));
        assert_eq!(session.running_score().correct, 1);
        assert_eq!(session.state().current_index(), 1);
    }

    #[test]
    fn restart_after_completion_restarts_the_ticker() {
        let mut session = QuizSession::start(
            build_quiz(1),
            SessionConfig::session_clock(),
            ManualTicker::new(),
            fixed_clock(),
        );
        session.advance_time(Duration::from_secs(4));
        session.select_answer(1).unwrap();
        session.next().unwrap();
        assert!(!session.ticker().is_running());

        session.apply(SessionIntent::Restart).unwrap();
        assert!(session.ticker().is_running());
        assert_eq!(session.ticker().starts(), 2);
        assert_eq!(session.state().elapsed(), Duration::ZERO);
        assert!(session.completed_at().is_none());
    }

    #[test]
    fn abandon_stops_ticks() {
        let mut session = QuizSession::start(
            build_quiz(2),
            SessionConfig::session_clock(),
            ManualTicker::new(),
            fixed_clock(),
        );
        session.abandon();
        assert_eq!(session.on_tick(), TickOutcome::Idle);
        assert!(session.advance_time(Duration::from_secs(5)).is_empty());
        assert_eq!(session.state().elapsed(), Duration::ZERO);
    }
}
