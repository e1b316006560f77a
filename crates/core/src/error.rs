use thiserror::Error;

use crate::model::QuizError;
use crate::session::{SessionConfigError, TransitionError};

/// Any error raised by this crate, for callers that mix quiz data, session
/// configuration and transitions behind one `?`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Config(#[from] SessionConfigError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::model::{CategoryId, Difficulty, Question, QuestionId, Quiz, QuizId};
    use crate::session::{SessionConfig, SessionEngine};

    fn timed_first_answer(budget: Duration, option: usize) -> Result<usize, Error> {
        let question = Question::new(
            QuestionId::new("1"),
            "2 + 2?",
            vec!["3".into(), "4".into()],
            1,
            None,
        )?;
        let quiz = Quiz::new(
            QuizId::new("sums"),
            "Sums",
            "",
            CategoryId::new("math"),
            vec![question],
            Difficulty::Easy,
        )?;
        let engine = SessionEngine::new(SessionConfig::countdown(budget)?);
        let state = engine.try_select_answer(&quiz, &engine.start(&quiz), option)?;
        Ok(engine.try_advance(&quiz, &state)?.score())
    }

    #[test]
    fn each_layer_converts_into_the_umbrella_error() {
        assert_eq!(timed_first_answer(Duration::from_secs(5), 1).unwrap(), 1);
        assert!(matches!(
            timed_first_answer(Duration::ZERO, 1),
            Err(Error::Config(SessionConfigError::ZeroCountdownBudget))
        ));
        assert!(matches!(
            timed_first_answer(Duration::from_secs(5), 7),
            Err(Error::Transition(TransitionError::OptionOutOfRange { .. }))
        ));
    }
}
