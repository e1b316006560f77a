use std::sync::Arc;

use quiz_core::model::QuizId;
use quiz_core::{Clock, SessionConfig};
use storage::{QuizRepository, StorageError};

use super::service::QuizSession;
use super::ticker::Ticker;
use crate::error::SessionError;

/// Loads quizzes from storage and opens sessions on them with a shared config.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    config: SessionConfig,
    quizzes: Arc<dyn QuizRepository>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, quizzes: Arc<dyn QuizRepository>) -> Self {
        Self {
            clock,
            config: SessionConfig::default(),
            quizzes,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Start a session on the given quiz.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::QuizNotFound` for an unknown id, or
    /// `SessionError::Storage` on repository failures.
    pub async fn start_session<T: Ticker>(
        &self,
        quiz_id: &QuizId,
        ticker: T,
    ) -> Result<QuizSession<T>, SessionError> {
        let quiz = self.quizzes.get_quiz(quiz_id).await.map_err(|err| match err {
            StorageError::NotFound => SessionError::QuizNotFound(quiz_id.clone()),
            other => SessionError::Storage(other),
        })?;
        Ok(QuizSession::start(
            Arc::new(quiz),
            self.config.clone(),
            ticker,
            self.clock,
        ))
    }
}
