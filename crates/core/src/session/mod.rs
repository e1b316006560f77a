mod config;
mod engine;
mod progress;
mod state;

pub use config::{DEFAULT_COUNTDOWN_BUDGET, DEFAULT_TICK_INTERVAL, SessionConfig, SessionConfigError, TimerMode};
pub use engine::{SessionEngine, SessionIntent, TickOutcome, TransitionError};
pub(crate) use engine::ensure_same_quiz;
pub use progress::{AnswerFeedback, RunningScore, SessionProgress};
pub use state::SessionState;
