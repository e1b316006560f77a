#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod results;
pub mod session;
pub mod time;

pub use error::Error;
pub use results::{QuestionReview, Rating, RatingBands, ResultsSummarizer, ResultsSummary};
pub use session::{
    AnswerFeedback, RunningScore, SessionConfig, SessionConfigError, SessionEngine, SessionIntent,
    SessionProgress, SessionState, TickOutcome, TimerMode, TransitionError,
};
pub use time::Clock;
