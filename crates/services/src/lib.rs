#![forbid(unsafe_code)]

pub mod catalog_service;
pub mod error;
pub mod sessions;

pub use quiz_core::Clock;

pub use catalog_service::{CatalogService, CategoryQuizzes, QuizListItem};
pub use error::{CatalogError, SessionError};

pub use sessions::{
    ManualTicker, QuizLoopService, QuizSession, SessionReport, Tick, Ticker, TokioTicker,
    drive_session,
};
