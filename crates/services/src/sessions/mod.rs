mod driver;
mod report;
mod service;
mod ticker;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use driver::drive_session;
pub use report::SessionReport;
pub use service::QuizSession;
pub use ticker::{ManualTicker, Tick, Ticker, TokioTicker};
pub use workflow::QuizLoopService;
