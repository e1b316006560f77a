use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use quiz_core::ResultsSummary;
use quiz_core::model::SessionId;

/// Results of a finished session plus the wall-clock stamps around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub session_id: SessionId,
    pub summary: ResultsSummary,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl SessionReport {
    /// Time on the engine clock. Covers the whole session for a session clock
    /// and only the last question for a per-question countdown.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.summary.elapsed
    }

    /// Wall-clock time between start and completion. Never negative.
    #[must_use]
    pub fn wall_time(&self) -> TimeDelta {
        (self.completed_at - self.started_at).max(TimeDelta::zero())
    }
}
