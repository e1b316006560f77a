use std::time::Duration;

use thiserror::Error;

use crate::results::RatingBands;

/// Interval between scheduler ticks unless configured otherwise.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Per-question allowance used by `TimerMode::countdown_default`.
pub const DEFAULT_COUNTDOWN_BUDGET: Duration = Duration::from_secs(30);

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionConfigError {
    #[error("tick interval must be > 0")]
    ZeroTickInterval,

    #[error("countdown budget must be > 0")]
    ZeroCountdownBudget,

    #[error("auto-advance delay must be > 0")]
    ZeroAutoAdvanceDelay,

    #[error(
        "rating bands must satisfy 0 < average <= good <= perfect <= 100 \
         (perfect={perfect}, good={good}, average={average})"
    )]
    InvalidRatingBands { perfect: u8, good: u8, average: u8 },
}

//
// ─── TIMER MODE ────────────────────────────────────────────────────────────────
//

/// Which clock, if any, runs while a session is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerMode {
    /// Self-paced, nothing ticks.
    #[default]
    None,
    /// One elapsed clock for the whole session. Stops at completion.
    SessionClock,
    /// Fixed allowance per question. Running out commits "no answer".
    PerQuestionCountdown { budget: Duration },
}

impl TimerMode {
    #[must_use]
    pub fn countdown(budget: Duration) -> Self {
        Self::PerQuestionCountdown { budget }
    }

    #[must_use]
    pub fn countdown_default() -> Self {
        Self::countdown(DEFAULT_COUNTDOWN_BUDGET)
    }

    #[must_use]
    pub fn countdown_budget(&self) -> Option<Duration> {
        match self {
            TimerMode::PerQuestionCountdown { budget } => Some(*budget),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !matches!(self, TimerMode::None)
    }
}

//
// ─── CONFIG ────────────────────────────────────────────────────────────────────
//

/// Knobs chosen at session start.
///
/// Defaults to a self-paced session with 1 s ticks, no auto-advance and the
/// 100/70/50 rating bands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    timer: TimerMode,
    tick_interval: Duration,
    auto_advance_after: Option<Duration>,
    rating_bands: RatingBands,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timer: TimerMode::None,
            tick_interval: DEFAULT_TICK_INTERVAL,
            auto_advance_after: None,
            rating_bands: RatingBands::default(),
        }
    }
}

impl SessionConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `SessionConfigError` for a zero tick interval, countdown budget
    /// or auto-advance delay.
    pub fn new(
        timer: TimerMode,
        tick_interval: Duration,
        auto_advance_after: Option<Duration>,
        rating_bands: RatingBands,
    ) -> Result<Self, SessionConfigError> {
        if tick_interval.is_zero() {
            return Err(SessionConfigError::ZeroTickInterval);
        }
        if timer.countdown_budget().is_some_and(|b| b.is_zero()) {
            return Err(SessionConfigError::ZeroCountdownBudget);
        }
        if auto_advance_after.is_some_and(|d| d.is_zero()) {
            return Err(SessionConfigError::ZeroAutoAdvanceDelay);
        }

        Ok(Self {
            timer,
            tick_interval,
            auto_advance_after,
            rating_bands,
        })
    }

    #[must_use]
    pub fn self_paced() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn session_clock() -> Self {
        Self {
            timer: TimerMode::SessionClock,
            ..Self::default()
        }
    }

    /// # Errors
    ///
    /// Returns `SessionConfigError::ZeroCountdownBudget` for a zero budget.
    pub fn countdown(budget: Duration) -> Result<Self, SessionConfigError> {
        Self::new(
            TimerMode::countdown(budget),
            DEFAULT_TICK_INTERVAL,
            None,
            RatingBands::default(),
        )
    }

    /// # Errors
    ///
    /// Returns `SessionConfigError::ZeroAutoAdvanceDelay` for a zero delay.
    pub fn with_auto_advance(mut self, delay: Duration) -> Result<Self, SessionConfigError> {
        if delay.is_zero() {
            return Err(SessionConfigError::ZeroAutoAdvanceDelay);
        }
        self.auto_advance_after = Some(delay);
        Ok(self)
    }

    #[must_use]
    pub fn with_rating_bands(mut self, bands: RatingBands) -> Self {
        self.rating_bands = bands;
        self
    }

    #[must_use]
    pub fn timer(&self) -> TimerMode {
        self.timer
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    #[must_use]
    pub fn auto_advance_after(&self) -> Option<Duration> {
        self.auto_advance_after
    }

    #[must_use]
    pub fn rating_bands(&self) -> &RatingBands {
        &self.rating_bands
    }

    /// True when a scheduler has to feed ticks into the session.
    #[must_use]
    pub fn needs_ticks(&self) -> bool {
        self.timer.is_enabled() || self.auto_advance_after.is_some()
    }
}
