use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Periodic trigger behind the session timers.
///
/// A ticker only schedules; the session decides what a tick means. Stopping
/// must be idempotent and no tick may be delivered for a stopped ticker.
pub trait Ticker: Send {
    /// (Re)starts ticking every `period`. Restarting resets the phase.
    fn start(&mut self, period: Duration);
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

//
// ─── MANUAL ────────────────────────────────────────────────────────────────────
//

/// Ticker driven by hand, for tests and step-by-step frontends.
#[derive(Debug, Default)]
pub struct ManualTicker {
    period: Option<Duration>,
    carry: Duration,
    starts: u32,
}

impl ManualTicker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// How many times the ticker has been started.
    #[must_use]
    pub fn starts(&self) -> u32 {
        self.starts
    }

    /// Moves virtual time forward and returns how many ticks fell due.
    ///
    /// Always zero while stopped. Time that does not fill a whole period is
    /// carried over to the next call.
    pub fn advance(&mut self, by: Duration) -> u32 {
        let Some(period) = self.period else {
            return 0;
        };
        let mut pending = self.carry + by;
        let mut due = 0;
        while pending >= period {
            pending -= period;
            due += 1;
        }
        self.carry = pending;
        due
    }
}

impl Ticker for ManualTicker {
    fn start(&mut self, period: Duration) {
        self.period = Some(period);
        self.carry = Duration::ZERO;
        self.starts += 1;
    }

    fn stop(&mut self) {
        self.period = None;
        self.carry = Duration::ZERO;
    }

    fn is_running(&self) -> bool {
        self.period.is_some()
    }
}

//
// ─── TOKIO ─────────────────────────────────────────────────────────────────────
//

/// One delivery from a `TokioTicker`, stamped with the run that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    generation: u64,
}

/// Ticker backed by a spawned `tokio::time::interval` task.
///
/// Ticks arrive on the receiver returned by [`TokioTicker::channel`]. A tick
/// that was already queued when the ticker stopped or restarted carries an
/// old generation; check it with [`TokioTicker::is_current`].
///
/// `start` spawns onto the current runtime and panics outside of one.
#[derive(Debug)]
pub struct TokioTicker {
    tx: mpsc::Sender<Tick>,
    task: Option<JoinHandle<()>>,
    generation: u64,
}

impl TokioTicker {
    #[must_use]
    pub fn channel() -> (Self, mpsc::Receiver<Tick>) {
        let (tx, rx) = mpsc::channel(1);
        (
            Self {
                tx,
                task: None,
                generation: 0,
            },
            rx,
        )
    }

    /// True if `tick` came from the run that is active right now.
    #[must_use]
    pub fn is_current(&self, tick: Tick) -> bool {
        self.is_running() && tick.generation == self.generation
    }
}

impl Ticker for TokioTicker {
    fn start(&mut self, period: Duration) {
        self.stop();
        self.generation += 1;

        let tx = self.tx.clone();
        let tick = Tick {
            generation: self.generation,
        };
        self.task = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(tick).await.is_err() {
                    break;
                }
            }
        }));
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    fn is_running(&self) -> bool {
        self.task.is_some()
    }
}

impl Drop for TokioTicker {
    fn drop(&mut self) {
        self.stop();
    }
}
