use tokio::sync::mpsc;

use quiz_core::{SessionIntent, TickOutcome};

use super::report::SessionReport;
use super::service::QuizSession;
use super::ticker::{Tick, TokioTicker};

/// Runs a session to completion, interleaving user intents with timer ticks.
///
/// `on_update` is called after every accepted intent and every tick that
/// changed something, so the caller can re-render. Rejected intents are
/// logged by the session and otherwise ignored.
///
/// Returns the report once the session completes, or `None` if the intent
/// channel closes first (the user walked away). The ticker is stopped either way.
pub async fn drive_session<F>(
    session: &mut QuizSession<TokioTicker>,
    ticks: &mut mpsc::Receiver<Tick>,
    intents: &mut mpsc::Receiver<SessionIntent>,
    mut on_update: F,
) -> Option<SessionReport>
where
    F: FnMut(&QuizSession<TokioTicker>),
{
    loop {
        if session.is_complete() {
            return match session.report() {
                Ok(report) => Some(report),
                Err(err) => {
                    log::warn!("session {}: no report: {err}", session.id());
                    None
                }
            };
        }

        tokio::select! {
            intent = intents.recv() => {
                let Some(intent) = intent else {
                    session.abandon();
                    return None;
                };
                if session.apply(intent).is_ok() {
                    on_update(session);
                }
            }
            Some(tick) = ticks.recv() => {
                if !session.ticker().is_current(tick) {
                    log::debug!("session {}: dropping stale tick", session.id());
                } else if session.on_tick() != TickOutcome::Idle {
                    on_update(session);
                }
            }
        }
    }
}
