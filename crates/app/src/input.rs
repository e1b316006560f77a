use std::io::BufRead;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use quiz_core::SessionIntent;
use tokio::sync::mpsc;

/// What one line typed during play asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Zero-based option on the question currently on screen.
    Pick(usize),
    Intent(SessionIntent),
    Quit,
    Unknown,
}

/// Options are numbered from 1 on screen.
pub fn parse_line(line: &str) -> Input {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "" | "n" | "next" => Input::Intent(SessionIntent::Next),
        "r" | "restart" => Input::Intent(SessionIntent::Restart),
        "q" | "quit" | "exit" => Input::Quit,
        other => match other.parse::<usize>() {
            Ok(n) if n > 0 => Input::Pick(n - 1),
            _ => Input::Unknown,
        },
    }
}

/// Read stdin on a dedicated thread and forward intents.
///
/// Picks are stamped with `on_screen`, the index of the question the renderer
/// last showed, so an answer typed while that question timed out is dropped.
/// The channel closes on `q`, end of input, or once the receiver is gone.
pub fn spawn_stdin_reader(
    tx: mpsc::Sender<SessionIntent>,
    on_screen: Arc<AtomicUsize>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            let intent = match parse_line(&line) {
                Input::Pick(option) => SessionIntent::Answer {
                    question: on_screen.load(Ordering::Acquire),
                    option,
                },
                Input::Intent(intent) => intent,
                Input::Quit => break,
                Input::Unknown => {
                    eprintln!("type an option number, enter, r or q");
                    continue;
                }
            };
            if tx.blocking_send(intent).is_err() {
                break;
            }
        }
    })
}
