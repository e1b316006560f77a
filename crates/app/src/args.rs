use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use quiz_core::model::{CategoryId, QuizId};
use quiz_core::session::DEFAULT_COUNTDOWN_BUDGET;
use quiz_core::{SessionConfig, SessionConfigError};

#[derive(Debug, PartialEq, Eq)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    MissingTarget { command: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidNumber { flag: &'static str, raw: String },
    InvalidTimer { raw: String },
    InvalidId { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingTarget { command } => write!(f, "{command} requires an id"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::InvalidTimer { raw } => {
                write!(f, "invalid --timer value: {raw} (expected off, clock or countdown)")
            }
            ArgsError::InvalidId { raw } => write!(f, "invalid id: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- categories        [options]");
    eprintln!("  cargo run -p app -- quizzes <category> [options]");
    eprintln!("  cargo run -p app -- play <quiz>        [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --catalog <path>           JSON catalog (default: built-in)");
    eprintln!("  --timer <off|clock|countdown>");
    eprintln!("  --countdown-secs <n>       per-question budget (default 30)");
    eprintln!("  --auto-advance-secs <n>    move on n seconds after answering");
    eprintln!("  -v, --verbose              more logging (repeat for trace)");
    eprintln!("  -q, --quiet                errors only");
    eprintln!();
    eprintln!("While playing: a number picks an option, enter moves on,");
    eprintln!("`r` restarts and `q` quits.");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_CATALOG, QUIZ_TIMER, QUIZ_COUNTDOWN_SECS, QUIZ_AUTO_ADVANCE_SECS, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Categories,
    Quizzes(CategoryId),
    Play(QuizId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerChoice {
    Off,
    Clock,
    Countdown,
}

impl TimerChoice {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "off" | "none" => Some(Self::Off),
            "clock" => Some(Self::Clock),
            "countdown" => Some(Self::Countdown),
            _ => None,
        }
    }
}

/// Settings shared by every command. Env vars seed them, flags override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub catalog: Option<PathBuf>,
    pub timer: TimerChoice,
    pub countdown: Duration,
    pub auto_advance: Option<Duration>,
    pub verbose: u8,
    pub quiet: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog: None,
            timer: TimerChoice::Off,
            countdown: DEFAULT_COUNTDOWN_BUDGET,
            auto_advance: None,
            verbose: 0,
            quiet: false,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unparseable env values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            catalog: lookup("QUIZ_CATALOG")
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from),
            timer: lookup("QUIZ_TIMER")
                .and_then(|value| TimerChoice::parse(&value))
                .unwrap_or(defaults.timer),
            countdown: lookup("QUIZ_COUNTDOWN_SECS")
                .and_then(|value| value.trim().parse().ok())
                .map_or(defaults.countdown, Duration::from_secs),
            auto_advance: lookup("QUIZ_AUTO_ADVANCE_SECS")
                .and_then(|value| value.trim().parse().ok())
                .map(Duration::from_secs),
            ..defaults
        }
    }

    /// # Errors
    ///
    /// Returns `SessionConfigError` for a zero countdown or auto-advance delay.
    pub fn session_config(&self) -> Result<SessionConfig, SessionConfigError> {
        let config = match self.timer {
            TimerChoice::Off => SessionConfig::self_paced(),
            TimerChoice::Clock => SessionConfig::session_clock(),
            TimerChoice::Countdown => SessionConfig::countdown(self.countdown)?,
        };
        match self.auto_advance {
            Some(delay) => config.with_auto_advance(delay),
            None => Ok(config),
        }
    }
}

#[derive(Debug)]
pub struct Args {
    pub command: Command,
    pub settings: Settings,
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_secs(args: &mut impl Iterator<Item = String>, flag: &'static str) -> Result<Duration, ArgsError> {
    let value = require_value(args, flag)?;
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| ArgsError::InvalidNumber { flag, raw: value })
}

fn parse_target<T: std::str::FromStr>(
    args: &mut impl Iterator<Item = String>,
    command: &'static str,
) -> Result<T, ArgsError> {
    let raw = args.next().ok_or(ArgsError::MissingTarget { command })?;
    if raw.starts_with('-') {
        return Err(ArgsError::MissingTarget { command });
    }
    raw.parse().map_err(|_| ArgsError::InvalidId { raw })
}

impl Args {
    /// Parse `argv` (without the program name) on top of `settings`.
    ///
    /// Returns `Ok(None)` when help was requested.
    pub fn parse(
        argv: impl IntoIterator<Item = String>,
        mut settings: Settings,
    ) -> Result<Option<Self>, ArgsError> {
        let mut args = argv.into_iter().peekable();

        let command = match args.peek().map(String::as_str) {
            None => Command::Categories,
            Some(first) if first.starts_with('-') => Command::Categories,
            Some(_) => {
                let first = args.next().unwrap_or_default();
                match first.as_str() {
                    "categories" => Command::Categories,
                    "quizzes" => Command::Quizzes(parse_target(&mut args, "quizzes")?),
                    "play" => Command::Play(parse_target(&mut args, "play")?),
                    "help" => return Ok(None),
                    _ => return Err(ArgsError::UnknownCommand(first)),
                }
            }
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--catalog" => {
                    settings.catalog = Some(PathBuf::from(require_value(&mut args, "--catalog")?));
                }
                "--timer" => {
                    let value = require_value(&mut args, "--timer")?;
                    settings.timer =
                        TimerChoice::parse(&value).ok_or(ArgsError::InvalidTimer { raw: value })?;
                }
                "--countdown-secs" => {
                    settings.countdown = parse_secs(&mut args, "--countdown-secs")?;
                    // A budget on its own implies the countdown.
                    settings.timer = TimerChoice::Countdown;
                }
                "--auto-advance-secs" => {
                    settings.auto_advance = Some(parse_secs(&mut args, "--auto-advance-secs")?);
                }
                "-v" | "--verbose" => settings.verbose = settings.verbose.saturating_add(1),
                "-vv" => settings.verbose = settings.verbose.saturating_add(2),
                "-q" | "--quiet" => settings.quiet = true,
                "--help" | "-h" => return Ok(None),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Some(Self { command, settings }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::TimerMode;

    fn parse(argv: &[&str]) -> Result<Option<Args>, ArgsError> {
        Args::parse(argv.iter().map(|s| (*s).to_owned()), Settings::default())
    }

    #[test]
    fn no_arguments_lists_categories() {
        let args = parse(&[]).unwrap().unwrap();
        assert_eq!(args.command, Command::Categories);
        assert_eq!(args.settings, Settings::default());
    }

    #[test]
    fn play_with_countdown_flags() {
        let args = parse(&["play", "world-wars", "--countdown-secs", "10", "-v"])
            .unwrap()
            .unwrap();
        assert_eq!(args.command, Command::Play(QuizId::new("world-wars")));
        assert_eq!(args.settings.verbose, 1);

        let config = args.settings.session_config().unwrap();
        assert_eq!(config.timer(), TimerMode::countdown(Duration::from_secs(10)));
    }

    #[test]
    fn missing_target_and_values_are_reported() {
        assert_eq!(
            parse(&["quizzes"]).unwrap_err(),
            ArgsError::MissingTarget { command: "quizzes" }
        );
        assert_eq!(
            parse(&["play", "--timer"]).unwrap_err(),
            ArgsError::MissingTarget { command: "play" }
        );
        assert_eq!(
            parse(&["categories", "--catalog"]).unwrap_err(),
            ArgsError::MissingValue { flag: "--catalog" }
        );
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!(
            parse(&["--timer", "hourglass"]),
            Err(ArgsError::InvalidTimer { .. })
        ));
        assert!(matches!(
            parse(&["--auto-advance-secs", "soon"]),
            Err(ArgsError::InvalidNumber { flag: "--auto-advance-secs", .. })
        ));
        assert!(matches!(parse(&["teach"]), Err(ArgsError::UnknownCommand(_))));
        assert!(matches!(parse(&["play", "  "]), Err(ArgsError::InvalidId { .. })));
    }

    #[test]
    fn help_short_circuits() {
        assert!(parse(&["help"]).unwrap().is_none());
        assert!(parse(&["play", "x", "-h"]).unwrap().is_none());
    }

    #[test]
    fn env_seeds_settings_and_flags_override() {
        let settings = Settings::from_lookup(|key| match key {
            "QUIZ_TIMER" => Some("clock".into()),
            "QUIZ_AUTO_ADVANCE_SECS" => Some("2".into()),
            "QUIZ_COUNTDOWN_SECS" => Some("not a number".into()),
            _ => None,
        });
        assert_eq!(settings.timer, TimerChoice::Clock);
        assert_eq!(settings.auto_advance, Some(Duration::from_secs(2)));
        assert_eq!(settings.countdown, DEFAULT_COUNTDOWN_BUDGET);

        let args = Args::parse(["--timer".to_owned(), "off".to_owned()], settings)
            .unwrap()
            .unwrap();
        let config = args.settings.session_config().unwrap();
        assert_eq!(config.timer(), TimerMode::None);
        assert_eq!(config.auto_advance_after(), Some(Duration::from_secs(2)));
    }

    #[test]
    fn zero_countdown_is_a_config_error() {
        let args = parse(&["--countdown-secs", "0"]).unwrap().unwrap();
        assert_eq!(
            args.settings.session_config().unwrap_err(),
            SessionConfigError::ZeroCountdownBudget
        );
    }
}
