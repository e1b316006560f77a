//! Logger setup for the binary.
//!
//! Level priority: `RUST_LOG` if set, then `--quiet` (errors only), then
//! `--verbose` (debug, trace when repeated), else warnings. The default is
//! quieter than info so log lines do not interleave with the quiz prompts.

use std::env;
use std::io::Write;

use env_logger::Builder;
use log::LevelFilter;

/// Initialise `env_logger` once. Log output goes to stderr.
pub fn init_logging(verbose: u8, quiet: bool) {
    let mut builder = Builder::new();
    if env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    } else {
        builder.filter_level(determine_level(verbose, quiet));
    }

    builder.format(move |buf, record| {
        let level = record.level();
        let style = buf.default_level_style(level);
        if verbose > 0 {
            writeln!(
                buf,
                "{} {style}{:<5}{style:#} [{}] {}",
                buf.timestamp_seconds(),
                level,
                record.module_path().unwrap_or("unknown"),
                record.args()
            )
        } else {
            writeln!(buf, "{style}{:<5}{style:#} {}", level, record.args())
        }
    });

    // A second init (tests, embedding) keeps the first logger.
    if builder.try_init().is_ok() {
        log::debug!("logging initialised (verbose={verbose}, quiet={quiet})");
    }
}

fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
