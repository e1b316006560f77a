mod args;
mod input;
mod logging;
mod render;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use args::{Args, Command, Settings, print_usage};
use quiz_core::model::QuizId;
use render::Renderer;
use services::{CatalogService, Clock, QuizLoopService, QuizSession, TokioTicker, drive_session};
use storage::{Catalog, Storage};
use tokio::sync::mpsc;

fn load_storage(settings: &Settings) -> Result<Storage, Box<dyn std::error::Error>> {
    let catalog = match &settings.catalog {
        Some(path) => {
            log::info!("loading catalog from {}", path.display());
            Catalog::from_path(path)?
        }
        None => Catalog::builtin()?,
    };
    log::debug!(
        "catalog: {} categories, {} quizzes",
        catalog.categories().len(),
        catalog.quizzes().len()
    );
    Ok(Storage::from_catalog(catalog))
}

async fn play(
    storage: &Storage,
    settings: &Settings,
    quiz_id: &QuizId,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = settings.session_config()?;
    let loop_svc = QuizLoopService::new(Clock::system(), Arc::clone(&storage.quizzes))
        .with_config(config);

    let (ticker, mut ticks) = TokioTicker::channel();
    let mut session = loop_svc.start_session(quiz_id, ticker).await?;
    let title = session.quiz().title().to_owned();
    println!("{title}");
    if !session.quiz().description().is_empty() {
        println!("{}", session.quiz().description());
    }

    let mut renderer = Renderer::default();
    renderer.update(&session);

    let on_screen = Arc::new(AtomicUsize::new(session.state().current_index()));
    let (intent_tx, mut intents) = mpsc::channel(16);
    // The reader thread blocks on stdin and is left behind when play ends.
    let _reader = input::spawn_stdin_reader(intent_tx, Arc::clone(&on_screen));

    let on_update = |s: &QuizSession<TokioTicker>| {
        renderer.update(s);
        on_screen.store(s.state().current_index(), Ordering::Release);
    };
    match drive_session(&mut session, &mut ticks, &mut intents, on_update).await {
        Some(report) => render::print_report(&title, &report),
        None => println!("Quiz abandoned."),
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let Some(parsed) = Args::parse(argv, Settings::from_env()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?
    else {
        print_usage();
        return Ok(());
    };

    logging::init_logging(parsed.settings.verbose, parsed.settings.quiet);

    // Catalog problems are fatal here, before any command runs.
    let storage = load_storage(&parsed.settings)?;
    let catalog = CatalogService::from_storage(&storage);

    match &parsed.command {
        Command::Categories => {
            render::print_categories(&catalog.list_categories().await?);
        }
        Command::Quizzes(category_id) => {
            let listing = catalog.quizzes_by_category(category_id).await?;
            render::print_quizzes(&listing);
        }
        Command::Play(quiz_id) => {
            play(&storage, &parsed.settings, quiz_id).await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
