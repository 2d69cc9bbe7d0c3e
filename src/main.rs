use anyhow::Context;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use timed_quiz::{
    handle_key, logger, ui, App, Config, Dispatcher, DispatchStatus, Flow, HttpSink,
    KeyValueStore, MemoryStore, QuizController, RemoteSink, SqliteStore, UnconfiguredSink,
    QUESTIONS,
};

/// How long to wait on exit for a submission still in flight.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(3);

fn open_store(config: &Config) -> Box<dyn KeyValueStore> {
    match SqliteStore::open_in(&config.data_dir) {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::error!(error = %e, "could not open local store, results will not survive restart");
            Box::new(MemoryStore::new())
        }
    }
}

fn build_sink(config: &Config) -> anyhow::Result<Arc<dyn RemoteSink>> {
    match &config.sink_url {
        Some(url) => {
            let sink = HttpSink::new(url.clone(), config.http_timeout)
                .context("failed to build remote sink client")?;
            Ok(Arc::new(sink))
        }
        None => Ok(Arc::new(UnconfiguredSink)),
    }
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> anyhow::Result<()> {
    loop {
        let now = Instant::now();
        app.poll_dispatch();
        app.on_timer(now);

        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(app.poll_timeout(Instant::now()))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && handle_key(app, key, Instant::now()) == Flow::Quit
        {
            break;
        }
    }

    if app.dispatch_status() == DispatchStatus::Saving {
        let status = app.dispatcher.wait_for_outcome(SHUTDOWN_GRACE);
        tracing::info!(?status, "pending submission at exit");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let dotenv = Config::load_dotenv();
    let config = Config::from_env();
    std::fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("failed to create {}", config.data_dir.display()))?;
    logger::init(&config.data_dir);
    if let Err(e) = dotenv {
        tracing::warn!(error = %e, "ignoring unreadable .env file");
    }
    tracing::info!(data_dir = %config.data_dir.display(), "starting");

    let store = open_store(&config);
    let dispatcher = Dispatcher::new(build_sink(&config)?).context("failed to start dispatch worker")?;
    let controller = QuizController::new(QUESTIONS.clone());
    let mut app = App::new(config, controller, dispatcher, store);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
