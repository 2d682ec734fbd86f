use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use quiz_bank::{
    draw, handle_key, load_bank, logger, App, Config, KeyValueStore, MemoryStore, QuizController,
    SqliteStore,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::process::ExitCode;

fn open_store(config: &Config) -> Box<dyn KeyValueStore> {
    match SqliteStore::open(&config.db_path()) {
        Ok(store) => Box::new(store),
        Err(e) => {
            logger::warn(&format!(
                "could not open {}: {}; progress will not be saved",
                config.db_path().display(),
                e
            ));
            Box::new(MemoryStore::new())
        }
    }
}

fn main() -> ExitCode {
    let config = Config::from_env();
    logger::init(&config.log_path());
    logger::info(&format!("starting with bank {}", config.bank_path.display()));

    let bank = match load_bank(&config.bank_path) {
        Ok(bank) => bank,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!(
                "Pass the question bank path as the first argument or set QUIZ_BANK_PATH."
            );
            return ExitCode::FAILURE;
        }
    };

    let controller = QuizController::new(bank, open_store(&config));
    let mut app = App::new(controller);

    match run(&mut app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::error(&format!("terminal error: {}", e));
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run<S: KeyValueStore>(app: &mut App<S>) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop<S: KeyValueStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S>,
) -> io::Result<()> {
    while !app.should_quit {
        terminal.draw(|f| draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            handle_key(app, key);
        }
    }
    logger::info("exiting");
    Ok(())
}
