use std::io;
use std::process::ExitCode;

use numguess::game::Settings;

fn init_logging() {
    env_logger::init();
}

#[cfg(feature = "gtk-ui")]
fn run(settings: Settings) -> io::Result<()> {
    numguess::ui::window::run_app(settings);
    Ok(())
}

#[cfg(not(feature = "gtk-ui"))]
fn run(settings: Settings) -> io::Result<()> {
    use numguess::game::{FileScoreStore, GameSession};
    use numguess::ui::{terminal, TerminalPresentation};
    use std::cell::RefCell;
    use std::rc::Rc;

    let store = FileScoreStore::open(settings.scores_path());
    let presentation = TerminalPresentation::new(io::stdout());
    let session = GameSession::new(presentation, store, &settings);
    terminal::run(io::stdin().lock(), Rc::new(RefCell::new(session)))
}

fn main() -> ExitCode {
    init_logging();

    let settings = Settings::from_env();
    log::info!(target: "main", "Best scores stored in {}", settings.scores_path().display());

    match run(settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!(target: "main", "Terminal I/O failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
