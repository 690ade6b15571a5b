use anyhow::{Context, Result};
use focusdesk::config::{self, Config};
use focusdesk::desk::{self, App};
use focusdesk::desk::signal::DesktopSignal;
use focusdesk::logging;
use focusdesk::ops::store::FileStore;
use log::error;
use ratatui::crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;

fn main() -> Result<()> {
    let config = Config::load()?;
    let data_dir = config.resolve_data_dir(std::env::var(config::DATA_DIR_ENV).ok())?;

    // Logging is best effort; the app runs fine without it.
    if let Err(e) = logging::init_logging(&config.log_level, &data_dir) {
        eprintln!("focusdesk: logging disabled: {}", e);
    }

    let store = FileStore::open(&data_dir)
        .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;
    let signal = DesktopSignal::probe(config.notifications);
    let app = App::new("Focus Desk", &config, Box::new(store), Box::new(signal));

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = desk::run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("event loop failed: {}", err);
        logging::flush();
        return Err(err.into());
    }

    log::info!("focusdesk exiting");
    logging::flush();
    Ok(())
}
