//! Binary entry point: resolve the data directory, start file logging, open
//! the database once for the whole session, and drive the Ratatui loop until
//! the user quits.
use fitness_tracker::logging::init_logging;
use fitness_tracker::{open_database, run_app, App, AppConfig, Dispatcher};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::resolve()?;
    init_logging(&config.log_path)?;
    info!(data_dir = %config.data_dir.display(), "starting fitness tracker");

    let conn = open_database(&config.db_path)?;
    let dispatcher = Dispatcher::new(conn, config.export_dir.clone());

    let mut app = App::new(dispatcher);
    run_app(&mut app)
}
