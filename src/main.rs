use std::env;

use log::info;
use multipage_app_rust::{
    config::Config, error::StartupError, loggers::file_logger::init_file_logger,
    server::start_server, state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let mut config = Config::load()?;
    if let Some(addr) = env::args().nth(1) {
        config.override_address(&addr)?;
    }

    init_file_logger(&config.log_dir, config.log_level)?;
    info!("App started!");
    config.log_summary();

    let state = AppState::new(config)?;
    start_server(state).await
}
