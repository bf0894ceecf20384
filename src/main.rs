use anyhow::{Context, Result};
use novabites::api::{HttpBackend, PosBackend};
use novabites::config::Config;
use novabites::logger::Logger;
use novabites::session::Session;
use novabites::ui::{self, core::UiContext};
use std::path::PathBuf;
use std::sync::Arc;

const USAGE: &str = "Usage: novabites [--config <file>] [--init-config [file]]";

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let mut config_path: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--init-config" => {
                let path = match args.next() {
                    Some(path) => PathBuf::from(path),
                    None => Config::get_default_config_path()?,
                };
                return Config::generate_default_config(path);
            }
            "--config" => {
                let path = args.next().context("--config needs a file path")?;
                config_path = Some(PathBuf::from(path));
            }
            "-h" | "--help" => {
                println!("{}", USAGE);
                return Ok(());
            }
            other => {
                eprintln!("Unknown argument '{}'\n{}", other, USAGE);
                std::process::exit(2);
            }
        }
    }

    let config = match config_path {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };

    let logger = Logger::from_config(&config.logging)?;
    logger.install()?;
    log::info!("Starting NovaBites {}", env!("CARGO_PKG_VERSION"));

    let backend = HttpBackend::from_config(&config.api).context("Failed to create the API client")?;
    let backend: Arc<dyn PosBackend> = Arc::new(backend);

    let mut session = Session::new(config.session.token_path());
    if let Some(user) = session.restore() {
        log::info!("Restored session for {}", user.username);
        backend.set_token(session.token().map(str::to_string));
    }

    // Run the TUI application
    ui::run_app(backend, session, UiContext::from_config(&config), logger).await?;

    Ok(())
}
