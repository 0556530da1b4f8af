use std::process::ExitCode;

use tracing::{error, info};

use turnero::{Config, Database, WebServer};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> ExitCode {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    // Load configuration
    let config = match Config::load_with_env(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {config_path}: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = turnero::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        turnero::logging::init_console_only(&config.logging.level);
    }

    info!("Turnero API");
    if let Err(e) = run(config).await {
        error!("Fatal: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn run(config: Config) -> turnero::Result<()> {
    config.validate()?;

    let db = Database::open(&config.database.path).await?;
    let server = WebServer::new(config, db)?;
    info!("Server configured on {}", server.addr());

    server.run().await?;
    Ok(())
}
