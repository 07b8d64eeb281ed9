use std::process::ExitCode;

use tracing::{error, info};

use inkpost::{open_store, Config, WebServer};

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine.
    let _ = dotenvy::dotenv();

    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = inkpost::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        inkpost::logging::init_console_only(&config.logging.level);
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }

    info!("inkpost - blog backend");

    let store = match open_store(&config.database).await {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to open {:?} store: {}", config.database.backend, e);
            return ExitCode::FAILURE;
        }
    };
    info!(backend = store.backend_name(), "Store ready");

    let server = match WebServer::new(&config, store) {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to configure web server: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = server.run().await {
        error!("Web server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
