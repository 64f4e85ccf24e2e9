use std::io::Write;

use actix_web::{web, HttpServer};
use anyhow::Context;
use log::info;

use hm_api::{create_app, AppState};
use hm_shared::config::{LogFormat, LoggingConfig};

/// Initialize env_logger; `RUST_LOG` overrides the configured level
fn init_logging(logging: &LoggingConfig) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::new().default_filter_or(logging.level.as_str()));

    match logging.format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                let line = serde_json::json!({
                    "timestamp": chrono::Utc::now().to_rfc3339(),
                    "level": record.level().to_string(),
                    "target": record.target(),
                    "message": record.args().to_string(),
                });
                writeln!(buf, "{}", line)
            });
        }
        LogFormat::Compact => {
            builder.format_timestamp(None).format_target(false);
        }
        LogFormat::Pretty => {}
    }

    builder.init();
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = hm_infra::load_config().context("failed to load configuration")?;
    init_logging(&config.logging);

    info!(
        "Starting HomeMarket API Server ({} environment, {} store)",
        config.environment,
        config.store.backend.as_str()
    );

    let store = hm_infra::build_store(&config)
        .await
        .context("failed to initialise the document store")?;
    let state = web::Data::new(AppState::new(store, &config));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let cors = config.cors.clone();
    let mut server = HttpServer::new(move || create_app(state.clone(), &cors));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    Ok(())
}
