use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use portfolio_forms::config::{LogFormat, LoggingSettings, Settings};
use portfolio_forms::core::{DispatchSettings, Dispatcher};
use portfolio_forms::routes::{self, AppState};
use portfolio_forms::services::EmailClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber; `RUST_LOG` wins over the configured level
fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.pretty().init(),
        LogFormat::Compact => subscriber.compact().init(),
    }
}

fn config_error(message: String) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, message)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Settings come first so the log level and format can be honoured
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            init_logging(&LoggingSettings::default());
            error!("Failed to load configuration: {}", e);
            return Err(config_error(format!("Configuration error: {}", e)));
        }
    };

    init_logging(&settings.logging);

    info!("Starting portfolio forms service...");
    info!("Configuration loaded successfully");

    let timeout = Duration::from_secs(settings.email.timeout_secs.unwrap_or(30));
    let client = EmailClient::new(settings.email.endpoint.clone(), settings.email.api_key.clone(), timeout)
        .map_err(|e| {
            error!("Failed to create email client: {}", e);
            config_error(format!("Email client error: {}", e))
        })?;

    info!("Email client initialized ({}, timeout {}s)", settings.email.endpoint, timeout.as_secs());

    let dispatcher = Dispatcher::new(
        Arc::new(client),
        DispatchSettings {
            from_address: settings.email.from_address.clone(),
            admin_address: settings.email.admin_address.clone(),
            site_name: settings.email.site_name.clone(),
        },
    );

    let app_state = AppState { dispatcher };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
