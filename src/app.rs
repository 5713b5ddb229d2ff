use tracing::error;

use crate::infrastructure::bootstrap::build_state;
use crate::infrastructure::config::AppConfig;
use crate::interfaces::http::start_server;

pub fn run() -> std::io::Result<()> {
    let config = AppConfig::load();

    let filter = config
        .as_ref()
        .map(|c| c.log_filter.clone())
        .unwrap_or_else(|_| "info".to_string());
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let config = config.map_err(|err| {
        error!(error = %err, "Failed to load configuration");
        std::io::Error::other(err.to_string())
    })?;

    actix_web::rt::System::new().block_on(async move {
        let state = build_state(&config).map_err(|err| {
            error!(error = %err, "Failed to initialize backend");
            std::io::Error::other(err.to_string())
        })?;

        start_server(state, &config.bind_host, config.port)?.await
    })
}
