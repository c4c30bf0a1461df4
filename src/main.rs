use std::sync::Arc;

use cineinfo::logging::{LogLevel, init_logging};
use cineinfo::{GeminiClient, MovieService, Settings, build_router};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // A missing .env file is fine; the variables may come from the real environment
    dotenv::dotenv().ok();

    init_logging(LogLevel::Info);

    let settings = Settings::from_env().unwrap_or_else(|e| {
        error!(error = %e, "Failed to load settings");
        std::process::exit(1);
    });

    let client = GeminiClient::from_settings(&settings).unwrap_or_else(|e| {
        error!(error = %e, "Failed to create Gemini client");
        std::process::exit(1);
    });

    let app = build_router(Arc::new(MovieService::new(client)));

    let addr = settings.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            error!(addr = %addr, error = %e, "Failed to bind listener");
            std::process::exit(1);
        });

    info!(model = %settings.model.as_str(), "CineInfo API running on http://{}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
