use sea_orm::Database;
use tracing::info;

use autofix_core::tracing::init_tracing;
use autofix_workshop::config::WorkshopConfig;
use autofix_workshop::router::build_router;
use autofix_workshop::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = WorkshopConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState { db };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.workshop_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("workshop service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
