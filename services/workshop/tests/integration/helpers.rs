use axum_test::TestServer;

use autofix_testing::db::memory_db;
use autofix_workshop::router::build_router;
use autofix_workshop::state::AppState;

/// Fresh application state over an in-memory database with migrations run.
pub async fn test_state() -> AppState {
    AppState {
        db: memory_db().await,
    }
}

/// In-process HTTP server plus the state backing it, for seeding.
pub async fn test_server() -> (TestServer, AppState) {
    let state = test_state().await;
    let server = TestServer::new(build_router(state.clone())).expect("failed to start test server");
    (server, state)
}
