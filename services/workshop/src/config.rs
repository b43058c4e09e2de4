/// Workshop service configuration loaded from environment variables.
#[derive(Debug)]
pub struct WorkshopConfig {
    /// SQLite connection URL (e.g. "sqlite://autofix.db?mode=rwc").
    pub database_url: String,
    /// TCP port for the HTTP server (default 3200). Env var: `WORKSHOP_PORT`.
    pub workshop_port: u16,
}

impl WorkshopConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            workshop_port: std::env::var("WORKSHOP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3200),
        }
    }
}
