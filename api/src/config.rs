use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    /// Where the two snapshot blobs live (SQLite by default, Postgres also works)
    pub database_url: String,
    /// Spreadsheet web-app endpoint used for remote backup
    pub sheets_webhook_url: Option<String>,
    pub bind_addr: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://ordersflow.db?mode=rwc".to_string()),
            sheets_webhook_url: env::var("SHEETS_WEBHOOK_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }

    /// Check if remote backup is configured
    pub fn remote_sync_enabled(&self) -> bool {
        self.sheets_webhook_url.is_some()
    }
}
