pub mod entity;
pub mod schema;
pub mod sea_orm_repo;

use std::time::Duration;

use anyhow::Context;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Memory databases vanish with their connection, so it must never be recycled.
const MEMORY_CONN_LIFETIME: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// True for DSNs that open a private in-memory SQLite database.
pub fn is_sqlite_memory(url: &str) -> bool {
    if !url.starts_with("sqlite:") {
        return false;
    }
    if url.contains(":memory:") {
        return true;
    }
    url::Url::parse(url).is_ok_and(|parsed| {
        parsed
            .query_pairs()
            .any(|(k, v)| k.eq_ignore_ascii_case("mode") && v.eq_ignore_ascii_case("memory"))
    })
}

/// DSN with its password masked, safe for logs and error messages.
pub fn redact_dsn(dsn: &str) -> String {
    if !dsn.contains('@') {
        return dsn.to_owned();
    }
    match url::Url::parse(dsn) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                let _ = parsed.set_password(Some("***"));
            }
            parsed.to_string()
        }
        Err(_) => "***".to_owned(),
    }
}

/// Pool options for `url`. In-memory SQLite is pinned to a single,
/// never-expiring connection since every connection would otherwise see its
/// own database.
pub fn connect_options(url: &str, max_conns: Option<u32>) -> ConnectOptions {
    let mut opts = ConnectOptions::new(url.to_owned());
    opts.min_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    if is_sqlite_memory(url) {
        opts.max_connections(1)
            .max_lifetime(MEMORY_CONN_LIFETIME)
            .idle_timeout(MEMORY_CONN_LIFETIME);
    } else {
        opts.max_connections(max_conns.unwrap_or(10));
    }
    opts
}

/// Open a pooled connection.
pub async fn connect(url: &str, max_conns: Option<u32>) -> anyhow::Result<DatabaseConnection> {
    Database::connect(connect_options(url, max_conns))
        .await
        .with_context(|| format!("failed to connect to {}", redact_dsn(url)))
}
