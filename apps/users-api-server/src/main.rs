use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use runtime::{AppConfig, CliArgs, DatabaseConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use users_api::config::UsersApiConfig;
use users_api::domain::ports::SystemClock;
use users_api::infra::storage::{self, schema::ensure_schema};

const MEMORY_DSN: &str = "sqlite::memory:";
const DEFAULT_TIMEOUT_SEC: u64 = 30;

/// Expand a sqlite DSN into an absolute-path DSN using a base directory.
/// - Keeps in-memory DSNs as-is.
/// - Normalizes backslashes into forward slashes (important on Windows).
fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path, create_dirs: bool) -> Result<String> {
    if dsn.contains(":memory:") {
        return Ok(MEMORY_DSN.to_string());
    }
    if storage::is_sqlite_memory(dsn) {
        return Ok(dsn.to_string());
    }
    let db_path = dsn
        .strip_prefix("sqlite://")
        .ok_or_else(|| anyhow!("DSN must start with sqlite:// (got: {dsn})"))?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(anyhow!("Empty SQLite path in DSN"));
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }

    if let Some(dir) = p.parent() {
        if create_dirs {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
    }

    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    // Create the file on first start
    match query {
        Some(q) if q.contains("mode=") => {
            out.push('?');
            out.push_str(q);
        }
        Some(q) => {
            out.push('?');
            out.push_str(q);
            out.push_str("&mode=rwc");
        }
        None => out.push_str("?mode=rwc"),
    }
    Ok(out)
}

/// Users API Server - user records over REST
#[derive(Parser)]
#[command(name = "users-api-server")]
#[command(about = "Users API Server - user records over REST")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        port: cli.port,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("Users API Server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, args).await,
        Commands::Check => check_config(config).await,
    }
}

/// Detect DB backend from URL scheme.
fn detect_from_dsn(cfg: &DatabaseConfig) -> Result<&'static str> {
    let raw = cfg.url.trim();
    if raw.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }

    let url = Url::parse(raw).map_err(|e| anyhow!("Invalid database DSN '{raw}': {e}"))?;

    match url.scheme() {
        "sqlite" => Ok("sqlite"),
        "postgres" | "postgresql" => Ok("postgres"),
        other => Err(anyhow!("Unsupported database type: {other}")),
    }
}

/// Final connection string: `--mock` wins, sqlite paths are anchored at `home_dir`.
fn resolve_dsn(config: &AppConfig, args: &CliArgs) -> Result<String> {
    if args.mock {
        return Ok(MEMORY_DSN.to_string());
    }
    let db_config = config
        .database
        .as_ref()
        .ok_or_else(|| anyhow!("No database configuration found (use --mock for in-memory)"))?;
    let backend = detect_from_dsn(db_config)?;
    let dsn = db_config.url.trim().to_owned();
    if backend == "sqlite" {
        absolutize_sqlite_dsn(&dsn, Path::new(&config.server.home_dir), true)
    } else {
        Ok(dsn)
    }
}

async fn run_server(config: AppConfig, args: CliArgs) -> Result<()> {
    let module_cfg: UsersApiConfig = config.module_config(users_api::MODULE_NAME)?;
    tracing::info!(minimum_age = module_cfg.minimum_age, "Module configuration loaded");

    let dsn = resolve_dsn(&config, &args)?;
    tracing::info!("Connecting to database: {}", storage::redact_dsn(&dsn));
    let max_conns = config.database.as_ref().and_then(|d| d.max_conns);
    let db = storage::connect(&dsn, max_conns).await?;
    ensure_schema(&db)
        .await
        .context("Failed to create the users table")?;

    let service = users_api::build_service(db, Arc::new(SystemClock), &module_cfg);
    let timeout_sec = match config.server.timeout_sec {
        0 => DEFAULT_TIMEOUT_SEC,
        n => n,
    };
    let app = users_api::api::rest::routes::router(service, Duration::from_secs(timeout_sec));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = runtime::shutdown::wait_for_shutdown().await {
                tracing::error!(error = %e, "Shutdown signal handler failed");
            }
        })
        .await
        .context("HTTP server failed")?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    let module_cfg: UsersApiConfig = config.module_config(users_api::MODULE_NAME)?;
    if let Some(db) = config.database.as_ref() {
        detect_from_dsn(db)?;
    }

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("Minimum age: {}", module_cfg.minimum_age);
    println!("{}", config.to_yaml()?);

    Ok(())
}
