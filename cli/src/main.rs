//! Staff accounts - CLI server
//!
//! ```sh
//! # Run with default config (~/.config/staff-accounts/config.toml)
//! staff-accounts
//!
//! # Custom config path
//! staff-accounts --config /etc/staff-accounts/config.toml
//!
//! # Throwaway in-memory store on another port
//! staff-accounts --database-url memory --port 3000
//!
//! # Validate config without starting
//! staff-accounts --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use staff_accounts::config::AppConfig;
use staff_accounts::server::{init_tracing, ServerHandle, ServerOptions};

/// Login, registration and profile management for staff users and admins.
#[derive(Parser, Debug)]
#[command(
    name = "staff-accounts",
    version,
    about = "Staff account and admin management API",
    long_about = "REST API for staff users and admins: login, registration, \
                  profile and password management, paging and search.\n\n\
                  Default config: ~/.config/staff-accounts/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "ACCOUNTS_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the database URL (`memory` for the in-process store).
    #[arg(long)]
    database_url: Option<String>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

impl Cli {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(ref url) = self.database_url {
            config.database.url = url.clone();
        }
        if let Some(ref level) = self.log_level {
            config.logging.level = level.clone();
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(staff_accounts::default_config_path);

    let mut config = AppConfig::load(&config_path)?;
    cli.apply_overrides(&mut config);

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        config.validate()?;
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.server.address());
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.shutdown().await;

    Ok(())
}
