//! Followers/followings audit for one account.
//!
//! Run with: cargo run --bin follow_audit -- -u <username> -c cookies.json
//!
//! Reports are always written under `./out/<username>/`.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use follow_audit::{
    reconcile,
    report::{render_summary, write_all_outputs},
    AuditConfig, GraphClient, LogFormat, SessionCredentials, OUTPUT_ROOT,
};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser)]
#[command(name = "follow_audit")]
#[command(version, about = "Instagram followers/followings audit (private endpoints)", long_about = None)]
struct Cli {
    /// Instagram username to inspect
    #[arg(short, long)]
    username: String,

    /// Path to JSON file with csrftoken, ds_user_id, sessionid
    #[arg(short, long)]
    cookies: PathBuf,

    /// Optional TOML config (endpoints, pagination, logging)
    #[arg(long, env = "FOLLOW_AUDIT_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output format (pretty, json, compact)
    #[arg(long)]
    log_format: Option<String>,
}

// ============================================================================
// Logging
// ============================================================================

fn setup_logging(config: &AuditConfig, cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let level = cli.log_level.as_ref().unwrap_or(&config.logging.level);

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(level)
            .add_directive("hyper=warn".parse()?)
            .add_directive("reqwest=warn".parse()?),
    };

    let format = match cli.log_format.as_deref() {
        Some(s) => s.parse::<LogFormat>()?,
        None => config.logging.format,
    };

    if let Some(log_path) = config.logging.log_file.as_ref() {
        let file = Mutex::new(std::fs::File::create(log_path)?);

        // File sink forces JSON on both layers
        let stderr_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .json();
        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .json();

        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();

        eprintln!("Audit log: {log_path} (JSON)");
        return Ok(());
    }

    match format {
        LogFormat::Json => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .json()
                .init();
        }
        LogFormat::Compact => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .compact()
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
    }

    Ok(())
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = AuditConfig::load(cli.config.as_deref())?;
    setup_logging(&config, &cli)?;

    let credentials = SessionCredentials::load(&cli.cookies)?;
    let out_dir = Path::new(OUTPUT_ROOT).join(&cli.username);

    let client = GraphClient::new(&credentials, &config.api, &config.pagination)?;

    let user_id = client.user_id(&cli.username).await?;
    info!(user_id = %user_id, "User ID");

    let followers = client.follower_nodes(&user_id).await?;
    let followings = client.following_nodes(&user_id).await?;

    let sets = reconcile(&followers, &followings);
    println!("\n{}", render_summary(&cli.username, &sets));

    let outputs = write_all_outputs(&cli.username, &followers, &followings, &out_dir)?;
    println!("[ok] Files written:");
    for output in outputs {
        let path = std::fs::canonicalize(&output.path).unwrap_or(output.path);
        println!("  - {}: {}", output.label, path.display());
    }

    Ok(())
}
