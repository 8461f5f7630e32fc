//! Daily digest bot.
//!
//! Single-run Tokio binary, triggered by an external scheduler, that:
//! 1. Drains the outbound mail queue (pre-composed messages)
//! 2. Selects the morning/evening mode from wall-clock time
//! 3. Evaluates countdown and weather rules per subscriber
//! 4. Composes and emails the resulting digests

mod config;

use clap::Parser;
use tracing::{error, info};

use engine::{drain_queue, run_dispatch, Mode};
use firestore_client::{FirestoreAuth, FirestoreClient};
use mailer::SmtpMailer;
use openmeteo_client::OpenMeteoClient;

/// Countdown & weather digest mailer
#[derive(Parser)]
#[command(name = "daily-digest-bot", about = "Countdown & weather digest mailer")]
struct Cli {
    /// Evaluate and log without sending mail or deleting queue items.
    #[arg(long)]
    dry_run: bool,

    /// Verify the SMTP connection and exit.
    #[arg(long)]
    check_smtp: bool,
}

#[tokio::main]
async fn main() {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "daily_digest_bot=info,engine=info,firestore_client=info,openmeteo_client=info,mailer=info"
                    .into()
            }),
        )
        .with_target(true)
        .init();

    let cli = Cli::parse();

    info!("Daily digest bot starting up...");

    // Load configuration.
    let mut cfg = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };
    if cli.dry_run {
        cfg.dry_run = true;
    }

    let now = chrono::Utc::now();
    let mode = Mode::at(now);
    info!("Mode: {} (dry_run={})", mode.label(), cfg.dry_run);
    info!(
        "SMTP relay: {}:{} as {}",
        cfg.smtp.host, cfg.smtp.port, cfg.smtp.username
    );
    info!(
        "Defaults: high>{}°C low<{}°C fallback=({}, {})",
        cfg.engine.subscriber_defaults.high_temp_threshold,
        cfg.engine.subscriber_defaults.low_temp_threshold,
        cfg.engine.fallback_latitude,
        cfg.engine.fallback_longitude
    );

    let mailer = match SmtpMailer::new(&cfg.smtp) {
        Ok(m) => m,
        Err(e) => {
            error!("SMTP transport error: {}", e);
            std::process::exit(1);
        }
    };

    // ── Check-smtp mode ──────────────────────────────────────────────
    if cli.check_smtp {
        info!("Running SMTP connection check...");
        match mailer.check_connection().await {
            Ok(true) => info!("SMTP connection OK"),
            Ok(false) => {
                error!("SMTP connection test failed");
                std::process::exit(1);
            }
            Err(e) => {
                error!("SMTP connection error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let auth = match FirestoreAuth::new(&cfg.service_account) {
        Ok(a) => a,
        Err(e) => {
            error!("Firestore auth error: {}", e);
            std::process::exit(1);
        }
    };
    let store = FirestoreClient::new(
        auth,
        &cfg.service_account.project_id,
        cfg.engine.subscriber_defaults,
    );
    let weather = OpenMeteoClient::new();

    // Queue first: pre-composed messages go out even when rule
    // evaluation later fails.
    let drain_report = match drain_queue(&store, &mailer, cfg.dry_run).await {
        Ok(report) => report,
        Err(e) => {
            error!("Queue drain aborted: {}", e);
            std::process::exit(1);
        }
    };

    let dispatch_report =
        match run_dispatch(&store, &weather, &mailer, &cfg.engine, cfg.dry_run, now).await {
            Ok(report) => report,
            Err(e) => {
                error!("Dispatch aborted: {}", e);
                std::process::exit(1);
            }
        };

    info!(
        "Run complete: queue sent={} discarded={} retry={}; digests sent={} no_alert={} skipped={} failed={}",
        drain_report.sent,
        drain_report.discarded_invalid,
        drain_report.retry_pending,
        dispatch_report.sent,
        dispatch_report.no_alert,
        dispatch_report.skipped,
        dispatch_report.failed
    );
}
