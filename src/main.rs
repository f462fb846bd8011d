//! Labstore - laboratory status report
//!
//! Loads instruments, open usage sessions and samples from the lab backend
//! and prints what needs attention.

use std::env;
use std::sync::Arc;

use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use labstore::{
    config::AppConfig,
    derived::{usage_duration, StatusBadge},
    models::SampleStatus,
    Credential, HttpGateway, ListFilter, RequestContext, Stores,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    init_tracing(&config);

    tracing::info!("Starting labstore v{}", env!("CARGO_PKG_VERSION"));

    let gateway = HttpGateway::new(&config.gateway)?;
    tracing::info!("Using lab backend at {}", gateway.base_url());

    let stores = Stores::new(Arc::new(gateway), &config.store);

    // The session component owns the credential; we only pass it along
    let ctx = match env::var("LAB_API_TOKEN") {
        Ok(token) => RequestContext::new(Credential::new(token)),
        Err(_) => {
            tracing::warn!("LAB_API_TOKEN not set, calling the backend anonymously");
            RequestContext::anonymous()
        }
    };

    let filter = ListFilter::new();
    let (instruments, usage_logs, samples) = tokio::join!(
        stores.instruments.list(&ctx, &filter),
        stores.usage_logs.list(&ctx, &filter),
        stores.samples.list(&ctx, &filter),
    );

    for result in [
        instruments.as_ref().map(|_| ()),
        usage_logs.as_ref().map(|_| ()),
        samples.as_ref().map(|_| ()),
    ] {
        if let Err(e) = result {
            if e.is_auth() {
                anyhow::bail!("Backend rejected the credential: {}", e.message());
            }
            tracing::error!("Fetch failed: {}", e);
        }
    }

    let now = Utc::now();

    println!("Calibration");
    let due = stores.instruments.calibration_due(now);
    if due.is_empty() {
        println!("  all {} instruments up to date", stores.instruments.len());
    }
    for (instrument, status) in due {
        println!(
            "  [{}] {} ({}) {}",
            StatusBadge::from(status.bucket).label,
            instrument.name,
            instrument.serial_number,
            status.hint.unwrap_or_default()
        );
    }

    println!("Sessions in progress");
    for log in stores.usage_logs.open_sessions() {
        let instrument = stores
            .instruments
            .get(&log.instrument_id)
            .map(|i| i.name)
            .unwrap_or_else(|| format!("instrument {}", log.instrument_id));
        let elapsed = usage_duration(log.start_time, Some(now))
            .map(|d| d.to_string())
            .unwrap_or_default();
        println!("  {} since {} ({})", instrument, log.start_time.format("%Y-%m-%d %H:%M"), elapsed);
    }

    println!("Samples");
    for status in [SampleStatus::Available, SampleStatus::InUse, SampleStatus::Depleted] {
        println!("  {:<10} {}", status.to_string(), stores.samples.by_status(status).len());
    }

    stores.clear_all();
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("labstore={}", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
