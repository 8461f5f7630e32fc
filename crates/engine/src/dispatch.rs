//! Batch dispatch loop.
//!
//! Iterates subscribers in store order. One subscriber's failure — bad
//! data, transport error, anything — is logged and never aborts the rest
//! of the batch.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{error, info, warn};

use common::config::EngineConfig;
use common::{Forecast, ForecastProvider, Mailer, Result, Subscriber, SubscriberStore};

use crate::cache::{coord_key, new_forecast_cache, ForecastCache};
use crate::compose::{compose_evening, compose_morning};
use crate::countdown;
use crate::mode::{local_today, Mode};
use crate::weather;

/// Outcome counters for one dispatch pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReport {
    pub processed: usize,
    pub sent: usize,
    pub skipped: usize,
    pub no_alert: usize,
    pub failed: usize,
}

enum Outcome {
    Sent,
    Skipped,
    NoAlert,
}

/// Run one dispatch pass over every subscriber.
///
/// A store failure on the initial list is fatal for the run; everything
/// after that is isolated per subscriber.
pub async fn run_dispatch<S, F, M>(
    store: &S,
    forecasts: &F,
    mailer: &M,
    engine_cfg: &EngineConfig,
    dry_run: bool,
    now: DateTime<Utc>,
) -> Result<DispatchReport>
where
    S: SubscriberStore,
    F: ForecastProvider,
    M: Mailer,
{
    let subscribers = store.list_subscribers().await?;
    let mode = Mode::at(now);
    let today = local_today(now);

    info!(
        "Dispatching {} subscriber(s) in {} mode ({})",
        subscribers.len(),
        mode.label(),
        today
    );

    let cache = new_forecast_cache();
    let mut report = DispatchReport::default();

    for subscriber in &subscribers {
        report.processed += 1;
        match process_subscriber(
            subscriber, forecasts, mailer, &cache, engine_cfg, dry_run, mode, today,
        )
        .await
        {
            Ok(Outcome::Sent) => report.sent += 1,
            Ok(Outcome::Skipped) => report.skipped += 1,
            Ok(Outcome::NoAlert) => report.no_alert += 1,
            Err(e) => {
                error!("Subscriber {} failed: {}; continuing", subscriber.id, e);
                report.failed += 1;
            }
        }
    }

    info!(
        "Dispatch complete: processed={} sent={} skipped={} no_alert={} failed={}",
        report.processed, report.sent, report.skipped, report.no_alert, report.failed
    );

    Ok(report)
}

#[allow(clippy::too_many_arguments)]
async fn process_subscriber<F, M>(
    subscriber: &Subscriber,
    forecasts: &F,
    mailer: &M,
    cache: &ForecastCache,
    engine_cfg: &EngineConfig,
    dry_run: bool,
    mode: Mode,
    today: NaiveDate,
) -> Result<Outcome>
where
    F: ForecastProvider,
    M: Mailer,
{
    let Some(email) = subscriber.email.as_deref() else {
        return Ok(Outcome::Skipped);
    };
    if !subscriber.email_alerts_enabled {
        return Ok(Outcome::Skipped);
    }

    let (lat, lon) = subscriber.coordinates_or(
        engine_cfg.fallback_latitude,
        engine_cfg.fallback_longitude,
    );
    let forecast = cached_forecast(forecasts, cache, lat, lon).await;

    let digest = match mode {
        Mode::Morning => {
            let summary = forecast
                .as_ref()
                .and_then(|f| weather::today_summary(f, &subscriber.city));
            let countdown_alerts = countdown::evaluate(&subscriber.events, today);
            let tomorrow_alerts = forecast
                .as_ref()
                .map(|f| {
                    weather::tomorrow_threshold_alerts(
                        f,
                        subscriber.high_temp_threshold,
                        subscriber.low_temp_threshold,
                        &subscriber.city,
                    )
                })
                .unwrap_or_default();
            compose_morning(summary, countdown_alerts, tomorrow_alerts)
        }
        Mode::Evening => {
            let block = forecast
                .as_ref()
                .map(|f| weather::evening_forecast_block(f, &subscriber.city))
                .unwrap_or_default();
            compose_evening(block)
        }
    };

    let Some(digest) = digest else {
        info!("No alert triggered for subscriber {}", subscriber.id);
        return Ok(Outcome::NoAlert);
    };

    if dry_run {
        info!("[dry-run] would send '{}' to {}", digest.subject, email);
        return Ok(Outcome::Sent);
    }

    mailer.send(email, &digest.subject, &digest.body).await?;
    info!("Sent {} digest to subscriber {}", mode.label(), subscriber.id);
    Ok(Outcome::Sent)
}

/// One provider request per distinct coordinate pair per run; failures
/// cache as "no forecast" and only suppress weather-derived alerts.
async fn cached_forecast<F>(
    provider: &F,
    cache: &ForecastCache,
    latitude: f64,
    longitude: f64,
) -> Option<Forecast>
where
    F: ForecastProvider,
{
    let key = coord_key(latitude, longitude);
    if let Some(entry) = cache.get(&key) {
        return entry.value().clone();
    }

    let fetched = match provider.fetch_forecast(latitude, longitude).await {
        Ok(forecast) => Some(forecast),
        Err(e) => {
            warn!(
                "Weather fetch failed for ({}, {}): {}; weather alerts suppressed",
                latitude, longitude, e
            );
            None
        }
    };

    cache.insert(key, fetched.clone());
    fetched
}
