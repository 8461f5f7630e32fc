//! Per-run forecast cache.
//!
//! The contract allows one provider request per distinct coordinate pair
//! per run; keys round to four decimal places so float noise in stored
//! coordinates does not defeat the dedup. Failed fetches cache as `None`
//! — a provider that was down for one subscriber is not retried for the
//! next one sharing the coordinates.

use std::sync::Arc;

use dashmap::DashMap;

use common::Forecast;

/// Thread-safe forecast cache keyed by rounded coordinates.
pub type ForecastCache = Arc<DashMap<(i64, i64), Option<Forecast>>>;

/// Create a new empty ForecastCache.
pub fn new_forecast_cache() -> ForecastCache {
    Arc::new(DashMap::new())
}

/// Cache key for a coordinate pair.
pub fn coord_key(latitude: f64, longitude: f64) -> (i64, i64) {
    (
        (latitude * 10_000.0).round() as i64,
        (longitude * 10_000.0).round() as i64,
    )
}
