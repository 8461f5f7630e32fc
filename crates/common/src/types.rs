//! Domain types shared across the bot.

use serde::{Deserialize, Serialize};

/// Label shown for subscribers who never saved a city name.
pub const DEFAULT_CITY_LABEL: &str = "unknown";

/// A named target date tracked for days-remaining alerts.
///
/// `date` stays the raw `YYYY-MM-DD` string from the store: parsing
/// happens at evaluation time so one malformed event cannot poison the
/// rest of the subscriber's events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownEvent {
    pub name: String,
    pub date: String,
}

/// A subscriber document, already normalized: the legacy single-event
/// fields are folded into `events` and field defaults are applied at
/// decode time, never inside the evaluators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscriber {
    /// Store-assigned document id.
    pub id: String,
    /// Delivery address. Absent means: never send to this subscriber.
    pub email: Option<String>,
    pub email_alerts_enabled: bool,
    /// High-temperature alert threshold in °C.
    pub high_temp_threshold: f64,
    /// Low-temperature alert threshold in °C.
    pub low_temp_threshold: f64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Display-only city label.
    pub city: String,
    pub events: Vec<CountdownEvent>,
}

impl Subscriber {
    /// Coordinates to fetch weather for, using the given fallback when the
    /// subscriber has not saved a complete location.
    pub fn coordinates_or(&self, fallback_lat: f64, fallback_lon: f64) -> (f64, f64) {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => (fallback_lat, fallback_lon),
        }
    }
}

/// Decode-time defaults for subscriber documents that omit thresholds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SubscriberDefaults {
    /// °C; documents without `tempHighThreshold` get this.
    pub high_temp_threshold: f64,
    /// °C; documents without `tempLowThreshold` get this.
    pub low_temp_threshold: f64,
}

impl Default for SubscriberDefaults {
    fn default() -> Self {
        Self {
            high_temp_threshold: 35.0,
            low_temp_threshold: 5.0,
        }
    }
}

/// Day-indexed forecast: offset 0 = today, 1 = tomorrow.
///
/// Entries are optional because the provider may return nulls or arrays
/// shorter than expected; a missing entry suppresses only the rules that
/// need it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forecast {
    pub max_temp: Vec<Option<f64>>,
    pub min_temp: Vec<Option<f64>>,
    pub precipitation_mm: Vec<Option<f64>>,
}

impl Forecast {
    pub fn max_on(&self, offset: usize) -> Option<f64> {
        self.max_temp.get(offset).copied().flatten()
    }

    pub fn min_on(&self, offset: usize) -> Option<f64> {
        self.min_temp.get(offset).copied().flatten()
    }

    pub fn precip_on(&self, offset: usize) -> Option<f64> {
        self.precipitation_mm.get(offset).copied().flatten()
    }
}

/// A pending pre-composed message from the outbound queue.
///
/// Queue items are only ever read-then-deleted or left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueItem {
    /// Store-assigned document id.
    pub id: String,
    pub to: String,
    pub subject: String,
    pub content: String,
}

impl QueueItem {
    /// An item without a usable recipient or body can never be delivered
    /// and is discarded by the drainer without touching the transport.
    pub fn is_structurally_valid(&self) -> bool {
        !self.to.trim().is_empty() && !self.content.trim().is_empty()
    }
}
