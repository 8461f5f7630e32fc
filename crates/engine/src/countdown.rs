//! Countdown-to-date evaluation.
//!
//! Runs identically regardless of mode; the composer decides whether the
//! output is included (morning only).

use chrono::NaiveDate;
use tracing::debug;

use common::CountdownEvent;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Evaluate all events against `today`, preserving input order.
///
/// Only whole-day offsets 3, 1, and 0 produce an alert. An event whose
/// date fails to parse is skipped; its siblings still evaluate.
pub fn evaluate(events: &[CountdownEvent], today: NaiveDate) -> Vec<String> {
    let mut alerts = Vec::new();

    for event in events {
        let target = match NaiveDate::parse_from_str(&event.date, DATE_FORMAT) {
            Ok(date) => date,
            Err(e) => {
                debug!(
                    "Skipping event '{}': unparsable date '{}': {}",
                    event.name, event.date, e
                );
                continue;
            }
        };

        let days_left = (target - today).num_days();
        match days_left {
            3 => alerts.push(format!("3 days remain until {}", event.name)),
            1 => alerts.push(format!("{} is tomorrow", event.name)),
            0 => alerts.push(format!("today is {}", event.name)),
            _ => {}
        }
    }

    alerts
}
