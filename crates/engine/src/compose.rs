//! Digest composition.
//!
//! Evaluators hand back immutable alert sequences; composition is a pure
//! concatenation under the fixed per-mode ordering, wrapped in the fixed
//! greeting and disclaimer lines.

use crate::mode::Mode;

pub const MORNING_SUBJECT: &str = "Morning digest: weather & schedule";
pub const EVENING_SUBJECT: &str = "Evening digest: tomorrow's forecast";

const GREETING: &str = "Hello, this is your daily assistant digest:";
const DISCLAIMER: &str = "This is an automated message, do not reply.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedDigest {
    pub subject: String,
    pub body: String,
}

/// Morning ordering: today's summary first (when present), then countdown
/// alerts in event order, then tomorrow's threshold alerts.
pub fn compose_morning(
    today_summary: Option<String>,
    countdown_alerts: Vec<String>,
    tomorrow_alerts: Vec<String>,
) -> Option<ComposedDigest> {
    let mut alerts = Vec::new();
    alerts.extend(today_summary);
    alerts.extend(countdown_alerts);
    alerts.extend(tomorrow_alerts);
    compose(Mode::Morning, alerts)
}

/// Evening ordering: the forecast block only.
pub fn compose_evening(forecast_block: Vec<String>) -> Option<ComposedDigest> {
    compose(Mode::Evening, forecast_block)
}

/// Assemble the final message; `None` when nothing triggered — a no-op,
/// not an error.
pub fn compose(mode: Mode, alerts: Vec<String>) -> Option<ComposedDigest> {
    if alerts.is_empty() {
        return None;
    }

    let subject = match mode {
        Mode::Morning => MORNING_SUBJECT,
        Mode::Evening => EVENING_SUBJECT,
    };

    Some(ComposedDigest {
        subject: subject.to_string(),
        body: format!("{}\n\n{}\n\n{}", GREETING, alerts.join("\n"), DISCLAIMER),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_alerts_compose_nothing() {
        assert_eq!(compose(Mode::Morning, Vec::new()), None);
        assert_eq!(compose_evening(Vec::new()), None);
        assert_eq!(compose_morning(None, Vec::new(), Vec::new()), None);
    }

    #[test]
    fn test_morning_ordering_summary_countdown_thresholds() {
        let digest = compose_morning(
            Some("Today in beijing: 17-28°C".into()),
            vec!["today is birthday".into()],
            vec!["High temperature warning".into()],
        )
        .unwrap();

        assert_eq!(digest.subject, MORNING_SUBJECT);
        let lines: Vec<&str> = digest.body.lines().collect();
        assert_eq!(lines[0], GREETING);
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "Today in beijing: 17-28°C");
        assert_eq!(lines[3], "today is birthday");
        assert_eq!(lines[4], "High temperature warning");
        assert_eq!(lines[5], "");
        assert_eq!(lines[6], DISCLAIMER);
    }

    #[test]
    fn test_morning_without_summary_starts_with_countdown() {
        let digest = compose_morning(None, vec!["flight is tomorrow".into()], Vec::new()).unwrap();
        let lines: Vec<&str> = digest.body.lines().collect();
        assert_eq!(lines[2], "flight is tomorrow");
    }

    #[test]
    fn test_evening_subject_and_envelope() {
        let digest = compose_evening(vec![
            "Tomorrow in beijing: 14-22°C".into(),
            "Precipitation: none expected".into(),
        ])
        .unwrap();

        assert_eq!(digest.subject, EVENING_SUBJECT);
        assert!(digest.body.starts_with(GREETING));
        assert!(digest.body.ends_with(DISCLAIMER));
        assert!(digest.body.contains("Tomorrow in beijing: 14-22°C\nPrecipitation: none expected"));
    }
}
