//! Weather threshold evaluation.
//!
//! Each rule reads only the forecast fields it needs, so a short or
//! partially-null response suppresses that rule alone. Threshold
//! comparisons are strict: a forecast exactly at the threshold is quiet.

use common::Forecast;

/// Day offsets into the forecast arrays.
const TODAY: usize = 0;
const TOMORROW: usize = 1;

/// Today's descriptive summary (morning mode). Informational, not
/// threshold-gated; absent when today's temperatures are missing.
pub fn today_summary(forecast: &Forecast, city: &str) -> Option<String> {
    let max = forecast.max_on(TODAY)?;
    let min = forecast.min_on(TODAY)?;

    let mut line = format!("Today in {city}: {min}-{max}°C");
    if let Some(precip) = forecast.precip_on(TODAY) {
        if precip > 0.0 {
            line.push_str(&format!(", rain {precip}mm"));
        }
    }
    Some(line)
}

/// Tomorrow's threshold alerts (morning mode), in fixed order: high
/// temperature, low temperature, rain.
pub fn tomorrow_threshold_alerts(
    forecast: &Forecast,
    high_threshold: f64,
    low_threshold: f64,
    city: &str,
) -> Vec<String> {
    let mut alerts = Vec::new();

    if let Some(max) = forecast.max_on(TOMORROW) {
        if max > high_threshold {
            alerts.push(format!(
                "High temperature warning ({city}): tomorrow reaches {max}°C, above your {high_threshold}°C threshold"
            ));
        }
    }

    if let Some(min) = forecast.min_on(TOMORROW) {
        if min < low_threshold {
            alerts.push(format!(
                "Low temperature warning ({city}): tomorrow drops to {min}°C, below your {low_threshold}°C threshold"
            ));
        }
    }

    if let Some(precip) = forecast.precip_on(TOMORROW) {
        if precip > 0.0 {
            alerts.push(format!(
                "Rain expected ({city}): {precip}mm forecast for tomorrow, remember an umbrella"
            ));
        }
    }

    alerts
}

/// Tomorrow's forecast block (evening mode): always emitted when the data
/// exists, never threshold-gated.
pub fn evening_forecast_block(forecast: &Forecast, city: &str) -> Vec<String> {
    let mut lines = Vec::new();

    if let (Some(max), Some(min)) = (forecast.max_on(TOMORROW), forecast.min_on(TOMORROW)) {
        lines.push(format!("Tomorrow in {city}: {min}-{max}°C"));
    }

    if let Some(precip) = forecast.precip_on(TOMORROW) {
        if precip > 0.0 {
            lines.push(format!("Precipitation: {precip}mm, bring an umbrella"));
        } else {
            lines.push("Precipitation: none expected".to_string());
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forecast(today: (f64, f64, f64), tomorrow: (f64, f64, f64)) -> Forecast {
        Forecast {
            max_temp: vec![Some(today.0), Some(tomorrow.0)],
            min_temp: vec![Some(today.1), Some(tomorrow.1)],
            precipitation_mm: vec![Some(today.2), Some(tomorrow.2)],
        }
    }

    #[test]
    fn test_high_temp_threshold_is_strict() {
        let city = "beijing";
        // Exactly at the threshold: quiet.
        let at = forecast((25.0, 15.0, 0.0), (30.0, 15.0, 0.0));
        assert!(tomorrow_threshold_alerts(&at, 30.0, 5.0, city).is_empty());

        // One degree above: exactly one high-temp alert.
        let above = forecast((25.0, 15.0, 0.0), (31.0, 15.0, 0.0));
        let alerts = tomorrow_threshold_alerts(&above, 30.0, 5.0, city);
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].starts_with("High temperature warning (beijing)"));
    }

    #[test]
    fn test_low_temp_threshold_is_strict() {
        let at = forecast((25.0, 15.0, 0.0), (20.0, 5.0, 0.0));
        assert!(tomorrow_threshold_alerts(&at, 35.0, 5.0, "x").is_empty());

        let below = forecast((25.0, 15.0, 0.0), (20.0, 4.0, 0.0));
        let alerts = tomorrow_threshold_alerts(&below, 35.0, 5.0, "x");
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].contains("Low temperature warning"));
    }

    #[test]
    fn test_rain_alert_requires_positive_precipitation() {
        let dry = forecast((25.0, 15.0, 0.0), (20.0, 15.0, 0.0));
        assert!(tomorrow_threshold_alerts(&dry, 35.0, 5.0, "x").is_empty());

        let wet = forecast((25.0, 15.0, 0.0), (20.0, 15.0, 2.5));
        let alerts = tomorrow_threshold_alerts(&wet, 35.0, 5.0, "x");
        assert_eq!(alerts, vec!["Rain expected (x): 2.5mm forecast for tomorrow, remember an umbrella"]);
    }

    #[test]
    fn test_alerts_are_independent_and_ordered() {
        let extreme = forecast((25.0, 15.0, 0.0), (40.0, 2.0, 8.0));
        let alerts = tomorrow_threshold_alerts(&extreme, 35.0, 5.0, "x");
        assert_eq!(alerts.len(), 3);
        assert!(alerts[0].contains("High temperature"));
        assert!(alerts[1].contains("Low temperature"));
        assert!(alerts[2].contains("Rain expected"));
    }

    #[test]
    fn test_missing_tomorrow_suppresses_each_rule_independently() {
        // Only tomorrow's max exists: high-temp can fire, the others stay quiet.
        let partial = Forecast {
            max_temp: vec![Some(25.0), Some(40.0)],
            min_temp: vec![Some(15.0)],
            precipitation_mm: vec![Some(0.0), None],
        };
        let alerts = tomorrow_threshold_alerts(&partial, 35.0, 5.0, "x");
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].contains("High temperature"));
    }

    #[test]
    fn test_today_summary_with_and_without_rain() {
        let dry = forecast((28.0, 17.0, 0.0), (30.0, 18.0, 0.0));
        assert_eq!(
            today_summary(&dry, "beijing").unwrap(),
            "Today in beijing: 17-28°C"
        );

        let wet = forecast((28.0, 17.0, 3.2), (30.0, 18.0, 0.0));
        assert_eq!(
            today_summary(&wet, "beijing").unwrap(),
            "Today in beijing: 17-28°C, rain 3.2mm"
        );
    }

    #[test]
    fn test_today_summary_absent_without_temperatures() {
        let missing = Forecast {
            max_temp: vec![None],
            min_temp: vec![Some(17.0)],
            precipitation_mm: vec![Some(1.0)],
        };
        assert_eq!(today_summary(&missing, "x"), None);
    }

    #[test]
    fn test_evening_block_is_unconditional() {
        let mild = forecast((25.0, 15.0, 0.0), (22.0, 14.0, 0.0));
        assert_eq!(
            evening_forecast_block(&mild, "beijing"),
            vec![
                "Tomorrow in beijing: 14-22°C",
                "Precipitation: none expected",
            ]
        );

        let rainy = forecast((25.0, 15.0, 0.0), (22.0, 14.0, 6.0));
        assert_eq!(
            evening_forecast_block(&rainy, "beijing"),
            vec![
                "Tomorrow in beijing: 14-22°C",
                "Precipitation: 6mm, bring an umbrella",
            ]
        );
    }

    #[test]
    fn test_evening_block_empty_when_tomorrow_missing() {
        let today_only = Forecast {
            max_temp: vec![Some(25.0)],
            min_temp: vec![Some(15.0)],
            precipitation_mm: vec![Some(0.0)],
        };
        assert!(evening_forecast_block(&today_only, "x").is_empty());
    }
}
