//! Weather observation model and display methods

use serde::{Deserialize, Serialize};

/// A single weather observation tied to one sampled route point
///
/// Ephemeral: the set of observations is rebuilt on every route update and
/// never reused across analysis runs.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherObservation {
    /// Temperature in Celsius
    pub temperature: f64,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Rain amount over the last hour in mm, when reported
    pub rain_1h: Option<f64>,
    /// Snow amount over the last hour in mm, when reported
    pub snow_1h: Option<f64>,
    /// Visibility in meters
    pub visibility: f64,
    /// Primary condition label, e.g. "Clear", "Rain", "Snow"
    pub condition: String,
}

impl WeatherObservation {
    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1}°C", self.temperature)
    }

    /// Format wind speed with unit
    #[must_use]
    pub fn format_wind(&self) -> String {
        format!("{:.1} m/s", self.wind_speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatting() {
        let obs = WeatherObservation {
            temperature: 15.25,
            humidity: 60,
            wind_speed: 8.0,
            rain_1h: None,
            snow_1h: None,
            visibility: 10_000.0,
            condition: "Clear".to_string(),
        };
        assert_eq!(obs.format_temperature(), "15.2°C");
        assert_eq!(obs.format_wind(), "8.0 m/s");
    }
}
