//! Threshold-based weather risk classification for driving routes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::WeatherThresholds;
use crate::models::WeatherObservation;

/// Overall or per-factor risk severity
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// The fixed summary message for this severity level
    #[must_use]
    pub fn summary(self) -> &'static str {
        match self {
            Severity::High => "Route conditions are potentially dangerous. Consider postponing travel.",
            Severity::Medium => "Use caution when traveling on this route.",
            Severity::Low => "Route conditions are generally safe for travel.",
        }
    }

    /// Parse a severity display label
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "high" => Some(Severity::High),
            "medium" => Some(Severity::Medium),
            "low" => Some(Severity::Low),
            _ => None,
        }
    }
}

/// Summary message for a severity label, with a fallback for values the
/// display layer does not recognize
#[must_use]
pub fn summary_for_label(label: &str) -> &'static str {
    match Severity::from_label(label) {
        Some(severity) => severity.summary(),
        None => "Unable to determine route conditions.",
    }
}

/// The weather condition that triggered a risk factor
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskFactorKind {
    Wind,
    Rain,
    Snow,
    Visibility,
    Traffic,
}

impl RiskFactorKind {
    /// Display icon for this factor kind
    ///
    /// Visibility shares the generic warning icon.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            RiskFactorKind::Wind => "💨",
            RiskFactorKind::Rain => "🌧",
            RiskFactorKind::Snow => "❄",
            RiskFactorKind::Traffic => "🚗",
            RiskFactorKind::Visibility => "⚠",
        }
    }

    /// Fixed explanatory sentence for this factor kind
    ///
    /// Visibility shares the generic hazard sentence.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            RiskFactorKind::Wind => "High wind speeds may affect vehicle stability",
            RiskFactorKind::Rain => "Heavy rainfall may cause reduced visibility and wet roads",
            RiskFactorKind::Snow => "Snowfall may cause slippery conditions",
            RiskFactorKind::Traffic => "Heavy traffic congestion reported",
            RiskFactorKind::Visibility => "Potential hazardous conditions",
        }
    }
}

/// One threshold breach along the sampled route
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct RiskFactor {
    pub kind: RiskFactorKind,
    pub severity: Severity,
}

/// One display entry of a risk report
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RiskDetail {
    pub icon: String,
    pub text: String,
}

/// The severity-classified analysis of one route
///
/// Produced once per analysis run and replaced atomically by the next run.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RouteRiskReport {
    pub severity: Severity,
    pub summary: String,
    pub factors: Vec<RiskFactor>,
    pub details: Vec<RiskDetail>,
    pub generated_at: DateTime<Utc>,
}

/// Evaluates weather observations against severe-weather thresholds
#[derive(Debug, Clone)]
pub struct RiskClassifier {
    thresholds: WeatherThresholds,
}

impl RiskClassifier {
    #[must_use]
    pub fn new(thresholds: WeatherThresholds) -> Self {
        Self { thresholds }
    }

    /// Classify a sequence of observations into a route risk report
    ///
    /// Each observation is evaluated independently; every threshold breach
    /// appends one high-severity factor. A single breach anywhere along the
    /// sampled route taints the whole route: one severe weather cell is
    /// enough to warrant caution for the whole trip. An empty observation
    /// sequence classifies as low (no data, assume safe).
    #[must_use]
    pub fn analyze(&self, observations: &[WeatherObservation]) -> RouteRiskReport {
        let mut factors = Vec::new();

        for obs in observations {
            if obs.wind_speed > self.thresholds.wind_speed_ms {
                factors.push(RiskFactor {
                    kind: RiskFactorKind::Wind,
                    severity: Severity::High,
                });
            }
            // Rain and snow amounts only count when the primary condition
            // label agrees; providers report trace amounts under other
            // conditions.
            if obs.condition == "Rain"
                && obs.rain_1h.is_some_and(|mm| mm > self.thresholds.rain_mm)
            {
                factors.push(RiskFactor {
                    kind: RiskFactorKind::Rain,
                    severity: Severity::High,
                });
            }
            if obs.condition == "Snow"
                && obs.snow_1h.is_some_and(|mm| mm > self.thresholds.snow_mm)
            {
                factors.push(RiskFactor {
                    kind: RiskFactorKind::Snow,
                    severity: Severity::High,
                });
            }
            if obs.visibility < self.thresholds.visibility_m {
                factors.push(RiskFactor {
                    kind: RiskFactorKind::Visibility,
                    severity: Severity::High,
                });
            }
        }

        let severity = if factors.iter().any(|f| f.severity == Severity::High) {
            Severity::High
        } else if !factors.is_empty() {
            Severity::Medium
        } else {
            Severity::Low
        };

        debug!(
            "Classified {} observations into {} risk factors, overall severity {:?}",
            observations.len(),
            factors.len(),
            severity
        );

        let details = factors
            .iter()
            .map(|factor| RiskDetail {
                icon: factor.kind.icon().to_string(),
                text: factor.kind.description().to_string(),
            })
            .collect();

        RouteRiskReport {
            severity,
            summary: severity.summary().to_string(),
            factors,
            details,
            generated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn calm_observation() -> WeatherObservation {
        WeatherObservation {
            temperature: 15.0,
            humidity: 50,
            wind_speed: 5.0,
            rain_1h: None,
            snow_1h: None,
            visibility: 10_000.0,
            condition: "Clear".to_string(),
        }
    }

    fn classifier() -> RiskClassifier {
        RiskClassifier::new(WeatherThresholds::default())
    }

    #[test]
    fn test_high_wind_yields_single_wind_factor() {
        let mut obs = calm_observation();
        obs.wind_speed = 25.0;

        let report = classifier().analyze(&[obs]);
        assert_eq!(report.severity, Severity::High);
        assert_eq!(report.factors.len(), 1);
        assert_eq!(report.factors[0].kind, RiskFactorKind::Wind);
        assert_eq!(report.summary, Severity::High.summary());
    }

    #[test]
    fn test_empty_observations_classify_as_low() {
        let report = classifier().analyze(&[]);
        assert_eq!(report.severity, Severity::Low);
        assert!(report.factors.is_empty());
        assert!(report.details.is_empty());
        assert_eq!(report.summary, Severity::Low.summary());
    }

    #[test]
    fn test_one_breach_among_calm_points_taints_route() {
        let calm = calm_observation();
        let mut windy = calm_observation();
        windy.wind_speed = 25.0;
        let observations = vec![calm.clone(), windy, calm];

        let report = classifier().analyze(&observations);
        assert_eq!(report.severity, Severity::High);
        assert_eq!(report.factors.len(), 1);
        assert_eq!(report.factors[0].kind, RiskFactorKind::Wind);
    }

    #[test]
    fn test_rain_requires_matching_condition() {
        let mut obs = calm_observation();
        obs.rain_1h = Some(80.0);
        obs.condition = "Clouds".to_string();
        let report = classifier().analyze(&[obs.clone()]);
        assert!(report.factors.is_empty());

        obs.condition = "Rain".to_string();
        let report = classifier().analyze(&[obs]);
        assert_eq!(report.factors.len(), 1);
        assert_eq!(report.factors[0].kind, RiskFactorKind::Rain);
    }

    #[test]
    fn test_snow_requires_matching_condition() {
        let mut obs = calm_observation();
        obs.snow_1h = Some(15.0);
        obs.condition = "Snow".to_string();
        let report = classifier().analyze(&[obs]);
        assert_eq!(report.factors.len(), 1);
        assert_eq!(report.factors[0].kind, RiskFactorKind::Snow);
    }

    #[test]
    fn test_low_visibility_breach() {
        let mut obs = calm_observation();
        obs.visibility = 500.0;
        let report = classifier().analyze(&[obs]);
        assert_eq!(report.severity, Severity::High);
        assert_eq!(report.factors[0].kind, RiskFactorKind::Visibility);
        // Visibility uses the generic icon and sentence
        assert_eq!(report.details[0].icon, "⚠");
        assert_eq!(report.details[0].text, "Potential hazardous conditions");
    }

    #[rstest]
    #[case("high", "Route conditions are potentially dangerous. Consider postponing travel.")]
    #[case("medium", "Use caution when traveling on this route.")]
    #[case("low", "Route conditions are generally safe for travel.")]
    #[case("unknown", "Unable to determine route conditions.")]
    fn test_summary_for_label(#[case] label: &str, #[case] expected: &str) {
        assert_eq!(summary_for_label(label), expected);
    }
}
