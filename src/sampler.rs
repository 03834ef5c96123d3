//! Route step sampling for expensive per-point lookups

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{Coordinate, RouteStep, WeatherObservation};

/// A sampled route point resolved to a place name and its weather
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SampledCity {
    /// Resolved place name ("Unknown Location" when resolution failed)
    pub name: String,
    /// Weather at the sampled point, absent when the lookup failed
    pub weather: Option<WeatherObservation>,
    pub coordinate: Coordinate,
}

/// Select every `stride`-th step for per-point lookups
///
/// Fixed stride (indices 0, stride, 2*stride, ...), not adaptive to route
/// length or step density.
#[must_use]
pub fn sample_steps(steps: &[RouteStep], stride: usize) -> Vec<&RouteStep> {
    steps.iter().step_by(stride.max(1)).collect()
}

/// Collapse cities sharing a resolved place name, keeping the first
///
/// Insertion order is preserved so display order matches travel order.
#[must_use]
pub fn dedup_cities(cities: Vec<SampledCity>) -> Vec<SampledCity> {
    let mut seen: HashSet<String> = HashSet::new();
    cities
        .into_iter()
        .filter(|city| seen.insert(city.name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn steps(count: usize) -> Vec<RouteStep> {
        (0..count)
            .map(|i| RouteStep::new(Coordinate::new(i as f64 * 0.01, 40.0)))
            .collect()
    }

    #[rstest]
    #[case(12, vec![0, 5, 10])]
    #[case(5, vec![0])]
    #[case(6, vec![0, 5])]
    #[case(0, vec![])]
    fn test_sample_every_fifth_step(#[case] count: usize, #[case] expected: Vec<usize>) {
        let all = steps(count);
        let sampled = sample_steps(&all, 5);
        let indices: Vec<usize> = sampled
            .iter()
            .map(|s| (s.location.lon / 0.01).round() as usize)
            .collect();
        assert_eq!(indices, expected);
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let cities = vec![
            SampledCity {
                name: "Newark".to_string(),
                weather: None,
                coordinate: Coordinate::new(-74.17, 40.73),
            },
            SampledCity {
                name: "Newark".to_string(),
                weather: None,
                coordinate: Coordinate::new(-74.20, 40.70),
            },
            SampledCity {
                name: "Elizabeth".to_string(),
                weather: None,
                coordinate: Coordinate::new(-74.21, 40.66),
            },
        ];
        let unique = dedup_cities(cities);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].name, "Newark");
        assert_eq!(unique[0].coordinate, Coordinate::new(-74.17, 40.73));
        assert_eq!(unique[1].name, "Elizabeth");
    }
}
