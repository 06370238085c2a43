// Per-metric quality scoring
use super::metric::Metric;

/// Maps a raw reading to a 0-100 quality score.
///
/// `month0` is the zero-based month of the selected date. Only the comfort
/// metrics (temperature, humidity) look at it.
pub trait MetricScorer: Send + Sync {
    fn score(&self, metric: Metric, value: f64, month0: u32) -> f64;
}

/// Upper bound (inclusive) and the score awarded at or below it.
type Band = (f64, f64);

const CO2_BANDS: &[Band] = &[
    (450.0, 100.0),
    (700.0, 85.0),
    (1000.0, 70.0),
    (1500.0, 50.0),
    (2000.0, 30.0),
];
const PM10_BANDS: &[Band] = &[(30.0, 100.0), (80.0, 70.0), (150.0, 40.0)];
const PM25_BANDS: &[Band] = &[(15.0, 100.0), (35.0, 70.0), (75.0, 40.0)];
const TVOC_BANDS: &[Band] = &[(220.0, 100.0), (660.0, 70.0), (2200.0, 40.0)];

// Distance outside the comfort range
const TEMPERATURE_DRIFT_BANDS: &[Band] = &[(0.0, 100.0), (1.0, 85.0), (3.0, 70.0), (5.0, 40.0)];
const HUMIDITY_DRIFT_BANDS: &[Band] = &[(0.0, 100.0), (5.0, 85.0), (10.0, 70.0), (20.0, 40.0)];

const FLOOR_SCORE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Season {
    Summer,
    Winter,
    Mild,
}

impl Season {
    fn of(month0: u32) -> Self {
        match month0 {
            5..=8 => Season::Summer,
            11 | 0 | 1 => Season::Winter,
            _ => Season::Mild,
        }
    }

    fn temperature_range(&self) -> (f64, f64) {
        match self {
            Season::Summer => (24.0, 27.0),
            Season::Winter => (18.0, 22.0),
            Season::Mild => (20.0, 24.0),
        }
    }

    fn humidity_range(&self) -> (f64, f64) {
        match self {
            Season::Summer => (40.0, 60.0),
            Season::Winter => (30.0, 50.0),
            Season::Mild => (35.0, 55.0),
        }
    }
}

/// Default scoring tables used by the dashboard.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardScorer;

impl MetricScorer for StandardScorer {
    fn score(&self, metric: Metric, value: f64, month0: u32) -> f64 {
        let season = Season::of(month0);
        match metric {
            Metric::Temperature => {
                banded(drift(value, season.temperature_range()), TEMPERATURE_DRIFT_BANDS)
            }
            Metric::Humidity => banded(drift(value, season.humidity_range()), HUMIDITY_DRIFT_BANDS),
            Metric::Co2 => banded(value, CO2_BANDS),
            Metric::Pm10 => banded(value, PM10_BANDS),
            // PM1.0 has no table of its own and is graded like PM2.5
            Metric::Pm01 | Metric::Pm25 => banded(value, PM25_BANDS),
            Metric::Tvoc => banded(value, TVOC_BANDS),
        }
    }
}

fn banded(value: f64, bands: &[Band]) -> f64 {
    bands
        .iter()
        .find(|(upper, _)| value <= *upper)
        .map(|(_, score)| *score)
        .unwrap_or(FLOOR_SCORE)
}

fn drift(value: f64, (low, high): (f64, f64)) -> f64 {
    if value < low {
        low - value
    } else if value > high {
        value - high
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OCTOBER: u32 = 9;
    const JULY: u32 = 6;
    const JANUARY: u32 = 0;

    #[test]
    fn test_co2_bands() {
        let scorer = StandardScorer;
        assert_eq!(scorer.score(Metric::Co2, 420.0, OCTOBER), 100.0);
        assert_eq!(scorer.score(Metric::Co2, 800.0, OCTOBER), 70.0);
        assert_eq!(scorer.score(Metric::Co2, 1000.0, OCTOBER), 70.0);
        assert_eq!(scorer.score(Metric::Co2, 5000.0, OCTOBER), 10.0);
    }

    #[test]
    fn test_particulate_bands() {
        let scorer = StandardScorer;
        assert_eq!(scorer.score(Metric::Pm10, 30.0, OCTOBER), 100.0);
        assert_eq!(scorer.score(Metric::Pm10, 81.0, OCTOBER), 40.0);
        assert_eq!(scorer.score(Metric::Pm25, 12.0, OCTOBER), 100.0);
        assert_eq!(scorer.score(Metric::Pm25, 40.0, OCTOBER), 40.0);
        assert_eq!(
            scorer.score(Metric::Pm01, 20.0, OCTOBER),
            scorer.score(Metric::Pm25, 20.0, OCTOBER)
        );
        assert_eq!(scorer.score(Metric::Tvoc, 150.0, OCTOBER), 100.0);
        assert_eq!(scorer.score(Metric::Tvoc, 3000.0, OCTOBER), 10.0);
    }

    #[test]
    fn test_temperature_depends_on_season() {
        let scorer = StandardScorer;
        assert_eq!(scorer.score(Metric::Temperature, 23.0, OCTOBER), 100.0);
        // 23 is one degree below the summer range
        assert_eq!(scorer.score(Metric::Temperature, 23.0, JULY), 85.0);
        assert_eq!(scorer.score(Metric::Temperature, 23.0, JANUARY), 85.0);
        assert_eq!(scorer.score(Metric::Temperature, 30.0, JANUARY), 10.0);
    }

    #[test]
    fn test_humidity_depends_on_season() {
        let scorer = StandardScorer;
        assert_eq!(scorer.score(Metric::Humidity, 45.0, OCTOBER), 100.0);
        assert_eq!(scorer.score(Metric::Humidity, 58.0, JANUARY), 70.0);
        assert_eq!(scorer.score(Metric::Humidity, 58.0, JULY), 100.0);
        assert_eq!(scorer.score(Metric::Humidity, 5.0, JULY), 10.0);
    }
}
