// Sensor report domain model
use super::metric::{Metric, MetricEntry, RawAverages};
use super::scoring::MetricScorer;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Averaging window a summary score is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Window {
    Today,
    Weekly,
}

impl Window {
    pub fn label(&self) -> &'static str {
        match self {
            Window::Today => "Today",
            Window::Weekly => "Weekly",
        }
    }
}

/// Coarse quality label shown next to a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    Good,
    Moderate,
    Poor,
    Bad,
}

impl Status {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Status::Good
        } else if score >= 60.0 {
            Status::Moderate
        } else if score >= 40.0 {
            Status::Poor
        } else {
            Status::Bad
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Status::Good => "#32a1ff",
            Status::Moderate => "#00c73c",
            Status::Poor => "#fda60e",
            Status::Bad => "#e64746",
        }
    }
}

/// Mean score across the page's metrics, rounded to one decimal.
///
/// `None` when no metric contributed, so an empty report never yields NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AggregateScore(Option<f64>);

impl AggregateScore {
    pub fn mean<I>(scores: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let (sum, count) = scores
            .into_iter()
            .fold((0.0, 0usize), |(sum, count), score| (sum + score, count + 1));
        if count == 0 {
            return AggregateScore(None);
        }
        let mean = sum / count as f64;
        AggregateScore(Some((mean * 10.0).round() / 10.0))
    }

    pub fn value(&self) -> Option<f64> {
        self.0
    }

    pub fn status(&self) -> Option<Status> {
        self.0.map(Status::from_score)
    }
}

/// Identifies one sensor page request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SensorQuery {
    pub user_id: String,
    pub sensor_id: String,
    pub date: NaiveDate,
}

impl SensorQuery {
    pub fn new(user_id: impl Into<String>, sensor_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            user_id: user_id.into(),
            sensor_id: sensor_id.into(),
            date,
        }
    }
}

/// Scored metrics and window aggregates for one selected date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorReport {
    pub date: NaiveDate,
    pub entries: Vec<MetricEntry>,
    pub today: AggregateScore,
    pub weekly: AggregateScore,
}

impl SensorReport {
    /// Scores every metric and aggregates both windows.
    ///
    /// Only an optional channel (PM1.0) with no daily value is left out. Any
    /// other unreported value keeps its row, scores zero and still counts
    /// towards both window means.
    pub fn build(averages: &RawAverages, date: NaiveDate, scorer: &dyn MetricScorer) -> Self {
        let month0 = date.month0();
        let score = |metric: Metric, value: Option<f64>| {
            value.map_or(0.0, |v| scorer.score(metric, v, month0))
        };

        let entries: Vec<MetricEntry> = Metric::ALL
            .iter()
            .filter_map(|&metric| {
                let avg = averages.day.value(metric);
                if avg.is_none() && metric.is_optional_channel() {
                    return None;
                }
                let week_avg = averages.week.value(metric);
                Some(MetricEntry {
                    metric,
                    name: metric.label(),
                    avg,
                    week_avg,
                    score: score(metric, avg),
                    week_score: score(metric, week_avg),
                    unit: metric.unit(),
                })
            })
            .collect();

        let today = AggregateScore::mean(entries.iter().map(|e| e.score));
        let weekly = AggregateScore::mean(entries.iter().map(|e| e.week_score));

        Self {
            date,
            entries,
            today,
            weekly,
        }
    }

    pub fn score(&self, window: Window) -> AggregateScore {
        match window {
            Window::Today => self.today,
            Window::Weekly => self.weekly,
        }
    }
}
