// Sensor metric domain models
use serde::{Deserialize, Deserializer, Serialize};

/// Legacy wire value some backends still send for a channel with no sensor.
const ABSENT_SENTINEL: f64 = -999.0;

/// Physical quantities tracked per sensor, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Temperature,
    Humidity,
    Co2,
    Pm01,
    Pm10,
    Pm25,
    Tvoc,
}

impl Metric {
    pub const ALL: [Metric; 7] = [
        Metric::Temperature,
        Metric::Humidity,
        Metric::Co2,
        Metric::Pm01,
        Metric::Pm10,
        Metric::Pm25,
        Metric::Tvoc,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Temperature => "Temperature",
            Metric::Humidity => "Humidity",
            Metric::Co2 => "CO2",
            Metric::Pm01 => "PM1.0",
            Metric::Pm10 => "PM10",
            Metric::Pm25 => "PM2.5",
            Metric::Tvoc => "TVOC",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Temperature => "°C",
            Metric::Humidity => "%",
            Metric::Co2 => "ppm",
            Metric::Pm01 | Metric::Pm10 | Metric::Pm25 => "㎍/m³",
            Metric::Tvoc => "ppb",
        }
    }

    /// PM1.0 is an optional sensor; boards without it report nothing or a
    /// flat zero, and the channel is left off the page.
    pub fn is_optional_channel(&self) -> bool {
        matches!(self, Metric::Pm01)
    }
}

/// One averaging window as reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Readings {
    #[serde(default, deserialize_with = "reading")]
    pub co2: Option<f64>,
    #[serde(default, deserialize_with = "reading")]
    pub humi: Option<f64>,
    #[serde(default, deserialize_with = "reading")]
    pub pm01: Option<f64>,
    #[serde(default, deserialize_with = "reading")]
    pub pm10: Option<f64>,
    #[serde(default, deserialize_with = "reading")]
    pub pm25: Option<f64>,
    #[serde(default, deserialize_with = "reading")]
    pub temp: Option<f64>,
    #[serde(default, deserialize_with = "reading")]
    pub tvoc: Option<f64>,
}

impl Readings {
    /// Reported value for a metric, `None` when the channel is absent.
    pub fn value(&self, metric: Metric) -> Option<f64> {
        let raw = match metric {
            Metric::Temperature => self.temp,
            Metric::Humidity => self.humi,
            Metric::Co2 => self.co2,
            Metric::Pm01 => self.pm01,
            Metric::Pm10 => self.pm10,
            Metric::Pm25 => self.pm25,
            Metric::Tvoc => self.tvoc,
        };
        raw.filter(|v| !(metric.is_optional_channel() && *v == 0.0))
    }
}

fn reading<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.filter(|v| *v != ABSENT_SENTINEL))
}

/// Daily and trailing-week averages for one (user, sensor, date).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawAverages {
    #[serde(rename = "dayAvg")]
    pub day: Readings,
    #[serde(rename = "weekAvg")]
    pub week: Readings,
}

/// A display row for one physical quantity.
///
/// A value the backend did not report stays `None` and scores zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricEntry {
    #[serde(skip)]
    pub metric: Metric,
    pub name: &'static str,
    pub avg: Option<f64>,
    pub week_avg: Option<f64>,
    pub score: f64,
    pub week_score: f64,
    pub unit: &'static str,
}
