// View models rendered by the sensor page
use crate::application::entry_session::{FetchState, SessionSnapshot};
use crate::domain::metric::MetricEntry;
use crate::domain::report::{SensorReport, Status, Window};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SummaryDisplay {
    Loading,
    Error,
    /// Ready, but no metric was reported for the window
    NoData,
    Score {
        value: f64,
        status: Status,
        color: &'static str,
    },
}

/// One "Today" / "Weekly" summary card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCard {
    pub window: Window,
    pub title: String,
    pub display: SummaryDisplay,
}

impl SummaryCard {
    fn new(window: Window, display: SummaryDisplay) -> Self {
        Self {
            window,
            title: format!("{} Sensor Score", window.label()),
            display,
        }
    }

    fn for_report(window: Window, report: &SensorReport) -> Self {
        let score = report.score(window);
        let display = match (score.value(), score.status()) {
            (Some(value), Some(status)) => SummaryDisplay::Score {
                value,
                status,
                color: status.color(),
            },
            _ => SummaryDisplay::NoData,
        };
        Self::new(window, display)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewState {
    Loading,
    Error,
    Ready,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorEntryView {
    pub date: Option<NaiveDate>,
    pub state: ViewState,
    pub summaries: Vec<SummaryCard>,
    pub entries: Vec<MetricEntry>,
}

impl SensorEntryView {
    pub fn from_state(date: Option<NaiveDate>, state: &FetchState) -> Self {
        let windows = [Window::Today, Window::Weekly];
        match state {
            FetchState::Loading => Self {
                date,
                state: ViewState::Loading,
                summaries: windows
                    .iter()
                    .map(|w| SummaryCard::new(*w, SummaryDisplay::Loading))
                    .collect(),
                entries: Vec::new(),
            },
            FetchState::Error => Self {
                date,
                state: ViewState::Error,
                summaries: windows
                    .iter()
                    .map(|w| SummaryCard::new(*w, SummaryDisplay::Error))
                    .collect(),
                entries: Vec::new(),
            },
            FetchState::Ready(report) => Self {
                date,
                state: ViewState::Ready,
                summaries: windows
                    .iter()
                    .map(|w| SummaryCard::for_report(*w, report))
                    .collect(),
                entries: report.entries.clone(),
            },
        }
    }
}

impl From<SessionSnapshot> for SensorEntryView {
    fn from(snapshot: SessionSnapshot) -> Self {
        Self::from_state(snapshot.date, &snapshot.state)
    }
}
