// Sensor entry session - Date selection driven fetch state
use crate::application::report_service::ReportService;
use crate::domain::report::{SensorQuery, SensorReport};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// What the sensor page should render.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Loading,
    Error,
    Ready(SensorReport),
}

/// Issued by [`SensorEntrySession::begin`]; resolving it commits only if no
/// newer selection was made in the meantime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub date: Option<NaiveDate>,
    pub state: FetchState,
}

struct SessionInner {
    generation: u64,
    date: Option<NaiveDate>,
    state: FetchState,
}

/// Fetch state of one (user, sensor) page.
pub struct SensorEntrySession {
    user_id: String,
    sensor_id: String,
    service: ReportService,
    timeout: Duration,
    inner: RwLock<SessionInner>,
}

impl SensorEntrySession {
    pub fn new(
        user_id: impl Into<String>,
        sensor_id: impl Into<String>,
        service: ReportService,
        timeout: Duration,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            sensor_id: sensor_id.into(),
            service,
            timeout,
            inner: RwLock::new(SessionInner {
                generation: 0,
                date: None,
                state: FetchState::Loading,
            }),
        }
    }

    /// Records a new date selection and enters `Loading`.
    pub async fn begin(&self, date: NaiveDate) -> Ticket {
        let mut inner = self.inner.write().await;
        inner.generation += 1;
        inner.date = Some(date);
        inner.state = FetchState::Loading;
        Ticket {
            generation: inner.generation,
            date,
        }
    }

    /// Fetches the report for a ticket and commits the outcome.
    ///
    /// Returns `false` when the ticket was superseded and the result dropped.
    pub async fn resolve(&self, ticket: Ticket) -> bool {
        let query = SensorQuery::new(&self.user_id, &self.sensor_id, ticket.date);
        let fetch = tokio::time::timeout(self.timeout, self.service.load_report(&query));
        let outcome = match fetch.await {
            Ok(Ok(report)) => FetchState::Ready(report),
            Ok(Err(e)) => {
                tracing::warn!(
                    "Fetching sensor {} for {} failed: {}",
                    self.sensor_id,
                    ticket.date,
                    e
                );
                FetchState::Error
            }
            Err(_) => {
                tracing::warn!(
                    "Fetching sensor {} for {} timed out after {:?}",
                    self.sensor_id,
                    ticket.date,
                    self.timeout
                );
                FetchState::Error
            }
        };

        let mut inner = self.inner.write().await;
        if inner.generation != ticket.generation {
            tracing::debug!(
                "Discarding stale result for sensor {} on {} (generation {} < {})",
                self.sensor_id,
                ticket.date,
                ticket.generation,
                inner.generation
            );
            return false;
        }
        inner.state = outcome;
        true
    }

    pub async fn select_date(&self, date: NaiveDate) -> bool {
        let ticket = self.begin(date).await;
        self.resolve(ticket).await
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let inner = self.inner.read().await;
        SessionSnapshot {
            date: inner.date,
            state: inner.state.clone(),
        }
    }
}

struct RegistryEntry {
    session: Arc<SensorEntrySession>,
    last_selected: u64,
}

struct RegistryInner {
    clock: u64,
    entries: HashMap<(String, String), RegistryEntry>,
}

/// Sessions keyed by (user, sensor), capped at `capacity`.
///
/// When full, the least recently selected session is evicted to make room.
pub struct SessionRegistry {
    service: ReportService,
    timeout: Duration,
    capacity: usize,
    inner: RwLock<RegistryInner>,
}

impl SessionRegistry {
    pub fn new(service: ReportService, timeout: Duration, capacity: usize) -> Self {
        Self {
            service,
            timeout,
            capacity: capacity.max(1),
            inner: RwLock::new(RegistryInner {
                clock: 0,
                entries: HashMap::new(),
            }),
        }
    }

    pub async fn find(&self, user_id: &str, sensor_id: &str) -> Option<Arc<SensorEntrySession>> {
        let key = (user_id.to_string(), sensor_id.to_string());
        let inner = self.inner.read().await;
        inner.entries.get(&key).map(|entry| entry.session.clone())
    }

    /// Starts a date selection, creating the session if needed.
    ///
    /// The ticket still has to be resolved by the caller.
    pub async fn select(
        &self,
        user_id: &str,
        sensor_id: &str,
        date: NaiveDate,
    ) -> (Arc<SensorEntrySession>, Ticket) {
        let key = (user_id.to_string(), sensor_id.to_string());
        let mut inner = self.inner.write().await;
        inner.clock += 1;
        let now = inner.clock;

        if !inner.entries.contains_key(&key) && inner.entries.len() >= self.capacity {
            let oldest = inner
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_selected)
                .map(|(key, _)| key.clone());
            if let Some(oldest) = oldest {
                tracing::debug!("Evicting session for sensor {} of user {}", oldest.1, oldest.0);
                inner.entries.remove(&oldest);
            }
        }

        let entry = inner.entries.entry(key).or_insert_with(|| RegistryEntry {
            session: Arc::new(SensorEntrySession::new(
                user_id,
                sensor_id,
                self.service.clone(),
                self.timeout,
            )),
            last_selected: now,
        });
        entry.last_selected = now;

        let session = entry.session.clone();
        let ticket = session.begin(date).await;
        (session, ticket)
    }
}
