use crate::adapters::InMemoryStore;
use crate::domain::config::NotebookConfig;
use crate::domain::entities::Timestamp;
use crate::ports::outbound::TimeSource;
use crate::service::{NotebookDependencies, NotebookService};
use chrono::{Duration, TimeZone, Utc};
use parking_lot::Mutex;
use std::sync::Arc;

/// Clock that only moves when told to. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct ManualTimeSource {
    now: Arc<Mutex<Timestamp>>,
}

impl ManualTimeSource {
    pub fn new() -> Self {
        Self::starting_at(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap())
    }

    pub fn starting_at(at: Timestamp) -> Self {
        Self {
            now: Arc::new(Mutex::new(at)),
        }
    }

    pub fn advance_secs(&self, secs: i64) {
        *self.now.lock() += Duration::seconds(secs);
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> Timestamp {
        *self.now.lock()
    }
}

pub type TestService = NotebookService<Arc<InMemoryStore>, ManualTimeSource>;

/// A service over a shared in-memory store and a manual clock.
///
/// The returned store and clock are the ones the service uses.
pub fn make_test_service_with(
    config: NotebookConfig,
) -> (TestService, Arc<InMemoryStore>, ManualTimeSource) {
    let store = Arc::new(InMemoryStore::new());
    let clock = ManualTimeSource::new();
    let service = NotebookService::new(
        NotebookDependencies {
            store: Arc::clone(&store),
            time_source: clock.clone(),
        },
        config,
    );
    (service, store, clock)
}

pub fn make_test_service() -> (TestService, Arc<InMemoryStore>, ManualTimeSource) {
    make_test_service_with(NotebookConfig::default())
}
