use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use siwas::workflows::oversight::{InMemoryOversightStore, OversightServices};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Wire one service bundle over a fresh in-memory store.
pub(crate) fn build_services() -> Arc<OversightServices<InMemoryOversightStore>> {
    let store = Arc::new(InMemoryOversightStore::new());
    Arc::new(OversightServices::new(store))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
