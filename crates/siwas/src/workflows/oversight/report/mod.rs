//! Read-only aggregation over the entity store.
//!
//! Every figure is recomputed on demand from a consistent snapshot; nothing
//! here mutates state or keeps materialized counters.

pub mod views;

use std::collections::HashMap;
use std::sync::Arc;

use super::domain::{FindingSeverity, FindingStatus, PackageStatus};
use super::error::OversightError;
use super::repository::{OversightState, OversightStore};
use views::{OversightSummary, SeverityBreakdownEntry, StatusBreakdownEntry};

/// Derive the cross-entity summary from a store snapshot. An empty store
/// yields zeros across the board.
pub fn build_summary(state: &OversightState) -> OversightSummary {
    let mut count_by_status: HashMap<PackageStatus, usize> = HashMap::new();
    let mut value_by_status: HashMap<PackageStatus, u64> = HashMap::new();
    for package in state.packages() {
        *count_by_status.entry(package.status).or_default() += 1;
        *value_by_status.entry(package.status).or_default() += package.value;
    }

    let by_status = PackageStatus::ordered()
        .into_iter()
        .map(|status| StatusBreakdownEntry {
            status,
            status_label: status.label(),
            count: count_by_status.get(&status).copied().unwrap_or(0),
            total_value: value_by_status.get(&status).copied().unwrap_or(0),
        })
        .collect();

    let mut count_by_severity: HashMap<FindingSeverity, usize> = HashMap::new();
    for finding in state.findings.values() {
        *count_by_severity.entry(finding.severity).or_default() += 1;
    }

    let by_severity = FindingSeverity::ordered()
        .into_iter()
        .map(|severity| SeverityBreakdownEntry {
            severity,
            severity_label: severity.label(),
            count: count_by_severity.get(&severity).copied().unwrap_or(0),
        })
        .collect();

    let total_packages = state.packages().count();
    let exposed = state
        .packages()
        .filter(|package| {
            state.findings_for(&package.id).iter().any(|finding| {
                finding.severity >= FindingSeverity::High
                    && finding.status != FindingStatus::Resolved
            })
        })
        .count();
    let high_exposure_pct = if total_packages == 0 {
        0.0
    } else {
        exposed as f32 * 100.0 / total_packages as f32
    };

    OversightSummary {
        total_packages,
        packages_by_status: by_status,
        findings_by_severity: by_severity,
        high_exposure_pct,
    }
}

/// Thin read-only wrapper so the router can serve the summary endpoint.
pub struct ReportService<R> {
    store: Arc<R>,
}

impl<R> ReportService<R>
where
    R: OversightStore,
{
    pub fn new(store: Arc<R>) -> Self {
        Self { store }
    }

    pub fn summary(&self) -> Result<OversightSummary, OversightError> {
        Ok(self.store.read(build_summary)?)
    }
}
