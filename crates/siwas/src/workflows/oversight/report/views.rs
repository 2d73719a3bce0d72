use serde::Serialize;

use super::super::domain::{FindingSeverity, PackageStatus};

#[derive(Debug, Clone, Serialize)]
pub struct StatusBreakdownEntry {
    pub status: PackageStatus,
    pub status_label: &'static str,
    pub count: usize,
    pub total_value: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeverityBreakdownEntry {
    pub severity: FindingSeverity,
    pub severity_label: &'static str,
    pub count: usize,
}

/// Cross-entity rollup served to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct OversightSummary {
    pub total_packages: usize,
    pub packages_by_status: Vec<StatusBreakdownEntry>,
    pub findings_by_severity: Vec<SeverityBreakdownEntry>,
    /// Percentage of packages with at least one unresolved High or Critical
    /// finding.
    pub high_exposure_pct: f32,
}
