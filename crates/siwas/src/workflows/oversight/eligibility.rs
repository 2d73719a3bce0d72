//! The eligibility gate: pure predicates deciding which child-entity
//! operations a package's current state permits.
//!
//! Services re-evaluate these inside the store's write closure so the answer
//! reflects the package at commit time, never a cached snapshot.

use serde::{Deserialize, Serialize};

use super::domain::{AuditFinding, FindingStatus, FindingVariant, Package, PackageStatus};

/// Names the gate rule that refused an operation, so callers can explain why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityPredicate {
    Document,
    Finding,
    Monitoring,
}

impl EligibilityPredicate {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Document => "document-eligible",
            Self::Finding => "finding-eligible",
            Self::Monitoring => "monitoring-eligible",
        }
    }
}

const fn actively_procured(status: PackageStatus) -> bool {
    matches!(status, PackageStatus::Published | PackageStatus::OnProgress)
}

/// Documents may only attach while the package is actively being
/// procured or executed.
pub fn document_eligible(package: &Package) -> bool {
    actively_procured(package.status)
}

/// Findings are meaningful in the same window as documents.
pub fn finding_eligible(package: &Package) -> bool {
    actively_procured(package.status)
}

/// Monitoring presupposes that at least one internal audit cycle has
/// concluded: the package must be active and carry a resolved internal
/// finding.
pub fn monitoring_eligible(package: &Package, findings: &[&AuditFinding]) -> bool {
    actively_procured(package.status)
        && findings.iter().any(|finding| {
            finding.variant == FindingVariant::Internal
                && finding.status == FindingStatus::Resolved
        })
}

/// Order-preserving candidate set for creation forms. Pure and restartable.
pub fn eligible_packages<'a, I, P>(packages: I, permit: P) -> Vec<&'a Package>
where
    I: IntoIterator<Item = &'a Package>,
    P: Fn(&Package) -> bool,
{
    packages
        .into_iter()
        .filter(|package| permit(package))
        .collect()
}
