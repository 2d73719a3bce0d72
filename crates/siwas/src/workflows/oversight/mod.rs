//! Procurement oversight core.
//!
//! Packages move through a lifecycle state machine; documents, audit
//! findings, and monitoring entries hang off them behind an eligibility
//! gate. Every mutation goes through a workflow service that re-checks the
//! gate inside the store's write critical section.

pub mod domain;
pub mod eligibility;
pub mod error;
mod lifecycle;
pub mod report;
pub mod repository;
pub mod router;
pub mod services;

#[cfg(test)]
mod tests;

pub use domain::{
    ActorId, AuditFinding, Document, DocumentCategory, DocumentDraft, DocumentId, FindingCategory,
    FindingDraft, FindingId, FindingSeverity, FindingStatus, FindingVariant, MonitoringCategory,
    MonitoringDraft, MonitoringEntry, MonitoringId, MonitoringStatus, MonitoringUpdate, Package,
    PackageCategory, PackageDraft, PackageId, PackageStatus, PackageUpdate, ProcurementMethod,
};
pub use eligibility::{
    document_eligible, eligible_packages, finding_eligible, monitoring_eligible,
    EligibilityPredicate,
};
pub use error::{NaturalKey, OversightError};
pub use report::{build_summary, views::OversightSummary, ReportService};
pub use repository::{InMemoryOversightStore, OversightState, OversightStore, StoreError};
pub use router::{oversight_router, OversightServices};
pub use services::{
    AuditFindingService, DocumentAttachmentService, MonitoringService, PackageService,
};
