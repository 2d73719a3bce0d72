use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for procurement packages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PackageId(pub String);

/// Identifier wrapper for attached documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentId(pub String);

/// Identifier wrapper for audit findings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FindingId(pub String);

/// Identifier wrapper for monitoring entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonitoringId(pub String);

/// Identity of the person performing an operation. Always passed explicitly
/// into service calls; the core never reads a session-global user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageCategory {
    Construction,
    Goods,
    ConsultingServices,
    OtherServices,
}

impl PackageCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Construction => "Construction",
            Self::Goods => "Goods",
            Self::ConsultingServices => "Consulting Services",
            Self::OtherServices => "Other Services",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcurementMethod {
    Tender,
    FastTender,
    EPurchasing,
    DirectProcurement,
    DirectAppointment,
    Contest,
}

impl ProcurementMethod {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tender => "Tender",
            Self::FastTender => "Fast Tender",
            Self::EPurchasing => "E-Purchasing",
            Self::DirectProcurement => "Direct Procurement",
            Self::DirectAppointment => "Direct Appointment",
            Self::Contest => "Contest",
        }
    }
}

/// Package lifecycle status. Transition rules live in `lifecycle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageStatus {
    Draft,
    Published,
    OnProgress,
    Completed,
    Cancelled,
}

impl PackageStatus {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Draft,
            Self::Published,
            Self::OnProgress,
            Self::Completed,
            Self::Cancelled,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Published => "Published",
            Self::OnProgress => "On Progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

/// The central entity: one procurement undertaking tracked end to end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub id: PackageId,
    pub code: String,
    pub plan_reference: String,
    pub name: String,
    pub category: PackageCategory,
    pub value: u64,
    pub method: ProcurementMethod,
    pub status: PackageStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Day count between start and end; present iff both dates are set.
    pub duration_days: Option<i64>,
    pub created_by: ActorId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    Planning,
    Tender,
    Contract,
    Handover,
    ProgressReport,
    Other,
}

impl DocumentCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Planning => "Planning",
            Self::Tender => "Tender",
            Self::Contract => "Contract",
            Self::Handover => "Handover",
            Self::ProgressReport => "Progress Report",
            Self::Other => "Other",
        }
    }
}

/// Supporting document metadata. The file itself lives in an opaque blob
/// store addressed by `storage_key`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub package_id: PackageId,
    pub name: String,
    pub category: DocumentCategory,
    pub storage_key: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub uploaded_by: ActorId,
    pub uploaded_at: DateTime<Utc>,
}

/// Which audit body raised a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingVariant {
    /// Raised by the organization's internal inspectorate.
    Internal,
    /// Raised by the external state audit body.
    External,
}

impl FindingVariant {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Internal => "Internal Inspectorate",
            Self::External => "External Audit Body",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingCategory {
    Administrative,
    Financial,
    PhysicalWork,
    Compliance,
    Other,
}

impl FindingCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Administrative => "Administrative",
            Self::Financial => "Financial",
            Self::PhysicalWork => "Physical Work",
            Self::Compliance => "Compliance",
            Self::Other => "Other",
        }
    }
}

/// Severity is ordered and immutable once a finding exists; corrections are
/// recorded as new findings so the audit trail stays intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FindingSeverity {
    pub const fn ordered() -> [Self; 4] {
        [Self::Low, Self::Medium, Self::High, Self::Critical]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

/// Finding resolution status. Transition rules live in `lifecycle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingStatus {
    New,
    InProgress,
    Resolved,
    Deferred,
}

impl FindingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
            Self::Deferred => "Deferred",
        }
    }
}

/// Audit observation against a package, raised by either audit body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditFinding {
    pub id: FindingId,
    pub finding_number: String,
    pub package_id: PackageId,
    pub variant: FindingVariant,
    pub category: FindingCategory,
    pub description: String,
    pub severity: FindingSeverity,
    pub status: FindingStatus,
    pub auditor: ActorId,
    pub responsible_party: ActorId,
    pub raised_on: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitoringCategory {
    Physical,
    Financial,
    Administrative,
    Other,
}

impl MonitoringCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Physical => "Physical",
            Self::Financial => "Financial",
            Self::Administrative => "Administrative",
            Self::Other => "Other",
        }
    }
}

/// Monitoring health indicator. The non-terminal three interchange freely;
/// transition rules live in `lifecycle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitoringStatus {
    OnTrack,
    Delayed,
    Critical,
    Completed,
}

impl MonitoringStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::OnTrack => "On Track",
            Self::Delayed => "Delayed",
            Self::Critical => "Critical",
            Self::Completed => "Completed",
        }
    }
}

/// Periodic progress check-in against a package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringEntry {
    pub id: MonitoringId,
    pub package_id: PackageId,
    pub category: MonitoringCategory,
    pub period: String,
    pub status: MonitoringStatus,
    pub progress: u8,
    pub issues: String,
    pub recommendation: String,
    pub monitored_on: NaiveDate,
    pub recorded_by: ActorId,
}

/// Caller input for creating a package.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PackageDraft {
    pub code: String,
    pub plan_reference: String,
    pub name: String,
    pub category: PackageCategory,
    pub value: u64,
    pub method: ProcurementMethod,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Partial update for package detail fields. Status changes go through the
/// lifecycle machine instead.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PackageUpdate {
    pub name: Option<String>,
    pub category: Option<PackageCategory>,
    pub value: Option<u64>,
    pub method: Option<ProcurementMethod>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Caller input for attaching a document to a package.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocumentDraft {
    pub name: String,
    pub category: DocumentCategory,
    pub storage_key: String,
    pub size_bytes: u64,
    pub mime_type: String,
}

/// Caller input for raising an audit finding.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FindingDraft {
    pub finding_number: String,
    pub category: FindingCategory,
    pub description: String,
    pub severity: FindingSeverity,
    pub responsible_party: ActorId,
    pub raised_on: NaiveDate,
}

/// Caller input for recording a monitoring entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MonitoringDraft {
    pub category: MonitoringCategory,
    pub period: String,
    pub progress: u8,
    #[serde(default)]
    pub issues: String,
    #[serde(default)]
    pub recommendation: String,
    pub monitored_on: NaiveDate,
}

/// Partial update for a monitoring entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MonitoringUpdate {
    pub status: Option<MonitoringStatus>,
    pub progress: Option<u8>,
    pub issues: Option<String>,
    pub recommendation: Option<String>,
}

/// Day count between the two dates, defined only when both are present.
pub(crate) fn duration_days(
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Option<i64> {
    match (start_date, end_date) {
        (Some(start), Some(end)) => Some((end - start).num_days()),
        _ => None,
    }
}
