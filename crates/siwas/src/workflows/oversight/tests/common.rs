use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::oversight::domain::{
    ActorId, DocumentCategory, DocumentDraft, FindingCategory, FindingDraft, FindingSeverity,
    FindingStatus, FindingVariant, MonitoringCategory, MonitoringDraft, Package, PackageCategory,
    PackageDraft, PackageStatus, ProcurementMethod,
};
use crate::workflows::oversight::repository::{
    InMemoryOversightStore, OversightState, OversightStore, StoreError,
};
use crate::workflows::oversight::router::OversightServices;

pub(super) fn ppk() -> ActorId {
    ActorId("ppk.rahma".to_string())
}

pub(super) fn inspector() -> ActorId {
    ActorId("itwasda.sari".to_string())
}

pub(super) fn monitor() -> ActorId {
    ActorId("monev.bima".to_string())
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn package_draft(code: &str, plan_reference: &str) -> PackageDraft {
    PackageDraft {
        code: code.to_string(),
        plan_reference: plan_reference.to_string(),
        name: "District road rehabilitation".to_string(),
        category: PackageCategory::Construction,
        value: 500_000_000,
        method: ProcurementMethod::Tender,
        start_date: Some(date(2026, 2, 1)),
        end_date: Some(date(2026, 11, 30)),
    }
}

pub(super) fn document_draft(name: &str) -> DocumentDraft {
    DocumentDraft {
        name: name.to_string(),
        category: DocumentCategory::Contract,
        storage_key: format!("blob://siwas/{name}"),
        size_bytes: 48_213,
        mime_type: "application/pdf".to_string(),
    }
}

pub(super) fn finding_draft(finding_number: &str) -> FindingDraft {
    FindingDraft {
        finding_number: finding_number.to_string(),
        category: FindingCategory::Administrative,
        description: "Tender file missing the signed owner estimate".to_string(),
        severity: FindingSeverity::Medium,
        responsible_party: ppk(),
        raised_on: date(2026, 3, 10),
    }
}

pub(super) fn monitoring_draft(period: &str) -> MonitoringDraft {
    MonitoringDraft {
        category: MonitoringCategory::Physical,
        period: period.to_string(),
        progress: 35,
        issues: "Rainy season slowed earthworks".to_string(),
        recommendation: "Re-sequence drainage work ahead of paving".to_string(),
        monitored_on: date(2026, 4, 2),
    }
}

pub(super) type TestServices = OversightServices<InMemoryOversightStore>;

pub(super) fn build_services() -> (Arc<TestServices>, Arc<InMemoryOversightStore>) {
    let store = Arc::new(InMemoryOversightStore::new());
    let services = Arc::new(OversightServices::new(store.clone()));
    (services, store)
}

/// Create a package and walk it to the requested status.
pub(super) fn package_at(
    services: &TestServices,
    code: &str,
    plan_reference: &str,
    status: PackageStatus,
) -> Package {
    let package = services
        .packages
        .create(ppk(), package_draft(code, plan_reference))
        .expect("package creates");

    let path: &[PackageStatus] = match status {
        PackageStatus::Draft => &[],
        PackageStatus::Published => &[PackageStatus::Published],
        PackageStatus::OnProgress => &[PackageStatus::Published, PackageStatus::OnProgress],
        PackageStatus::Completed => &[
            PackageStatus::Published,
            PackageStatus::OnProgress,
            PackageStatus::Completed,
        ],
        PackageStatus::Cancelled => &[PackageStatus::Cancelled],
    };

    let mut current = package;
    for step in path {
        current = services
            .packages
            .transition(&current.id, *step)
            .expect("transition succeeds");
    }
    current
}

/// Package in `OnProgress` with one resolved internal finding, the minimum
/// state that satisfies the monitoring gate.
pub(super) fn monitorable_package(
    services: &TestServices,
    code: &str,
    plan_reference: &str,
    finding_number: &str,
) -> Package {
    let package = package_at(services, code, plan_reference, PackageStatus::OnProgress);
    let finding = services
        .findings
        .create(
            package.id.clone(),
            FindingVariant::Internal,
            inspector(),
            finding_draft(finding_number),
        )
        .expect("finding creates");
    services
        .findings
        .transition(&finding.id, FindingStatus::InProgress)
        .expect("moves in progress");
    services
        .findings
        .transition(&finding.id, FindingStatus::Resolved)
        .expect("resolves");
    package
}

/// Store double that refuses every operation, for exercising the
/// `unavailable` error kind.
pub(super) struct UnavailableStore;

impl OversightStore for UnavailableStore {
    fn read<T>(&self, _f: impl FnOnce(&OversightState) -> T) -> Result<T, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn write<T>(&self, _f: impl FnOnce(&mut OversightState) -> T) -> Result<T, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
