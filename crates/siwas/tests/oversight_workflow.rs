use std::sync::Arc;

use chrono::NaiveDate;
use siwas::workflows::oversight::{
    ActorId, DocumentCategory, DocumentDraft, EligibilityPredicate, FindingCategory, FindingDraft,
    FindingSeverity, FindingStatus, FindingVariant, InMemoryOversightStore, MonitoringCategory,
    MonitoringDraft, MonitoringStatus, MonitoringUpdate, NaturalKey, OversightError,
    OversightServices, PackageCategory, PackageDraft, PackageStatus, PackageUpdate,
    ProcurementMethod,
};

fn services() -> Arc<OversightServices<InMemoryOversightStore>> {
    Arc::new(OversightServices::new(Arc::new(
        InMemoryOversightStore::new(),
    )))
}

fn ppk() -> ActorId {
    ActorId("ppk.rahma".to_string())
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn road_package(code: &str, plan_reference: &str) -> PackageDraft {
    PackageDraft {
        code: code.to_string(),
        plan_reference: plan_reference.to_string(),
        name: "District road rehabilitation".to_string(),
        category: PackageCategory::Construction,
        value: 750_000_000,
        method: ProcurementMethod::Tender,
        start_date: Some(date(2026, 2, 1)),
        end_date: Some(date(2026, 11, 30)),
    }
}

fn contract_document() -> DocumentDraft {
    DocumentDraft {
        name: "signed-contract.pdf".to_string(),
        category: DocumentCategory::Contract,
        storage_key: "blob://siwas/signed-contract.pdf".to_string(),
        size_bytes: 812_440,
        mime_type: "application/pdf".to_string(),
    }
}

fn internal_finding(finding_number: &str) -> FindingDraft {
    FindingDraft {
        finding_number: finding_number.to_string(),
        category: FindingCategory::Administrative,
        description: "Progress reports filed without field verification".to_string(),
        severity: FindingSeverity::Medium,
        responsible_party: ppk(),
        raised_on: date(2026, 3, 10),
    }
}

fn quarterly_monitoring(period: &str, progress: u8) -> MonitoringDraft {
    MonitoringDraft {
        category: MonitoringCategory::Physical,
        period: period.to_string(),
        progress,
        issues: String::new(),
        recommendation: String::new(),
        monitored_on: date(2026, 4, 2),
    }
}

#[test]
fn package_travels_the_full_oversight_lifecycle() {
    let services = services();

    let package = services
        .packages
        .create(ppk(), road_package("PKG-2026-001", "RUP-2026-0001"))
        .expect("package creates");
    assert_eq!(package.status, PackageStatus::Draft);
    assert_eq!(package.duration_days, Some(302));

    let package = services
        .packages
        .transition(&package.id, PackageStatus::Published)
        .expect("publishes");

    let document = services
        .documents
        .attach(package.id.clone(), ppk(), contract_document())
        .expect("document attaches once published");
    assert_eq!(document.package_id, package.id);

    let package = services
        .packages
        .transition(&package.id, PackageStatus::OnProgress)
        .expect("starts execution");

    let finding = services
        .findings
        .create(
            package.id.clone(),
            FindingVariant::Internal,
            ActorId("itwasda.sari".to_string()),
            internal_finding("IT-2026-014"),
        )
        .expect("internal finding lands");
    assert_eq!(finding.status, FindingStatus::New);

    let finding = services
        .findings
        .transition(&finding.id, FindingStatus::Resolved)
        .expect("resolves");
    assert_eq!(finding.status, FindingStatus::Resolved);

    let entry = services
        .monitoring
        .create(package.id.clone(), ppk(), quarterly_monitoring("2026-Q2", 40))
        .expect("monitoring opens after the resolved internal finding");
    assert_eq!(entry.status, MonitoringStatus::OnTrack);

    let entry = services
        .monitoring
        .update(
            &entry.id,
            MonitoringUpdate {
                progress: Some(100),
                status: Some(MonitoringStatus::Completed),
                ..MonitoringUpdate::default()
            },
        )
        .expect("monitoring closes");
    assert_eq!(entry.progress, 100);

    let package = services
        .packages
        .transition(&package.id, PackageStatus::Completed)
        .expect("completes");
    assert_eq!(package.status, PackageStatus::Completed);

    // Terminal status closes every gate.
    let refused = services
        .documents
        .attach(package.id.clone(), ppk(), contract_document());
    assert!(matches!(
        refused,
        Err(OversightError::NotEligible {
            predicate: EligibilityPredicate::Document,
            ..
        })
    ));
}

#[test]
fn monitoring_stays_gated_until_an_internal_finding_resolves() {
    let services = services();
    let package = services
        .packages
        .create(ppk(), road_package("PKG-2026-002", "RUP-2026-0002"))
        .expect("package creates");
    services
        .packages
        .transition(&package.id, PackageStatus::Published)
        .expect("publishes");
    services
        .packages
        .transition(&package.id, PackageStatus::OnProgress)
        .expect("starts execution");

    // No findings at all: the gate is shut.
    let refused = services
        .monitoring
        .create(package.id.clone(), ppk(), quarterly_monitoring("2026-Q2", 10));
    assert!(matches!(
        refused,
        Err(OversightError::NotEligible {
            predicate: EligibilityPredicate::Monitoring,
            ..
        })
    ));

    // A resolved external finding is not enough.
    let external = services
        .findings
        .create(
            package.id.clone(),
            FindingVariant::External,
            ActorId("bpk.auditor".to_string()),
            internal_finding("BPK-2026-221"),
        )
        .expect("external finding lands");
    services
        .findings
        .transition(&external.id, FindingStatus::Resolved)
        .expect("resolves");
    let refused = services
        .monitoring
        .create(package.id.clone(), ppk(), quarterly_monitoring("2026-Q2", 10));
    assert!(refused.is_err());

    // An unresolved internal finding is not enough either.
    let internal = services
        .findings
        .create(
            package.id.clone(),
            FindingVariant::Internal,
            ActorId("itwasda.sari".to_string()),
            internal_finding("IT-2026-015"),
        )
        .expect("internal finding lands");
    let refused = services
        .monitoring
        .create(package.id.clone(), ppk(), quarterly_monitoring("2026-Q2", 10));
    assert!(refused.is_err());

    services
        .findings
        .transition(&internal.id, FindingStatus::Resolved)
        .expect("resolves");
    services
        .monitoring
        .create(package.id.clone(), ppk(), quarterly_monitoring("2026-Q2", 10))
        .expect("gate opens");
}

#[test]
fn natural_keys_stay_unique_across_the_store() {
    let services = services();
    services
        .packages
        .create(ppk(), road_package("PKG-2026-003", "RUP-2026-0003"))
        .expect("package creates");

    let same_code = services
        .packages
        .create(ppk(), road_package("PKG-2026-003", "RUP-2026-0004"));
    match same_code {
        Err(OversightError::DuplicateKey { key, .. }) => {
            assert_eq!(key, NaturalKey::PackageCode)
        }
        other => panic!("expected duplicate code, got {other:?}"),
    }

    let same_plan = services
        .packages
        .create(ppk(), road_package("PKG-2026-004", "RUP-2026-0003"));
    match same_plan {
        Err(OversightError::DuplicateKey { key, .. }) => {
            assert_eq!(key, NaturalKey::PlanReference)
        }
        other => panic!("expected duplicate plan reference, got {other:?}"),
    }
}

#[test]
fn cancelling_a_package_freezes_its_children() {
    let services = services();
    let package = services
        .packages
        .create(ppk(), road_package("PKG-2026-005", "RUP-2026-0005"))
        .expect("package creates");
    services
        .packages
        .transition(&package.id, PackageStatus::Published)
        .expect("publishes");
    services
        .documents
        .attach(package.id.clone(), ppk(), contract_document())
        .expect("document attaches");

    services
        .packages
        .transition(&package.id, PackageStatus::Cancelled)
        .expect("cancels");

    let attach = services
        .documents
        .attach(package.id.clone(), ppk(), contract_document());
    assert!(attach.is_err());
    let finding = services.findings.create(
        package.id.clone(),
        FindingVariant::Internal,
        ppk(),
        internal_finding("IT-2026-016"),
    );
    assert!(finding.is_err());

    // Existing children remain readable.
    let documents = services
        .documents
        .list_for(&package.id)
        .expect("listing still works");
    assert_eq!(documents.len(), 1);

    // Terminal means terminal.
    let revive = services
        .packages
        .transition(&package.id, PackageStatus::Published);
    assert!(matches!(
        revive,
        Err(OversightError::InvalidTransition { .. })
    ));
}

#[test]
fn detail_updates_never_bypass_the_lifecycle() {
    let services = services();
    let package = services
        .packages
        .create(ppk(), road_package("PKG-2026-006", "RUP-2026-0006"))
        .expect("package creates");

    let updated = services
        .packages
        .update(
            &package.id,
            PackageUpdate {
                value: Some(900_000_000),
                end_date: Some(date(2026, 12, 31)),
                ..PackageUpdate::default()
            },
        )
        .expect("detail update applies");
    assert_eq!(updated.value, 900_000_000);
    assert_eq!(updated.duration_days, Some(333));
    assert_eq!(updated.status, PackageStatus::Draft);

    let skip_ahead = services
        .packages
        .transition(&package.id, PackageStatus::Completed);
    assert!(matches!(
        skip_ahead,
        Err(OversightError::InvalidTransition { .. })
    ));
}

#[test]
fn summary_reflects_the_whole_portfolio() {
    let services = services();
    let first = services
        .packages
        .create(ppk(), road_package("PKG-2026-007", "RUP-2026-0007"))
        .expect("package creates");
    services
        .packages
        .transition(&first.id, PackageStatus::Published)
        .expect("publishes");

    let mut high = internal_finding("IT-2026-017");
    high.severity = FindingSeverity::High;
    services
        .findings
        .create(first.id.clone(), FindingVariant::Internal, ppk(), high)
        .expect("high finding lands");

    services
        .packages
        .create(ppk(), road_package("PKG-2026-008", "RUP-2026-0008"))
        .expect("second package creates");

    let summary = services.reports.summary().expect("summary builds");
    assert_eq!(summary.total_packages, 2);
    assert_eq!(summary.high_exposure_pct, 50.0);

    let published = summary
        .packages_by_status
        .iter()
        .find(|entry| entry.status == PackageStatus::Published)
        .expect("published row");
    assert_eq!(published.count, 1);
    assert_eq!(published.total_value, 750_000_000);

    let high_row = summary
        .findings_by_severity
        .iter()
        .find(|entry| entry.severity == FindingSeverity::High)
        .expect("high severity row");
    assert_eq!(high_row.count, 1);
}
