use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::super::domain::{
    ActorId, MonitoringDraft, MonitoringEntry, MonitoringId, MonitoringStatus, MonitoringUpdate,
    PackageId,
};
use super::super::eligibility::{monitoring_eligible, EligibilityPredicate};
use super::super::error::OversightError;
use super::super::repository::OversightStore;
use super::packages::require_text;

static MONITORING_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_monitoring_id() -> MonitoringId {
    let id = MONITORING_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    MonitoringId(format!("mon-{id:06}"))
}

/// Records periodic monitoring entries, gated on a concluded internal audit
/// cycle for the same package.
pub struct MonitoringService<R> {
    store: Arc<R>,
}

impl<R> MonitoringService<R>
where
    R: OversightStore,
{
    pub fn new(store: Arc<R>) -> Self {
        Self { store }
    }

    /// Record a monitoring entry. The package's findings are loaded fresh
    /// inside the write closure, so a finding deferred by a concurrent
    /// request disqualifies this one before anything persists.
    pub fn create(
        &self,
        package_id: PackageId,
        recorded_by: ActorId,
        draft: MonitoringDraft,
    ) -> Result<MonitoringEntry, OversightError> {
        require_text("period", &draft.period)?;
        check_progress(draft.progress)?;

        self.store.write(move |state| {
            let package = state
                .package(&package_id)
                .ok_or_else(|| OversightError::not_found("package", package_id.0.as_str()))?;

            if !monitoring_eligible(package, &state.findings_for(&package_id)) {
                return Err(OversightError::NotEligible {
                    package: package_id,
                    predicate: EligibilityPredicate::Monitoring,
                });
            }

            let entry = MonitoringEntry {
                id: next_monitoring_id(),
                package_id,
                category: draft.category,
                period: draft.period,
                status: MonitoringStatus::OnTrack,
                progress: draft.progress,
                issues: draft.issues,
                recommendation: draft.recommendation,
                monitored_on: draft.monitored_on,
                recorded_by,
            };
            state.monitoring.insert(entry.id.clone(), entry.clone());
            Ok(entry)
        })?
    }

    pub fn get(&self, id: &MonitoringId) -> Result<MonitoringEntry, OversightError> {
        self.store.read(|state| {
            state
                .monitoring_entry(id)
                .cloned()
                .ok_or_else(|| OversightError::not_found("monitoring entry", id.0.as_str()))
        })?
    }

    /// Apply a status/progress update. Status moves follow the monitoring
    /// machine; progress is revalidated on every change.
    pub fn update(
        &self,
        id: &MonitoringId,
        update: MonitoringUpdate,
    ) -> Result<MonitoringEntry, OversightError> {
        if let Some(progress) = update.progress {
            check_progress(progress)?;
        }

        self.store.write(|state| {
            let entry = state
                .monitoring
                .get_mut(id)
                .ok_or_else(|| OversightError::not_found("monitoring entry", id.0.as_str()))?;

            if let Some(target) = update.status {
                if !entry.status.permits(target) {
                    return Err(OversightError::InvalidTransition {
                        entity: "monitoring entry",
                        from: entry.status.label(),
                        to: target.label(),
                    });
                }
                entry.status = target;
            }
            if let Some(progress) = update.progress {
                entry.progress = progress;
            }
            if let Some(issues) = update.issues {
                entry.issues = issues;
            }
            if let Some(recommendation) = update.recommendation {
                entry.recommendation = recommendation;
            }

            Ok(entry.clone())
        })?
    }

    pub fn list_for(
        &self,
        package_id: &PackageId,
    ) -> Result<Vec<MonitoringEntry>, OversightError> {
        self.store.read(|state| {
            if state.package(package_id).is_none() {
                return Err(OversightError::not_found(
                    "package",
                    package_id.0.as_str(),
                ));
            }
            Ok(state
                .monitoring_for(package_id)
                .into_iter()
                .cloned()
                .collect())
        })?
    }
}

fn check_progress(progress: u8) -> Result<(), OversightError> {
    if progress > 100 {
        return Err(OversightError::validation(
            "progress",
            format!("must be between 0 and 100, got {progress}"),
        ));
    }
    Ok(())
}
