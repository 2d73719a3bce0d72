use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::super::domain::{
    duration_days, ActorId, Package, PackageDraft, PackageId, PackageStatus, PackageUpdate,
};
use super::super::eligibility::{
    document_eligible, eligible_packages, finding_eligible, monitoring_eligible,
    EligibilityPredicate,
};
use super::super::error::{NaturalKey, OversightError};
use super::super::repository::OversightStore;

static PACKAGE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_package_id() -> PackageId {
    let id = PACKAGE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    PackageId(format!("pkg-{id:06}"))
}

/// Owns package CRUD and the lifecycle state machine.
pub struct PackageService<R> {
    store: Arc<R>,
}

impl<R> PackageService<R>
where
    R: OversightStore,
{
    pub fn new(store: Arc<R>) -> Self {
        Self { store }
    }

    /// Create a package in `Draft`, enforcing both natural keys.
    pub fn create(
        &self,
        created_by: ActorId,
        draft: PackageDraft,
    ) -> Result<Package, OversightError> {
        require_text("code", &draft.code)?;
        require_text("plan_reference", &draft.plan_reference)?;
        require_text("name", &draft.name)?;
        check_date_order(draft.start_date, draft.end_date)?;

        self.store.write(move |state| {
            if state.code_taken(&draft.code) {
                return Err(OversightError::DuplicateKey {
                    key: NaturalKey::PackageCode,
                    value: draft.code,
                });
            }
            if state.plan_reference_taken(&draft.plan_reference) {
                return Err(OversightError::DuplicateKey {
                    key: NaturalKey::PlanReference,
                    value: draft.plan_reference,
                });
            }

            let package = Package {
                id: next_package_id(),
                code: draft.code,
                plan_reference: draft.plan_reference,
                name: draft.name,
                category: draft.category,
                value: draft.value,
                method: draft.method,
                status: PackageStatus::Draft,
                start_date: draft.start_date,
                end_date: draft.end_date,
                duration_days: duration_days(draft.start_date, draft.end_date),
                created_by,
            };
            state.packages.insert(package.id.clone(), package.clone());
            Ok(package)
        })?
    }

    pub fn get(&self, id: &PackageId) -> Result<Package, OversightError> {
        self.store.read(|state| {
            state
                .package(id)
                .cloned()
                .ok_or_else(|| OversightError::not_found("package", id.0.as_str()))
        })?
    }

    pub fn list(&self) -> Result<Vec<Package>, OversightError> {
        Ok(self
            .store
            .read(|state| state.packages().cloned().collect())?)
    }

    /// Candidate set for a creation form, in stable id order.
    pub fn list_eligible(
        &self,
        predicate: EligibilityPredicate,
    ) -> Result<Vec<Package>, OversightError> {
        Ok(self.store.read(|state| match predicate {
            EligibilityPredicate::Document => eligible_packages(state.packages(), document_eligible)
                .into_iter()
                .cloned()
                .collect(),
            EligibilityPredicate::Finding => eligible_packages(state.packages(), finding_eligible)
                .into_iter()
                .cloned()
                .collect(),
            EligibilityPredicate::Monitoring => state
                .packages()
                .filter(|package| monitoring_eligible(package, &state.findings_for(&package.id)))
                .cloned()
                .collect(),
        })?)
    }

    /// Update detail fields. Ownership and status never change here; dates
    /// are revalidated against whatever the merge produces.
    pub fn update(
        &self,
        id: &PackageId,
        update: PackageUpdate,
    ) -> Result<Package, OversightError> {
        if let Some(name) = &update.name {
            require_text("name", name)?;
        }

        self.store.write(|state| {
            let package = state
                .package_mut(id)
                .ok_or_else(|| OversightError::not_found("package", id.0.as_str()))?;

            let start_date = update.start_date.or(package.start_date);
            let end_date = update.end_date.or(package.end_date);
            check_date_order(start_date, end_date)?;

            if let Some(name) = update.name {
                package.name = name;
            }
            if let Some(category) = update.category {
                package.category = category;
            }
            if let Some(value) = update.value {
                package.value = value;
            }
            if let Some(method) = update.method {
                package.method = method;
            }
            package.start_date = start_date;
            package.end_date = end_date;
            package.duration_days = duration_days(start_date, end_date);

            Ok(package.clone())
        })?
    }

    /// Run the lifecycle machine. On success only the status changes; the
    /// transition never cascades into child entities.
    pub fn transition(
        &self,
        id: &PackageId,
        target: PackageStatus,
    ) -> Result<Package, OversightError> {
        self.store.write(|state| {
            let package = state
                .package_mut(id)
                .ok_or_else(|| OversightError::not_found("package", id.0.as_str()))?;

            if !package.status.permits(target) {
                return Err(OversightError::InvalidTransition {
                    entity: "package",
                    from: package.status.label(),
                    to: target.label(),
                });
            }

            package.status = target;
            Ok(package.clone())
        })?
    }

    /// Delete a package and its documents, findings, and monitoring entries.
    pub fn delete(&self, id: &PackageId) -> Result<(), OversightError> {
        self.store.write(|state| {
            state
                .remove_package_cascading(id)
                .map(|_| ())
                .ok_or_else(|| OversightError::not_found("package", id.0.as_str()))
        })?
    }
}

pub(crate) fn require_text(
    field: &'static str,
    value: &str,
) -> Result<(), OversightError> {
    if value.trim().is_empty() {
        return Err(OversightError::validation(field, "must not be empty"));
    }
    Ok(())
}

fn check_date_order(
    start_date: Option<chrono::NaiveDate>,
    end_date: Option<chrono::NaiveDate>,
) -> Result<(), OversightError> {
    if let (Some(start), Some(end)) = (start_date, end_date) {
        if end < start {
            return Err(OversightError::validation(
                "end_date",
                format!("must not precede start date ({start} > {end})"),
            ));
        }
    }
    Ok(())
}
