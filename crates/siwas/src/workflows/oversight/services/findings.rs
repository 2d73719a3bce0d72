use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::super::domain::{
    ActorId, AuditFinding, FindingDraft, FindingId, FindingStatus, FindingVariant, PackageId,
};
use super::super::eligibility::{finding_eligible, EligibilityPredicate};
use super::super::error::{NaturalKey, OversightError};
use super::super::repository::OversightStore;
use super::packages::require_text;

static FINDING_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_finding_id() -> FindingId {
    let id = FINDING_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    FindingId(format!("fnd-{id:06}"))
}

/// Records audit findings from both audit bodies and owns their resolution
/// state machine. Severity has no mutation surface here: a wrong severity is
/// corrected by raising a new finding, never by editing the old one.
pub struct AuditFindingService<R> {
    store: Arc<R>,
}

impl<R> AuditFindingService<R>
where
    R: OversightStore,
{
    pub fn new(store: Arc<R>) -> Self {
        Self { store }
    }

    /// Raise a finding against an actively procured package. The finding
    /// number is unique across the whole system, both variants included.
    pub fn create(
        &self,
        package_id: PackageId,
        variant: FindingVariant,
        auditor: ActorId,
        draft: FindingDraft,
    ) -> Result<AuditFinding, OversightError> {
        require_text("finding_number", &draft.finding_number)?;
        require_text("description", &draft.description)?;

        self.store.write(move |state| {
            let package = state
                .package(&package_id)
                .ok_or_else(|| OversightError::not_found("package", package_id.0.as_str()))?;

            if !finding_eligible(package) {
                return Err(OversightError::NotEligible {
                    package: package_id,
                    predicate: EligibilityPredicate::Finding,
                });
            }

            if state.finding_number_taken(&draft.finding_number) {
                return Err(OversightError::DuplicateKey {
                    key: NaturalKey::FindingNumber,
                    value: draft.finding_number,
                });
            }

            let finding = AuditFinding {
                id: next_finding_id(),
                finding_number: draft.finding_number,
                package_id,
                variant,
                category: draft.category,
                description: draft.description,
                severity: draft.severity,
                status: FindingStatus::New,
                auditor,
                responsible_party: draft.responsible_party,
                raised_on: draft.raised_on,
            };
            state.findings.insert(finding.id.clone(), finding.clone());
            Ok(finding)
        })?
    }

    pub fn get(&self, id: &FindingId) -> Result<AuditFinding, OversightError> {
        self.store.read(|state| {
            state
                .finding(id)
                .cloned()
                .ok_or_else(|| OversightError::not_found("finding", id.0.as_str()))
        })?
    }

    /// Advance the resolution status along the forward-only machine.
    pub fn transition(
        &self,
        id: &FindingId,
        target: FindingStatus,
    ) -> Result<AuditFinding, OversightError> {
        self.store.write(|state| {
            let finding = state
                .findings
                .get_mut(id)
                .ok_or_else(|| OversightError::not_found("finding", id.0.as_str()))?;

            if !finding.status.permits(target) {
                return Err(OversightError::InvalidTransition {
                    entity: "finding",
                    from: finding.status.label(),
                    to: target.label(),
                });
            }

            finding.status = target;
            Ok(finding.clone())
        })?
    }

    pub fn list_for(
        &self,
        package_id: &PackageId,
        variant: Option<FindingVariant>,
    ) -> Result<Vec<AuditFinding>, OversightError> {
        self.store.read(|state| {
            if state.package(package_id).is_none() {
                return Err(OversightError::not_found(
                    "package",
                    package_id.0.as_str(),
                ));
            }
            Ok(state
                .findings_for(package_id)
                .into_iter()
                .filter(|finding| variant.map_or(true, |wanted| finding.variant == wanted))
                .cloned()
                .collect())
        })?
    }
}
