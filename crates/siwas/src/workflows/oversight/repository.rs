//! Embedded entity store.
//!
//! All five logical collections live behind one lock so a `write` closure can
//! check the current package state and commit a child row without another
//! writer interleaving. That closure is the transactional boundary every
//! service relies on for its check-then-act sequence.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use super::domain::{
    AuditFinding, Document, DocumentId, FindingId, MonitoringEntry, MonitoringId, Package,
    PackageId,
};

/// Durable state for the oversight workflows. Maps are ordered by id, which
/// follows insertion order because ids are generated from sequences.
#[derive(Debug, Default)]
pub struct OversightState {
    pub(crate) packages: BTreeMap<PackageId, Package>,
    pub(crate) documents: BTreeMap<DocumentId, Document>,
    pub(crate) findings: BTreeMap<FindingId, AuditFinding>,
    pub(crate) monitoring: BTreeMap<MonitoringId, MonitoringEntry>,
}

impl OversightState {
    pub fn package(&self, id: &PackageId) -> Option<&Package> {
        self.packages.get(id)
    }

    pub fn package_mut(&mut self, id: &PackageId) -> Option<&mut Package> {
        self.packages.get_mut(id)
    }

    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.packages.values()
    }

    pub fn finding(&self, id: &FindingId) -> Option<&AuditFinding> {
        self.findings.get(id)
    }

    pub fn monitoring_entry(&self, id: &MonitoringId) -> Option<&MonitoringEntry> {
        self.monitoring.get(id)
    }

    pub fn documents_for(&self, package_id: &PackageId) -> Vec<&Document> {
        self.documents
            .values()
            .filter(|document| &document.package_id == package_id)
            .collect()
    }

    pub fn findings_for(&self, package_id: &PackageId) -> Vec<&AuditFinding> {
        self.findings
            .values()
            .filter(|finding| &finding.package_id == package_id)
            .collect()
    }

    pub fn monitoring_for(&self, package_id: &PackageId) -> Vec<&MonitoringEntry> {
        self.monitoring
            .values()
            .filter(|entry| &entry.package_id == package_id)
            .collect()
    }

    pub fn code_taken(&self, code: &str) -> bool {
        self.packages.values().any(|package| package.code == code)
    }

    pub fn plan_reference_taken(&self, plan_reference: &str) -> bool {
        self.packages
            .values()
            .any(|package| package.plan_reference == plan_reference)
    }

    pub fn finding_number_taken(&self, finding_number: &str) -> bool {
        self.findings
            .values()
            .any(|finding| finding.finding_number == finding_number)
    }

    /// Remove a package and every child row referencing it.
    pub(crate) fn remove_package_cascading(&mut self, id: &PackageId) -> Option<Package> {
        let removed = self.packages.remove(id)?;
        self.documents.retain(|_, document| &document.package_id != id);
        self.findings.retain(|_, finding| &finding.package_id != id);
        self.monitoring.retain(|_, entry| &entry.package_id != id);
        Some(removed)
    }
}

/// Storage seam for the oversight services.
///
/// `write` holds the single-writer lock for the duration of the closure, so
/// every check performed inside it is atomic with the rows it commits. `read`
/// sees a consistent snapshot. Neither retries; infrastructure failures
/// surface as [`StoreError::Unavailable`].
pub trait OversightStore: Send + Sync {
    fn read<T>(&self, f: impl FnOnce(&OversightState) -> T) -> Result<T, StoreError>;

    fn write<T>(&self, f: impl FnOnce(&mut OversightState) -> T) -> Result<T, StoreError>;
}

/// Infrastructure-level store failure, kept distinct from business errors so
/// callers can decide about retrying on their side.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Unavailable(String),
}

/// Process-embedded store: one mutex is the single-writer-per-store lock.
#[derive(Default, Clone)]
pub struct InMemoryOversightStore {
    state: Arc<Mutex<OversightState>>,
}

impl InMemoryOversightStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OversightStore for InMemoryOversightStore {
    fn read<T>(&self, f: impl FnOnce(&OversightState) -> T) -> Result<T, StoreError> {
        let guard = self
            .state
            .lock()
            .map_err(|_| StoreError::Unavailable("state mutex poisoned".to_string()))?;
        Ok(f(&guard))
    }

    fn write<T>(&self, f: impl FnOnce(&mut OversightState) -> T) -> Result<T, StoreError> {
        let mut guard = self
            .state
            .lock()
            .map_err(|_| StoreError::Unavailable("state mutex poisoned".to_string()))?;
        Ok(f(&mut guard))
    }
}
