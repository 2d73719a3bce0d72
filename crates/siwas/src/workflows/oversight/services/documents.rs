use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use super::super::domain::{ActorId, Document, DocumentDraft, DocumentId, PackageId};
use super::super::eligibility::{document_eligible, EligibilityPredicate};
use super::super::error::OversightError;
use super::super::repository::OversightStore;
use super::packages::require_text;

static DOCUMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_document_id() -> DocumentId {
    let id = DOCUMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    DocumentId(format!("doc-{id:06}"))
}

/// Attaches supporting documents to packages that pass the document gate.
pub struct DocumentAttachmentService<R> {
    store: Arc<R>,
}

impl<R> DocumentAttachmentService<R>
where
    R: OversightStore,
{
    pub fn new(store: Arc<R>) -> Self {
        Self { store }
    }

    /// Persist document metadata against a package. The gate is evaluated
    /// inside the write closure, against the package as it is at commit
    /// time, so a racing cancellation cannot slip an attachment through.
    pub fn attach(
        &self,
        package_id: PackageId,
        uploaded_by: ActorId,
        draft: DocumentDraft,
    ) -> Result<Document, OversightError> {
        require_text("name", &draft.name)?;
        require_text("storage_key", &draft.storage_key)?;
        require_text("mime_type", &draft.mime_type)?;

        self.store.write(move |state| {
            let package = state
                .package(&package_id)
                .ok_or_else(|| OversightError::not_found("package", package_id.0.as_str()))?;

            if !document_eligible(package) {
                return Err(OversightError::NotEligible {
                    package: package_id,
                    predicate: EligibilityPredicate::Document,
                });
            }

            let document = Document {
                id: next_document_id(),
                package_id,
                name: draft.name,
                category: draft.category,
                storage_key: draft.storage_key,
                size_bytes: draft.size_bytes,
                mime_type: draft.mime_type,
                uploaded_by,
                uploaded_at: Utc::now(),
            };
            state
                .documents
                .insert(document.id.clone(), document.clone());
            Ok(document)
        })?
    }

    pub fn list_for(&self, package_id: &PackageId) -> Result<Vec<Document>, OversightError> {
        self.store.read(|state| {
            if state.package(package_id).is_none() {
                return Err(OversightError::not_found(
                    "package",
                    package_id.0.as_str(),
                ));
            }
            Ok(state
                .documents_for(package_id)
                .into_iter()
                .cloned()
                .collect())
        })?
    }
}
