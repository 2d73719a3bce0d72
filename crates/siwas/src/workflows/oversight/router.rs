use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;

use super::domain::{
    ActorId, DocumentDraft, FindingDraft, FindingId, FindingStatus, FindingVariant,
    MonitoringDraft, MonitoringId, MonitoringUpdate, PackageDraft, PackageId, PackageStatus,
    PackageUpdate,
};
use super::eligibility::EligibilityPredicate;
use super::error::OversightError;
use super::report::ReportService;
use super::repository::OversightStore;
use super::services::{
    AuditFindingService, DocumentAttachmentService, MonitoringService, PackageService,
};

/// One bundle of services sharing a store, handed to the router as state.
pub struct OversightServices<R> {
    pub packages: PackageService<R>,
    pub documents: DocumentAttachmentService<R>,
    pub findings: AuditFindingService<R>,
    pub monitoring: MonitoringService<R>,
    pub reports: ReportService<R>,
}

impl<R> OversightServices<R>
where
    R: OversightStore,
{
    pub fn new(store: Arc<R>) -> Self {
        Self {
            packages: PackageService::new(store.clone()),
            documents: DocumentAttachmentService::new(store.clone()),
            findings: AuditFindingService::new(store.clone()),
            monitoring: MonitoringService::new(store.clone()),
            reports: ReportService::new(store),
        }
    }
}

/// Router builder exposing the oversight REST surface.
pub fn oversight_router<R>(services: Arc<OversightServices<R>>) -> Router
where
    R: OversightStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/packages",
            get(list_packages::<R>).post(create_package::<R>),
        )
        .route(
            "/api/v1/packages/:package_id",
            get(get_package::<R>)
                .put(update_package::<R>)
                .delete(delete_package::<R>),
        )
        .route(
            "/api/v1/packages/:package_id/documents",
            get(list_documents::<R>).post(attach_document::<R>),
        )
        .route(
            "/api/v1/findings",
            get(list_findings::<R>).post(create_finding::<R>),
        )
        .route("/api/v1/findings/:finding_id", put(transition_finding::<R>))
        .route(
            "/api/v1/monitoring",
            get(list_monitoring::<R>).post(create_monitoring::<R>),
        )
        .route("/api/v1/monitoring/:monitoring_id", put(update_monitoring::<R>))
        .route("/api/v1/oversight/summary", get(oversight_summary::<R>))
        .with_state(services)
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatePackageRequest {
    pub(crate) created_by: ActorId,
    #[serde(flatten)]
    pub(crate) draft: PackageDraft,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdatePackageRequest {
    pub(crate) status: Option<PackageStatus>,
    #[serde(flatten)]
    pub(crate) update: PackageUpdate,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PackagesQuery {
    pub(crate) eligible_for: Option<EligibilityPredicate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AttachDocumentRequest {
    pub(crate) uploaded_by: ActorId,
    #[serde(flatten)]
    pub(crate) draft: DocumentDraft,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateFindingRequest {
    pub(crate) package_id: PackageId,
    pub(crate) variant: FindingVariant,
    pub(crate) auditor: ActorId,
    #[serde(flatten)]
    pub(crate) draft: FindingDraft,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FindingsQuery {
    pub(crate) package_id: PackageId,
    pub(crate) variant: Option<FindingVariant>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TransitionFindingRequest {
    pub(crate) status: FindingStatus,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateMonitoringRequest {
    pub(crate) package_id: PackageId,
    pub(crate) recorded_by: ActorId,
    #[serde(flatten)]
    pub(crate) draft: MonitoringDraft,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MonitoringQuery {
    pub(crate) package_id: PackageId,
}

async fn create_package<R: OversightStore>(
    State(services): State<Arc<OversightServices<R>>>,
    Json(request): Json<CreatePackageRequest>,
) -> Result<impl IntoResponse, OversightError> {
    let package = services.packages.create(request.created_by, request.draft)?;
    Ok((StatusCode::CREATED, Json(package)))
}

async fn list_packages<R: OversightStore>(
    State(services): State<Arc<OversightServices<R>>>,
    Query(query): Query<PackagesQuery>,
) -> Result<impl IntoResponse, OversightError> {
    let packages = match query.eligible_for {
        Some(predicate) => services.packages.list_eligible(predicate)?,
        None => services.packages.list()?,
    };
    Ok(Json(packages))
}

async fn get_package<R: OversightStore>(
    State(services): State<Arc<OversightServices<R>>>,
    Path(package_id): Path<String>,
) -> Result<impl IntoResponse, OversightError> {
    let package = services.packages.get(&PackageId(package_id))?;
    Ok(Json(package))
}

/// Detail fields update in place; a `status` field additionally runs the
/// lifecycle machine after the detail update.
async fn update_package<R: OversightStore>(
    State(services): State<Arc<OversightServices<R>>>,
    Path(package_id): Path<String>,
    Json(request): Json<UpdatePackageRequest>,
) -> Result<impl IntoResponse, OversightError> {
    let id = PackageId(package_id);
    let mut package = if request.update == PackageUpdate::default() {
        services.packages.get(&id)?
    } else {
        services.packages.update(&id, request.update)?
    };
    if let Some(target) = request.status {
        package = services.packages.transition(&id, target)?;
    }
    Ok(Json(package))
}

async fn delete_package<R: OversightStore>(
    State(services): State<Arc<OversightServices<R>>>,
    Path(package_id): Path<String>,
) -> Result<impl IntoResponse, OversightError> {
    services.packages.delete(&PackageId(package_id))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn attach_document<R: OversightStore>(
    State(services): State<Arc<OversightServices<R>>>,
    Path(package_id): Path<String>,
    Json(request): Json<AttachDocumentRequest>,
) -> Result<impl IntoResponse, OversightError> {
    let document = services.documents.attach(
        PackageId(package_id),
        request.uploaded_by,
        request.draft,
    )?;
    Ok((StatusCode::CREATED, Json(document)))
}

async fn list_documents<R: OversightStore>(
    State(services): State<Arc<OversightServices<R>>>,
    Path(package_id): Path<String>,
) -> Result<impl IntoResponse, OversightError> {
    let documents = services.documents.list_for(&PackageId(package_id))?;
    Ok(Json(documents))
}

async fn create_finding<R: OversightStore>(
    State(services): State<Arc<OversightServices<R>>>,
    Json(request): Json<CreateFindingRequest>,
) -> Result<impl IntoResponse, OversightError> {
    let finding = services.findings.create(
        request.package_id,
        request.variant,
        request.auditor,
        request.draft,
    )?;
    Ok((StatusCode::CREATED, Json(finding)))
}

async fn list_findings<R: OversightStore>(
    State(services): State<Arc<OversightServices<R>>>,
    Query(query): Query<FindingsQuery>,
) -> Result<impl IntoResponse, OversightError> {
    let findings = services
        .findings
        .list_for(&query.package_id, query.variant)?;
    Ok(Json(findings))
}

async fn transition_finding<R: OversightStore>(
    State(services): State<Arc<OversightServices<R>>>,
    Path(finding_id): Path<String>,
    Json(request): Json<TransitionFindingRequest>,
) -> Result<impl IntoResponse, OversightError> {
    let finding = services
        .findings
        .transition(&FindingId(finding_id), request.status)?;
    Ok(Json(finding))
}

async fn create_monitoring<R: OversightStore>(
    State(services): State<Arc<OversightServices<R>>>,
    Json(request): Json<CreateMonitoringRequest>,
) -> Result<impl IntoResponse, OversightError> {
    let entry = services.monitoring.create(
        request.package_id,
        request.recorded_by,
        request.draft,
    )?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn list_monitoring<R: OversightStore>(
    State(services): State<Arc<OversightServices<R>>>,
    Query(query): Query<MonitoringQuery>,
) -> Result<impl IntoResponse, OversightError> {
    let entries = services.monitoring.list_for(&query.package_id)?;
    Ok(Json(entries))
}

async fn update_monitoring<R: OversightStore>(
    State(services): State<Arc<OversightServices<R>>>,
    Path(monitoring_id): Path<String>,
    Json(update): Json<MonitoringUpdate>,
) -> Result<impl IntoResponse, OversightError> {
    let entry = services
        .monitoring
        .update(&MonitoringId(monitoring_id), update)?;
    Ok(Json(entry))
}

async fn oversight_summary<R: OversightStore>(
    State(services): State<Arc<OversightServices<R>>>,
) -> Result<impl IntoResponse, OversightError> {
    let summary = services.reports.summary()?;
    Ok(Json(summary))
}
