use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use super::domain::PackageId;
use super::eligibility::EligibilityPredicate;
use super::repository::StoreError;

/// Natural keys the store enforces uniqueness on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NaturalKey {
    PackageCode,
    PlanReference,
    FindingNumber,
}

impl NaturalKey {
    pub const fn label(self) -> &'static str {
        match self {
            Self::PackageCode => "package code",
            Self::PlanReference => "plan reference",
            Self::FindingNumber => "finding number",
        }
    }
}

/// Error taxonomy for every oversight operation. Each value is terminal for
/// the request; none of these conditions are transient, so nothing retries.
#[derive(Debug, thiserror::Error)]
pub enum OversightError {
    #[error("{field}: {message}")]
    Validation { field: &'static str, message: String },
    #[error("package {package} failed the {predicate} check", package = .package.0, predicate = .predicate.label())]
    NotEligible {
        package: PackageId,
        predicate: EligibilityPredicate,
    },
    #[error("cannot transition {entity} from {from} to {to}")]
    InvalidTransition {
        entity: &'static str,
        from: &'static str,
        to: &'static str,
    },
    #[error("duplicate {key}: '{value}' already exists", key = .key.label())]
    DuplicateKey { key: NaturalKey, value: String },
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl OversightError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::NotEligible { .. } => "not_eligible",
            Self::InvalidTransition { .. } => "invalid_transition",
            Self::DuplicateKey { .. } => "duplicate_key",
            Self::NotFound { .. } => "not_found",
            Self::Unavailable(_) => "unavailable",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotEligible { .. } | Self::InvalidTransition { .. } | Self::DuplicateKey { .. } => {
                StatusCode::CONFLICT
            }
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<StoreError> for OversightError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Unavailable(reason) => Self::Unavailable(reason),
        }
    }
}

impl IntoResponse for OversightError {
    fn into_response(self) -> Response {
        let mut body = json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });

        match &self {
            OversightError::Validation { field, .. } => {
                body["field"] = json!(field);
            }
            OversightError::NotEligible { predicate, .. } => {
                body["predicate"] = json!(predicate.label());
            }
            _ => {}
        }

        (self.status_code(), Json(body)).into_response()
    }
}
