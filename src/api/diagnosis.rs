use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    Json,
};
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::Deserialize;
use tracing::{error, info};

use super::{parse_id, response::ApiResponse};
use crate::classifier::Classifier;
use crate::diagnosis::{self as workflow, DiagnoseError, DiagnosisResult};
use crate::entities::{diagnosis, Diagnosis};
use crate::error::{store_failure, ApiError};
use crate::metrics;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDiagnosisRequest {
    pub image_id: Option<String>,
}

// GET /diagnoses
pub async fn list_diagnoses(
    Extension(db): Extension<DatabaseConnection>,
) -> Result<Json<ApiResponse<Vec<diagnosis::Model>>>, ApiError> {
    let diagnoses = Diagnosis::find()
        .all(&db)
        .await
        .map_err(store_failure("Failed to fetch diagnoses"))?;

    Ok(Json(ApiResponse::ok(diagnoses)))
}

// POST /diagnoses
pub async fn create_diagnosis(
    Extension(db): Extension<DatabaseConnection>,
    Extension(classifier): Extension<Arc<dyn Classifier>>,
    payload: Result<Json<CreateDiagnosisRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<DiagnosisResult>>, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::validation(e.body_text()))?;

    let raw_id = payload
        .image_id
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::validation("Image ID is required"))?;
    let image_id = parse_id(&raw_id, "Invalid image ID")?;

    let span = tracing::Span::current();
    span.record("image_id", tracing::field::display(image_id));

    match workflow::create_diagnosis(&db, classifier.as_ref(), image_id).await {
        Ok(result) => {
            span.record("diagnosis_id", tracing::field::display(result.diagnosis_id));
            span.record("disease_id", tracing::field::display(result.disease.id));
            info!(
                "Created diagnosis {} for image {}: {} ({:.2})",
                result.diagnosis_id, image_id, result.disease.name, result.confidence
            );
            metrics::record_diagnosis_created(&result.disease.name, result.confidence);
            Ok(Json(ApiResponse::ok(result)))
        }
        Err(DiagnoseError::ImageNotFound(_)) => {
            metrics::record_diagnosis_failed("image_not_found");
            Err(ApiError::not_found("Image not found"))
        }
        Err(DiagnoseError::DiseaseNotFound(id)) => {
            metrics::record_diagnosis_failed("disease_not_found");
            error!("Diagnosis referenced disease {} which could not be loaded", id);
            Err(ApiError::internal("Disease not found"))
        }
        Err(e) => {
            metrics::record_diagnosis_failed("internal");
            Err(store_failure("Failed to create diagnosis")(e))
        }
    }
}
