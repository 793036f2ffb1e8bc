use axum::{
    extract::{Extension, Path},
    Json,
};
use sea_orm::{DatabaseConnection, EntityTrait};

use super::{parse_id, response::ApiResponse};
use crate::entities::{disease, Disease};
use crate::error::{store_failure, ApiError};

// GET /diseases
pub async fn list_diseases(
    Extension(db): Extension<DatabaseConnection>,
) -> Result<Json<ApiResponse<Vec<disease::Model>>>, ApiError> {
    let diseases = Disease::find()
        .all(&db)
        .await
        .map_err(store_failure("Failed to fetch diseases"))?;

    Ok(Json(ApiResponse::ok(diseases)))
}

// GET /diseases/:id
pub async fn get_disease(
    Extension(db): Extension<DatabaseConnection>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<disease::Model>>, ApiError> {
    let disease_id = parse_id(&raw_id, "Invalid disease ID")?;
    tracing::Span::current().record("disease_id", tracing::field::display(disease_id));

    match Disease::find_by_id(disease_id).one(&db).await {
        Ok(Some(d)) => Ok(Json(ApiResponse::ok(d))),
        Ok(None) => Err(ApiError::not_found("Disease not found")),
        Err(e) => Err(store_failure("Failed to fetch disease")(e)),
    }
}
