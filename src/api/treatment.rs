use axum::{
    extract::{Extension, Query},
    Json,
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::Deserialize;

use super::{parse_id, response::ApiResponse};
use crate::entities::{treatment, Treatment};
use crate::error::{store_failure, ApiError};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentFilter {
    pub disease_id: Option<String>,
}

// GET /treatments?diseaseId=...
pub async fn list_treatments(
    Extension(db): Extension<DatabaseConnection>,
    Query(filter): Query<TreatmentFilter>,
) -> Result<Json<ApiResponse<Vec<treatment::Model>>>, ApiError> {
    let mut query = Treatment::find();

    if let Some(raw) = filter.disease_id.filter(|v| !v.trim().is_empty()) {
        let disease_id = parse_id(&raw, "Invalid disease ID")?;
        tracing::Span::current().record("disease_id", tracing::field::display(disease_id));
        query = query.filter(treatment::Column::DiseaseId.eq(disease_id));
    }

    let treatments = query
        .all(&db)
        .await
        .map_err(store_failure("Failed to fetch treatments"))?;

    Ok(Json(ApiResponse::ok(treatments)))
}
