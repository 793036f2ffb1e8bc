use axum::{extract::Extension, Json};
use sea_orm::{DatabaseConnection, EntityTrait};

use super::response::ApiResponse;
use crate::entities::{plant, Plant};
use crate::error::{store_failure, ApiError};

// GET /plants
pub async fn list_plants(
    Extension(db): Extension<DatabaseConnection>,
) -> Result<Json<ApiResponse<Vec<plant::Model>>>, ApiError> {
    let plants = Plant::find()
        .all(&db)
        .await
        .map_err(store_failure("Failed to fetch plants"))?;

    Ok(Json(ApiResponse::ok(plants)))
}
