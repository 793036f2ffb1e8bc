use axum::{
    body::Bytes,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Extension, Multipart,
    },
    http::StatusCode,
    Json,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set, SqlErr};
use serde::Serialize;
use uuid::Uuid;

use super::parse_id;
use crate::entities::image::{self, ImageMetadata};
use crate::entities::{Diagnosis, Plant, User};
use crate::error::{store_failure, ApiError};
use crate::metrics;
use crate::storage::PlaceholderStorage;

// Pixel dimensions are not decoded yet.
const PLACEHOLDER_WIDTH: u32 = 800;
const PLACEHOLDER_HEIGHT: u32 = 600;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadImageResponse {
    pub success: bool,
    pub image_id: Uuid,
}

struct UploadedFile {
    file_name: String,
    content_type: Option<String>,
    data: Bytes,
}

#[derive(Default)]
struct UploadForm {
    image: Option<UploadedFile>,
    user_id: Option<String>,
    plant_id: Option<String>,
    diagnosis_id: Option<String>,
}

// POST /images
pub async fn upload_image(
    Extension(db): Extension<DatabaseConnection>,
    Extension(storage): Extension<PlaceholderStorage>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadImageResponse>, ApiError> {
    let mut multipart = multipart.map_err(|e| ApiError::validation(e.body_text()))?;
    let form = read_form(&mut multipart).await?;

    let file = form
        .image
        .ok_or_else(|| ApiError::validation("No image file provided"))?;
    let raw_user_id = form
        .user_id
        .ok_or_else(|| ApiError::validation("User ID is required"))?;
    let user_id = parse_id(&raw_user_id, "Invalid user ID")?;
    let plant_id = form
        .plant_id
        .map(|raw| parse_id(&raw, "Invalid plant ID"))
        .transpose()?;
    let diagnosis_id = form
        .diagnosis_id
        .map(|raw| parse_id(&raw, "Invalid diagnosis ID"))
        .transpose()?;

    tracing::Span::current().record("user_id", tracing::field::display(user_id));

    check_references(&db, user_id, plant_id, diagnosis_id).await?;

    let now = Utc::now();
    let metadata = describe(&file);
    let format = metadata.format.clone();

    let record = image::ActiveModel {
        id: Set(Uuid::new_v4()),
        url: Set(storage.location_for(&file.file_name, now)),
        user_id: Set(user_id),
        plant_id: Set(plant_id),
        diagnosis_id: Set(diagnosis_id),
        uploaded_at: Set(now.fixed_offset()),
        metadata: Set(Some(metadata)),
    };

    let saved = record.insert(&db).await.map_err(insert_failure)?;

    tracing::Span::current().record("image_id", tracing::field::display(saved.id));
    tracing::info!("Stored image {} ({} bytes) at {}", saved.id, file.data.len(), saved.url);
    metrics::record_image_uploaded(&format);

    Ok(Json(UploadImageResponse {
        success: true,
        image_id: saved.id,
    }))
}

async fn check_references(
    db: &DatabaseConnection,
    user_id: Uuid,
    plant_id: Option<Uuid>,
    diagnosis_id: Option<Uuid>,
) -> Result<(), ApiError> {
    let user = User::find_by_id(user_id)
        .one(db)
        .await
        .map_err(store_failure("Failed to upload image"))?;
    if user.is_none() {
        return Err(ApiError::not_found("User not found"));
    }

    if let Some(id) = plant_id {
        let plant = Plant::find_by_id(id)
            .one(db)
            .await
            .map_err(store_failure("Failed to upload image"))?;
        if plant.is_none() {
            return Err(ApiError::not_found("Plant not found"));
        }
    }

    if let Some(id) = diagnosis_id {
        let diagnosis = Diagnosis::find_by_id(id)
            .one(db)
            .await
            .map_err(store_failure("Failed to upload image"))?;
        if diagnosis.is_none() {
            return Err(ApiError::not_found("Diagnosis not found"));
        }
    }

    Ok(())
}

// A referenced row can still vanish between the checks and the insert.
fn insert_failure(e: DbErr) -> ApiError {
    match e.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            tracing::warn!("Image insert lost a referenced row: {}", e);
            ApiError::not_found("Referenced user, plant or diagnosis not found")
        }
        _ => store_failure("Failed to upload image")(e),
    }
}

async fn read_form(multipart: &mut Multipart) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "image" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(multipart_error)?;

                // Browsers send an empty part when no file was picked.
                if !data.is_empty() {
                    form.image = Some(UploadedFile {
                        file_name,
                        content_type,
                        data,
                    });
                }
            }
            "userId" => form.user_id = non_empty(field.text().await.map_err(multipart_error)?),
            "plantId" => form.plant_id = non_empty(field.text().await.map_err(multipart_error)?),
            "diagnosisId" => {
                form.diagnosis_id = non_empty(field.text().await.map_err(multipart_error)?)
            }
            _ => {}
        }
    }

    Ok(form)
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge("Image is too large".to_string())
    } else {
        ApiError::validation(e.body_text())
    }
}

fn describe(file: &UploadedFile) -> ImageMetadata {
    let mime = file
        .content_type
        .as_deref()
        .and_then(|ct| ct.parse::<mime::Mime>().ok())
        .unwrap_or_else(|| mime_guess::from_path(&file.file_name).first_or_octet_stream());

    ImageMetadata {
        width: PLACEHOLDER_WIDTH,
        height: PLACEHOLDER_HEIGHT,
        format: mime.subtype().as_str().to_string(),
        size: file.data.len() as u64,
    }
}
