//! Create-Diagnosis: classify an uploaded image, record the diagnosis, and
//! gather what the client needs to show it.
//!
//! Every statement runs inside one transaction. On any failure nothing is
//! persisted: no diagnosis row and no image back-reference.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, ModelTrait,
    QuerySelect, Set, TransactionTrait,
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::classifier::{Classification, Classifier, ClassifyError};
use crate::entities::{diagnosis, disease, image, prelude::*, symptom, treatment};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResult {
    pub diagnosis_id: Uuid,
    pub disease: disease::Model,
    pub confidence: f64,
    pub symptoms: Vec<symptom::Model>,
    pub possible_treatments: Vec<treatment::Model>,
}

#[derive(Error, Debug)]
pub enum DiagnoseError {
    #[error("image {0} not found")]
    ImageNotFound(Uuid),

    #[error("disease {0} not found")]
    DiseaseNotFound(Uuid),

    #[error(transparent)]
    Classify(#[from] ClassifyError),

    #[error("classifier returned an unusable result: {0}")]
    InvalidClassification(String),

    #[error("store error: {0}")]
    Store(#[from] DbErr),
}

pub async fn create_diagnosis(
    db: &DatabaseConnection,
    classifier: &dyn Classifier,
    image_id: Uuid,
) -> Result<DiagnosisResult, DiagnoseError> {
    let txn = db.begin().await?;

    match diagnose_in(&txn, classifier, image_id).await {
        Ok(result) => {
            txn.commit().await?;
            Ok(result)
        }
        Err(e) => {
            if let Err(rollback) = txn.rollback().await {
                tracing::warn!("Rollback after failed diagnosis did not complete: {}", rollback);
            }
            Err(e)
        }
    }
}

async fn diagnose_in(
    txn: &DatabaseTransaction,
    classifier: &dyn Classifier,
    image_id: Uuid,
) -> Result<DiagnosisResult, DiagnoseError> {
    let source = Image::find_by_id(image_id)
        .one(txn)
        .await?
        .ok_or(DiagnoseError::ImageNotFound(image_id))?;

    let candidates: Vec<Uuid> = Disease::find()
        .select_only()
        .column(disease::Column::Id)
        .into_tuple()
        .all(txn)
        .await?;

    let Classification {
        disease_id,
        confidence,
    } = classifier.classify(&source, &candidates).await?;

    if !(0.0..=1.0).contains(&confidence) {
        return Err(DiagnoseError::InvalidClassification(format!(
            "confidence {confidence} is outside [0, 1]"
        )));
    }
    if !candidates.contains(&disease_id) {
        return Err(DiagnoseError::InvalidClassification(format!(
            "disease {disease_id} is not a known disease"
        )));
    }

    let new_diagnosis = diagnosis::ActiveModel {
        id: Set(Uuid::new_v4()),
        plant_id: Set(source.plant_id),
        disease_id: Set(disease_id),
        user_id: Set(source.user_id),
        confidence: Set(confidence),
        diagnosed_at: Set(Utc::now().fixed_offset()),
        notes: Set(None),
        status: Set(diagnosis::Status::Pending),
    }
    .insert(txn)
    .await?;

    let disease = Disease::find_by_id(new_diagnosis.disease_id)
        .one(txn)
        .await?
        .ok_or(DiagnoseError::DiseaseNotFound(new_diagnosis.disease_id))?;

    let symptoms = disease.find_related(Symptom).all(txn).await?;
    let possible_treatments = disease.find_related(Treatment).all(txn).await?;

    // Last write wins when the same image is diagnosed more than once.
    let mut back_ref: image::ActiveModel = source.into();
    back_ref.diagnosis_id = Set(Some(new_diagnosis.id));
    back_ref.update(txn).await?;

    Ok(DiagnosisResult {
        diagnosis_id: new_diagnosis.id,
        disease,
        confidence: new_diagnosis.confidence,
        symptoms,
        possible_treatments,
    })
}
