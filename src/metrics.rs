use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

use crate::entities::{diagnosis, disease, image, plant, treatment};

/// Row counts read once at startup to seed the gauges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StartupCounts {
    pub plants: u64,
    pub diseases: u64,
    pub treatments: u64,
    pub images: u64,
    pub diagnoses: u64,
}

/// A table that cannot be counted seeds its gauge with zero.
async fn count_or_zero<E>(db: &DatabaseConnection, table: &str) -> u64
where
    E: EntityTrait,
    E::Model: Sync,
{
    match E::find().count(db).await {
        Ok(count) => count,
        Err(e) => {
            tracing::warn!(table, error = %e, "Failed to count rows for startup metrics");
            0
        }
    }
}

pub async fn init_metrics(db: &DatabaseConnection) -> StartupCounts {
    let counts = StartupCounts {
        plants: count_or_zero::<plant::Entity>(db, "plants").await,
        diseases: count_or_zero::<disease::Entity>(db, "diseases").await,
        treatments: count_or_zero::<treatment::Entity>(db, "treatments").await,
        images: count_or_zero::<image::Entity>(db, "images").await,
        diagnoses: count_or_zero::<diagnosis::Entity>(db, "diagnoses").await,
    };

    metrics::gauge!("plant_doctor_plants_total").set(counts.plants as f64);
    metrics::gauge!("plant_doctor_diseases_total").set(counts.diseases as f64);
    metrics::gauge!("plant_doctor_treatments_total").set(counts.treatments as f64);
    metrics::gauge!("plant_doctor_images_total").set(counts.images as f64);
    metrics::gauge!("plant_doctor_diagnoses_total").set(counts.diagnoses as f64);

    tracing::info!(
        "Initialized metrics: Plants={}, Diseases={}, Treatments={}, Images={}, Diagnoses={}",
        counts.plants,
        counts.diseases,
        counts.treatments,
        counts.images,
        counts.diagnoses
    );

    counts
}

pub fn record_image_uploaded(format: &str) {
    metrics::gauge!("plant_doctor_images_total").increment(1.0);
    metrics::counter!("plant_doctor_images_uploaded_total", "format" => format.to_string())
        .increment(1);
}

pub fn record_diagnosis_created(disease_name: &str, confidence: f64) {
    metrics::gauge!("plant_doctor_diagnoses_total").increment(1.0);
    metrics::counter!("plant_doctor_diagnoses_created_total", "disease" => disease_name.to_string())
        .increment(1);
    metrics::histogram!("plant_doctor_diagnosis_confidence").record(confidence);
}

pub fn record_diagnosis_failed(reason: &'static str) {
    metrics::counter!("plant_doctor_diagnoses_failed_total", "reason" => reason).increment(1);
}
