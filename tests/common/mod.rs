#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use plant_doctor::{
    api,
    classifier::{Classifier, RandomClassifier},
    config::Config,
    entities::{disease, disease_symptom, image, plant, symptom, treatment, user},
    migrator::Migrator,
};
use sea_orm::{ActiveModelTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, Set};
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub const BOUNDARY: &str = "plantdoctorboundary";

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
}

pub async fn setup() -> TestApp {
    setup_with(Arc::new(RandomClassifier::default())).await
}

pub async fn setup_with(classifier: Arc<dyn Classifier>) -> TestApp {
    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        ..Config::default()
    };
    setup_with_config(classifier, config).await
}

pub async fn setup_with_config(classifier: Arc<dyn Classifier>, config: Config) -> TestApp {
    // A single connection keeps every query on the same in-memory database.
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(opt).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db.execute_unprepared("PRAGMA foreign_keys = ON").await.unwrap();

    let router = api::router(db.clone(), classifier, &config);

    TestApp { router, db }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
}

pub fn post_multipart(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                        .as_bytes(),
                );
            }
            Part::File {
                name,
                file_name,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn seed_user(db: &DatabaseConnection, username: &str) -> user::Model {
    user::ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(username.to_string()),
        email: Set(format!("{username}@example.com")),
        created_at: Set(chrono::Utc::now().fixed_offset()),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_plant(db: &DatabaseConnection, name: &str) -> plant::Model {
    plant::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        scientific_name: Set(format!("{name} officinalis")),
        description: Set(format!("A common {name}")),
        care_instructions: Set("Water weekly".to_string()),
        image_url: Set(None),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_disease(
    db: &DatabaseConnection,
    name: &str,
    severity: disease::Rating,
) -> disease::Model {
    disease::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        description: Set(format!("{name} affects leaves")),
        causes: Set("Fungal spores".to_string()),
        severity: Set(severity),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_symptom(
    db: &DatabaseConnection,
    disease: &disease::Model,
    name: &str,
) -> symptom::Model {
    let symptom = symptom::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        description: Set(format!("{name} on the leaf surface")),
    }
    .insert(db)
    .await
    .unwrap();

    disease_symptom::Entity::insert(disease_symptom::ActiveModel {
        disease_id: Set(disease.id),
        symptom_id: Set(symptom.id),
    })
    .exec_without_returning(db)
    .await
    .unwrap();

    symptom
}

pub async fn seed_treatment(
    db: &DatabaseConnection,
    disease: &disease::Model,
    name: &str,
) -> treatment::Model {
    treatment::ActiveModel {
        id: Set(Uuid::new_v4()),
        disease_id: Set(disease.id),
        name: Set(name.to_string()),
        description: Set(format!("{name} for {}", disease.name)),
        instructions: Set("Apply every 7 days".to_string()),
        duration: Set(Some("3 weeks".to_string())),
        effectiveness: Set(disease::Rating::High),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_image(
    db: &DatabaseConnection,
    user: &user::Model,
    plant: Option<&plant::Model>,
) -> image::Model {
    image::ActiveModel {
        id: Set(Uuid::new_v4()),
        url: Set("https://storage.example.com/1-leaf.jpg".to_string()),
        user_id: Set(user.id),
        plant_id: Set(plant.map(|p| p.id)),
        diagnosis_id: Set(None),
        uploaded_at: Set(chrono::Utc::now().fixed_offset()),
        metadata: Set(None),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn reload_image(db: &DatabaseConnection, id: Uuid) -> image::Model {
    image::Entity::find_by_id(id).one(db).await.unwrap().unwrap()
}
