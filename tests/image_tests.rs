mod common;

use std::sync::Arc;

use axum::{body::Body, http::{header, Request, StatusCode}};
use common::*;
use plant_doctor::{classifier::RandomClassifier, config::Config, entities::image};
use sea_orm::{EntityTrait, PaginatorTrait};

const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46];

#[tokio::test]
async fn upload_without_file_is_rejected_and_stores_nothing() {
    let app = setup().await;
    let user = seed_user(&app.db, "fern").await;
    let user_id = user.id.to_string();

    let (status, body) = app
        .send(post_multipart("/images", &[Part::Text("userId", &user_id)]))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "No image file provided");
    assert_eq!(image::Entity::find().count(&app.db).await.unwrap(), 0);
}

#[tokio::test]
async fn upload_with_empty_file_part_counts_as_missing() {
    let app = setup().await;
    let user = seed_user(&app.db, "fern").await;
    let user_id = user.id.to_string();

    let (status, body) = app
        .send(post_multipart(
            "/images",
            &[
                Part::File {
                    name: "image",
                    file_name: "",
                    content_type: "application/octet-stream",
                    data: &[],
                },
                Part::Text("userId", &user_id),
            ],
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No image file provided");
    assert_eq!(image::Entity::find().count(&app.db).await.unwrap(), 0);
}

#[tokio::test]
async fn upload_without_user_is_rejected() {
    let app = setup().await;

    let (status, body) = app
        .send(post_multipart(
            "/images",
            &[Part::File {
                name: "image",
                file_name: "leaf.jpg",
                content_type: "image/jpeg",
                data: JPEG_BYTES,
            }],
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User ID is required");
    assert_eq!(image::Entity::find().count(&app.db).await.unwrap(), 0);
}

#[tokio::test]
async fn upload_with_malformed_user_id_is_rejected() {
    let app = setup().await;

    let (status, body) = app
        .send(post_multipart(
            "/images",
            &[
                Part::File {
                    name: "image",
                    file_name: "leaf.jpg",
                    content_type: "image/jpeg",
                    data: JPEG_BYTES,
                },
                Part::Text("userId", "user-1"),
            ],
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid user ID");
}

#[tokio::test]
async fn upload_stores_one_image_for_the_user() {
    let app = setup().await;
    let user = seed_user(&app.db, "fern").await;
    let plant = seed_plant(&app.db, "tomato").await;
    let user_id = user.id.to_string();
    let plant_id = plant.id.to_string();

    let (status, body) = app
        .send(post_multipart(
            "/images",
            &[
                Part::File {
                    name: "image",
                    file_name: "leaf.png",
                    content_type: "image/png",
                    data: JPEG_BYTES,
                },
                Part::Text("userId", &user_id),
                Part::Text("plantId", &plant_id),
                Part::Text("diagnosisId", ""),
            ],
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let image_id = body["imageId"].as_str().unwrap();
    assert!(!image_id.is_empty());

    let stored = image::Entity::find().all(&app.db).await.unwrap();
    assert_eq!(stored.len(), 1);
    let stored = &stored[0];
    assert_eq!(stored.id.to_string(), image_id);
    assert_eq!(stored.user_id, user.id);
    assert_eq!(stored.plant_id, Some(plant.id));
    assert_eq!(stored.diagnosis_id, None);
    assert!(stored.url.starts_with("https://storage.example.com/"));
    assert!(stored.url.ends_with("-leaf.png"));

    let metadata = stored.metadata.as_ref().unwrap();
    assert_eq!(metadata.format, "png");
    assert_eq!(metadata.size, JPEG_BYTES.len() as u64);
}

#[tokio::test]
async fn upload_for_unknown_user_is_not_found() {
    let app = setup().await;
    let stranger = uuid::Uuid::new_v4().to_string();

    let (status, body) = app
        .send(post_multipart(
            "/images",
            &[
                Part::File {
                    name: "image",
                    file_name: "leaf.jpg",
                    content_type: "image/jpeg",
                    data: JPEG_BYTES,
                },
                Part::Text("userId", &stranger),
            ],
        ))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "User not found");
    assert_eq!(image::Entity::find().count(&app.db).await.unwrap(), 0);
}

#[tokio::test]
async fn upload_for_unknown_plant_or_diagnosis_is_not_found() {
    let app = setup().await;
    let user = seed_user(&app.db, "fern").await;
    let user_id = user.id.to_string();
    let missing = uuid::Uuid::new_v4().to_string();

    for (field, message) in [
        ("plantId", "Plant not found"),
        ("diagnosisId", "Diagnosis not found"),
    ] {
        let (status, body) = app
            .send(post_multipart(
                "/images",
                &[
                    Part::File {
                        name: "image",
                        file_name: "leaf.jpg",
                        content_type: "image/jpeg",
                        data: JPEG_BYTES,
                    },
                    Part::Text("userId", &user_id),
                    Part::Text(field, &missing),
                ],
            ))
            .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], message);
    }
    assert_eq!(image::Entity::find().count(&app.db).await.unwrap(), 0);
}

#[tokio::test]
async fn oversized_upload_is_rejected_and_stores_nothing() {
    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        max_upload_bytes: 1024,
        ..Config::default()
    };
    let app = setup_with_config(Arc::new(RandomClassifier::default()), config).await;
    let user = seed_user(&app.db, "fern").await;
    let user_id = user.id.to_string();
    let large = vec![0xABu8; 4096];

    let (status, body) = app
        .send(post_multipart(
            "/images",
            &[
                Part::Text("userId", &user_id),
                Part::File {
                    name: "image",
                    file_name: "leaf.jpg",
                    content_type: "image/jpeg",
                    data: &large,
                },
            ],
        ))
        .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Image is too large");
    assert_eq!(image::Entity::find().count(&app.db).await.unwrap(), 0);
}

#[tokio::test]
async fn upload_requires_multipart_body() {
    let app = setup().await;

    let request = Request::builder()
        .method("POST")
        .uri("/images")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}
