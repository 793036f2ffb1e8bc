//! Turns an uploaded image into a disease guess.
//!
//! The diagnosis workflow only depends on [`Classifier`], so a real model can
//! replace [`RandomClassifier`] without touching the HTTP layer.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use uuid::Uuid;

use crate::entities::image;

/// Placeholder confidence reported by [`RandomClassifier`].
pub const PLACEHOLDER_CONFIDENCE: f64 = 0.85;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Classification {
    pub disease_id: Uuid,
    pub confidence: f64,
}

#[derive(thiserror::Error, Debug)]
pub enum ClassifyError {
    #[error("no diseases are configured")]
    NoCandidates,
    #[error("classifier failed: {0}")]
    Backend(String),
}

#[async_trait]
pub trait Classifier: Send + Sync {
    /// Picks one of `candidates` for `image`. Implementations must return a
    /// confidence in `[0, 1]`.
    async fn classify(
        &self,
        image: &image::Model,
        candidates: &[Uuid],
    ) -> Result<Classification, ClassifyError>;
}

/// Stand-in for real inference: a uniform pick over the known diseases.
#[derive(Clone, Debug)]
pub struct RandomClassifier {
    confidence: f64,
}

impl Default for RandomClassifier {
    fn default() -> Self {
        Self {
            confidence: PLACEHOLDER_CONFIDENCE,
        }
    }
}

#[async_trait]
impl Classifier for RandomClassifier {
    async fn classify(
        &self,
        _image: &image::Model,
        candidates: &[Uuid],
    ) -> Result<Classification, ClassifyError> {
        let disease_id = candidates
            .choose(&mut rand::thread_rng())
            .copied()
            .ok_or(ClassifyError::NoCandidates)?;

        Ok(Classification {
            disease_id,
            confidence: self.confidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_image() -> image::Model {
        image::Model {
            id: Uuid::new_v4(),
            url: "https://storage.example.com/1-leaf.jpg".to_string(),
            user_id: Uuid::new_v4(),
            plant_id: None,
            diagnosis_id: None,
            uploaded_at: chrono::Utc::now().fixed_offset(),
            metadata: None,
        }
    }

    #[tokio::test]
    async fn picks_one_of_the_candidates() {
        let candidates: Vec<Uuid> = (0..5).map(|_| Uuid::new_v4()).collect();
        let classifier = RandomClassifier::default();

        for _ in 0..20 {
            let result = classifier
                .classify(&sample_image(), &candidates)
                .await
                .unwrap();
            assert!(candidates.contains(&result.disease_id));
            assert_eq!(result.confidence, PLACEHOLDER_CONFIDENCE);
        }
    }

    #[tokio::test]
    async fn empty_candidate_set_is_an_error() {
        let err = RandomClassifier::default()
            .classify(&sample_image(), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, ClassifyError::NoCandidates));
    }
}
