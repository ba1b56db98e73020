//! Remote segmentation / recommendation endpoints.
//!
//! The classification logic lives entirely on the server; these calls only
//! ship feature vectors and decode results. The user-facing fallback policy
//! for failures is in [`crate::ml`].
//!
//! - `POST /ml/segment` - Naive Bayes customer segment
//! - `POST /ml/segment-dt` - decision-tree customer segment
//! - `POST /ml/recommend` - ranked service recommendations
//! - `POST /ml/train-naive-bayes` - retrain the segmentation model
//! - `POST /ml/predict-probabilities` - per-class probabilities

use reqwest::Method;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};

/// Feature vector describing one customer's ordering behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SegmentRequest {
    pub order_count: u32,
    pub total_spent: Decimal,
    pub avg_order_value: Decimal,
    pub days_since_last_order: u32,
}

/// Classification result for one customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSegment {
    /// Segment name, e.g. "regular", "premium", "at-risk".
    pub segment: String,
    /// Classifier confidence in `0.0..=1.0`.
    pub confidence: f64,
}

/// One ranked service recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub service: String,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Result of a model retraining run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainResult {
    pub accuracy: f64,
    pub samples: u64,
}

/// Probability assigned to one segment class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassProbability {
    pub class: String,
    pub probability: f64,
}

impl ApiClient {
    /// Classify a customer with the Naive Bayes model.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, status, or decoding failure.
    pub async fn segment(&self, request: &SegmentRequest) -> Result<CustomerSegment, ApiError> {
        self.request(Method::POST, "ml/segment", Some(request)).await
    }

    /// Classify a customer with the decision-tree model.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, status, or decoding failure.
    pub async fn segment_decision_tree(
        &self,
        request: &SegmentRequest,
    ) -> Result<CustomerSegment, ApiError> {
        self.request(Method::POST, "ml/segment-dt", Some(request))
            .await
    }

    /// Ranked service recommendations for a customer.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, status, or decoding failure.
    pub async fn recommend(
        &self,
        request: &SegmentRequest,
    ) -> Result<Vec<Recommendation>, ApiError> {
        self.request(Method::POST, "ml/recommend", Some(request))
            .await
    }

    /// Kick off a Naive Bayes retraining run.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, status, or decoding failure.
    pub async fn train_naive_bayes(&self) -> Result<TrainResult, ApiError> {
        self.request::<(), _>(Method::POST, "ml/train-naive-bayes", None)
            .await
    }

    /// Per-class probabilities for a customer.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, status, or decoding failure.
    pub async fn predict_probabilities(
        &self,
        request: &SegmentRequest,
    ) -> Result<Vec<ClassProbability>, ApiError> {
        self.request(Method::POST, "ml/predict-probabilities", Some(request))
            .await
    }
}
