//! Display policy for the remote segmentation/recommendation service.
//!
//! Screens that surface ML output must never render broken: when the
//! remote service fails for any reason, these wrappers log the failure and
//! substitute plausible defaults (the `regular` segment at 0.8 confidence,
//! and a static recommendation list). Callers that need to distinguish
//! real results from fallbacks use the raw [`crate::api::ml`] methods.

use crate::api::ApiClient;
use crate::api::ml::{CustomerSegment, Recommendation, SegmentRequest};

/// Segment reported when the remote classifier is unreachable.
pub const FALLBACK_SEGMENT: &str = "regular";

/// Confidence reported with [`FALLBACK_SEGMENT`].
pub const FALLBACK_CONFIDENCE: f64 = 0.8;

/// Services suggested when the recommender is unreachable.
pub const FALLBACK_RECOMMENDATIONS: &[&str] = &["Wash & Fold", "Dry Cleaning", "Ironing"];

/// The fallback classification.
#[must_use]
pub fn fallback_segment() -> CustomerSegment {
    CustomerSegment {
        segment: FALLBACK_SEGMENT.to_owned(),
        confidence: FALLBACK_CONFIDENCE,
    }
}

/// The fallback recommendation list.
#[must_use]
pub fn fallback_recommendations() -> Vec<Recommendation> {
    FALLBACK_RECOMMENDATIONS
        .iter()
        .map(|service| Recommendation {
            service: (*service).to_owned(),
            score: 0.5,
            reason: None,
        })
        .collect()
}

/// Classify a customer, degrading to [`fallback_segment`] on any failure.
pub async fn segment_or_default(
    client: &ApiClient,
    request: &SegmentRequest,
) -> CustomerSegment {
    match client.segment(request).await {
        Ok(segment) => segment,
        Err(e) => {
            tracing::warn!(error = %e, "segmentation unavailable, using fallback");
            fallback_segment()
        }
    }
}

/// Recommend services, degrading to [`fallback_recommendations`] on any
/// failure.
pub async fn recommendations_or_default(
    client: &ApiClient,
    request: &SegmentRequest,
) -> Vec<Recommendation> {
    match client.recommend(request).await {
        Ok(recommendations) if !recommendations.is_empty() => recommendations,
        Ok(_) => {
            tracing::debug!("recommender returned nothing, using fallback list");
            fallback_recommendations()
        }
        Err(e) => {
            tracing::warn!(error = %e, "recommender unavailable, using fallback list");
            fallback_recommendations()
        }
    }
}

/// Build a [`SegmentRequest`] from locally derived order statistics.
#[must_use]
pub fn request_from_stats(stats: &fresh_fold_core::OrderStats) -> SegmentRequest {
    let order_count = u32::try_from(stats.total_orders).unwrap_or(u32::MAX);
    let avg_order_value = if order_count == 0 {
        rust_decimal::Decimal::ZERO
    } else {
        stats.total_spent / rust_decimal::Decimal::from(order_count)
    };
    SegmentRequest {
        order_count,
        total_spent: stats.total_spent,
        avg_order_value,
        days_since_last_order: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::config::ClientConfig;

    /// A client pointed at a port nothing listens on.
    fn unreachable_client() -> ApiClient {
        let config = ClientConfig {
            api_base_url: "http://127.0.0.1:9/".parse().expect("valid url"),
            api_token: None,
            user_email: None,
            data_dir: std::path::PathBuf::from(".freshfold"),
            request_timeout: Duration::from_millis(500),
        };
        ApiClient::new(&config).expect("client")
    }

    #[tokio::test]
    async fn test_segment_falls_back_when_unreachable() {
        let client = unreachable_client();
        let segment = segment_or_default(&client, &SegmentRequest::default()).await;
        assert_eq!(segment.segment, FALLBACK_SEGMENT);
        assert!((segment.confidence - FALLBACK_CONFIDENCE).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_recommendations_fall_back_when_unreachable() {
        let client = unreachable_client();
        let recommendations =
            recommendations_or_default(&client, &SegmentRequest::default()).await;
        let names: Vec<&str> = recommendations.iter().map(|r| r.service.as_str()).collect();
        assert_eq!(names, FALLBACK_RECOMMENDATIONS);
    }

    #[test]
    fn test_request_from_stats_avg() {
        use rust_decimal::Decimal;

        let stats = fresh_fold_core::OrderStats {
            total_orders: 4,
            active_orders: 1,
            completed_orders: 3,
            total_spent: Decimal::from(200),
            reward_points: 20,
        };
        let request = request_from_stats(&stats);
        assert_eq!(request.order_count, 4);
        assert_eq!(request.avg_order_value, Decimal::from(50));
    }

    #[test]
    fn test_request_from_empty_stats() {
        let request = request_from_stats(&fresh_fold_core::OrderStats::default());
        assert_eq!(request.order_count, 0);
        assert_eq!(request.avg_order_value, rust_decimal::Decimal::ZERO);
    }
}
