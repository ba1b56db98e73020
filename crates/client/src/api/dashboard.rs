//! The reads backing the dashboard screens.
//!
//! Seven independent fetches feed one dashboard render (see
//! [`crate::dashboard`]). Each has its own endpoint; only the service
//! catalog is cached, because it changes on the order of days while the
//! rest is per-customer state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fresh_fold_core::{Email, Money, Order, OrderStats, ServiceId};

use super::orders::urlencode;
use super::{ApiClient, ApiError};

/// An offered service, e.g. "Wash & Fold" or "Dry Cleaning".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
    pub description: String,
    pub base_price: Money,
    /// Typical turnaround, in hours.
    pub turnaround_hours: u32,
}

/// A recent account activity line ("order delivered", "points earned", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// Machine-readable activity kind.
    pub kind: String,
    pub description: String,
    pub occurred_at: DateTime<Utc>,
}

/// Loyalty summary for one customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardInfo {
    pub points: u64,
    pub tier: String,
}

impl ApiClient {
    /// Server-side order statistics for one customer.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, status, or decoding failure.
    pub async fn dashboard_stats(&self, email: &Email) -> Result<OrderStats, ApiError> {
        let path = format!("dashboard/stats?email={}", urlencode(email.as_str()));
        self.get_json(&path).await
    }

    /// The customer's most recent orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, status, or decoding failure.
    pub async fn recent_orders(&self, email: &Email) -> Result<Vec<Order>, ApiError> {
        let path = format!("orders/recent?email={}", urlencode(email.as_str()));
        self.get_json(&path).await
    }

    /// The customer's in-flight orders.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, status, or decoding failure.
    pub async fn active_orders(&self, email: &Email) -> Result<Vec<Order>, ApiError> {
        let path = format!("orders/active?email={}", urlencode(email.as_str()));
        self.get_json(&path).await
    }

    /// Recent account activity, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, status, or decoding failure.
    pub async fn recent_activities(&self, email: &Email) -> Result<Vec<ActivityEntry>, ApiError> {
        let path = format!("activities/recent?email={}", urlencode(email.as_str()));
        self.get_json(&path).await
    }

    /// The service catalog, cached for five minutes.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, status, or decoding failure.
    pub async fn services(&self) -> Result<Vec<Service>, ApiError> {
        if let Some(cached) = self.services_cache().get("services").await {
            tracing::debug!("service catalog cache hit");
            return Ok(cached);
        }

        let services: Vec<Service> = self.get_json("services").await?;
        self.services_cache()
            .insert("services", services.clone())
            .await;
        Ok(services)
    }

    /// Loyalty summary for one customer.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, status, or decoding failure.
    pub async fn rewards(&self, email: &Email) -> Result<RewardInfo, ApiError> {
        let path = format!("rewards?email={}", urlencode(email.as_str()));
        self.get_json(&path).await
    }
}
