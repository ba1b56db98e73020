//! Order endpoints.
//!
//! - `GET /orders` - all orders visible to the caller
//! - `GET /orders/my?email=` - orders for one customer
//! - `POST /orders` - submit a generic order
//! - `POST /orders/dry-cleaning` - schedule a dry-cleaning pickup
//! - `POST /orders/dry-cleaning-clothes` - itemized dry-cleaning order

use chrono::NaiveDate;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use fresh_fold_core::{CustomerDetails, Email, Order, OrderItem};

use super::{ApiClient, ApiError};

/// Pickup scheduling request for dry cleaning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DryCleaningRequest {
    pub customer: CustomerDetails,
    pub pickup_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Itemized dry-cleaning order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DryCleaningClothesRequest {
    pub customer: CustomerDetails,
    pub pickup_date: NaiveDate,
    pub items: Vec<OrderItem>,
}

impl ApiClient {
    /// Fetch all orders visible to the caller.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, status, or decoding failure.
    pub async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get_json("orders").await
    }

    /// Fetch the orders belonging to one customer.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, status, or decoding failure.
    pub async fn orders_for(&self, email: &Email) -> Result<Vec<Order>, ApiError> {
        let path = format!("orders/my?email={}", urlencode(email.as_str()));
        self.get_json(&path).await
    }

    /// Submit an order; the server may reassign the ID.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, status, or decoding failure.
    pub async fn submit_order(&self, order: &Order) -> Result<Order, ApiError> {
        self.request(Method::POST, "orders", Some(order)).await
    }

    /// Schedule a dry-cleaning pickup.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, status, or decoding failure.
    pub async fn submit_dry_cleaning(
        &self,
        request: &DryCleaningRequest,
    ) -> Result<Order, ApiError> {
        self.request(Method::POST, "orders/dry-cleaning", Some(request))
            .await
    }

    /// Submit an itemized dry-cleaning order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, status, or decoding failure.
    pub async fn submit_dry_cleaning_clothes(
        &self,
        request: &DryCleaningClothesRequest,
    ) -> Result<Order, ApiError> {
        self.request(Method::POST, "orders/dry-cleaning-clothes", Some(request))
            .await
    }
}

/// Percent-encode a query value.
pub(crate) fn urlencode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urlencode_email() {
        assert_eq!(urlencode("a+b@example.com"), "a%2Bb%40example.com");
        assert_eq!(urlencode("plain"), "plain");
    }
}
