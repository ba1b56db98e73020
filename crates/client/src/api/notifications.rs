//! Notification inbox endpoints.
//!
//! - `GET /notifications/user/:email` - inbox for one customer
//! - `PATCH /notifications/:id/read` - mark one notification read
//! - `PATCH /notifications/user/:email/read-all` - mark the whole inbox read
//! - `GET /notifications/user/:email/unread-count` - unread badge count
//! - `DELETE /notifications/:id` - delete one notification

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use fresh_fold_core::{Email, NotificationId};

use super::orders::urlencode;
use super::{ApiClient, ApiError};

/// A notification delivered to a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub body: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct UnreadCountResponse {
    count: u64,
}

impl ApiClient {
    /// Fetch a customer's notification inbox, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, status, or decoding failure.
    pub async fn notifications(&self, email: &Email) -> Result<Vec<Notification>, ApiError> {
        let path = format!("notifications/user/{}", urlencode(email.as_str()));
        self.get_json(&path).await
    }

    /// Mark one notification as read.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or status failure.
    pub async fn mark_notification_read(
        &self,
        id: &NotificationId,
    ) -> Result<Notification, ApiError> {
        let path = format!("notifications/{}/read", urlencode(id.as_str()));
        self.request::<(), _>(Method::PATCH, &path, None).await
    }

    /// Mark a customer's entire inbox as read.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or status failure.
    pub async fn mark_all_notifications_read(&self, email: &Email) -> Result<(), ApiError> {
        let path = format!(
            "notifications/user/{}/read-all",
            urlencode(email.as_str())
        );
        self.send_ignore_body::<()>(Method::PATCH, &path, None).await
    }

    /// Number of unread notifications for the badge.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, status, or decoding failure.
    pub async fn unread_notification_count(&self, email: &Email) -> Result<u64, ApiError> {
        let path = format!(
            "notifications/user/{}/unread-count",
            urlencode(email.as_str())
        );
        let response: UnreadCountResponse = self.get_json(&path).await?;
        Ok(response.count)
    }

    /// Delete one notification.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or status failure.
    pub async fn delete_notification(&self, id: &NotificationId) -> Result<(), ApiError> {
        let path = format!("notifications/{}", urlencode(id.as_str()));
        self.delete(&path).await
    }
}
