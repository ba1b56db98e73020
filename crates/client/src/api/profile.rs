//! Customer profile endpoints.
//!
//! - `GET /profile` - the caller's profile
//! - `PUT /profile` - replace the caller's profile

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};

/// A customer profile as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Preferred detergent / fabric-care notes, free-form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub care_notes: Option<String>,
}

impl ApiClient {
    /// Fetch the caller's profile.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, status, or decoding failure.
    pub async fn profile(&self) -> Result<UserProfile, ApiError> {
        self.get_json("profile").await
    }

    /// Replace the caller's profile, returning the stored version.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport, status, or decoding failure.
    pub async fn update_profile(&self, profile: &UserProfile) -> Result<UserProfile, ApiError> {
        self.request(Method::PUT, "profile", Some(profile)).await
    }
}
