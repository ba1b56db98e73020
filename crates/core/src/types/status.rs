//! Order status taxonomy.
//!
//! An order moves through a fixed, strictly linear pipeline of eight
//! canonical codes:
//!
//! ```text
//! order-placed -> order-accepted -> out-for-pickup -> pickup-completed ->
//! wash-in-progress -> wash-completed -> out-for-delivery -> delivery-completed
//! ```
//!
//! There is no branching: no cancellation or exception states are modeled.
//! "Next status" is simply the following entry in [`OrderStatus::PROGRESSION`].
//!
//! Older releases wrote human-readable codes (`"Pending"`, `"Delivered"`, ...)
//! into stored orders. Those legacy codes resolve through [`LEGACY_ALIASES`]
//! to a canonical code, and stored data containing them must keep working.
//! Every lookup in this module is therefore **total**: an unrecognized code
//! degrades to a neutral fallback record instead of failing.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Neutral color used for unrecognized status codes.
pub const NEUTRAL_COLOR: &str = "#9e9e9e";

/// Canonical order status codes, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    OrderPlaced,
    OrderAccepted,
    OutForPickup,
    PickupCompleted,
    WashInProgress,
    WashCompleted,
    OutForDelivery,
    DeliveryCompleted,
}

/// Legacy status codes written by older releases, mapped onto the canonical
/// set. Stored orders may still carry any of these.
pub const LEGACY_ALIASES: &[(&str, OrderStatus)] = &[
    ("Pending", OrderStatus::OrderPlaced),
    ("Confirmed", OrderStatus::OrderAccepted),
    ("Pickup", OrderStatus::OutForPickup),
    ("Picked Up", OrderStatus::PickupCompleted),
    ("Processing", OrderStatus::WashInProgress),
    ("Washing", OrderStatus::WashInProgress),
    ("Ready", OrderStatus::WashCompleted),
    ("Out for Delivery", OrderStatus::OutForDelivery),
    ("Delivered", OrderStatus::DeliveryCompleted),
    ("Completed", OrderStatus::DeliveryCompleted),
];

/// Codes classified as "in flight" for dashboard counts.
///
/// Maintained by hand together with [`COMPLETED_CODES`] and
/// [`LEGACY_ALIASES`]; the partition over the canonical set is enforced by a
/// regression test, not by construction.
pub const ACTIVE_CODES: &[&str] = &[
    "order-placed",
    "order-accepted",
    "out-for-pickup",
    "pickup-completed",
    "wash-in-progress",
    "wash-completed",
    "out-for-delivery",
    // legacy
    "Pending",
    "Confirmed",
    "Pickup",
    "Picked Up",
    "Processing",
    "Washing",
    "Ready",
    "Out for Delivery",
];

/// Codes classified as terminal for dashboard counts.
pub const COMPLETED_CODES: &[&str] = &[
    "delivery-completed",
    // legacy
    "Delivered",
    "Completed",
];

/// Display record for a status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    /// Short human-readable label. For unrecognized codes this is the raw
    /// input, or `"Unknown"` when the input is empty.
    pub label: Cow<'static, str>,
    /// One-line description of what is happening to the order.
    pub description: &'static str,
    /// Hex color for badges and progress bars.
    pub color: &'static str,
    /// Pipeline completion percentage, always in `0..=100`.
    pub progress: u8,
}

impl OrderStatus {
    /// The canonical pipeline, in order.
    pub const PROGRESSION: [Self; 8] = [
        Self::OrderPlaced,
        Self::OrderAccepted,
        Self::OutForPickup,
        Self::PickupCompleted,
        Self::WashInProgress,
        Self::WashCompleted,
        Self::OutForDelivery,
        Self::DeliveryCompleted,
    ];

    /// The canonical wire code for this status.
    #[must_use]
    pub const fn as_code(self) -> &'static str {
        match self {
            Self::OrderPlaced => "order-placed",
            Self::OrderAccepted => "order-accepted",
            Self::OutForPickup => "out-for-pickup",
            Self::PickupCompleted => "pickup-completed",
            Self::WashInProgress => "wash-in-progress",
            Self::WashCompleted => "wash-completed",
            Self::OutForDelivery => "out-for-delivery",
            Self::DeliveryCompleted => "delivery-completed",
        }
    }

    /// Resolve a raw code to a canonical status, accepting legacy aliases.
    ///
    /// Returns `None` for codes outside both the canonical and legacy sets.
    #[must_use]
    pub fn resolve(code: &str) -> Option<Self> {
        if let Some(status) = Self::PROGRESSION.iter().find(|s| s.as_code() == code) {
            return Some(*status);
        }
        LEGACY_ALIASES
            .iter()
            .find(|(alias, _)| *alias == code)
            .map(|(_, status)| *status)
    }

    /// The next status in the pipeline, or `None` for the terminal status.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        let position = Self::PROGRESSION.iter().position(|s| *s == self)?;
        Self::PROGRESSION.get(position + 1).copied()
    }

    /// Static display record for this status.
    #[must_use]
    pub const fn info(self) -> StatusInfo {
        let (label, description, color, progress) = match self {
            Self::OrderPlaced => (
                "Order Placed",
                "We have received your order",
                "#2196f3",
                10,
            ),
            Self::OrderAccepted => (
                "Order Accepted",
                "Your order has been confirmed",
                "#3f51b5",
                20,
            ),
            Self::OutForPickup => (
                "Out for Pickup",
                "A courier is on the way to collect your items",
                "#ff9800",
                35,
            ),
            Self::PickupCompleted => (
                "Pickup Completed",
                "Your items have been collected",
                "#ffc107",
                50,
            ),
            Self::WashInProgress => (
                "Wash in Progress",
                "Your items are being cleaned",
                "#00bcd4",
                65,
            ),
            Self::WashCompleted => (
                "Wash Completed",
                "Cleaning is finished and items are being packed",
                "#009688",
                80,
            ),
            Self::OutForDelivery => (
                "Out for Delivery",
                "A courier is on the way with your items",
                "#673ab7",
                90,
            ),
            Self::DeliveryCompleted => (
                "Delivery Completed",
                "Your order has been delivered",
                "#4caf50",
                100,
            ),
        };
        StatusInfo {
            label: Cow::Borrowed(label),
            description,
            color,
            progress,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s).ok_or_else(|| format!("unrecognized status code: {s}"))
    }
}

/// Display record for a raw status code. Total over all string inputs.
///
/// Canonical codes return their static record, legacy codes resolve through
/// [`LEGACY_ALIASES`], and anything else falls back to a neutral record with
/// progress 0 and the raw input as its label.
#[must_use]
pub fn status_info(code: &str) -> StatusInfo {
    OrderStatus::resolve(code).map_or_else(
        || StatusInfo {
            label: if code.is_empty() {
                Cow::Borrowed("Unknown")
            } else {
                Cow::Owned(code.to_owned())
            },
            description: "Status not recognized",
            color: NEUTRAL_COLOR,
            progress: 0,
        },
        OrderStatus::info,
    )
}

/// Label projection of [`status_info`].
#[must_use]
pub fn status_label(code: &str) -> Cow<'static, str> {
    status_info(code).label
}

/// Color projection of [`status_info`].
#[must_use]
pub fn status_color(code: &str) -> &'static str {
    status_info(code).color
}

/// Progress projection of [`status_info`].
#[must_use]
pub fn status_progress(code: &str) -> u8 {
    status_info(code).progress
}

/// Description projection of [`status_info`].
#[must_use]
pub fn status_description(code: &str) -> &'static str {
    status_info(code).description
}

/// The canonical code that follows `code` in the pipeline.
///
/// Only exact canonical codes advance; legacy aliases and unrecognized codes
/// return `None`, as does the terminal `delivery-completed`. Callers holding
/// a legacy code normalize through [`OrderStatus::resolve`] first.
#[must_use]
pub fn next_status(code: &str) -> Option<&'static str> {
    let position = OrderStatus::PROGRESSION
        .iter()
        .position(|s| s.as_code() == code)?;
    OrderStatus::PROGRESSION
        .get(position + 1)
        .map(|s| s.as_code())
}

/// Whether `code` counts as an in-flight order on dashboards.
#[must_use]
pub fn is_active_code(code: &str) -> bool {
    ACTIVE_CODES.contains(&code)
}

/// Whether `code` counts as a completed order on dashboards.
#[must_use]
pub fn is_completed_code(code: &str) -> bool {
    COMPLETED_CODES.contains(&code)
}
