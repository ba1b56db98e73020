//! The order record and its lifecycle types.
//!
//! An [`Order`] is the only entity with a lifecycle: created client-side
//! (and/or accepted back from the server), mutated only by whole-field
//! status replacement, and deleted only by explicit user action. The
//! `status` field is a **raw string code**, not [`OrderStatus`]: stored
//! records may carry legacy or unrecognized codes, which must round-trip
//! intact and degrade only at display time (see [`crate::types::status`]).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::id::OrderId;
use super::money::Money;
use super::status::{is_active_code, is_completed_code};

/// Default status for orders created without one.
///
/// Historical quirk: new orders are seeded with the legacy `"Pending"` code
/// rather than the canonical `"order-placed"`. Existing stored data depends
/// on this value, so it is kept as-is rather than silently migrated.
pub const DEFAULT_NEW_ORDER_STATUS: &str = "Pending";

/// Reward points accrue at one point per this many currency units spent.
pub const REWARD_POINTS_PER: Decimal = Decimal::TEN;

/// Customer contact details attached to an order.
///
/// Raw strings on purpose: records written by older clients may hold values
/// that no longer pass today's validation, and they must still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A single line item on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub quantity: u32,
    pub price: Money,
}

/// One entry in an order's status history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    /// Raw status code at the time of the change.
    pub status: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A customer service request record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Service name, e.g. "Wash & Fold" or "Dry Cleaning".
    pub service: String,
    /// Raw status code; resolve through the status taxonomy for display.
    pub status: String,
    pub placed_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<NaiveDate>,
    pub item_count: u32,
    /// Free-form weight string as reported by the facility, e.g. "4.5 kg".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    pub total: Money,
    #[serde(default)]
    pub customer: CustomerDetails,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub status_history: Vec<StatusHistoryEntry>,
    pub updated_at: DateTime<Utc>,
}

/// Partial input for creating an order; every missing field has a default.
#[derive(Debug, Clone, Default)]
pub struct NewOrder {
    pub service: Option<String>,
    pub status: Option<String>,
    pub pickup_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    pub item_count: Option<u32>,
    pub weight: Option<String>,
    pub total: Option<Money>,
    pub customer: Option<CustomerDetails>,
    pub items: Vec<OrderItem>,
}

impl NewOrder {
    /// Materialize a full [`Order`] with the given identity and creation
    /// time, filling every missing field with its default.
    #[must_use]
    pub fn into_order(self, id: OrderId, created_at: DateTime<Utc>) -> Order {
        let status = self
            .status
            .unwrap_or_else(|| DEFAULT_NEW_ORDER_STATUS.to_owned());
        Order {
            id,
            service: self.service.unwrap_or_else(|| "Wash & Fold".to_owned()),
            status: status.clone(),
            placed_at: created_at,
            pickup_date: self.pickup_date,
            delivery_date: self.delivery_date,
            item_count: self.item_count.unwrap_or(0),
            weight: self.weight,
            total: self.total.unwrap_or_default(),
            customer: self.customer.unwrap_or_default(),
            items: self.items,
            status_history: vec![StatusHistoryEntry {
                status,
                timestamp: created_at,
                note: None,
            }],
            updated_at: created_at,
        }
    }
}

/// Aggregate statistics derived from a set of orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderStats {
    pub total_orders: usize,
    pub active_orders: usize,
    pub completed_orders: usize,
    pub total_spent: Decimal,
    pub reward_points: u64,
}

impl Default for OrderStats {
    fn default() -> Self {
        Self {
            total_orders: 0,
            active_orders: 0,
            completed_orders: 0,
            total_spent: Decimal::ZERO,
            reward_points: 0,
        }
    }
}

impl OrderStats {
    /// Recompute statistics over a full order list.
    ///
    /// O(n) by design; the dataset is a single customer's order history.
    #[must_use]
    pub fn compute(orders: &[Order]) -> Self {
        let total_spent: Decimal = orders.iter().map(|o| o.total.amount).sum();
        let reward_points = (total_spent / REWARD_POINTS_PER)
            .floor()
            .to_u64()
            .unwrap_or(0);
        Self {
            total_orders: orders.len(),
            active_orders: orders.iter().filter(|o| is_active_code(&o.status)).count(),
            completed_orders: orders
                .iter()
                .filter(|o| is_completed_code(&o.status))
                .count(),
            total_spent,
            reward_points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    use crate::types::money::CurrencyCode;

    fn order_with(total: i64, status: &str, at: DateTime<Utc>) -> Order {
        NewOrder {
            status: Some(status.to_owned()),
            total: Some(Money::new(Decimal::from(total), CurrencyCode::USD)),
            ..NewOrder::default()
        }
        .into_order(OrderId::from_timestamp_millis(at.timestamp_millis()), at)
    }

    fn sample_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).single().expect("valid")
    }

    #[test]
    fn test_into_order_defaults() {
        let at = sample_instant();
        let order = NewOrder::default().into_order(OrderId::new("ORD-1"), at);

        assert_eq!(order.status, DEFAULT_NEW_ORDER_STATUS);
        assert_eq!(order.service, "Wash & Fold");
        assert_eq!(order.item_count, 0);
        assert_eq!(order.total.amount, Decimal::ZERO);
        assert_eq!(order.updated_at, at);
        // Creation is recorded as the first history entry
        assert_eq!(order.status_history.len(), 1);
        assert_eq!(order.status_history[0].status, DEFAULT_NEW_ORDER_STATUS);
    }

    #[test]
    fn test_into_order_keeps_explicit_fields() {
        let at = sample_instant();
        let order = NewOrder {
            service: Some("Dry Cleaning".to_owned()),
            status: Some("order-placed".to_owned()),
            item_count: Some(4),
            ..NewOrder::default()
        }
        .into_order(OrderId::new("ORD-2"), at);

        assert_eq!(order.service, "Dry Cleaning");
        assert_eq!(order.status, "order-placed");
        assert_eq!(order.item_count, 4);
    }

    #[test]
    fn test_stats_empty() {
        assert_eq!(OrderStats::compute(&[]), OrderStats::default());
    }

    #[test]
    fn test_stats_scenario() {
        let at = sample_instant();
        let orders = vec![
            order_with(100, "order-placed", at),
            order_with(200, "wash-in-progress", at),
            order_with(300, "delivery-completed", at),
        ];
        let stats = OrderStats::compute(&orders);

        assert_eq!(stats.total_orders, 3);
        assert_eq!(stats.active_orders, 2);
        assert_eq!(stats.completed_orders, 1);
        assert_eq!(stats.total_spent, Decimal::from(600));
        assert_eq!(stats.reward_points, 60);
    }

    #[test]
    fn test_stats_unknown_codes_fall_in_neither_bucket() {
        let at = sample_instant();
        let orders = vec![order_with(50, "bogus", at)];
        let stats = OrderStats::compute(&orders);

        assert_eq!(stats.total_orders, 1);
        assert_eq!(stats.active_orders, 0);
        assert_eq!(stats.completed_orders, 0);
        assert_eq!(stats.reward_points, 5);
    }

    #[test]
    fn test_order_serde_roundtrip_preserves_raw_status() {
        let at = sample_instant();
        let order = order_with(42, "Some Future Code", at);
        let json = serde_json::to_string(&order).expect("serialize");
        let back: Order = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, order);
        assert_eq!(back.status, "Some Future Code");
    }
}
