//! The locally persisted order history.

use std::sync::Arc;

use chrono::Utc;

use fresh_fold_core::{NewOrder, Order, OrderId, OrderStats, StatusHistoryEntry};

use super::{StorageBackend, keys};

/// Repository over the locally persisted order array.
///
/// Orders are kept newest-first as a single JSON array under the
/// [`keys::ORDERS`] key. Every query is a linear scan; the dataset is one
/// customer's history, so no indexing is warranted.
///
/// All operations follow the module's swallow-and-log failure policy: a
/// broken backend degrades to an empty history, it never panics or
/// propagates.
pub struct OrderStore {
    storage: Arc<dyn StorageBackend>,
}

impl OrderStore {
    /// Create a store over the given backend.
    #[must_use]
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self { storage }
    }

    /// All stored orders, newest first. Empty on any storage failure.
    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        let raw = match self.storage.load(keys::ORDERS) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read order history");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(orders) => orders,
            Err(e) => {
                // Corrupted history renders as an empty list rather than a
                // dead screen; the next successful write replaces it.
                tracing::warn!(error = %e, "order history is corrupted, treating as empty");
                Vec::new()
            }
        }
    }

    /// Store an order built from `new`, prepending it to the history.
    ///
    /// Missing fields are defaulted (see [`NewOrder::into_order`]); the
    /// generated ID is `ORD-<millis>`. The record is returned even if
    /// persisting it failed.
    #[must_use]
    pub fn add_order(&self, new: NewOrder) -> Order {
        let now = Utc::now();
        let mut orders = self.orders();

        // Timestamp IDs collide when two orders land in the same
        // millisecond; bump until free.
        let mut millis = now.timestamp_millis();
        let mut id = OrderId::from_timestamp_millis(millis);
        while orders.iter().any(|o| o.id == id) {
            millis += 1;
            id = OrderId::from_timestamp_millis(millis);
        }

        let order = new.into_order(id, now);
        orders.insert(0, order.clone());
        self.persist(&orders);
        order
    }

    /// Look up one order by ID.
    #[must_use]
    pub fn order_by_id(&self, id: &OrderId) -> Option<Order> {
        self.orders().into_iter().find(|o| &o.id == id)
    }

    /// All orders carrying exactly the given raw status code.
    #[must_use]
    pub fn orders_by_status(&self, code: &str) -> Vec<Order> {
        self.orders()
            .into_iter()
            .filter(|o| o.status == code)
            .collect()
    }

    /// The `n` most recent orders.
    #[must_use]
    pub fn recent_orders(&self, n: usize) -> Vec<Order> {
        let mut orders = self.orders();
        orders.truncate(n);
        orders
    }

    /// Replace the status of one order, stamping `updated_at` and appending
    /// a history entry. Returns the updated record, or `None` if the ID is
    /// unknown.
    ///
    /// `status` is stored verbatim; it is not validated against the
    /// canonical set, matching the degrade-at-display-time policy.
    #[must_use]
    pub fn update_order_status(&self, id: &OrderId, status: &str) -> Option<Order> {
        let mut orders = self.orders();
        let order = orders.iter_mut().find(|o| &o.id == id)?;

        let now = Utc::now();
        order.status = status.to_owned();
        order.updated_at = now;
        order.status_history.push(StatusHistoryEntry {
            status: status.to_owned(),
            timestamp: now,
            note: None,
        });
        let updated = order.clone();

        self.persist(&orders);
        Some(updated)
    }

    /// Delete one order. Returns `false` if the ID was unknown or the
    /// shrunken history could not be persisted.
    pub fn delete_order(&self, id: &OrderId) -> bool {
        let mut orders = self.orders();
        let before = orders.len();
        orders.retain(|o| &o.id != id);
        if orders.len() == before {
            return false;
        }
        self.persist(&orders)
    }

    /// Wipe the entire history.
    pub fn clear_all(&self) -> bool {
        match self.storage.remove(keys::ORDERS) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "failed to clear order history");
                false
            }
        }
    }

    /// Aggregate statistics, recomputed from the full history on every call.
    #[must_use]
    pub fn stats(&self) -> OrderStats {
        OrderStats::compute(&self.orders())
    }

    fn persist(&self, orders: &[Order]) -> bool {
        let raw = match serde_json::to_string(orders) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "failed to encode order history");
                return false;
            }
        };
        match self.storage.save(keys::ORDERS, &raw) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "failed to persist order history");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    use fresh_fold_core::{CurrencyCode, DEFAULT_NEW_ORDER_STATUS, Money};

    use crate::store::MemoryStorage;

    fn store() -> OrderStore {
        OrderStore::new(Arc::new(MemoryStorage::new()))
    }

    fn new_order(total: i64, status: &str) -> NewOrder {
        NewOrder {
            status: Some(status.to_owned()),
            total: Some(Money::new(Decimal::from(total), CurrencyCode::USD)),
            ..NewOrder::default()
        }
    }

    #[test]
    fn test_add_then_get_roundtrip() {
        let store = store();
        let added = store.add_order(new_order(25, "order-placed"));

        let fetched = store.order_by_id(&added.id).expect("stored order");
        assert_eq!(fetched, added);
        assert_eq!(fetched.status, "order-placed");
    }

    #[test]
    fn test_add_order_defaults_status() {
        let store = store();
        let added = store.add_order(NewOrder::default());
        assert_eq!(added.status, DEFAULT_NEW_ORDER_STATUS);
    }

    #[test]
    fn test_newest_first_ordering() {
        let store = store();
        let first = store.add_order(new_order(10, "order-placed"));
        let second = store.add_order(new_order(20, "order-placed"));

        let orders = store.orders();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].total, second.total);
        assert_eq!(orders[1].total, first.total);

        let recent = store.recent_orders(1);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].total, second.total);
    }

    #[test]
    fn test_update_order_status() {
        let store = store();
        let added = store.add_order(new_order(25, "order-placed"));

        let updated = store
            .update_order_status(&added.id, "wash-completed")
            .expect("order exists");
        assert_eq!(updated.status, "wash-completed");
        assert!(updated.updated_at >= added.updated_at);
        // History grew by one entry
        assert_eq!(updated.status_history.len(), 2);

        let fetched = store.order_by_id(&added.id).expect("stored order");
        assert_eq!(fetched.status, "wash-completed");
    }

    #[test]
    fn test_update_unknown_id_is_none() {
        let store = store();
        assert!(
            store
                .update_order_status(&OrderId::new("ORD-missing"), "wash-completed")
                .is_none()
        );
    }

    #[test]
    fn test_orders_by_status() {
        let store = store();
        let _ = store.add_order(new_order(10, "order-placed"));
        let _ = store.add_order(new_order(20, "wash-in-progress"));
        let _ = store.add_order(new_order(30, "order-placed"));

        assert_eq!(store.orders_by_status("order-placed").len(), 2);
        assert_eq!(store.orders_by_status("wash-in-progress").len(), 1);
        assert_eq!(store.orders_by_status("bogus").len(), 0);
    }

    #[test]
    fn test_delete_order() {
        let store = store();
        let added = store.add_order(new_order(10, "order-placed"));

        assert!(store.delete_order(&added.id));
        assert!(store.order_by_id(&added.id).is_none());
        // Second delete finds nothing
        assert!(!store.delete_order(&added.id));
    }

    #[test]
    fn test_clear_all() {
        let store = store();
        let _ = store.add_order(new_order(10, "order-placed"));
        assert!(store.clear_all());
        assert!(store.orders().is_empty());
        assert_eq!(store.stats(), OrderStats::default());
    }

    #[test]
    fn test_stats_empty_store() {
        assert_eq!(store().stats(), OrderStats::default());
    }

    #[test]
    fn test_stats_scenario() {
        let store = store();
        let _ = store.add_order(new_order(100, "order-placed"));
        let _ = store.add_order(new_order(200, "wash-in-progress"));
        let _ = store.add_order(new_order(300, "delivery-completed"));

        let stats = store.stats();
        assert_eq!(stats.total_orders, 3);
        assert_eq!(stats.active_orders, 2);
        assert_eq!(stats.completed_orders, 1);
        assert_eq!(stats.total_spent, Decimal::from(600));
        assert_eq!(stats.reward_points, 60);
    }

    #[test]
    fn test_corrupted_history_degrades_to_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .save(keys::ORDERS, "{not json at all")
            .expect("save");

        let store = OrderStore::new(storage);
        assert!(store.orders().is_empty());

        // The next write replaces the corrupted value
        let added = store.add_order(new_order(10, "order-placed"));
        assert_eq!(store.orders(), vec![added]);
    }
}
