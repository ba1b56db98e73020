//! Dashboard data aggregation.
//!
//! One dashboard render needs seven independent reads: stats, recent
//! orders, active orders, activities, the service catalog, the profile,
//! and rewards. [`DashboardAggregator::refresh`] fans all seven out
//! concurrently and joins; each fetch catches its own failure into its
//! field, so one rejection never fails the join and a screen can render
//! partial data with per-field error badges.
//!
//! There is deliberately no atomicity across fields: mid-refresh, a
//! snapshot can show three fields fresh and four stale. There is also no
//! retry and no backoff.
//!
//! Every fetch is tied to the aggregator's lifetime through a
//! [`CancellationToken`]: results that arrive after [`cancel`] are
//! discarded instead of written, and dropping the aggregator cancels
//! in-flight work. A cancelled fetch leaves its `loading` flag set, the
//! same as a request that never came back.
//!
//! [`cancel`]: DashboardAggregator::cancel

use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use fresh_fold_core::{Email, Order, OrderStats};

use crate::api::dashboard::{ActivityEntry, RewardInfo, Service};
use crate::api::profile::UserProfile;
use crate::api::{ApiClient, ApiError};

/// The seven reads feeding one dashboard render.
///
/// [`ApiDashboardSource`] is the production implementation; tests
/// substitute stubs.
pub trait DashboardSource: Send + Sync + 'static {
    fn fetch_stats(&self) -> impl Future<Output = Result<OrderStats, ApiError>> + Send;
    fn fetch_recent_orders(&self) -> impl Future<Output = Result<Vec<Order>, ApiError>> + Send;
    fn fetch_active_orders(&self) -> impl Future<Output = Result<Vec<Order>, ApiError>> + Send;
    fn fetch_activities(&self) -> impl Future<Output = Result<Vec<ActivityEntry>, ApiError>> + Send;
    fn fetch_services(&self) -> impl Future<Output = Result<Vec<Service>, ApiError>> + Send;
    fn fetch_profile(&self) -> impl Future<Output = Result<UserProfile, ApiError>> + Send;
    fn fetch_rewards(&self) -> impl Future<Output = Result<RewardInfo, ApiError>> + Send;
}

/// [`DashboardSource`] backed by the REST API, scoped to one customer.
#[derive(Clone)]
pub struct ApiDashboardSource {
    client: ApiClient,
    email: Email,
}

impl ApiDashboardSource {
    /// Scope the API client to one customer's dashboard.
    #[must_use]
    pub const fn new(client: ApiClient, email: Email) -> Self {
        Self { client, email }
    }
}

impl DashboardSource for ApiDashboardSource {
    fn fetch_stats(&self) -> impl Future<Output = Result<OrderStats, ApiError>> + Send {
        self.client.dashboard_stats(&self.email)
    }

    fn fetch_recent_orders(&self) -> impl Future<Output = Result<Vec<Order>, ApiError>> + Send {
        self.client.recent_orders(&self.email)
    }

    fn fetch_active_orders(&self) -> impl Future<Output = Result<Vec<Order>, ApiError>> + Send {
        self.client.active_orders(&self.email)
    }

    fn fetch_activities(
        &self,
    ) -> impl Future<Output = Result<Vec<ActivityEntry>, ApiError>> + Send {
        self.client.recent_activities(&self.email)
    }

    fn fetch_services(&self) -> impl Future<Output = Result<Vec<Service>, ApiError>> + Send {
        self.client.services()
    }

    fn fetch_profile(&self) -> impl Future<Output = Result<UserProfile, ApiError>> + Send {
        self.client.profile()
    }

    fn fetch_rewards(&self) -> impl Future<Output = Result<RewardInfo, ApiError>> + Send {
        self.client.rewards(&self.email)
    }
}

/// Per-field fetch state: value, loading flag, and last error.
#[derive(Debug, Clone)]
pub struct FieldState<T> {
    /// Last successfully fetched value. Kept (stale) when a later fetch
    /// fails, so screens can show old data next to the error badge.
    pub value: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for FieldState<T> {
    fn default() -> Self {
        Self {
            value: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> FieldState<T> {
    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn resolve(&mut self, result: Result<T, ApiError>) {
        self.loading = false;
        match result {
            Ok(value) => {
                self.value = Some(value);
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}

/// Snapshot of all seven dashboard fields.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub stats: FieldState<OrderStats>,
    pub recent_orders: FieldState<Vec<Order>>,
    pub active_orders: FieldState<Vec<Order>>,
    pub recent_activities: FieldState<Vec<ActivityEntry>>,
    pub services: FieldState<Vec<Service>>,
    pub profile: FieldState<UserProfile>,
    pub rewards: FieldState<RewardInfo>,
}

impl DashboardData {
    /// Whether any field is still loading.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.stats.loading
            || self.recent_orders.loading
            || self.active_orders.loading
            || self.recent_activities.loading
            || self.services.loading
            || self.profile.loading
            || self.rewards.loading
    }

    /// Whether any field carries an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors().is_empty()
    }

    /// `(field, message)` pairs for every errored field.
    #[must_use]
    pub fn errors(&self) -> Vec<(&'static str, &str)> {
        [
            ("stats", &self.stats.error),
            ("recent_orders", &self.recent_orders.error),
            ("active_orders", &self.active_orders.error),
            ("recent_activities", &self.recent_activities.error),
            ("services", &self.services.error),
            ("profile", &self.profile.error),
            ("rewards", &self.rewards.error),
        ]
        .into_iter()
        .filter_map(|(name, error)| error.as_deref().map(|e| (name, e)))
        .collect()
    }
}

macro_rules! spawn_fetch {
    ($set:expr, $agg:expr, $field:ident, $method:ident) => {{
        let source = Arc::clone(&$agg.source);
        let data = Arc::clone(&$agg.data);
        let cancel = $agg.cancel.clone();
        $set.spawn(async move {
            let result = tokio::select! {
                () = cancel.cancelled() => return,
                result = source.$method() => result,
            };
            let mut data = data.write().await;
            // Late results are discarded, not written.
            if cancel.is_cancelled() {
                return;
            }
            data.$field.resolve(result);
        });
    }};
}

/// Fans the seven dashboard reads out over a [`DashboardSource`] and
/// collects them into a shared [`DashboardData`].
pub struct DashboardAggregator<S> {
    source: Arc<S>,
    data: Arc<RwLock<DashboardData>>,
    cancel: CancellationToken,
}

impl<S: DashboardSource> DashboardAggregator<S> {
    /// Create an aggregator over the given source.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
            data: Arc::new(RwLock::new(DashboardData::default())),
            cancel: CancellationToken::new(),
        }
    }

    /// Re-fetch all seven fields concurrently and wait for the fan-in.
    ///
    /// Individual failures land in their field's `error`; this method
    /// itself never fails. Calling it on a cancelled aggregator marks the
    /// fields loading and leaves them that way.
    pub async fn refresh(&self) {
        {
            let mut data = self.data.write().await;
            data.stats.begin();
            data.recent_orders.begin();
            data.active_orders.begin();
            data.recent_activities.begin();
            data.services.begin();
            data.profile.begin();
            data.rewards.begin();
        }

        let mut set = JoinSet::new();
        spawn_fetch!(set, self, stats, fetch_stats);
        spawn_fetch!(set, self, recent_orders, fetch_recent_orders);
        spawn_fetch!(set, self, active_orders, fetch_active_orders);
        spawn_fetch!(set, self, recent_activities, fetch_activities);
        spawn_fetch!(set, self, services, fetch_services);
        spawn_fetch!(set, self, profile, fetch_profile);
        spawn_fetch!(set, self, rewards, fetch_rewards);

        // Fan-in: wait for all, ignore individual outcomes.
        while set.join_next().await.is_some() {}
    }

    /// A point-in-time copy of the dashboard state.
    pub async fn snapshot(&self) -> DashboardData {
        self.data.read().await.clone()
    }

    /// Cancel all in-flight fetches; later results are discarded.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl<S> Drop for DashboardAggregator<S> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn profile() -> UserProfile {
        UserProfile {
            name: "Dana".to_owned(),
            email: "dana@example.com".to_owned(),
            phone: None,
            address: None,
            care_notes: None,
        }
    }

    fn rewards() -> RewardInfo {
        RewardInfo {
            points: 120,
            tier: "silver".to_owned(),
        }
    }

    /// Six fetches succeed; the service catalog fails.
    struct ServicesDown;

    impl DashboardSource for ServicesDown {
        fn fetch_stats(&self) -> impl Future<Output = Result<OrderStats, ApiError>> + Send {
            async { Ok(OrderStats::default()) }
        }
        fn fetch_recent_orders(
            &self,
        ) -> impl Future<Output = Result<Vec<Order>, ApiError>> + Send {
            async { Ok(Vec::new()) }
        }
        fn fetch_active_orders(
            &self,
        ) -> impl Future<Output = Result<Vec<Order>, ApiError>> + Send {
            async { Ok(Vec::new()) }
        }
        fn fetch_activities(
            &self,
        ) -> impl Future<Output = Result<Vec<ActivityEntry>, ApiError>> + Send {
            async { Ok(Vec::new()) }
        }
        fn fetch_services(&self) -> impl Future<Output = Result<Vec<Service>, ApiError>> + Send {
            async {
                Err(ApiError::Status {
                    status: 500,
                    message: "catalog exploded".to_owned(),
                })
            }
        }
        fn fetch_profile(&self) -> impl Future<Output = Result<UserProfile, ApiError>> + Send {
            async { Ok(profile()) }
        }
        fn fetch_rewards(&self) -> impl Future<Output = Result<RewardInfo, ApiError>> + Send {
            async { Ok(rewards()) }
        }
    }

    /// Every fetch hangs for a minute before succeeding.
    struct Slow;

    impl DashboardSource for Slow {
        fn fetch_stats(&self) -> impl Future<Output = Result<OrderStats, ApiError>> + Send {
            async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(OrderStats::default())
            }
        }
        fn fetch_recent_orders(
            &self,
        ) -> impl Future<Output = Result<Vec<Order>, ApiError>> + Send {
            async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(Vec::new())
            }
        }
        fn fetch_active_orders(
            &self,
        ) -> impl Future<Output = Result<Vec<Order>, ApiError>> + Send {
            async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(Vec::new())
            }
        }
        fn fetch_activities(
            &self,
        ) -> impl Future<Output = Result<Vec<ActivityEntry>, ApiError>> + Send {
            async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(Vec::new())
            }
        }
        fn fetch_services(&self) -> impl Future<Output = Result<Vec<Service>, ApiError>> + Send {
            async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(Vec::new())
            }
        }
        fn fetch_profile(&self) -> impl Future<Output = Result<UserProfile, ApiError>> + Send {
            async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(profile())
            }
        }
        fn fetch_rewards(&self) -> impl Future<Output = Result<RewardInfo, ApiError>> + Send {
            async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(rewards())
            }
        }
    }

    #[tokio::test]
    async fn test_partial_failure_is_isolated_per_field() {
        let aggregator = DashboardAggregator::new(ServicesDown);
        aggregator.refresh().await;

        let snapshot = aggregator.snapshot().await;
        assert!(snapshot.services.error.is_some());
        assert!(snapshot.services.value.is_none());

        assert!(snapshot.stats.error.is_none());
        assert!(snapshot.recent_orders.error.is_none());
        assert!(snapshot.active_orders.error.is_none());
        assert!(snapshot.recent_activities.error.is_none());
        assert!(snapshot.profile.error.is_none());
        assert!(snapshot.rewards.error.is_none());

        assert!(snapshot.has_errors());
        assert!(!snapshot.is_loading());
        assert_eq!(snapshot.errors().len(), 1);
        assert_eq!(snapshot.errors()[0].0, "services");

        assert_eq!(snapshot.stats.value, Some(OrderStats::default()));
        assert_eq!(snapshot.profile.value, Some(profile()));
        assert_eq!(snapshot.rewards.value, Some(rewards()));
    }

    #[tokio::test]
    async fn test_refresh_after_cancel_writes_nothing() {
        let aggregator = DashboardAggregator::new(ServicesDown);
        aggregator.cancel();
        aggregator.refresh().await;

        let snapshot = aggregator.snapshot().await;
        assert!(snapshot.stats.value.is_none());
        assert!(snapshot.services.error.is_none());
        // Abandoned fetches leave their loading flags set.
        assert!(snapshot.is_loading());
        assert!(!snapshot.has_errors());
    }

    #[tokio::test]
    async fn test_cancel_discards_in_flight_results() {
        let aggregator = Arc::new(DashboardAggregator::new(Slow));
        let refresh = tokio::spawn({
            let aggregator = Arc::clone(&aggregator);
            async move { aggregator.refresh().await }
        });

        // Let the fetches reach their sleeps, then pull the plug.
        tokio::task::yield_now().await;
        aggregator.cancel();
        refresh.await.expect("refresh task");

        let snapshot = aggregator.snapshot().await;
        assert!(snapshot.stats.value.is_none());
        assert!(snapshot.rewards.value.is_none());
        assert!(!snapshot.has_errors());
    }

    #[tokio::test]
    async fn test_field_errors_keep_stale_value() {
        let mut field = FieldState::<u32>::default();
        field.resolve(Ok(7));
        assert_eq!(field.value, Some(7));

        field.begin();
        assert!(field.loading);
        field.resolve(Err(ApiError::Status {
            status: 502,
            message: "bad gateway".to_owned(),
        }));

        // Old value survives next to the error.
        assert_eq!(field.value, Some(7));
        assert!(field.error.is_some());
        assert!(!field.loading);
    }
}
