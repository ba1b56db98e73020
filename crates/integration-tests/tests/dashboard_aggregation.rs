//! The dashboard source seam: a consumer outside the client crate can
//! provide its own [`DashboardSource`] and drive the aggregator with it.

use std::future::Future;

use fresh_fold_client::ApiError;
use fresh_fold_client::api::dashboard::{ActivityEntry, RewardInfo, Service};
use fresh_fold_client::api::profile::UserProfile;
use fresh_fold_client::dashboard::{DashboardAggregator, DashboardSource};
use fresh_fold_core::{Order, OrderStats};

/// Everything succeeds except the rewards read.
struct RewardsDown;

impl DashboardSource for RewardsDown {
    fn fetch_stats(&self) -> impl Future<Output = Result<OrderStats, ApiError>> + Send {
        async { Ok(OrderStats::default()) }
    }
    fn fetch_recent_orders(&self) -> impl Future<Output = Result<Vec<Order>, ApiError>> + Send {
        async { Ok(Vec::new()) }
    }
    fn fetch_active_orders(&self) -> impl Future<Output = Result<Vec<Order>, ApiError>> + Send {
        async { Ok(Vec::new()) }
    }
    fn fetch_activities(
        &self,
    ) -> impl Future<Output = Result<Vec<ActivityEntry>, ApiError>> + Send {
        async { Ok(Vec::new()) }
    }
    fn fetch_services(&self) -> impl Future<Output = Result<Vec<Service>, ApiError>> + Send {
        async { Ok(Vec::new()) }
    }
    fn fetch_profile(&self) -> impl Future<Output = Result<UserProfile, ApiError>> + Send {
        async {
            Ok(UserProfile {
                name: "Dana".to_owned(),
                email: "dana@example.com".to_owned(),
                phone: None,
                address: None,
                care_notes: None,
            })
        }
    }
    fn fetch_rewards(&self) -> impl Future<Output = Result<RewardInfo, ApiError>> + Send {
        async {
            Err(ApiError::Status {
                status: 503,
                message: "rewards service overloaded".to_owned(),
            })
        }
    }
}

#[tokio::test]
async fn external_source_drives_the_aggregator() {
    let aggregator = DashboardAggregator::new(RewardsDown);
    aggregator.refresh().await;

    let snapshot = aggregator.snapshot().await;
    assert!(!snapshot.is_loading());
    assert!(snapshot.has_errors());
    assert_eq!(snapshot.errors(), vec![("rewards", "API returned 503: rewards service overloaded")]);
    assert_eq!(snapshot.profile.value.map(|p| p.name), Some("Dana".to_owned()));
}

#[tokio::test]
async fn second_refresh_clears_a_healed_error() {
    use std::sync::atomic::{AtomicBool, Ordering};

    // Rewards fails on the first refresh and succeeds on the second:
    // the error must clear and the value must land.
    struct FlakyRewards {
        healed: AtomicBool,
    }

    impl DashboardSource for FlakyRewards {
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
            async { Ok(Vec::new()) }
        }
        fn fetch_profile(&self) -> impl Future<Output = Result<UserProfile, ApiError>> + Send {
            async {
                Ok(UserProfile {
                    name: "Dana".to_owned(),
                    email: "dana@example.com".to_owned(),
                    phone: None,
                    address: None,
                    care_notes: None,
                })
            }
        }
        fn fetch_rewards(&self) -> impl Future<Output = Result<RewardInfo, ApiError>> + Send {
            let healed = self.healed.swap(true, Ordering::SeqCst);
            async move {
                if healed {
                    Ok(RewardInfo {
                        points: 60,
                        tier: "bronze".to_owned(),
                    })
                } else {
                    Err(ApiError::Status {
                        status: 503,
                        message: "warming up".to_owned(),
                    })
                }
            }
        }
    }

    let aggregator = DashboardAggregator::new(FlakyRewards {
        healed: AtomicBool::new(false),
    });

    aggregator.refresh().await;
    let snapshot = aggregator.snapshot().await;
    assert!(snapshot.has_errors());
    assert!(snapshot.rewards.value.is_none());

    aggregator.refresh().await;
    let snapshot = aggregator.snapshot().await;
    assert!(!snapshot.has_errors());
    assert_eq!(snapshot.rewards.value.map(|r| r.points), Some(60));
}
