//! The customer dashboard: seven remote reads rendered as one screen.

use fresh_fold_client::dashboard::{ApiDashboardSource, DashboardAggregator, DashboardData};

use super::Context;
use crate::render;

pub async fn run(context: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let email = context.user_email()?;
    let source = ApiDashboardSource::new(context.client.clone(), email.clone());
    let aggregator = DashboardAggregator::new(source);

    aggregator.refresh().await;
    let snapshot = aggregator.snapshot().await;

    print_snapshot(&snapshot);

    // The local history renders regardless of backend health.
    let local = context.orders.stats();
    println!();
    println!(
        "Local history: {} orders, {} active, {} spent",
        local.total_orders, local.active_orders, local.total_spent
    );

    Ok(())
}

fn print_snapshot(snapshot: &DashboardData) {
    if let Some(profile) = &snapshot.profile.value {
        println!("Hello, {}!", profile.name);
    }

    if let Some(stats) = &snapshot.stats.value {
        println!(
            "Orders: {} total / {} active / {} completed   Spent: {}   Points: {}",
            stats.total_orders,
            stats.active_orders,
            stats.completed_orders,
            stats.total_spent,
            stats.reward_points
        );
    }

    if let Some(rewards) = &snapshot.rewards.value {
        println!("Rewards: {} points ({} tier)", rewards.points, rewards.tier);
    }

    if let Some(orders) = &snapshot.active_orders.value {
        println!();
        println!("Active orders");
        if orders.is_empty() {
            println!("  none");
        }
        for order in orders {
            println!("  {}", render::order_row(order));
        }
    }

    if let Some(orders) = &snapshot.recent_orders.value {
        println!();
        println!("Recent orders");
        for order in orders {
            println!("  {}", render::order_row(order));
        }
    }

    if let Some(activities) = &snapshot.recent_activities.value {
        println!();
        println!("Recent activity");
        let now = chrono::Utc::now();
        for activity in activities {
            println!(
                "  {:<10} {}",
                render::time_ago(activity.occurred_at, now),
                activity.description
            );
        }
    }

    if let Some(services) = &snapshot.services.value {
        println!();
        println!("Services");
        for service in services {
            println!(
                "  {:<20} {:>8}  ~{}h  {}",
                service.name, service.base_price.to_string(), service.turnaround_hours,
                service.description
            );
        }
    }

    // Partial failure renders as badges, never a blank screen.
    for (field, message) in snapshot.errors() {
        println!("  [unavailable] {field}: {message}");
    }
}
