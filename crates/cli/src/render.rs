//! Terminal rendering helpers shared by the commands.

use chrono::{DateTime, Utc};

use fresh_fold_core::{Order, status_info, status_label};

/// Width of rendered progress bars, in cells.
const PROGRESS_BAR_WIDTH: usize = 20;

/// Render a progress percentage as a bar, e.g. `[##########----------]  50%`.
#[must_use]
pub fn progress_bar(progress: u8) -> String {
    let progress = usize::from(progress.min(100));
    let filled = progress * PROGRESS_BAR_WIDTH / 100;
    format!(
        "[{}{}] {progress:>3}%",
        "#".repeat(filled),
        "-".repeat(PROGRESS_BAR_WIDTH - filled)
    )
}

/// Human-readable relative time, e.g. `3h ago`.
#[must_use]
pub fn time_ago(when: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(when);
    if delta.num_seconds() < 60 {
        "just now".to_owned()
    } else if delta.num_minutes() < 60 {
        format!("{}m ago", delta.num_minutes())
    } else if delta.num_hours() < 24 {
        format!("{}h ago", delta.num_hours())
    } else {
        format!("{}d ago", delta.num_days())
    }
}

/// One order as a table row: id, service, status label, total.
#[must_use]
pub fn order_row(order: &Order) -> String {
    format!(
        "{:<22} {:<16} {:<20} {:>10}",
        order.id,
        truncate(&order.service, 16),
        status_label(&order.status),
        order.total.to_string()
    )
}

/// Header matching [`order_row`].
#[must_use]
pub fn order_header() -> String {
    format!(
        "{:<22} {:<16} {:<20} {:>10}",
        "ID", "SERVICE", "STATUS", "TOTAL"
    )
}

/// Full tracking block for one order.
#[must_use]
pub fn tracking_block(order: &Order) -> String {
    let info = status_info(&order.status);
    let mut out = String::new();
    out.push_str(&format!("Order {}\n", order.id));
    out.push_str(&format!("  Service:  {}\n", order.service));
    out.push_str(&format!("  Status:   {} - {}\n", info.label, info.description));
    out.push_str(&format!("  Progress: {}\n", progress_bar(info.progress)));
    if let Some(pickup) = order.pickup_date {
        out.push_str(&format!("  Pickup:   {pickup}\n"));
    }
    if let Some(delivery) = order.delivery_date {
        out.push_str(&format!("  Delivery: {delivery}\n"));
    }
    out.push_str(&format!("  Total:    {}\n", order.total));
    if !order.status_history.is_empty() {
        out.push_str("  History:\n");
        for entry in &order.status_history {
            out.push_str(&format!(
                "    {}  {}\n",
                entry.timestamp.format("%Y-%m-%d %H:%M"),
                status_label(&entry.status)
            ));
        }
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_owned()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{head}…")
    }
}
