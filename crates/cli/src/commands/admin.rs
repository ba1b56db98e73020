//! Admin and courier views over the backend's order list.
//!
//! # Usage
//!
//! ```bash
//! # All orders the caller may see, optionally filtered by raw status code
//! ff-cli admin orders --status wash-in-progress
//!
//! # Courier view: everything currently on the road
//! ff-cli admin deliveries
//! ```

use clap::Subcommand;

use fresh_fold_core::{Order, OrderStats, status_label};

use super::Context;
use crate::render;

/// Raw codes that put an order on the road (courier's concern).
const ON_THE_ROAD: &[&str] = &["out-for-pickup", "out-for-delivery", "Pickup", "Out for Delivery"];

#[derive(Subcommand)]
pub enum AdminAction {
    /// List all orders visible to the caller
    Orders {
        /// Only orders with this raw status code
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Courier view: orders currently out for pickup or delivery
    Deliveries,
    /// Aggregate statistics over all visible orders
    Stats,
}

pub async fn run(context: &Context, action: AdminAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AdminAction::Orders { status } => {
            let mut orders = context.client.list_orders().await?;
            if let Some(code) = status {
                orders.retain(|o| o.status == code);
            }
            print_orders(&orders);
        }
        AdminAction::Deliveries => {
            let mut orders = context.client.list_orders().await?;
            orders.retain(|o| ON_THE_ROAD.contains(&o.status.as_str()));
            if orders.is_empty() {
                println!("Nothing on the road");
                return Ok(());
            }
            for order in &orders {
                let destination = if order.customer.address.is_empty() {
                    "(no address on file)"
                } else {
                    order.customer.address.as_str()
                };
                println!(
                    "{:<22} {:<20} {}",
                    order.id,
                    status_label(&order.status),
                    destination
                );
            }
        }
        AdminAction::Stats => {
            let orders = context.client.list_orders().await?;
            let stats = OrderStats::compute(&orders);
            println!("Orders:      {}", stats.total_orders);
            println!("  active:    {}", stats.active_orders);
            println!("  completed: {}", stats.completed_orders);
            println!("Revenue:     {}", stats.total_spent);
        }
    }
    Ok(())
}

fn print_orders(orders: &[Order]) {
    if orders.is_empty() {
        println!("No orders");
        return;
    }
    println!("{}", render::order_header());
    for order in orders {
        println!("{}", render::order_row(order));
    }
}
