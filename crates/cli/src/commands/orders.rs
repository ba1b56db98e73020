//! Order commands: the local history plus submission to the backend.
//!
//! # Usage
//!
//! ```bash
//! # Place an order locally and submit it
//! ff-cli order place --service "Dry Cleaning" --total 39.50 --item-count 5 \
//!     --name "Dana Kim" --phone "+1 555 123 4567" --email dana@example.com \
//!     --address "12 Spin Cycle Lane" --pickup-date 2025-06-03 --submit
//!
//! # Walk an order one step down the pipeline
//! ff-cli order advance ORD-1700000000000
//! ```

use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use rust_decimal::Decimal;

use fresh_fold_client::validate::{PickupRequestForm, validate_pickup_request};
use fresh_fold_core::{
    CurrencyCode, CustomerDetails, Money, NewOrder, OrderId, next_status, status_label,
};

use super::{CliError, Context};
use crate::render;

#[derive(Subcommand)]
pub enum OrderAction {
    /// Place a new order (stored locally; `--submit` also posts it)
    Place {
        /// Service name
        #[arg(short, long, default_value = "Wash & Fold")]
        service: String,

        /// Order total, e.g. 24.99
        #[arg(short, long)]
        total: Decimal,

        /// Number of items
        #[arg(short = 'c', long, default_value_t = 0)]
        item_count: u32,

        /// Pickup date (YYYY-MM-DD)
        #[arg(long)]
        pickup_date: Option<String>,

        /// Customer name
        #[arg(long)]
        name: Option<String>,

        /// Customer phone
        #[arg(long)]
        phone: Option<String>,

        /// Customer email
        #[arg(long)]
        email: Option<String>,

        /// Pickup address
        #[arg(long)]
        address: Option<String>,

        /// Also submit the order to the backend
        #[arg(long)]
        submit: bool,
    },
    /// List stored orders
    List {
        /// Only orders with this raw status code
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Show one order in full
    Show { id: String },
    /// Track one order through the pipeline
    Track { id: String },
    /// Overwrite an order's status code
    SetStatus { id: String, status: String },
    /// Move an order to the next pipeline status
    Advance { id: String },
    /// Delete one order from the local history
    Delete { id: String },
    /// Wipe the local history
    Clear,
    /// Aggregate statistics over the local history
    Stats,
}

pub async fn run(context: &Context, action: OrderAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        OrderAction::Place {
            service,
            total,
            item_count,
            pickup_date,
            name,
            phone,
            email,
            address,
            submit,
        } => {
            place(
                context,
                PlaceArgs {
                    service,
                    total,
                    item_count,
                    pickup_date,
                    name,
                    phone,
                    email,
                    address,
                    submit,
                },
            )
            .await?;
        }
        OrderAction::List { status } => list(context, status.as_deref()),
        OrderAction::Show { id } | OrderAction::Track { id } => show(context, &id)?,
        OrderAction::SetStatus { id, status } => set_status(context, &id, &status)?,
        OrderAction::Advance { id } => advance(context, &id)?,
        OrderAction::Delete { id } => {
            let id = OrderId::new(id);
            if context.orders.delete_order(&id) {
                println!("Deleted {id}");
            } else {
                return Err(CliError::OrderNotFound(id.into_inner()).into());
            }
        }
        OrderAction::Clear => {
            context.orders.clear_all();
            println!("Local order history cleared");
        }
        OrderAction::Stats => stats(context),
    }
    Ok(())
}

struct PlaceArgs {
    service: String,
    total: Decimal,
    item_count: u32,
    pickup_date: Option<String>,
    name: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    address: Option<String>,
    submit: bool,
}

async fn place(context: &Context, args: PlaceArgs) -> Result<(), Box<dyn std::error::Error>> {
    // When any customer/pickup detail is given, the whole form must pass
    // validation before anything is stored.
    let has_form = args.name.is_some()
        || args.phone.is_some()
        || args.email.is_some()
        || args.address.is_some()
        || args.pickup_date.is_some();

    let mut pickup_date: Option<NaiveDate> = None;
    let mut customer = CustomerDetails::default();

    if has_form {
        let address = args
            .address
            .clone()
            .or_else(|| context.preferences.cached_address());
        let form = PickupRequestForm {
            name: args.name.clone().unwrap_or_default(),
            phone: args.phone.clone().unwrap_or_default(),
            email: args.email.clone().unwrap_or_default(),
            address: address.clone().unwrap_or_default(),
            pickup_date: args.pickup_date.clone().unwrap_or_default(),
        };
        let errors = validate_pickup_request(&form, Utc::now().date_naive());
        if !errors.is_empty() {
            for (field, message) in &errors {
                println!("  {field}: {message}");
            }
            return Err(CliError::Invalid("pickup details failed validation".to_owned()).into());
        }

        pickup_date = NaiveDate::parse_from_str(&form.pickup_date, "%Y-%m-%d").ok();
        context.preferences.set_cached_address(&form.address);
        customer = CustomerDetails {
            name: form.name,
            address: form.address,
            phone: Some(form.phone),
            email: Some(form.email),
        };
    }

    let order = context.orders.add_order(NewOrder {
        service: Some(args.service),
        status: None,
        pickup_date,
        delivery_date: None,
        item_count: Some(args.item_count),
        weight: None,
        total: Some(Money::new(args.total, CurrencyCode::USD)),
        customer: if has_form { Some(customer) } else { None },
        items: Vec::new(),
    });
    println!("Placed order {} ({})", order.id, order.total);

    if args.submit {
        // Submission failure keeps the local record; the order can be
        // re-submitted once the backend is reachable again.
        match context.client.submit_order(&order).await {
            Ok(stored) => println!("Submitted to backend as {}", stored.id),
            Err(e) => tracing::warn!(error = %e, "backend submission failed, order kept locally"),
        }
    }

    Ok(())
}

fn list(context: &Context, status: Option<&str>) {
    let orders = status.map_or_else(
        || context.orders.orders(),
        |code| context.orders.orders_by_status(code),
    );
    if orders.is_empty() {
        println!("No orders");
        return;
    }
    println!("{}", render::order_header());
    for order in &orders {
        println!("{}", render::order_row(order));
    }
}

fn show(context: &Context, id: &str) -> Result<(), CliError> {
    let id = OrderId::new(id);
    let order = context
        .orders
        .order_by_id(&id)
        .ok_or_else(|| CliError::OrderNotFound(id.into_inner()))?;
    print!("{}", render::tracking_block(&order));
    Ok(())
}

fn set_status(context: &Context, id: &str, status: &str) -> Result<(), CliError> {
    let id = OrderId::new(id);
    let order = context
        .orders
        .update_order_status(&id, status)
        .ok_or_else(|| CliError::OrderNotFound(id.into_inner()))?;
    println!("{} -> {}", order.id, status_label(&order.status));
    Ok(())
}

fn advance(context: &Context, id: &str) -> Result<(), CliError> {
    let id = OrderId::new(id);
    let order = context
        .orders
        .order_by_id(&id)
        .ok_or_else(|| CliError::OrderNotFound(id.as_str().to_owned()))?;

    let Some(next) = next_status(&order.status) else {
        return Err(CliError::Invalid(format!(
            "{} cannot advance from '{}'",
            order.id, order.status
        )));
    };

    let updated = context
        .orders
        .update_order_status(&id, next)
        .ok_or_else(|| CliError::OrderNotFound(id.into_inner()))?;
    println!("{} -> {}", updated.id, status_label(&updated.status));
    Ok(())
}

fn stats(context: &Context) {
    let stats = context.orders.stats();
    println!("Orders:        {}", stats.total_orders);
    println!("  active:      {}", stats.active_orders);
    println!("  completed:   {}", stats.completed_orders);
    println!("Total spent:   {}", stats.total_spent);
    println!("Reward points: {}", stats.reward_points);
}
