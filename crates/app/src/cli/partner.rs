use std::io::Write;

use clap::{Args, Subcommand};
use foodwagon::{
    menu::{MenuItemId, RestaurantId},
    orders::{MenuItemDraft, OrderId, OrderStatus},
    pricing::rupees,
};
use foodwagon_app::{context::AppContext, services::PartnerDashboard};

use super::{line, render};

#[derive(Debug, Args)]
pub(crate) struct PartnerCommand {
    #[command(subcommand)]
    command: PartnerSubcommand,
}

#[derive(Debug, Subcommand)]
enum PartnerSubcommand {
    /// Show order counters, revenue, orders and menu
    Dashboard,

    /// Move an order to its next status
    Advance {
        /// Order ID
        order: u64,
    },

    /// Mark a dish available or out of stock
    ToggleStock {
        /// Menu item ID
        item: u64,
    },

    /// Add a dish to the menu
    AddItem(AddItemArgs),
}

#[derive(Debug, Args)]
struct AddItemArgs {
    /// Dish name
    #[arg(long)]
    name: String,

    /// Price in rupees
    #[arg(long)]
    price: u64,

    /// Short description
    #[arg(long, default_value = "")]
    description: String,

    /// Menu section
    #[arg(long, default_value = "")]
    category: String,

    /// Vegetarian dish
    #[arg(long)]
    veg: bool,

    /// Dish image URL
    #[arg(long, default_value = "")]
    image_url: String,
}

async fn load(ctx: &AppContext) -> Result<PartnerDashboard, String> {
    let session = ctx.storefront.session();

    let user = session
        .user()
        .filter(|_| session.is_authenticated())
        .ok_or("log in with a partner account first")?;

    ctx.partner
        .load_dashboard(user)
        .await
        .map_err(|error| format!("failed to load dashboard: {error}"))
}

pub(crate) async fn run(
    command: PartnerCommand,
    ctx: &mut AppContext,
    out: &mut dyn Write,
) -> Result<(), String> {
    let mut dashboard = load(ctx).await?;

    match command.command {
        PartnerSubcommand::Dashboard => show(&dashboard, ctx, out),
        PartnerSubcommand::Advance { order } => {
            let status = ctx
                .partner
                .advance_order(&mut dashboard, OrderId(order))
                .await
                .map_err(|error| format!("failed to advance order: {error}"))?;

            line(out, format_args!("order #{order} is {status}"))
        }
        PartnerSubcommand::ToggleStock { item } => {
            ctx.partner
                .toggle_stock(&mut dashboard, MenuItemId(item))
                .await
                .map_err(|error| format!("failed to toggle stock: {error}"))?;

            Ok(())
        }
        PartnerSubcommand::AddItem(args) => {
            let draft = MenuItemDraft {
                restaurant_id: RestaurantId::default(),
                name: args.name,
                description: args.description,
                price: args.price,
                category: args.category,
                is_veg: args.veg,
                image_url: args.image_url,
            };

            let item = ctx
                .partner
                .add_menu_item(&mut dashboard, draft)
                .await
                .map_err(|error| format!("failed to add menu item: {error}"))?;

            line(out, format_args!("added dish {} ({})", item.id, item.category))
        }
    }
}

fn show(dashboard: &PartnerDashboard, ctx: &AppContext, out: &mut dyn Write) -> Result<(), String> {
    let counts = dashboard.status_counts();

    let counters = OrderStatus::ALL
        .iter()
        .map(|status| format!("{status} {}", counts.get(status).copied().unwrap_or(0)))
        .collect::<Vec<_>>()
        .join("  ");

    line(out, &dashboard.restaurant().name)?;
    line(out, counters)?;
    line(out, format_args!("revenue {}", rupees(dashboard.revenue())))?;

    if !dashboard.orders().is_empty() {
        line(out, render::orders(dashboard.orders()))?;
    }

    line(out, render::menu(dashboard.menu(), ctx.storefront.cart()))
}
