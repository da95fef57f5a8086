use std::io::Write;

use clap::Subcommand;
use foodwagon_app::context::AppContext;

mod addresses;
mod browse;
mod favorites;
mod location;
mod orders;
mod partner;
mod render;
mod session;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List restaurants with optional filters and sorting
    Restaurants(browse::RestaurantsArgs),

    /// Show a restaurant's menu
    Menu(browse::MenuArgs),

    /// Search restaurants and dishes
    Search(browse::SearchArgs),

    /// Build a cart and place an order
    Order(orders::OrderArgs),

    /// Show your order history
    Orders,

    /// Manage saved delivery addresses
    Address(addresses::AddressCommand),

    /// Manage favorite restaurants
    Favorite(favorites::FavoriteCommand),

    /// Sign in
    Login(session::LoginArgs),

    /// Create an account
    Register(session::RegisterArgs),

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Detect the city from coordinates
    Locate(location::LocateArgs),

    /// Restaurant partner dashboard
    Partner(partner::PartnerCommand),
}

impl Commands {
    /// Run the command, then print every notification it raised.
    pub(crate) async fn run(self, ctx: &mut AppContext, out: &mut dyn Write) -> Result<(), String> {
        let result = match self {
            Commands::Restaurants(args) => browse::restaurants(args, ctx, out).await,
            Commands::Menu(args) => browse::menu(args, ctx, out).await,
            Commands::Search(args) => browse::search(args, ctx, out).await,
            Commands::Order(args) => orders::place(args, ctx, out).await,
            Commands::Orders => orders::history(ctx, out).await,
            Commands::Address(command) => addresses::run(command, ctx, out).await,
            Commands::Favorite(command) => favorites::run(command, ctx, out).await,
            Commands::Login(args) => session::login(args, ctx, out).await,
            Commands::Register(args) => session::register(args, ctx, out).await,
            Commands::Logout => session::logout(ctx),
            Commands::Whoami => session::whoami(ctx, out),
            Commands::Locate(args) => location::run(args, ctx, out).await,
            Commands::Partner(command) => partner::run(command, ctx, out).await,
        };

        for notification in ctx.storefront.notifications().drain() {
            line(
                out,
                format_args!("[{}] {}", notification.severity(), notification.message()),
            )?;
        }

        result
    }
}

fn line(out: &mut dyn Write, text: impl std::fmt::Display) -> Result<(), String> {
    writeln!(out, "{text}").map_err(|error| format!("failed to write output: {error}"))
}
