use std::io::Write;

use clap::{Args, Subcommand};
use foodwagon::menu::RestaurantId;
use foodwagon_app::context::AppContext;

use super::{line, render};

#[derive(Debug, Args)]
pub(crate) struct FavoriteCommand {
    #[command(subcommand)]
    command: FavoriteSubcommand,
}

#[derive(Debug, Subcommand)]
enum FavoriteSubcommand {
    /// List favorite restaurants
    List,

    /// Add or remove a restaurant
    Toggle {
        /// Restaurant ID
        restaurant: u64,
    },
}

pub(crate) async fn run(
    command: FavoriteCommand,
    ctx: &mut AppContext,
    out: &mut dyn Write,
) -> Result<(), String> {
    match command.command {
        FavoriteSubcommand::List => {
            let favorites = ctx.storefront.favorites();

            if favorites.favorites().is_empty() {
                return line(out, "no favorite restaurants yet");
            }

            line(out, render::restaurants(favorites.favorites(), favorites))
        }
        FavoriteSubcommand::Toggle { restaurant } => {
            let id = RestaurantId(restaurant);

            let restaurant = ctx
                .catalog
                .restaurants(None)
                .await
                .into_iter()
                .find(|restaurant| restaurant.id == id)
                .ok_or_else(|| format!("restaurant {id} not found"))?;

            ctx.storefront
                .favorites_mut()
                .toggle_favorite(&restaurant)
                .map_err(|error| format!("failed to update favorites: {error}"))?;

            Ok(())
        }
    }
}
