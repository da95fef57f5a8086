use std::io::Write;

use clap::Args;
use foodwagon::{
    listing::{ListingFilter, ListingQuery, SortKey},
    menu::RestaurantId,
};
use foodwagon_app::context::AppContext;

use super::{line, render};

#[derive(Debug, Args)]
pub(crate) struct RestaurantsArgs {
    /// City to list; defaults to the current location
    #[arg(long)]
    city: Option<String>,

    /// Quick filter, e.g. fast-delivery, pure-veg, offers, budget (repeatable)
    #[arg(long = "filter")]
    filters: Vec<ListingFilter>,

    /// Sort order (relevance, delivery-time, rating, cost-asc, cost-desc)
    #[arg(long, default_value = "relevance")]
    sort: SortKey,

    /// Number of pages to show
    #[arg(long, default_value_t = 1)]
    pages: usize,
}

pub(crate) async fn restaurants(
    args: RestaurantsArgs,
    ctx: &mut AppContext,
    out: &mut dyn Write,
) -> Result<(), String> {
    let city = args
        .city
        .unwrap_or_else(|| ctx.storefront.location().city().to_string());

    let all = ctx.catalog.restaurants(Some(&city)).await;

    let mut query = ListingQuery::new();

    for filter in args.filters {
        if !query.filters().contains(&filter) {
            query.toggle_filter(filter);
        }
    }

    query.set_sort(args.sort);

    for _ in 1..args.pages {
        query.load_more();
    }

    let page = query.apply(&all);

    if page.restaurants.is_empty() {
        return line(out, format_args!("no restaurants found in {city}"));
    }

    line(
        out,
        render::restaurants(&page.restaurants, ctx.storefront.favorites()),
    )?;

    if page.has_more {
        line(
            out,
            format_args!("more restaurants available, use --pages {}", args.pages + 1),
        )?;
    }

    Ok(())
}

#[derive(Debug, Args)]
pub(crate) struct MenuArgs {
    /// Restaurant ID
    restaurant: u64,
}

pub(crate) async fn menu(
    args: MenuArgs,
    ctx: &mut AppContext,
    out: &mut dyn Write,
) -> Result<(), String> {
    let items = ctx.catalog.menu(RestaurantId(args.restaurant)).await;

    if items.is_empty() {
        return line(out, "menu is empty");
    }

    line(out, render::menu(&items, ctx.storefront.cart()))
}

#[derive(Debug, Args)]
pub(crate) struct SearchArgs {
    /// Words to search for
    #[arg(required = true)]
    query: Vec<String>,
}

pub(crate) async fn search(
    args: SearchArgs,
    ctx: &mut AppContext,
    out: &mut dyn Write,
) -> Result<(), String> {
    let query = args.query.join(" ");
    let results = ctx.catalog.search(&query).await;

    if results.is_empty() {
        return line(out, format_args!("nothing matches \"{query}\""));
    }

    if !results.restaurants.is_empty() {
        line(
            out,
            render::restaurants(&results.restaurants, ctx.storefront.favorites()),
        )?;
    }

    if !results.items.is_empty() {
        line(out, render::menu(&results.items, ctx.storefront.cart()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use foodwagon::menu::DiscountInfo;
    use foodwagon_app::api::{MockStorefrontApi, SearchResults};
    use mockall::predicate::eq;
    use testresult::TestResult;

    use crate::cli::tests::{context, dish, restaurant, run};

    #[tokio::test]
    async fn restaurants_apply_filters_and_sort() -> TestResult {
        let mut api = MockStorefrontApi::new();

        api.expect_fetch_restaurants()
            .once()
            .with(eq(Some("Bangalore".to_string())))
            .return_once(|_| {
                let mut slow = restaurant(1, "Slow Kitchen");
                slow.delivery_time = "50-55 mins".to_string();

                let mut quick = restaurant(2, "Quick Bites");
                quick.delivery_time = "15-20 mins".to_string();
                quick.rating = 4.0;

                let mut best = restaurant(3, "Best Dosa");
                best.delivery_time = "25 mins".to_string();
                best.rating = 4.8;
                best.aggregated_discount_info = Some(DiscountInfo {
                    header: "50% OFF".to_string(),
                    sub_header: "UPTO ₹100".to_string(),
                });

                Ok(vec![slow, quick, best])
            });

        let mut ctx = context(api);

        let printed = run(
            &mut ctx,
            &["restaurants", "--filter", "fast-delivery", "--sort", "rating"],
        )
        .await?;

        let best = printed.find("Best Dosa").ok_or("missing Best Dosa")?;
        let quick = printed.find("Quick Bites").ok_or("missing Quick Bites")?;

        assert!(best < quick, "higher rating first");
        assert!(!printed.contains("Slow Kitchen"));
        assert!(printed.contains("50% OFF UPTO ₹100"));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_filter_is_rejected_by_the_parser() {
        let mut ctx = context(MockStorefrontApi::new());

        assert!(run(&mut ctx, &["restaurants", "--filter", "cheap"]).await.is_err());
    }

    #[tokio::test]
    async fn search_prints_restaurants_and_dishes() -> TestResult {
        let mut api = MockStorefrontApi::new();

        api.expect_search()
            .once()
            .with(eq("chicken biryani".to_string()))
            .return_once(|_| {
                Ok(SearchResults {
                    restaurants: vec![restaurant(1, "Meghana Foods")],
                    items: vec![dish(101, "Chicken Biryani", 320)],
                })
            });

        let mut ctx = context(api);

        let printed = run(&mut ctx, &["search", "chicken", "biryani"]).await?;

        assert!(printed.contains("Meghana Foods"));
        assert!(printed.contains("Chicken Biryani"));

        Ok(())
    }
}
