use std::io::Write;

use clap::{Args, ValueEnum};
use foodwagon::{
    bill::Bill,
    menu::{MenuItemId, RestaurantId},
    orders::PaymentMethod,
};
use foodwagon_app::context::AppContext;

use super::{line, render};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum Payment {
    /// Cash on delivery
    Cod,

    /// Paid online
    Online,
}

impl From<Payment> for PaymentMethod {
    fn from(payment: Payment) -> Self {
        match payment {
            Payment::Cod => PaymentMethod::Cod,
            Payment::Online => PaymentMethod::Online,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct OrderArgs {
    /// Restaurant to order from
    #[arg(long)]
    restaurant: u64,

    /// Dish ID to add; repeat to add more or to increase quantity
    #[arg(long = "item", required = true)]
    items: Vec<u64>,

    /// Payment method
    #[arg(long, value_enum, default_value_t = Payment::Cod)]
    payment: Payment,

    /// Print the bill without placing the order
    #[arg(long)]
    dry_run: bool,
}

pub(crate) async fn place(
    args: OrderArgs,
    ctx: &mut AppContext,
    out: &mut dyn Write,
) -> Result<(), String> {
    let menu = ctx.catalog.menu(RestaurantId(args.restaurant)).await;

    for id in args.items.into_iter().map(MenuItemId) {
        let item = menu
            .iter()
            .find(|item| item.id == id)
            .ok_or_else(|| format!("dish {id} is not on the menu"))?;

        if !item.is_available() {
            return Err(format!("{} is out of stock", item.name));
        }

        ctx.storefront.cart_mut().add_item(item);
    }

    Bill::for_cart(ctx.storefront.cart())
        .map_err(|error| format!("failed to price cart: {error}"))?
        .write_to(&mut *out)
        .map_err(|error| format!("failed to print bill: {error}"))?;

    if args.dry_run {
        return Ok(());
    }

    let placed = ctx
        .checkout
        .place_order(&mut ctx.storefront, args.payment.into())
        .await
        .map_err(|error| error.to_string())?;

    line(
        out,
        format_args!(
            "order #{} placed, status {}",
            placed.order.id, placed.order.status
        ),
    )
}

pub(crate) async fn history(ctx: &mut AppContext, out: &mut dyn Write) -> Result<(), String> {
    if !ctx.storefront.session().is_authenticated() {
        return Err("login required".to_string());
    }

    let orders = ctx.catalog.orders(ctx.storefront.session()).await;

    if orders.is_empty() {
        return line(out, "no orders yet");
    }

    line(out, render::orders(&orders))
}

#[cfg(test)]
mod tests {
    use foodwagon::{
        addresses::{AddressLabel, NewAddress},
        orders::{Order, OrderId, OrderStatus, UserId},
        session::User,
    };
    use foodwagon_app::api::MockStorefrontApi;
    use testresult::TestResult;

    use crate::cli::tests::{context, dish, run};

    fn sign_in(ctx: &mut foodwagon_app::context::AppContext) -> TestResult {
        ctx.storefront.session_mut().login(
            "session_1",
            User {
                id: UserId(3),
                name: "Nikhil".to_string(),
                email: "nikhil@example.com".to_string(),
                phone: None,
                role: None,
            },
        )?;
        ctx.storefront.addresses_mut().add_address(NewAddress {
            label: AddressLabel::Home,
            flat_no: "7".to_string(),
            area: "HSR Layout".to_string(),
            city: "Bangalore".to_string(),
        })?;

        _ = ctx.storefront.notifications().drain();

        Ok(())
    }

    #[tokio::test]
    async fn dry_run_prints_bill_only() -> TestResult {
        let mut api = MockStorefrontApi::new();

        api.expect_fetch_menu()
            .once()
            .return_once(|_| Ok(vec![dish(101, "Chicken Biryani", 100)]));
        api.expect_submit_order().never();

        let mut ctx = context(api);

        let printed = run(
            &mut ctx,
            &[
                "order",
                "--restaurant",
                "1",
                "--item",
                "101",
                "--item",
                "101",
                "--dry-run",
            ],
        )
        .await?;

        assert!(printed.contains("To Pay"));
        assert_eq!(ctx.storefront.cart().quantity_of(foodwagon::menu::MenuItemId(101)), 2);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_dish_is_an_error() {
        let mut api = MockStorefrontApi::new();

        api.expect_fetch_menu()
            .once()
            .return_once(|_| Ok(vec![dish(101, "Chicken Biryani", 100)]));

        let mut ctx = context(api);

        let result = run(&mut ctx, &["order", "--restaurant", "1", "--item", "999"]).await;

        assert!(result.is_err());
        assert!(ctx.storefront.cart().is_empty());
    }

    #[tokio::test]
    async fn placed_order_reports_id_and_clears_cart() -> TestResult {
        let mut api = MockStorefrontApi::new();

        api.expect_fetch_menu()
            .once()
            .return_once(|_| Ok(vec![dish(101, "Chicken Biryani", 200)]));
        api.expect_submit_order()
            .once()
            .withf(|request| request.total_amount == 245)
            .return_once(|request| {
                Ok(Order {
                    id: OrderId(51),
                    user_id: Some(request.user_id),
                    items: request.items,
                    total_amount: request.total_amount,
                    status: OrderStatus::Pending,
                    date: "2024-06-01".to_string(),
                    customer_name: None,
                    customer_phone: None,
                    delivery_address: Some(request.delivery_address),
                    restaurant_name: Some(request.restaurant_name),
                    restaurant_id: Some(request.restaurant_id),
                    restaurant_image_url: None,
                })
            });

        let mut ctx = context(api);
        sign_in(&mut ctx)?;

        let printed = run(
            &mut ctx,
            &["order", "--restaurant", "1", "--item", "101", "--payment", "online"],
        )
        .await?;

        assert!(printed.contains("order #51 placed, status PENDING"));
        assert!(printed.contains("[success] Order placed successfully!"));
        assert!(ctx.storefront.cart().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn history_requires_login() {
        let mut api = MockStorefrontApi::new();
        api.expect_fetch_orders().never();

        let mut ctx = context(api);

        assert!(run(&mut ctx, &["orders"]).await.is_err());
    }
}
