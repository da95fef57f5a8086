//! Table rendering for command output.

use foodwagon::{
    addresses::AddressBook,
    cart::Cart,
    favorites::FavoritesSet,
    menu::{MenuItem, Restaurant},
    orders::Order,
    pricing::rupees,
};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};

fn finish(builder: Builder, right_aligned: &[usize]) -> String {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);

    for &column in right_aligned {
        table.modify(Columns::one(column), Alignment::right());
    }

    table.to_string()
}

pub(crate) fn restaurants(restaurants: &[Restaurant], favorites: &FavoritesSet) -> String {
    let mut builder = Builder::default();

    builder.push_record(["", "ID", "Restaurant", "Rating", "Delivery", "Cost", "Offer"]);

    for restaurant in restaurants {
        let offer = restaurant
            .aggregated_discount_info
            .as_ref()
            .map(|info| format!("{} {}", info.header, info.sub_header).trim().to_string())
            .unwrap_or_default();

        builder.push_record([
            if favorites.is_favorite(restaurant.id) { "♥" } else { "" }.to_string(),
            restaurant.id.to_string(),
            restaurant.name.clone(),
            format!("{:.1}", restaurant.rating),
            restaurant.delivery_time.clone(),
            restaurant.cost_for_two.clone(),
            offer,
        ]);
    }

    finish(builder, &[1, 3])
}

pub(crate) fn menu(items: &[MenuItem], cart: &Cart) -> String {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Dish", "", "Category", "Price", "Stock", "In cart"]);

    for item in items {
        let in_cart = cart.quantity_of(item.id);

        builder.push_record([
            item.id.to_string(),
            item.name.clone(),
            if item.is_veg { "veg" } else { "non-veg" }.to_string(),
            item.category.clone(),
            rupees(item.price).to_string(),
            if item.is_available() { "" } else { "sold out" }.to_string(),
            if in_cart == 0 {
                String::new()
            } else {
                in_cart.to_string()
            },
        ]);
    }

    finish(builder, &[0, 4, 6])
}

pub(crate) fn orders(orders: &[Order]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Order", "Date", "Restaurant", "Items", "Total", "Status"]);

    for order in orders {
        builder.push_record([
            format!("#{}", order.id),
            order.date.clone(),
            order.restaurant_name.clone().unwrap_or_default(),
            order.item_count().to_string(),
            rupees(order.total_amount).to_string(),
            order.status.to_string(),
        ]);
    }

    finish(builder, &[3, 4])
}

pub(crate) fn addresses(book: &AddressBook) -> String {
    let mut builder = Builder::default();

    builder.push_record(["", "ID", "Label", "Address"]);

    for address in book.addresses() {
        let selected = book.selected_id() == Some(&address.id);

        builder.push_record([
            if selected { "*" } else { "" }.to_string(),
            address.id.to_string(),
            address.label.to_string(),
            address.display_line(),
        ]);
    }

    finish(builder, &[])
}
