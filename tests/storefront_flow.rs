//! End-to-end storefront state against a file-backed store: sign in, save an address, pick a
//! favorite, fill the cart and freeze it into an order, then reopen the store and check what
//! survived.

use std::sync::Arc;

use tempfile::tempdir;
use testresult::TestResult;

use foodwagon::prelude::*;

fn priya() -> User {
    User {
        id: UserId(11),
        name: "Priya".to_string(),
        email: "priya@example.com".to_string(),
        phone: Some("9876543210".to_string()),
        role: Some(UserRole::Customer),
    }
}

fn home() -> NewAddress {
    NewAddress {
        label: AddressLabel::Home,
        flat_no: "12A".to_string(),
        area: "Koramangala".to_string(),
        city: "Bangalore".to_string(),
    }
}

#[test]
fn storefront_state_survives_a_restart() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join("store.json");
    let fixture = Fixture::from_set("storefront")?;

    let center = Arc::new(NotificationCenter::new());
    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::open(&path)?);

    let mut session = AuthSession::restore(store.clone());
    let mut addresses = AddressBook::load(store.clone(), center.clone());
    let mut favorites = FavoritesSet::load(store.clone(), center.clone());
    let mut cart = Cart::new(center.clone());

    assert_eq!(
        evaluate(&session, &addresses, &cart).err(),
        Some(CheckoutBlock::LoginRequired)
    );

    session.login("session_1", priya())?;
    addresses.add_address(home())?;
    favorites.toggle_favorite(fixture.restaurant(RestaurantId(1))?)?;

    assert_eq!(
        evaluate(&session, &addresses, &cart).err(),
        Some(CheckoutBlock::EmptyCart)
    );

    let biryani = fixture.item(MenuItemId(101))?;
    let chicken_65 = fixture.item(MenuItemId(103))?;

    cart.add_item(biryani);
    cart.add_item(chicken_65);
    cart.add_item(biryani);

    assert_eq!(cart.count(), 3);
    assert_eq!(cart.total(), 880);

    let request = evaluate(&session, &addresses, &cart)?.order_request(PaymentMethod::Online)?;

    // 880 + 30 + 5 + 44
    assert_eq!(request.total_amount, 959);
    assert_eq!(request.restaurant_name, "Meghana Foods");
    assert_eq!(request.delivery_address, "12A, Koramangala, Bangalore");
    assert_eq!(request.items.len(), 2);

    let raised: Vec<Severity> = center.drain().iter().map(Notification::severity).collect();
    assert!(raised.iter().all(|severity| *severity == Severity::Success));

    drop((session, addresses, favorites, store));

    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::open(&path)?);

    let session = AuthSession::restore(store.clone());
    let addresses = AddressBook::load(store.clone(), center.clone());
    let favorites = FavoritesSet::load(store, center.clone());
    let cart = Cart::new(center);

    assert!(session.is_authenticated());
    assert_eq!(session.user().map(|user| user.name.as_str()), Some("Priya"));
    assert_eq!(
        addresses.selected().map(UserAddress::display_line),
        Some("12A, Koramangala, Bangalore".to_string())
    );
    assert!(favorites.is_favorite(RestaurantId(1)));
    assert!(cart.is_empty(), "the cart lives in memory only");

    Ok(())
}

#[test]
fn removing_the_selected_address_falls_back_to_the_first() -> TestResult {
    let dir = tempdir()?;
    let center = Arc::new(NotificationCenter::new());
    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::open(dir.path().join("s.json"))?);

    let mut addresses = AddressBook::load(store, center);

    let first = addresses.add_address(home())?;
    let second = addresses.add_address(NewAddress {
        label: AddressLabel::Work,
        flat_no: "4F".to_string(),
        area: "Indiranagar".to_string(),
        city: "Bangalore".to_string(),
    })?;

    assert_eq!(addresses.selected_id(), Some(&second));
    assert!(addresses.remove_address(&second)?);
    assert_eq!(addresses.selected_id(), Some(&first));

    assert!(!addresses.remove_address(&second)?);
    assert!(addresses.set_selected(&second).is_err());
    assert_eq!(addresses.selected_id(), Some(&first));

    Ok(())
}

#[test]
fn out_of_stock_fixture_items_are_flagged() -> TestResult {
    let fixture = Fixture::from_set("storefront")?;

    let fries = fixture.item(MenuItemId(403))?;
    let whopper = fixture.item(MenuItemId(401))?;

    assert!(!fries.is_available());
    assert!(whopper.is_available());
    assert_eq!(fixture.menu(RestaurantId(4)).len(), 3);

    let bill = Bill::for_cart(&{
        let mut cart = Cart::new(Arc::new(NotificationCenter::new()));
        cart.add_item(whopper);
        cart
    })?;

    // 199 + 30 + 5 + 10
    assert_eq!(bill.breakdown().grand_total, 244);

    Ok(())
}
