//! FoodWagon
//!
//! FoodWagon is the client-side state engine of a food-ordering storefront: cart aggregation,
//! pricing, checkout gating, saved addresses, favorites and restaurant listing.

pub mod addresses;
pub mod bill;
pub mod cart;
pub mod checkout;
pub mod favorites;
pub mod fixtures;
pub mod listing;
pub mod location;
pub mod menu;
pub mod notifications;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod session;
pub mod store;
pub mod validation;
