//! FoodWagon client application: backend boundary, services and wired state.

pub mod api;
pub mod context;
pub mod services;
pub mod storefront;
