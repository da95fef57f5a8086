//! Catalog fixture files

use serde::Deserialize;

use crate::menu::{MenuItem, Restaurant};

/// Wrapper for a restaurants fixture file.
#[derive(Debug, Deserialize)]
pub struct RestaurantsFixture {
    /// Restaurants in listing order.
    pub restaurants: Vec<Restaurant>,
}

/// Wrapper for a menus fixture file.
#[derive(Debug, Deserialize)]
pub struct MenuFixture {
    /// Menu items across every restaurant in the set.
    pub items: Vec<MenuItem>,
}
