//! Fixtures

use std::{fs, path::PathBuf};

use thiserror::Error;

use crate::{
    fixtures::catalog::{MenuFixture, RestaurantsFixture},
    menu::{MenuItem, MenuItemId, Restaurant, RestaurantId},
};

pub mod catalog;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Restaurant not found
    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(RestaurantId),

    /// Menu item not found
    #[error("Menu item not found: {0}")]
    MenuItemNotFound(MenuItemId),
}

/// Restaurants and menus loaded from YAML files.
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    restaurants: Vec<Restaurant>,
    items: Vec<MenuItem>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            restaurants: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Load restaurants from `restaurants/{name}.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_restaurants(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self
            .base_path
            .join("restaurants")
            .join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: RestaurantsFixture = serde_norway::from_str(&contents)?;

        self.restaurants.extend(fixture.restaurants);

        Ok(self)
    }

    /// Load menu items from `menus/{name}.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_menu(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("menus").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: MenuFixture = serde_norway::from_str(&contents)?;

        self.items.extend(fixture.items);

        Ok(self)
    }

    /// Load a complete fixture set (restaurants and menus with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_restaurants(name)?.load_menu(name)?;

        Ok(fixture)
    }

    /// All restaurants in file order
    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    /// Get a restaurant by id
    ///
    /// # Errors
    ///
    /// Returns an error if the restaurant is not found.
    pub fn restaurant(&self, id: RestaurantId) -> Result<&Restaurant, FixtureError> {
        self.restaurants
            .iter()
            .find(|restaurant| restaurant.id == id)
            .ok_or(FixtureError::RestaurantNotFound(id))
    }

    /// Menu of one restaurant, in file order
    pub fn menu(&self, restaurant: RestaurantId) -> Vec<MenuItem> {
        self.items
            .iter()
            .filter(|item| item.restaurant_id == restaurant)
            .cloned()
            .collect()
    }

    /// Get a menu item by id
    ///
    /// # Errors
    ///
    /// Returns an error if the item is not found.
    pub fn item(&self, id: MenuItemId) -> Result<&MenuItem, FixtureError> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .ok_or(FixtureError::MenuItemNotFound(id))
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
