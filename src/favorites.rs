//! Favorites

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::{
    menu::{Restaurant, RestaurantId},
    notifications::{Notifier, Severity},
    store::{FAVORITES_KEY, KeyValueStore, StoreError, load_json, save_json},
};

/// Errors raised by the favorites set.
#[derive(Debug, Error)]
pub enum FavoritesError {
    /// Persisting the set failed; nothing changed.
    #[error("failed to persist favorites")]
    Store(#[from] StoreError),
}

/// Favorited restaurants, stored as snapshots taken when they were added.
#[derive(Debug)]
pub struct FavoritesSet {
    store: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn Notifier>,
    favorites: Vec<Restaurant>,
}

impl FavoritesSet {
    /// Load saved favorites. A corrupt blob is logged and treated as empty.
    pub fn load(store: Arc<dyn KeyValueStore>, notifier: Arc<dyn Notifier>) -> Self {
        let favorites: Vec<Restaurant> = load_json(store.as_ref(), FAVORITES_KEY);

        debug!(count = favorites.len(), "loaded favorites");

        FavoritesSet {
            store,
            notifier,
            favorites,
        }
    }

    /// Add `restaurant` if absent, otherwise remove it. Returns whether it is now a favorite.
    ///
    /// # Errors
    ///
    /// Returns [`FavoritesError::Store`] if the set cannot be persisted.
    pub fn toggle_favorite(&mut self, restaurant: &Restaurant) -> Result<bool, FavoritesError> {
        let present = self.is_favorite(restaurant.id);

        let next: Vec<Restaurant> = if present {
            self.favorites
                .iter()
                .filter(|favorite| favorite.id != restaurant.id)
                .cloned()
                .collect()
        } else {
            let mut next = self.favorites.clone();
            next.push(restaurant.clone());
            next
        };

        save_json(self.store.as_ref(), FAVORITES_KEY, &next)?;

        self.favorites = next;

        if present {
            self.notifier.notify(
                Severity::Info,
                &format!("Removed {} from favorites", restaurant.name),
            );
        } else {
            self.notifier.notify(
                Severity::Success,
                &format!("Added {} to favorites", restaurant.name),
            );
        }

        Ok(!present)
    }

    /// Whether the restaurant with `id` is a favorite.
    pub fn is_favorite(&self, id: RestaurantId) -> bool {
        self.favorites.iter().any(|favorite| favorite.id == id)
    }

    /// Favorites in the order they were added.
    pub fn favorites(&self) -> &[Restaurant] {
        &self.favorites
    }
}
