//! Application state.

use std::sync::Arc;

use foodwagon::{
    addresses::AddressBook,
    cart::Cart,
    favorites::FavoritesSet,
    location::LocationState,
    notifications::{NotificationCenter, Notifier},
    session::AuthSession,
    store::KeyValueStore,
};

/// Every piece of client state, owned in one place and handed to the services by `&mut`.
#[derive(Debug)]
pub struct Storefront {
    notifications: Arc<NotificationCenter>,
    cart: Cart,
    addresses: AddressBook,
    favorites: FavoritesSet,
    session: AuthSession,
    location: LocationState,
}

impl Storefront {
    /// Restore persisted state from `store` with a fresh notification centre.
    pub fn open(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_notifications(store, Arc::new(NotificationCenter::new()))
    }

    /// Restore persisted state from `store`, raising notifications on `notifications`.
    pub fn with_notifications(
        store: Arc<dyn KeyValueStore>,
        notifications: Arc<NotificationCenter>,
    ) -> Self {
        let notifier: Arc<dyn Notifier> = notifications.clone();

        Self {
            cart: Cart::new(notifier.clone()),
            addresses: AddressBook::load(store.clone(), notifier.clone()),
            favorites: FavoritesSet::load(store.clone(), notifier),
            session: AuthSession::restore(store),
            location: LocationState::new(),
            notifications,
        }
    }

    /// Notification sink shared by every store.
    pub fn notifier(&self) -> Arc<dyn Notifier> {
        self.notifications.clone()
    }

    /// Notification queue.
    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    /// Cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Cart, mutably.
    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// Saved delivery addresses.
    pub fn addresses(&self) -> &AddressBook {
        &self.addresses
    }

    /// Saved delivery addresses, mutably.
    pub fn addresses_mut(&mut self) -> &mut AddressBook {
        &mut self.addresses
    }

    /// Favorite restaurants.
    pub fn favorites(&self) -> &FavoritesSet {
        &self.favorites
    }

    /// Favorite restaurants, mutably.
    pub fn favorites_mut(&mut self) -> &mut FavoritesSet {
        &mut self.favorites
    }

    /// Signed-in user.
    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    /// Signed-in user, mutably.
    pub fn session_mut(&mut self) -> &mut AuthSession {
        &mut self.session
    }

    /// Header location.
    pub fn location(&self) -> &LocationState {
        &self.location
    }

    /// Header location, mutably.
    pub fn location_mut(&mut self) -> &mut LocationState {
        &mut self.location
    }
}
