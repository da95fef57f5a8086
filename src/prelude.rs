//! FoodWagon prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    addresses::{AddressBook, AddressBookError, AddressId, AddressLabel, NewAddress, UserAddress},
    bill::{Bill, BillError},
    cart::{Cart, CartLine},
    checkout::{CheckoutBlock, CheckoutReady, Navigation, evaluate},
    favorites::{FavoritesError, FavoritesSet},
    fixtures::{Fixture, FixtureError},
    listing::{ListingFilter, ListingPage, ListingQuery, SortKey, paginate, process},
    location::{
        Coordinates, DetectionOutcome, DetectionTicket, GeocodedAddress, GeolocationError,
        LocationState,
    },
    menu::{DiscountInfo, MenuItem, MenuItemId, Restaurant, RestaurantId},
    notifications::{Notification, NotificationCenter, Notifier, Severity},
    orders::{
        MenuItemDraft, Order, OrderId, OrderItem, OrderRequest, OrderStatus, PaymentMethod,
        UserId, status_counts,
    },
    pricing::{PricingBreakdown, PricingError, compute_breakdown},
    session::{AuthSession, SessionError, User, UserRole},
    store::{JsonFileStore, KeyValueStore, MemoryStore, StoreError},
    validation::{Contact, FieldError, ValidationErrors},
};
