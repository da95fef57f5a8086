//! Address book
//!
//! Saved delivery addresses with a single selected entry. The whole list is persisted as one JSON
//! blob under [`ADDRESSES_KEY`] and written before the in-memory list changes, so a failed write
//! leaves the book exactly as it was.

use std::{fmt, sync::Arc};

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    notifications::{Notifier, Severity},
    store::{ADDRESSES_KEY, KeyValueStore, StoreError, load_json, save_json},
};

const ID_LEN: usize = 9;

/// Errors raised by the address book.
#[derive(Debug, Error)]
pub enum AddressBookError {
    /// Persisting the list failed; nothing changed.
    #[error("failed to persist addresses")]
    Store(#[from] StoreError),

    /// The id does not name a saved address.
    #[error("no saved address with id {0}")]
    UnknownAddress(AddressId),
}

/// Opaque address identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressId(String);

impl AddressId {
    /// Random 9 character base-36 id. Collisions are not checked.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();

        AddressId(
            (0..ID_LEN)
                .filter_map(|_| char::from_digit(rng.gen_range(0..36), 36))
                .collect(),
        )
    }

    /// The id as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AddressId {
    fn from(value: &str) -> Self {
        AddressId(value.to_string())
    }
}

impl fmt::Display for AddressId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Address kind shown as a tag on the address card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressLabel {
    /// Home.
    #[default]
    Home,

    /// Work.
    Work,

    /// Anything else.
    Other,
}

impl fmt::Display for AddressLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AddressLabel::Home => "Home",
            AddressLabel::Work => "Work",
            AddressLabel::Other => "Other",
        })
    }
}

/// A saved delivery address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAddress {
    /// Identifier.
    pub id: AddressId,

    /// Kind of address.
    #[serde(rename = "type")]
    pub label: AddressLabel,

    /// Flat, house or floor.
    pub flat_no: String,

    /// Area or locality.
    pub area: String,

    /// City.
    pub city: String,
}

impl UserAddress {
    /// One-line form used in order payloads: `"{flat_no}, {area}, {city}"`.
    pub fn display_line(&self) -> String {
        format!("{}, {}, {}", self.flat_no, self.area, self.city)
    }
}

/// Address fields before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    /// Kind of address.
    pub label: AddressLabel,

    /// Flat, house or floor.
    pub flat_no: String,

    /// Area or locality.
    pub area: String,

    /// City.
    pub city: String,
}

/// Saved addresses plus the one selected for delivery.
#[derive(Debug)]
pub struct AddressBook {
    store: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn Notifier>,
    addresses: Vec<UserAddress>,
    selected: Option<AddressId>,
}

impl AddressBook {
    /// Load saved addresses, selecting the first one.
    ///
    /// A corrupt blob is logged and treated as an empty book.
    pub fn load(store: Arc<dyn KeyValueStore>, notifier: Arc<dyn Notifier>) -> Self {
        let addresses: Vec<UserAddress> = load_json(store.as_ref(), ADDRESSES_KEY);
        let selected = addresses.first().map(|address| address.id.clone());

        debug!(count = addresses.len(), "loaded address book");

        AddressBook {
            store,
            notifier,
            addresses,
            selected,
        }
    }

    fn persist(&self, addresses: &[UserAddress]) -> Result<(), StoreError> {
        save_json(self.store.as_ref(), ADDRESSES_KEY, addresses)
    }

    /// Save a new address and select it.
    ///
    /// # Errors
    ///
    /// Returns [`AddressBookError::Store`] if the list cannot be persisted.
    pub fn add_address(&mut self, address: NewAddress) -> Result<AddressId, AddressBookError> {
        let id = AddressId::generate();
        let label = address.label;

        let address = UserAddress {
            id: id.clone(),
            label,
            flat_no: address.flat_no,
            area: address.area,
            city: address.city,
        };

        let mut next = self.addresses.clone();
        next.push(address);

        self.persist(&next)?;

        self.addresses = next;
        self.selected = Some(id.clone());

        debug!(%id, "saved address");

        self.notifier
            .notify(Severity::Success, &format!("Address \"{label}\" saved."));

        Ok(id)
    }

    /// Delete an address. Returns `false` if it was not saved.
    ///
    /// If it was selected, selection falls back to the first remaining address.
    ///
    /// # Errors
    ///
    /// Returns [`AddressBookError::Store`] if the list cannot be persisted.
    pub fn remove_address(&mut self, id: &AddressId) -> Result<bool, AddressBookError> {
        if self.get(id).is_none() {
            return Ok(false);
        }

        let next: Vec<UserAddress> = self
            .addresses
            .iter()
            .filter(|address| &address.id != id)
            .cloned()
            .collect();

        self.persist(&next)?;

        self.addresses = next;

        if self.selected.as_ref() == Some(id) {
            self.selected = self.addresses.first().map(|address| address.id.clone());
        }

        debug!(%id, "removed address");

        self.notifier
            .notify(Severity::Info, "Address removed successfully.");

        Ok(true)
    }

    /// Select a saved address for delivery.
    ///
    /// # Errors
    ///
    /// Returns [`AddressBookError::UnknownAddress`] if `id` is not saved; the selection is left
    /// unchanged.
    pub fn set_selected(&mut self, id: &AddressId) -> Result<(), AddressBookError> {
        if self.get(id).is_none() {
            warn!(%id, "refusing to select unknown address");

            return Err(AddressBookError::UnknownAddress(id.clone()));
        }

        self.selected = Some(id.clone());

        Ok(())
    }

    /// Saved addresses in insertion order.
    pub fn addresses(&self) -> &[UserAddress] {
        &self.addresses
    }

    /// The selected address, if any.
    pub fn selected(&self) -> Option<&UserAddress> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    /// The selected address id, if any.
    pub fn selected_id(&self) -> Option<&AddressId> {
        self.selected.as_ref()
    }

    /// Look up a saved address.
    pub fn get(&self, id: &AddressId) -> Option<&UserAddress> {
        self.addresses.iter().find(|address| &address.id == id)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{notifications::NotificationCenter, store::MemoryStore};

    use super::*;

    #[derive(Debug)]
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }

        fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }
    }

    fn home(flat_no: &str) -> NewAddress {
        NewAddress {
            label: AddressLabel::Home,
            flat_no: flat_no.to_string(),
            area: "Koramangala".to_string(),
            city: "Bangalore".to_string(),
        }
    }

    fn book() -> (AddressBook, Arc<MemoryStore>, Arc<NotificationCenter>) {
        let store = Arc::new(MemoryStore::new());
        let center = Arc::new(NotificationCenter::new());

        (
            AddressBook::load(store.clone(), center.clone()),
            store,
            center,
        )
    }

    #[test]
    fn generated_ids_are_nine_base36_chars() {
        let id = AddressId::generate();

        assert_eq!(id.as_str().len(), 9);
        assert!(
            id.as_str()
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()),
            "unexpected id {id}"
        );
    }

    #[test]
    fn adding_selects_new_address_and_persists() -> TestResult {
        let (mut book, store, center) = book();

        let first = book.add_address(home("12A"))?;
        let second = book.add_address(home("7B"))?;

        assert_eq!(book.selected_id(), Some(&second));
        assert_eq!(book.addresses().len(), 2);

        let reloaded = AddressBook::load(store, center.clone());
        assert_eq!(reloaded.addresses(), book.addresses());
        assert_eq!(reloaded.selected_id(), Some(&first));

        assert!(
            center
                .messages()
                .contains(&(Severity::Success, "Address \"Home\" saved.".to_string())),
            "missing save notification"
        );

        Ok(())
    }

    #[test]
    fn removing_selected_falls_back_to_first() -> TestResult {
        let (mut book, _store, _center) = book();

        let first = book.add_address(home("1"))?;
        let second = book.add_address(home("2"))?;

        assert!(book.remove_address(&second)?);
        assert_eq!(book.selected_id(), Some(&first));

        assert!(book.remove_address(&first)?);
        assert_eq!(book.selected(), None);

        Ok(())
    }

    #[test]
    fn removing_unselected_keeps_selection() -> TestResult {
        let (mut book, _store, _center) = book();

        let first = book.add_address(home("1"))?;
        let second = book.add_address(home("2"))?;

        book.remove_address(&first)?;

        assert_eq!(book.selected_id(), Some(&second));
        assert!(!book.remove_address(&first)?);

        Ok(())
    }

    #[test]
    fn selecting_unknown_id_is_rejected() -> TestResult {
        let (mut book, _store, _center) = book();

        let id = book.add_address(home("1"))?;
        let result = book.set_selected(&AddressId::from("nope"));

        assert!(matches!(result, Err(AddressBookError::UnknownAddress(_))));
        assert_eq!(book.selected_id(), Some(&id));

        Ok(())
    }

    #[test]
    fn failed_write_leaves_book_unchanged() {
        let center = Arc::new(NotificationCenter::new());
        let mut book = AddressBook::load(Arc::new(BrokenStore), center.clone());

        let result = book.add_address(home("1"));

        assert!(matches!(result, Err(AddressBookError::Store(_))));
        assert!(book.addresses().is_empty());
        assert_eq!(book.selected(), None);
        assert!(center.messages().is_empty());
    }

    #[test]
    fn corrupt_blob_loads_empty() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        store.set(ADDRESSES_KEY, "not json")?;

        let book = AddressBook::load(store, Arc::new(NotificationCenter::new()));

        assert!(book.addresses().is_empty());
        assert_eq!(book.selected(), None);

        Ok(())
    }

    #[test]
    fn label_serialises_as_type() -> TestResult {
        let address = UserAddress {
            id: AddressId::from("abc123xyz"),
            label: AddressLabel::Work,
            flat_no: "4th Floor".to_string(),
            area: "MG Road".to_string(),
            city: "Bangalore".to_string(),
        };

        let encoded = serde_json::to_value(&address)?;

        assert_eq!(encoded.get("type").and_then(|v| v.as_str()), Some("Work"));
        assert_eq!(
            encoded.get("flatNo").and_then(|v| v.as_str()),
            Some("4th Floor")
        );
        assert_eq!(address.display_line(), "4th Floor, MG Road, Bangalore");

        Ok(())
    }
}
