//! Auth session
//!
//! The signed-in user and their session token, persisted under [`USER_KEY`] and [`TOKEN_KEY`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use crate::{
    orders::UserId,
    store::{KeyValueStore, StoreError, TOKEN_KEY, USER_KEY, save_json},
};

/// Errors raised while changing the session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Persisting the session failed; the in-memory session is unchanged.
    #[error("failed to persist session")]
    Store(#[from] StoreError),
}

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Orders food.
    Customer,

    /// Runs a restaurant.
    Partner,
}

/// A signed-in user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Identifier.
    pub id: UserId,

    /// Display name.
    pub name: String,

    /// Email, or a placeholder when the account was created with a phone number.
    pub email: String,

    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Role; absent for older accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

impl User {
    /// Whether this user runs a restaurant.
    pub fn is_partner(&self) -> bool {
        self.role == Some(UserRole::Partner)
    }
}

/// The current session, anonymous or signed in.
#[derive(Debug)]
pub struct AuthSession {
    store: Arc<dyn KeyValueStore>,
    user: Option<User>,
    token: Option<String>,
}

impl AuthSession {
    /// Restore the session saved in `store`.
    ///
    /// A profile blob that cannot be parsed clears both keys and yields an anonymous session.
    pub fn restore(store: Arc<dyn KeyValueStore>) -> Self {
        let mut session = AuthSession {
            store,
            user: None,
            token: None,
        };

        let saved_user = session.store.get(USER_KEY);
        let saved_token = session.store.get(TOKEN_KEY);

        match (saved_user, saved_token) {
            (Ok(Some(raw_user)), Ok(Some(token))) => {
                match serde_json::from_str::<User>(&raw_user) {
                    Ok(user) => {
                        debug!(user = %user.id, "restored session");

                        session.user = Some(user);
                        session.token = Some(token);
                    }
                    Err(source) => {
                        error!(error = %source, "failed to parse saved user, clearing session");

                        session.clear_persisted();
                    }
                }
            }
            (Err(source), _) | (_, Err(source)) => {
                error!(error = %source, "failed to read saved session");
            }
            _ => {}
        }

        session
    }

    fn clear_persisted(&self) {
        for key in [USER_KEY, TOKEN_KEY] {
            if let Err(source) = self.store.remove(key) {
                error!(key, error = %source, "failed to clear saved session");
            }
        }
    }

    /// Sign in, persisting the session before adopting it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] if the session cannot be persisted.
    pub fn login(&mut self, token: impl Into<String>, user: User) -> Result<(), SessionError> {
        let token = token.into();

        save_json(self.store.as_ref(), USER_KEY, &user)?;
        self.store.set(TOKEN_KEY, &token)?;

        debug!(user = %user.id, "signed in");

        self.user = Some(user);
        self.token = Some(token);

        Ok(())
    }

    /// Sign out, removing the persisted session first.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] if the saved session cannot be removed.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.store.remove(USER_KEY)?;
        self.store.remove(TOKEN_KEY)?;

        self.user = None;
        self.token = None;

        Ok(())
    }

    /// Whether a token is held.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The signed-in user.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The session token.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}
