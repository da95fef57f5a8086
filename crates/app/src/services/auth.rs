//! Sign-in and sign-up.

use std::{fmt, sync::Arc};

use foodwagon::{
    notifications::Severity,
    session::{SessionError, User},
    validation::{LoginForm, SignUpForm, ValidationErrors},
};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    api::{ApiError, StorefrontApi},
    storefront::Storefront,
};

/// Shown when the form has invalid fields.
pub const FIX_FORM: &str = "Please fix the errors in the form.";

/// Shown when the backend fails without a message of its own.
pub const UNEXPECTED_FAILURE: &str = "An unexpected error occurred. Please try again.";

/// Errors that can occur while signing in, signing up or out.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The form has invalid fields.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// The backend refused or could not be reached.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The session could not be saved or cleared.
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl AuthError {
    /// Text to show under the form.
    pub fn user_message(&self) -> &str {
        match self {
            AuthError::Validation(_) => FIX_FORM,
            AuthError::Api(error) => error.user_message().unwrap_or(UNEXPECTED_FAILURE),
            AuthError::Session(_) => UNEXPECTED_FAILURE,
        }
    }
}

/// Account operations.
#[derive(Clone)]
pub struct AuthService {
    api: Arc<dyn StorefrontApi>,
}

impl fmt::Debug for AuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthService").finish_non_exhaustive()
    }
}

impl AuthService {
    /// Create a service calling `api`.
    #[must_use]
    pub fn new(api: Arc<dyn StorefrontApi>) -> Self {
        Self { api }
    }

    /// Validate `form`, sign in and adopt the session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] before any request is made, or the backend's refusal.
    pub async fn login(
        &self,
        storefront: &mut Storefront,
        form: &LoginForm,
    ) -> Result<User, AuthError> {
        let credentials = form.validate()?;

        let response = self
            .api
            .login(credentials.contact.as_str().to_string(), credentials.password)
            .await
            .inspect_err(|error| warn!(%error, "login failed"))?;

        storefront
            .session_mut()
            .login(response.token, response.user.clone())?;

        info!(user = %response.user.id, "signed in");

        storefront.notifier().notify(
            Severity::Success,
            &format!("Welcome back, {}!", response.user.name),
        );

        Ok(response.user)
    }

    /// Validate `form`, create the account and adopt the session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] before any request is made, or the backend's refusal.
    pub async fn register(
        &self,
        storefront: &mut Storefront,
        form: &SignUpForm,
    ) -> Result<User, AuthError> {
        let sign_up = form.validate()?;

        let response = self
            .api
            .register(
                sign_up.name,
                sign_up.contact.as_str().to_string(),
                sign_up.password,
            )
            .await
            .inspect_err(|error| warn!(%error, "registration failed"))?;

        storefront
            .session_mut()
            .login(response.token, response.user.clone())?;

        info!(user = %response.user.id, "account created");

        storefront.notifier().notify(
            Severity::Success,
            "Account created successfully! Welcome to FoodWagon.",
        );

        Ok(response.user)
    }

    /// Sign out.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Session`] if the saved session cannot be removed.
    pub fn logout(storefront: &mut Storefront) -> Result<(), AuthError> {
        storefront.session_mut().logout()?;

        storefront
            .notifier()
            .notify(Severity::Info, "Logged out successfully. See you soon!");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use foodwagon::{
        orders::UserId,
        store::{KeyValueStore, MemoryStore},
        validation::FieldError,
    };
    use mockall::predicate::eq;
    use testresult::TestResult;

    use crate::api::{AuthResponse, MockStorefrontApi};

    use super::*;

    fn storefront() -> Storefront {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());

        Storefront::open(store)
    }

    fn kavya() -> User {
        User {
            id: UserId(21),
            name: "Kavya".to_string(),
            email: "kavya@example.com".to_string(),
            phone: None,
            role: None,
        }
    }

    #[tokio::test]
    async fn invalid_form_makes_no_request() {
        let mut api = MockStorefrontApi::new();
        api.expect_login().never();

        let service = AuthService::new(Arc::new(api));
        let mut storefront = storefront();

        let result = service
            .login(
                &mut storefront,
                &LoginForm {
                    identifier: "kavya@".to_string(),
                    password: "123".to_string(),
                },
            )
            .await;

        let Err(AuthError::Validation(errors)) = result else {
            panic!("expected validation errors, got {result:?}");
        };

        assert_eq!(errors.get("identifier"), Some(FieldError::InvalidEmail));
        assert_eq!(errors.get("password"), Some(FieldError::TooShort { min: 6 }));
        assert!(!storefront.session().is_authenticated());
    }

    #[tokio::test]
    async fn login_adopts_session_and_greets() -> TestResult {
        let mut api = MockStorefrontApi::new();

        api.expect_login()
            .once()
            .with(eq("kavya@example.com".to_string()), eq("secret12".to_string()))
            .return_once(|_, _| {
                Ok(AuthResponse {
                    token: "session_42".to_string(),
                    user: kavya(),
                })
            });

        let service = AuthService::new(Arc::new(api));
        let mut storefront = storefront();

        let user = service
            .login(
                &mut storefront,
                &LoginForm {
                    identifier: " kavya@example.com ".to_string(),
                    password: "secret12".to_string(),
                },
            )
            .await?;

        assert_eq!(user.id, UserId(21));
        assert_eq!(storefront.session().token(), Some("session_42"));
        assert_eq!(
            storefront.notifications().messages(),
            vec![(Severity::Success, "Welcome back, Kavya!".to_string())]
        );

        Ok(())
    }

    #[tokio::test]
    async fn backend_refusal_surfaces_server_message() {
        let mut api = MockStorefrontApi::new();

        api.expect_register().once().return_once(|_, _, _| {
            Err(ApiError::UnexpectedResponse {
                status: 409,
                message: "User already exists".to_string(),
            })
        });

        let service = AuthService::new(Arc::new(api));
        let mut storefront = storefront();

        let result = service
            .register(
                &mut storefront,
                &SignUpForm {
                    name: "Kavya".to_string(),
                    identifier: "9876543210".to_string(),
                    password: "Secret123".to_string(),
                    confirm_password: "Secret123".to_string(),
                },
            )
            .await;

        let Err(error) = result else {
            panic!("expected a refusal");
        };

        assert_eq!(error.user_message(), "User already exists");
        assert!(!storefront.session().is_authenticated());
        assert!(storefront.notifications().messages().is_empty());
    }

    #[tokio::test]
    async fn logout_clears_session() -> TestResult {
        let mut storefront = storefront();
        storefront.session_mut().login("session_1", kavya())?;

        AuthService::logout(&mut storefront)?;

        assert!(!storefront.session().is_authenticated());
        assert_eq!(
            storefront.notifications().messages(),
            vec![(
                Severity::Info,
                "Logged out successfully. See you soon!".to_string()
            )]
        );

        Ok(())
    }
}
