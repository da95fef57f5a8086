//! HTTP client for the storefront backend.

use async_trait::async_trait;
use foodwagon::{
    menu::{MenuItem, MenuItemId, Restaurant, RestaurantId},
    orders::{MenuItemDraft, Order, OrderId, OrderRequest, OrderStatus, UserId},
    session::User,
};
use jiff::Timestamp;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use super::{ApiError, AuthResponse, SearchResults, StorefrontApi};

/// Production backend.
pub const DEFAULT_BASE_URL: &str = "https://food-wagon-backend-oc5c.onrender.com/api";

/// Phone number sent when an account is created with an email address.
const PLACEHOLDER_PHONE: &str = "0000000000";

/// [`StorefrontApi`] over the backend's JSON REST interface.
#[derive(Debug, Clone)]
pub struct HttpStorefrontApi {
    base_url: String,
    http: Client,
}

impl HttpStorefrontApi {
    /// Create a client rooted at `base_url`, e.g. `"https://host/api"`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Root URL requests are made against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Default for HttpStorefrontApi {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Extract the backend's `message` field from an error body, falling back to the raw text.
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                body.trim().to_string()
            }
        })
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let message = error_message(status, &text);

        warn!(status = status.as_u16(), %message, "backend request failed");

        return Err(ApiError::UnexpectedResponse {
            status: status.as_u16(),
            message,
        });
    }

    Ok(response.json().await?)
}

/// The backend does not issue tokens, so the session is keyed by sign-in time.
fn session_token() -> String {
    format!("session_{}", Timestamp::now().as_millisecond())
}

#[derive(Debug, Serialize)]
struct LoginBody<'a> {
    identifier: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RegisterBody<'a> {
    name: &'a str,
    email: String,
    password: &'a str,
    phone: &'a str,
}

impl<'a> RegisterBody<'a> {
    fn new(name: &'a str, identifier: &'a str, password: &'a str) -> Self {
        if identifier.contains('@') {
            Self {
                name,
                email: identifier.to_string(),
                password,
                phone: PLACEHOLDER_PHONE,
            }
        } else {
            Self {
                name,
                email: format!("{identifier}@placeholder.com"),
                password,
                phone: identifier,
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: User,
}

#[derive(Debug, Serialize, Deserialize)]
struct StatusBody {
    status: OrderStatus,
}

#[async_trait]
impl StorefrontApi for HttpStorefrontApi {
    async fn fetch_restaurants(&self, city: Option<String>) -> Result<Vec<Restaurant>, ApiError> {
        let mut request = self.http.get(self.url("/restaurants"));

        if let Some(city) = city {
            request = request.query(&[("city", city)]);
        }

        read_json(request.send().await?).await
    }

    async fn fetch_menu(&self, restaurant: RestaurantId) -> Result<Vec<MenuItem>, ApiError> {
        let url = self.url(&format!("/restaurants/{restaurant}/menu"));

        read_json(self.http.get(&url).send().await?).await
    }

    async fn search(&self, query: String) -> Result<SearchResults, ApiError> {
        let response = self
            .http
            .get(self.url("/restaurants/search"))
            .query(&[("q", query)])
            .send()
            .await?;

        read_json(response).await
    }

    async fn submit_order(&self, request: OrderRequest) -> Result<Order, ApiError> {
        debug!(
            user = %request.user_id,
            restaurant = %request.restaurant_id,
            total = request.total_amount,
            "submitting order"
        );

        let response = self
            .http
            .post(self.url("/orders"))
            .json(&request)
            .send()
            .await?;

        read_json(response).await
    }

    async fn fetch_orders(&self, user: UserId) -> Result<Vec<Order>, ApiError> {
        let url = self.url(&format!("/orders/user/{user}"));

        read_json(self.http.get(&url).send().await?).await
    }

    async fn fetch_partner_restaurant(&self, partner: UserId) -> Result<Restaurant, ApiError> {
        let url = self.url(&format!("/partner/{partner}/restaurant"));

        read_json(self.http.get(&url).send().await?).await
    }

    async fn fetch_restaurant_orders(
        &self,
        restaurant: RestaurantId,
    ) -> Result<Vec<Order>, ApiError> {
        let url = self.url(&format!("/orders/restaurant/{restaurant}"));

        read_json(self.http.get(&url).send().await?).await
    }

    async fn update_order_status(
        &self,
        order: OrderId,
        status: OrderStatus,
    ) -> Result<OrderStatus, ApiError> {
        let url = self.url(&format!("/orders/{order}/status"));

        let response = self
            .http
            .put(&url)
            .json(&StatusBody { status })
            .send()
            .await?;

        let recorded: StatusBody = read_json(response).await?;

        Ok(recorded.status)
    }

    async fn add_menu_item(&self, draft: MenuItemDraft) -> Result<MenuItem, ApiError> {
        let response = self
            .http
            .post(self.url("/menu-items"))
            .json(&draft)
            .send()
            .await?;

        read_json(response).await
    }

    async fn toggle_menu_item_stock(&self, item: MenuItemId) -> Result<MenuItem, ApiError> {
        let url = self.url(&format!("/menu-items/{item}/toggle-stock"));

        read_json(self.http.patch(&url).send().await?).await
    }

    async fn login(
        &self,
        identifier: String,
        password: String,
    ) -> Result<AuthResponse, ApiError> {
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&LoginBody {
                identifier: &identifier,
                password: &password,
            })
            .send()
            .await?;

        let envelope: UserEnvelope = read_json(response).await?;

        Ok(AuthResponse {
            token: session_token(),
            user: envelope.user,
        })
    }

    async fn register(
        &self,
        name: String,
        identifier: String,
        password: String,
    ) -> Result<AuthResponse, ApiError> {
        let response = self
            .http
            .post(self.url("/auth/register"))
            .json(&RegisterBody::new(&name, &identifier, &password))
            .send()
            .await?;

        let envelope: UserEnvelope = read_json(response).await?;

        Ok(AuthResponse {
            token: session_token(),
            user: envelope.user,
        })
    }
}
