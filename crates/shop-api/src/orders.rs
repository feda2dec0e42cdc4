//! Order history, order creation and coupon validation endpoints.

use crate::{ApiClient, FetchError, Page};
use serde::{Deserialize, Serialize};
use shop_commerce::price::{lenient, lenient_option};
use shop_commerce::{AddressId, Money, OrderId, ProductId};
use tracing::{error, info};

/// Fields the backend may send as either a bare key or a nested object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyOrObject {
    Object(serde_json::Map<String, serde_json::Value>),
    Key(serde_json::Value),
}

/// Product summary embedded in an order line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderProduct {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// One line of a placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: serde_json::Value,
    /// Product as sent: a key, or a summary when the server expands it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<KeyOrObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_details: Option<OrderProduct>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub variant_name: Option<String>,
    pub quantity: i64,
    #[serde(with = "lenient")]
    pub price: Money,
    #[serde(with = "lenient")]
    pub total_price: Money,
}

impl OrderItem {
    /// Best available display name for the line.
    pub fn display_name(&self) -> &str {
        self.product_details
            .as_ref()
            .map(|p| p.name.as_str())
            .or(self.product_name.as_deref())
            .unwrap_or("Unknown product")
    }
}

/// A placed order as the backend reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: serde_json::Value,
    pub order_number: OrderId,
    pub status: String,
    #[serde(default)]
    pub payment_status: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(with = "lenient")]
    pub subtotal: Money,
    #[serde(default, with = "lenient_option")]
    pub shipping_cost: Option<Money>,
    #[serde(default, alias = "discount_amount", with = "lenient_option")]
    pub discount: Option<Money>,
    #[serde(default, alias = "tax_amount", with = "lenient_option")]
    pub tax: Option<Money>,
    #[serde(with = "lenient")]
    pub total: Money,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub shipping_method: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Order {
    /// Number of units ordered.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

/// Body of an order-creation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrder {
    pub shipping_address_id: AddressId,
    pub billing_address_id: AddressId,
    pub payment_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
}

/// Result of a coupon check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponValidation {
    pub valid: bool,
    #[serde(default, with = "lenient_option", skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Client for the order endpoints. All calls are authenticated.
#[derive(Debug, Clone)]
pub struct OrderService {
    api: ApiClient,
}

impl OrderService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// One page of the signed-in user's orders.
    pub async fn orders(&self, page: u32, page_size: u32) -> Result<Page<Order>, FetchError> {
        let page = self
            .api
            .get("/orders/")
            .query("page", page.to_string())
            .query("page_size", page_size.to_string())
            .fetch_json::<Page<Order>>()
            .await?;
        info!(count = page.count, "loaded orders");
        Ok(page)
    }

    /// A single order by number.
    pub async fn order(&self, order_number: &OrderId) -> Result<Order, FetchError> {
        self.api
            .get(&format!("/orders/{}/", order_number))
            .fetch_json()
            .await
    }

    /// Create an order on the server.
    pub async fn create_order(&self, data: &CreateOrder) -> Result<Order, FetchError> {
        match self.api.post("/orders/").json(data)?.fetch_json::<Order>().await {
            Ok(order) => {
                info!(order_number = %order.order_number, "order created");
                Ok(order)
            }
            Err(e) => {
                error!(error = %e, "order creation failed");
                Err(e)
            }
        }
    }

    /// Ask the server whether `code` is a usable coupon.
    ///
    /// A rejected coupon comes back as `valid: false` with the server's
    /// message rather than as an error.
    pub async fn validate_coupon(&self, code: &str) -> Result<CouponValidation, FetchError> {
        let result = self
            .api
            .post("/orders/validate-coupon/")
            .json(&serde_json::json!({ "code": code }))?
            .fetch_json::<CouponValidation>()
            .await;

        match result {
            Err(e @ FetchError::HttpError { status: 400 | 404, .. }) => Ok(CouponValidation {
                valid: false,
                discount_amount: None,
                message: e
                    .field_message("error")
                    .or_else(|| e.field_message("message"))
                    .or_else(|| Some("Invalid coupon code".to_string())),
            }),
            other => other,
        }
    }
}
