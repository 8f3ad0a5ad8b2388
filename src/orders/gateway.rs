//! Order gateway
//!
//! Behavioral contract towards the remote order backend, plus the HTTP
//! implementation used in production. Checkout only depends on the trait, so
//! tests drive it with a mock.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::orders::{ConfirmedOrder, OrderDraft, OrderId, OrderLine, PaymentMethod};

/// Server-assigned identity returned by order creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedOrder {
    /// Backend order id.
    pub id: OrderId,

    /// Human-readable order number, when assigned at creation time.
    pub numero: Option<String>,
}

/// Errors from the order backend.
#[derive(Debug, Error)]
pub enum OrderGatewayError {
    /// Transport-level failure.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status or an unusable body.
    #[error("unexpected backend response: {0}")]
    UnexpectedResponse(String),
}

/// Operations the checkout flow needs from the order backend.
///
/// `order_details` may fail independently of a successful `create_order`;
/// the checkout flow must reach its confirmation state regardless.
#[automock]
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Submits an order draft, returning the server-assigned identity.
    async fn create_order(&self, draft: &OrderDraft) -> Result<CreatedOrder, OrderGatewayError>;

    /// Fetches the full confirmed order for a previously created id.
    async fn order_details(&self, id: OrderId) -> Result<ConfirmedOrder, OrderGatewayError>;
}

/// HTTP client for the order backend.
#[derive(Debug, Clone)]
pub struct HttpOrderGateway {
    base_url: String,
    http: Client,
}

impl HttpOrderGateway {
    /// Creates a gateway against the given API base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        HttpOrderGateway {
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl OrderGateway for HttpOrderGateway {
    async fn create_order(&self, draft: &OrderDraft) -> Result<CreatedOrder, OrderGatewayError> {
        let response = self
            .http
            .post(self.url("orders"))
            .json(draft)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(OrderGatewayError::UnexpectedResponse(format!(
                "order creation failed with status {status}: {text}"
            )));
        }

        let parsed: CreateOrderResponse = response.json().await?;

        Ok(CreatedOrder {
            id: parsed.id,
            numero: parsed.numero,
        })
    }

    async fn order_details(&self, id: OrderId) -> Result<ConfirmedOrder, OrderGatewayError> {
        let response = self.http.get(self.url(&format!("orders/{id}"))).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(OrderGatewayError::UnexpectedResponse(format!(
                "order detail fetch failed with status {status}: {text}"
            )));
        }

        let parsed: OrderDetailsResponse = response.json().await?;

        Ok(parsed.into_order())
    }
}

#[derive(Debug, Deserialize)]
struct CreateOrderResponse {
    id: OrderId,
    #[serde(default)]
    numero: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrderDetailsResponse {
    order: OrderHeader,
    #[serde(default)]
    lines: Vec<OrderLine>,
}

#[derive(Debug, Deserialize)]
struct OrderHeader {
    id: OrderId,
    #[serde(default)]
    numero: Option<String>,
    recipient: String,
    email: String,
    phone: String,
    address: String,
    #[serde(default)]
    shipping_address: Option<String>,
    #[serde(default)]
    note: Option<String>,
    #[serde(default)]
    payment: PaymentMethod,
    subtotal: Decimal,
    shipping_cost: Decimal,
    total: Decimal,
}

impl OrderDetailsResponse {
    fn into_order(self) -> ConfirmedOrder {
        let OrderHeader {
            id,
            numero,
            recipient,
            email,
            phone,
            address,
            shipping_address,
            note,
            payment,
            subtotal,
            shipping_cost,
            total,
        } = self.order;

        ConfirmedOrder {
            id,
            numero,
            recipient,
            email,
            phone,
            address,
            shipping_address,
            note,
            payment,
            lines: self.lines,
            subtotal,
            shipping_cost,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::catalog::ItemId;

    use super::*;

    #[test]
    fn url_joins_without_doubled_slashes() {
        let gateway = HttpOrderGateway::new("https://api.example.tn/");

        assert_eq!(gateway.url("orders"), "https://api.example.tn/orders");
        assert_eq!(
            gateway.url("orders/123"),
            "https://api.example.tn/orders/123"
        );
    }

    #[test]
    fn details_response_merges_header_and_lines() -> TestResult {
        let raw = r#"{
            "order": {
                "id": 123,
                "numero": "CMD-123",
                "recipient": "Amine Ben Salah",
                "email": "amine@example.tn",
                "phone": "21345678",
                "address": "12 rue de Carthage, Tunis",
                "subtotal": "100",
                "shipping_cost": "10",
                "total": "110"
            },
            "lines": [
                {"item_id": 1, "name": "Whey Protein 2kg", "quantity": 2, "unit_price": "50"}
            ]
        }"#;

        let parsed: OrderDetailsResponse = serde_json::from_str(raw)?;
        let order = parsed.into_order();

        assert_eq!(order.id, OrderId(123));
        assert_eq!(order.payment, PaymentMethod::CashOnDelivery);
        assert_eq!(order.lines.len(), 1);
        assert_eq!(order.lines.first().map(|l| l.item_id), Some(ItemId(1)));
        assert_eq!(order.total, Decimal::from(110));

        Ok(())
    }

    #[test]
    fn create_response_tolerates_missing_numero() -> TestResult {
        let parsed: CreateOrderResponse = serde_json::from_str(r#"{"id": 55}"#)?;

        assert_eq!(parsed.id, OrderId(55));
        assert!(parsed.numero.is_none());

        Ok(())
    }
}
