use super::{deserialize_id, segment, ApiClient, ApiError, Body};
use crate::utils::to_cents;
use gloo_net::http::Method;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Rejected,
    Delivered,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrderStatus::Pending => "Aguardando pagamento",
            OrderStatus::Paid => "Pago",
            OrderStatus::Rejected => "Recusado",
            OrderStatus::Delivered => "Entregue",
            OrderStatus::Unknown => "Desconhecido",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub quantity: u32,
    #[serde(default)]
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Order {
    pub code: String,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub person_name: Option<String>,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub proof_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Order {
    pub fn total_cents(&self) -> i64 {
        to_cents(self.total)
    }

    pub fn can_pay(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    pub fn can_reject(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    pub fn can_deliver(&self) -> bool {
        self.status == OrderStatus::Paid
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Person {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderAction {
    pub order_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectRequest {
    pub order_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ApiClient {
    pub async fn pending_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get("/orders/pending").await
    }

    pub async fn pay_order(&self, code: &str) -> Result<Order, ApiError> {
        self.post_json(
            "/orders/pay",
            &OrderAction {
                order_code: code.to_string(),
            },
        )
        .await
    }

    pub async fn reject_order(&self, code: &str, reason: Option<String>) -> Result<Order, ApiError> {
        let reason = reason.filter(|r| !r.trim().is_empty());
        self.post_json(
            "/orders/reject",
            &RejectRequest {
                order_code: code.to_string(),
                reason,
            },
        )
        .await
    }

    pub async fn deliver_order(&self, code: &str) -> Result<Order, ApiError> {
        self.post_json(
            "/orders/deliver",
            &OrderAction {
                order_code: code.to_string(),
            },
        )
        .await
    }

    pub async fn order(&self, code: &str) -> Result<Order, ApiError> {
        self.get(&format!("/orders/{}", segment(code))).await
    }

    pub async fn person_orders(&self, person_id: &str) -> Result<Vec<Order>, ApiError> {
        self.get(&format!("/person/{}/orders", segment(person_id))).await
    }

    pub async fn person_by_email(&self, email: &str) -> Result<Person, ApiError> {
        self.request(
            Method::GET,
            "/person/by-email",
            &[("email", email.trim())],
            Body::Empty,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_status_drives_actions() {
        let raw = r#"{"code": "EK-1", "status": "pending", "total": 25.5,
                      "items": [{"name": "Camiseta", "quantity": 1, "price": 25.5}]}"#;
        let mut order: Order = serde_json::from_str(raw).unwrap();
        assert!(order.can_pay() && order.can_reject());
        assert!(!order.can_deliver());
        assert_eq!(order.total_cents(), 2550);

        order.status = OrderStatus::Paid;
        assert!(order.can_deliver());
        assert!(!order.can_pay());
    }

    #[test]
    fn unknown_status_does_not_break_decoding() {
        let order: Order = serde_json::from_str(r#"{"code": "X1", "status": "refunded"}"#).unwrap();
        assert_eq!(order.status, OrderStatus::Unknown);
        assert!(!order.can_pay() && !order.can_deliver());
    }

    #[test]
    fn reject_reason_is_optional_on_the_wire() {
        let body = RejectRequest {
            order_code: "EK-1".into(),
            reason: None,
        };
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            serde_json::json!({"order_code": "EK-1"})
        );
    }

    #[test]
    fn person_decodes() {
        let person: Person =
            serde_json::from_str(r#"{"id": 55, "name": "Lia", "email": "lia@x.org"}"#).unwrap();
        assert_eq!(person.id, "55");
        assert_eq!(person.phone, None);
    }
}
