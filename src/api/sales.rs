//! Products, point-of-sale sales and the online checkout.

use super::{deserialize_id, deserialize_opt_id, ApiClient, ApiError, Body};
use crate::utils::to_cents;
use gloo_net::http::Method;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use web_sys::{File, FormData};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    /// Unit price in reais
    pub price: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub stock: Option<i64>,
}

impl Product {
    pub fn price_cents(&self) -> i64 {
        to_cents(self.price)
    }

    pub fn in_stock(&self) -> bool {
        self.stock.map_or(true, |s| s > 0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Pix,
    #[serde(rename = "dinheiro")]
    Cash,
    #[serde(rename = "cartao")]
    Card,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [PaymentMethod::Pix, PaymentMethod::Cash, PaymentMethod::Card];

    pub fn code(&self) -> &'static str {
        match self {
            PaymentMethod::Pix => "pix",
            PaymentMethod::Cash => "dinheiro",
            PaymentMethod::Card => "cartao",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.code() == code)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Pix => write!(f, "Pix"),
            PaymentMethod::Cash => write!(f, "Dinheiro"),
            PaymentMethod::Card => write!(f, "Cartão"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleItem {
    pub product_id: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleRequest {
    pub items: Vec<SaleItem>,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SaleResponse {
    pub order_code: String,
    #[serde(default)]
    pub total: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal_cents(&self) -> i64 {
        self.product.price_cents() * self.quantity as i64
    }
}

/// Client-side basket; the backend recomputes totals and stock on submit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn add(&mut self, product: &Product) {
        match self.lines.iter_mut().find(|l| l.product.id == product.id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine {
                product: product.clone(),
                quantity: 1,
            }),
        }
    }

    /// Quantity 0 removes the line.
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id);
        } else if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product_id) {
            line.quantity = quantity;
        }
    }

    pub fn remove(&mut self, product_id: &str) {
        self.lines.retain(|l| l.product.id != product_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn total_cents(&self) -> i64 {
        self.lines.iter().map(CartLine::subtotal_cents).sum()
    }

    pub fn items(&self) -> Vec<SaleItem> {
        self.lines
            .iter()
            .map(|l| SaleItem {
                product_id: l.product.id.clone(),
                quantity: l.quantity,
            })
            .collect()
    }

    pub fn to_sale(&self, payment_method: PaymentMethod, staff_id: Option<String>) -> SaleRequest {
        SaleRequest {
            items: self.items(),
            payment_method,
            staff_id,
        }
    }
}

/// Online order placed by an attendee, sent as multipart together with the
/// payment proof.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub items: Vec<SaleItem>,
    pub payment_method: PaymentMethod,
}

impl CheckoutForm {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Informe o nome".to_string());
        }
        if !crate::utils::is_valid_email(&self.email) {
            return Err("Informe um e-mail válido".to_string());
        }
        if self.items.is_empty() {
            return Err("Adicione ao menos um produto".to_string());
        }
        Ok(())
    }

    /// Text fields of the multipart body, items JSON encoded.
    pub fn fields(&self) -> Result<Vec<(&'static str, String)>, ApiError> {
        let items = serde_json::to_string(&self.items).map_err(|e| ApiError::Encode(e.to_string()))?;
        Ok(vec![
            ("name", self.name.trim().to_string()),
            ("email", self.email.trim().to_string()),
            ("phone", self.phone.trim().to_string()),
            ("payment_method", self.payment_method.code().to_string()),
            ("items", items),
        ])
    }

    pub fn to_form_data(&self, proof: Option<&File>) -> Result<FormData, ApiError> {
        let encode = |e: wasm_bindgen::JsValue| ApiError::Encode(format!("{:?}", e));
        let form = FormData::new().map_err(encode)?;
        for (key, value) in self.fields()? {
            form.append_with_str(key, &value).map_err(encode)?;
        }
        if let Some(file) = proof {
            debug!("Attaching payment proof '{}' ({} bytes)", file.name(), file.size());
            form.append_with_blob_and_filename("proof", file, &file.name())
                .map_err(encode)?;
        }
        Ok(form)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CheckoutResponse {
    pub order_code: String,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub person_id: Option<String>,
    #[serde(default)]
    pub status: super::OrderStatus,
}

impl ApiClient {
    pub async fn products(&self) -> Result<Vec<Product>, ApiError> {
        self.get("/products").await
    }

    pub async fn register_sale(&self, sale: &SaleRequest) -> Result<SaleResponse, ApiError> {
        self.post_json("/sales", sale).await
    }

    pub async fn checkout(
        &self,
        form: &CheckoutForm,
        proof: Option<&File>,
    ) -> Result<CheckoutResponse, ApiError> {
        let body = Body::Multipart(form.to_form_data(proof)?);
        self.request(Method::POST, "/checkout/full", &[], body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: f64) -> Product {
        Product {
            id: id.into(),
            name: format!("Produto {}", id),
            price,
            category: None,
            stock: None,
        }
    }

    #[test]
    fn cart_accumulates_and_totals() {
        let shirt = product("1", 49.9);
        let coffee = product("2", 4.5);
        let mut cart = Cart::default();
        cart.add(&shirt);
        cart.add(&coffee);
        cart.add(&shirt);
        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total_cents(), 2 * 4990 + 450);

        cart.set_quantity("2", 4);
        assert_eq!(cart.total_cents(), 2 * 4990 + 4 * 450);
        cart.set_quantity("1", 0);
        assert_eq!(cart.item_count(), 4);
        cart.remove("2");
        assert!(cart.is_empty());
    }

    #[test]
    fn sale_request_shape() {
        let mut cart = Cart::default();
        cart.add(&product("7", 10.0));
        let sale = cart.to_sale(PaymentMethod::Cash, Some("s9".into()));
        assert_eq!(
            serde_json::to_value(&sale).unwrap(),
            serde_json::json!({
                "items": [{"product_id": "7", "quantity": 1}],
                "payment_method": "dinheiro",
                "staff_id": "s9"
            })
        );
    }

    #[test]
    fn payment_codes_round_trip_with_wire_names() {
        for method in PaymentMethod::ALL {
            let wire = serde_json::to_value(method).unwrap();
            assert_eq!(wire, serde_json::json!(method.code()));
            assert_eq!(PaymentMethod::from_code(method.code()), Some(method));
        }
        assert_eq!(PaymentMethod::from_code("boleto"), None);
    }

    #[test]
    fn checkout_validation_and_fields() {
        let mut form = CheckoutForm {
            name: " Ana ".into(),
            email: "ana@igreja.org".into(),
            phone: "".into(),
            items: vec![],
            payment_method: PaymentMethod::Pix,
        };
        assert_eq!(form.validate(), Err("Adicione ao menos um produto".to_string()));
        form.items.push(SaleItem {
            product_id: "1".into(),
            quantity: 2,
        });
        assert_eq!(form.validate(), Ok(()));

        let fields = form.fields().unwrap();
        assert!(fields.contains(&("name", "Ana".to_string())));
        assert!(fields.contains(&("items", r#"[{"product_id":"1","quantity":2}]"#.to_string())));

        form.email = "ana".into();
        assert!(form.validate().is_err());
    }

    #[test]
    fn products_decode_with_optional_fields() {
        let raw = r#"[{"id": 1, "name": "Camiseta", "price": 49.9, "stock": 0}]"#;
        let products: Vec<Product> = serde_json::from_str(raw).unwrap();
        assert_eq!(products[0].price_cents(), 4990);
        assert!(!products[0].in_stock());
        assert!(product("2", 1.0).in_stock());
    }
}
