//! Typed client for the Ekklesia backend.
//!
//! [`ApiClient::request`] is the single transport primitive. Every endpoint
//! is a thin method in one of the submodules with its own request and response
//! structs. There is no retry, no timeout and no parsing of error bodies: any
//! non-2xx status becomes [`ApiError::Status`].

mod auth;
mod checkpoints;
mod dashboard;
mod meetings;
mod orders;
mod sales;

pub use auth::{LoginRequest, LoginResponse};
pub use checkpoints::{Checkpoint, CheckpointCount, TrackRequest};
pub use dashboard::{CheckpointStat, Consolidation, DailySales, DashboardSummary, MeetingCount};
pub use meetings::Meeting;
pub use orders::{Order, OrderAction, OrderItem, OrderStatus, Person, RejectRequest};
pub use sales::{
    Cart, CartLine, CheckoutForm, CheckoutResponse, PaymentMethod, Product, SaleItem, SaleRequest,
    SaleResponse,
};

use gloo_net::http::{Method, RequestBuilder, Response};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Server answered with a non-2xx status
    Status(u16),
    /// Request never completed (offline, CORS, DNS)
    Network(String),
    /// Response body was not the expected JSON
    Decode(String),
    /// Request body could not be built
    Encode(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status(401) | ApiError::Status(403))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Status(401) => write!(f, "Sessão expirada, entre novamente"),
            ApiError::Status(404) => write!(f, "Registro não encontrado"),
            ApiError::Status(code) => write!(f, "Erro na requisição ({})", code),
            ApiError::Network(e) => write!(f, "Falha de conexão: {}", e),
            ApiError::Decode(e) => write!(f, "Resposta inesperada do servidor: {}", e),
            ApiError::Encode(e) => write!(f, "Não foi possível montar a requisição: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}

/// Request payload. Multipart bodies carry no explicit content type so the
/// browser can add the boundary itself.
#[derive(Debug, Clone)]
pub enum Body {
    Empty,
    Json(String),
    Multipart(web_sys::FormData),
}

impl Body {
    pub fn json<B: Serialize + ?Sized>(value: &B) -> Result<Self, ApiError> {
        serde_json::to_string(value)
            .map(Body::Json)
            .map_err(|e| ApiError::Encode(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token: None,
        }
    }

    /// Sends `Authorization: Bearer <token>` with every request.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Body,
    ) -> Result<Response, ApiError> {
        let url = self.url(path);
        debug!("{:?} {}", method, url);
        let mut builder = RequestBuilder::new(&url).method(method);
        if !query.is_empty() {
            builder = builder.query(query.iter().copied());
        }
        if let Some(token) = &self.token {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }

        let request = match body {
            Body::Empty => builder.build(),
            Body::Json(json) => builder.header("Content-Type", "application/json").body(json),
            Body::Multipart(form) => builder.body(form),
        }
        .map_err(|e| ApiError::Encode(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            warn!("{} answered {}", url, response.status());
            return Err(ApiError::Status(response.status()));
        }
        Ok(response)
    }

    /// Sends a request and decodes the JSON response.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Body,
    ) -> Result<T, ApiError> {
        self.send(method, path, query, body)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Sends a request whose response body is irrelevant.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Body,
    ) -> Result<(), ApiError> {
        self.send(method, path, query, body).await.map(|_| ())
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::GET, path, &[], Body::Empty).await
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, &[], Body::json(body)?).await
    }
}

/// Percent-encodes a single path segment.
pub(crate) fn segment(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

/// Identifiers arrive as either JSON strings or numbers depending on the table.
pub(crate) fn deserialize_id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    RawId::deserialize(d).map(String::from)
}

pub(crate) fn deserialize_opt_id<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<String>, D::Error> {
    Option::<RawId>::deserialize(d).map(|raw| raw.map(String::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_without_double_slashes() {
        let client = ApiClient::new("https://api.ekklesia.app/v1/");
        assert_eq!(client.base_url(), "https://api.ekklesia.app/v1");
        assert_eq!(client.url("/orders/pending"), "https://api.ekklesia.app/v1/orders/pending");
        assert_eq!(client.url("dashboard"), "https://api.ekklesia.app/v1/dashboard");
    }

    #[test]
    fn path_segments_are_escaped() {
        assert_eq!(segment("EK-12AB"), "EK-12AB");
        assert_eq!(segment("a b/c"), "a%20b%2Fc");
        assert_eq!(segment("ção"), "%C3%A7%C3%A3o");
    }

    #[test]
    fn json_body_is_serialized_up_front() {
        let body = Body::json(&OrderAction {
            order_code: "EK-1".into(),
        })
        .unwrap();
        match body {
            Body::Json(json) => assert_eq!(json, r#"{"order_code":"EK-1"}"#),
            other => panic!("unexpected body {:?}", other),
        }
    }

    #[test]
    fn status_errors_carry_the_code() {
        assert_eq!(ApiError::Status(500).to_string(), "Erro na requisição (500)");
        assert!(ApiError::Status(401).is_unauthorized());
        assert!(!ApiError::Network("offline".into()).is_unauthorized());
    }

    #[test]
    fn ids_accept_strings_and_numbers() {
        #[derive(Deserialize)]
        struct Row {
            #[serde(deserialize_with = "deserialize_id")]
            id: String,
            #[serde(default, deserialize_with = "deserialize_opt_id")]
            parent: Option<String>,
        }
        let row: Row = serde_json::from_str(r#"{"id":12,"parent":null}"#).unwrap();
        assert_eq!(row.id, "12");
        assert_eq!(row.parent, None);
        let row: Row = serde_json::from_str(r#"{"id":"abc","parent":"9"}"#).unwrap();
        assert_eq!(row.id, "abc");
        assert_eq!(row.parent.as_deref(), Some("9"));
        let row: Row = serde_json::from_str(r#"{"id":"x"}"#).unwrap();
        assert_eq!(row.parent, None);
    }
}
