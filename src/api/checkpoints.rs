use super::{deserialize_id, ApiClient, ApiError, Body};
use gloo_net::http::Method;
use serde::{Deserialize, Serialize};

/// Physical station where attendance is counted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Checkpoint {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckpointCount {
    #[serde(deserialize_with = "deserialize_id")]
    pub checkpoint_id: String,
    pub count: i64,
}

/// One person in (`delta = 1`) or a correction (`delta = -1`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackRequest {
    pub checkpoint_id: String,
    pub delta: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<String>,
}

impl TrackRequest {
    pub fn entry(checkpoint_id: &str, staff_id: Option<String>) -> Self {
        Self {
            checkpoint_id: checkpoint_id.to_string(),
            delta: 1,
            staff_id,
        }
    }

    pub fn correction(checkpoint_id: &str, staff_id: Option<String>) -> Self {
        Self {
            delta: -1,
            ..Self::entry(checkpoint_id, staff_id)
        }
    }
}

impl ApiClient {
    pub async fn checkpoints(&self) -> Result<Vec<Checkpoint>, ApiError> {
        self.get("/checkpoints").await
    }

    pub async fn checkpoint_count(&self, checkpoint_id: &str) -> Result<CheckpointCount, ApiError> {
        self.request(
            Method::GET,
            "/count",
            &[("checkpoint", checkpoint_id)],
            Body::Empty,
        )
        .await
    }

    pub async fn track(&self, request: &TrackRequest) -> Result<CheckpointCount, ApiError> {
        self.post_json("/track", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_body_shape() {
        let body = serde_json::to_value(TrackRequest::correction("4", None)).unwrap();
        assert_eq!(body, serde_json::json!({"checkpoint_id": "4", "delta": -1}));

        let body = serde_json::to_value(TrackRequest::entry("4", Some("s1".into()))).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"checkpoint_id": "4", "delta": 1, "staff_id": "s1"})
        );
    }

    #[test]
    fn checkpoint_list_decodes() {
        let raw = r#"[{"id": 1, "name": "Portão A", "count": 120}, {"id": "b", "name": "Auditório"}]"#;
        let list: Vec<Checkpoint> = serde_json::from_str(raw).unwrap();
        assert_eq!(list[0].id, "1");
        assert_eq!(list[0].count, 120);
        assert_eq!(list[1].count, 0);
    }
}
