use super::{deserialize_opt_id, segment, ApiClient, ApiError, Body};
use crate::utils::{is_valid_date, is_valid_time};
use gloo_net::http::Method;
use serde::{Deserialize, Serialize};

/// Scheduled meeting. `id` is absent until the backend stores it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    #[serde(
        default,
        deserialize_with = "deserialize_opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub title: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub leader: String,
    #[serde(default)]
    pub notes: String,
}

impl Meeting {
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Informe o título da reunião".to_string());
        }
        if !is_valid_date(&self.date) {
            return Err("Data inválida".to_string());
        }
        if !is_valid_time(&self.time) {
            return Err("Horário inválido".to_string());
        }
        Ok(())
    }

    /// Sort key so the agenda lists the earliest meeting first.
    pub fn starts_at(&self) -> (String, String) {
        (self.date.clone(), self.time.clone())
    }
}

impl ApiClient {
    pub async fn meetings(&self) -> Result<Vec<Meeting>, ApiError> {
        let mut meetings: Vec<Meeting> = self.get("/meetings").await?;
        meetings.sort_by_key(Meeting::starts_at);
        Ok(meetings)
    }

    pub async fn create_meeting(&self, meeting: &Meeting) -> Result<Meeting, ApiError> {
        self.post_json("/meetings", meeting).await
    }

    pub async fn update_meeting(&self, id: &str, meeting: &Meeting) -> Result<Meeting, ApiError> {
        self.request(
            Method::PUT,
            &format!("/meetings/{}", segment(id)),
            &[],
            Body::json(meeting)?,
        )
        .await
    }

    pub async fn delete_meeting(&self, id: &str) -> Result<(), ApiError> {
        self.execute(
            Method::DELETE,
            &format!("/meetings/{}", segment(id)),
            &[],
            Body::Empty,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meeting() -> Meeting {
        Meeting {
            title: "Célula Centro".into(),
            date: "2026-10-20".into(),
            time: "19:30".into(),
            ..Meeting::default()
        }
    }

    #[test]
    fn validation() {
        assert_eq!(meeting().validate(), Ok(()));
        let blank = Meeting {
            title: "  ".into(),
            ..meeting()
        };
        assert!(blank.validate().is_err());
        let bad_time = Meeting {
            time: "25:00".into(),
            ..meeting()
        };
        assert_eq!(bad_time.validate(), Err("Horário inválido".to_string()));
    }

    #[test]
    fn new_meeting_omits_id() {
        let value = serde_json::to_value(meeting()).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["title"], "Célula Centro");
    }

    #[test]
    fn stored_meeting_decodes_numeric_id() {
        let raw = r#"{"id": 8, "title": "Oração", "date": "2026-11-01", "time": "07:00"}"#;
        let meeting: Meeting = serde_json::from_str(raw).unwrap();
        assert_eq!(meeting.id.as_deref(), Some("8"));
        assert!(meeting.location.is_empty());
    }
}
