//! Dashboard aggregates, meeting attendance counter, consolidation records
//! and the export download.

use super::{ApiClient, ApiError, Body};
use futures::future::try_join;
use gloo_net::http::Method;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointStat {
    pub name: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySales {
    pub date: String,
    pub total: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DashboardSummary {
    #[serde(default)]
    pub total_checkins: i64,
    #[serde(default)]
    pub total_sales: f64,
    #[serde(default)]
    pub pending_orders: i64,
    #[serde(default)]
    pub delivered_orders: i64,
    #[serde(default)]
    pub checkpoints: Vec<CheckpointStat>,
    #[serde(default)]
    pub sales_by_day: Vec<DailySales>,
}

impl DashboardSummary {
    /// Labels and values for the per-checkpoint chart, busiest first.
    pub fn checkpoint_series(&self) -> (Vec<String>, Vec<i64>) {
        let mut stats = self.checkpoints.clone();
        stats.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        stats.into_iter().map(|s| (s.name, s.count)).unzip()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct MeetingCount {
    pub count: i64,
}

/// Follow-up record for a new believer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Consolidation {
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub decision: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

impl Consolidation {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Informe o nome".to_string());
        }
        if self.phone.chars().filter(char::is_ascii_digit).count() < 8 {
            return Err("Informe um telefone válido".to_string());
        }
        if let Some(email) = &self.email {
            if !crate::utils::is_valid_email(email) {
                return Err("E-mail inválido".to_string());
            }
        }
        Ok(())
    }
}

impl ApiClient {
    pub async fn dashboard(&self) -> Result<DashboardSummary, ApiError> {
        self.get("/dashboard").await
    }

    pub async fn meeting_count(&self) -> Result<MeetingCount, ApiError> {
        self.get("/meeting-count").await
    }

    pub async fn increment_meeting_count(&self) -> Result<MeetingCount, ApiError> {
        self.request(Method::POST, "/meeting-count/increment", &[], Body::Empty)
            .await
    }

    /// Dashboard and meeting counter fetched concurrently.
    pub async fn overview(&self) -> Result<(DashboardSummary, MeetingCount), ApiError> {
        try_join(self.dashboard(), self.meeting_count()).await
    }

    pub async fn save_consolidation(&self, record: &Consolidation) -> Result<(), ApiError> {
        self.execute(Method::POST, "/consolidation/save", &[], Body::json(record)?)
            .await
    }

    /// Link for the spreadsheet the backend generates; opened as a download.
    pub fn export_url(&self) -> String {
        self.url("/export")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_tolerates_missing_sections() {
        let summary: DashboardSummary = serde_json::from_str(r#"{"total_checkins": 310}"#).unwrap();
        assert_eq!(summary.total_checkins, 310);
        assert!(summary.checkpoints.is_empty());
    }

    #[test]
    fn checkpoint_series_is_sorted_by_count() {
        let summary = DashboardSummary {
            checkpoints: vec![
                CheckpointStat { name: "Kids".into(), count: 40 },
                CheckpointStat { name: "Auditório".into(), count: 250 },
                CheckpointStat { name: "Arena".into(), count: 40 },
            ],
            ..DashboardSummary::default()
        };
        let (labels, values) = summary.checkpoint_series();
        assert_eq!(labels, vec!["Auditório", "Arena", "Kids"]);
        assert_eq!(values, vec![250, 40, 40]);
    }

    #[test]
    fn consolidation_validation() {
        let mut record = Consolidation {
            name: "Rui".into(),
            phone: "(11) 9 8765-4321".into(),
            decision: "aceitou".into(),
            ..Consolidation::default()
        };
        assert_eq!(record.validate(), Ok(()));
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            serde_json::json!({"name": "Rui", "phone": "(11) 9 8765-4321", "decision": "aceitou"})
        );
        record.phone = "123".into();
        assert!(record.validate().is_err());
    }

    #[test]
    fn export_link_uses_base_url() {
        let client = ApiClient::new("http://localhost:3000/api");
        assert_eq!(client.export_url(), "http://localhost:3000/api/export");
    }
}
