use super::{ApiClient, ApiError};
use crate::session::StaffUser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    pub user: StaffUser,
}

impl LoginResponse {
    /// Session to persist; the top-level token wins over one nested in `user`.
    pub fn into_staff(self) -> StaffUser {
        let mut user = self.user;
        if self.token.is_some() {
            user.token = self.token;
        }
        user
    }
}

impl ApiClient {
    pub async fn login(&self, request: &LoginRequest) -> Result<StaffUser, ApiError> {
        let response: LoginResponse = self.post_json("/auth/login", request).await?;
        Ok(response.into_staff())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_moves_into_session() {
        let raw = r#"{
            "token": "jwt-1",
            "user": {"id": 3, "name": "Paulo", "role": "admin", "department": "geral"}
        }"#;
        let staff = serde_json::from_str::<LoginResponse>(raw).unwrap().into_staff();
        assert_eq!(staff.token.as_deref(), Some("jwt-1"));
        assert_eq!(staff.id.as_deref(), Some("3"));
        assert!(staff.is_admin());
    }

    #[test]
    fn nested_token_is_kept() {
        let raw = r#"{"user": {"role": "staff", "department": "loja", "token": "t"}}"#;
        let staff = serde_json::from_str::<LoginResponse>(raw).unwrap().into_staff();
        assert_eq!(staff.token.as_deref(), Some("t"));
    }
}
