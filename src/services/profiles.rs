use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

use crate::models::UserProfile;

/// Errors that can occur when fetching profiles
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Client for the profile backend
///
/// Profiles are created and edited elsewhere; this service only reads them
/// to personalise recommendations.
pub struct ProfileClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl ProfileClient {
    /// Create a new profile client
    pub fn new(base_url: String, api_key: String, timeout_secs: u64) -> Result<Self, ProfileError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }

    /// Fetch the stored profile of a user
    ///
    /// Accepts either a bare profile document or one wrapped in `{"profile": ...}`.
    pub async fn get_profile(&self, user_id: &str) -> Result<UserProfile, ProfileError> {
        let url = format!(
            "{}/profiles/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(user_id)
        );

        tracing::debug!("Fetching profile for user: {}", user_id);

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ProfileError::NotFound(format!("Profile not found for user {}", user_id)));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Failed to fetch profile for {}: {} - {}", user_id, status, body);
            return Err(ProfileError::ApiError(format!("Failed to fetch profile: {}", status)));
        }

        let json: serde_json::Value = response.json().await?;
        let data = json.get("profile").unwrap_or(&json);

        serde_json::from_value(data.clone())
            .map_err(|e| ProfileError::InvalidResponse(format!("Failed to parse profile: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EducationLevel, ProgramType};

    #[test]
    fn test_profile_client_creation() {
        let client = ProfileClient::new(
            "https://profiles.test/api".to_string(),
            "test_key".to_string(),
            10,
        )
        .unwrap();

        assert_eq!(client.base_url, "https://profiles.test/api");
        assert_eq!(client.api_key, "test_key");
    }

    #[tokio::test]
    async fn test_get_profile() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/profiles/user-1")
            .match_header("X-Api-Key", "secret")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"profile":{"userId":"user-1","age":28,"educationLevel":"Medio","location":"São Paulo, SP","interests":["Técnico"],"eligiblePrograms":["AutonomiaERenda"]}}"#,
            )
            .create_async()
            .await;

        let client = ProfileClient::new(server.url(), "secret".to_string(), 5).unwrap();
        let profile = client.get_profile("user-1").await.unwrap();

        mock.assert_async().await;
        assert_eq!(profile.user_id, "user-1");
        assert_eq!(profile.age, 28);
        assert_eq!(profile.education_level, EducationLevel::Medio);
        assert_eq!(profile.eligible_programs, vec![ProgramType::AutonomiaERenda]);
    }

    #[tokio::test]
    async fn test_get_profile_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/profiles/missing")
            .with_status(404)
            .create_async()
            .await;

        let client = ProfileClient::new(server.url(), "secret".to_string(), 5).unwrap();
        let result = client.get_profile("missing").await;

        assert!(matches!(result, Err(ProfileError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_profile_server_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/profiles/user-2")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let client = ProfileClient::new(server.url(), "secret".to_string(), 5).unwrap();
        let result = client.get_profile("user-2").await;

        assert!(matches!(result, Err(ProfileError::ApiError(_))));
    }
}
