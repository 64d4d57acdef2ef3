use crate::models::{Profile, StoredProfile};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with Supabase
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Supabase REST client for the profiles table
///
/// Handles all communication with the profile store including:
/// - Inserting new profile rows
/// - Fetching a profile by id and listing candidate profiles
/// - Deleting profile rows by email
pub struct SupabaseClient {
    base_url: String,
    api_key: String,
    table: String,
    client: Client,
}

impl SupabaseClient {
    /// Create a new Supabase client
    pub fn new(base_url: String, api_key: String, table: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            table,
            client,
        }
    }

    fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.base_url.trim_end_matches('/'),
            self.table
        )
    }

    /// Insert a profile row, returning the representation the store sends back
    ///
    /// The store assigns the id; an empty result means nothing was inserted.
    pub async fn insert_profile(&self, profile: &Profile) -> Result<Vec<StoredProfile>, SupabaseError> {
        let url = self.table_url();

        tracing::debug!("Inserting profile into: {}", url);

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Prefer", "return=representation")
            .json(profile)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Failed to insert profile: {} - {}", status, body);
            return Err(SupabaseError::ApiError(format!(
                "Failed to insert profile: {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| SupabaseError::InvalidResponse(format!("Failed to parse inserted rows: {}", e)))
    }

    /// Fetch a single profile by its store-assigned id
    pub async fn get_profile(&self, profile_id: &str) -> Result<StoredProfile, SupabaseError> {
        let url = format!(
            "{}?id=eq.{}&select=*",
            self.table_url(),
            urlencoding::encode(profile_id)
        );

        tracing::debug!("Fetching profile: {}", profile_id);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Failed to fetch profile {}: {} - {}", profile_id, status, body);
            return Err(SupabaseError::ApiError(format!(
                "Failed to fetch profile: {}",
                status
            )));
        }

        let rows: Vec<StoredProfile> = response
            .json()
            .await
            .map_err(|e| SupabaseError::InvalidResponse(format!("Failed to parse profile: {}", e)))?;

        rows.into_iter()
            .next()
            .ok_or_else(|| SupabaseError::NotFound(format!("Profile {} not found", profile_id)))
    }

    /// List every profile except the given id
    pub async fn list_other_profiles(
        &self,
        profile_id: &str,
    ) -> Result<Vec<StoredProfile>, SupabaseError> {
        let url = format!(
            "{}?id=neq.{}&select=*",
            self.table_url(),
            urlencoding::encode(profile_id)
        );

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("Failed to query candidates: {}", status);
            return Err(SupabaseError::ApiError(format!(
                "Failed to query candidates: {}",
                status
            )));
        }

        let rows: Vec<StoredProfile> = response
            .json()
            .await
            .map_err(|e| SupabaseError::InvalidResponse(format!("Failed to parse candidates: {}", e)))?;

        tracing::debug!("Queried {} candidate profiles", rows.len());

        Ok(rows)
    }

    /// Delete all profile rows matching an email, returning the deleted rows
    pub async fn delete_profiles_by_email(
        &self,
        email: &str,
    ) -> Result<Vec<StoredProfile>, SupabaseError> {
        let url = format!(
            "{}?email=eq.{}",
            self.table_url(),
            urlencoding::encode(email)
        );

        let response = self
            .client
            .delete(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Prefer", "return=representation")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Failed to delete profiles: {} - {}", status, body);
            return Err(SupabaseError::ApiError(format!(
                "Failed to delete profiles: {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| SupabaseError::InvalidResponse(format!("Failed to parse deleted rows: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supabase_client_creation() {
        let client = SupabaseClient::new(
            "https://project.supabase.test".to_string(),
            "test_key".to_string(),
            "profiles".to_string(),
        );

        assert_eq!(client.base_url, "https://project.supabase.test");
        assert_eq!(client.api_key, "test_key");
        assert_eq!(
            client.table_url(),
            "https://project.supabase.test/rest/v1/profiles"
        );
    }

    #[test]
    fn test_table_url_trims_trailing_slash() {
        let client = SupabaseClient::new(
            "https://project.supabase.test/".to_string(),
            "test_key".to_string(),
            "profiles".to_string(),
        );

        assert_eq!(
            client.table_url(),
            "https://project.supabase.test/rest/v1/profiles"
        );
    }
}
