use crate::models::domain::{MatchCandidate, MatchList, StoredProfile};
use serde::{Deserialize, Serialize};

/// Response for the validate-field endpoint
///
/// `validation` carries the model's raw judgment text, unparsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateFieldResponse {
    pub field: String,
    pub original: String,
    pub validation: String,
    pub valid: bool,
}

/// Response for a successful profile save
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveProfileResponse {
    pub success: bool,
    pub profile_id: String,
    pub message: String,
}

/// Response for find-matches when candidates exist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesResponse {
    pub success: bool,
    pub matches: MatchList,
    pub user_profile: StoredProfile,
}

/// Response for find-matches when no other profiles exist yet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmptyMatchesResponse {
    pub matches: Vec<MatchCandidate>,
    pub message: String,
}

/// Response for a successful account deletion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAccountResponse {
    pub success: bool,
    pub message: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}
