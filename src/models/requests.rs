use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to validate a single profile field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateFieldRequest {
    pub field_name: String,
    pub value: String,
}

/// Request to find matches for a saved profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesRequest {
    pub profile_id: String,
}

/// Request to delete an account's profile rows
///
/// Deletion is keyed by email; `user_id` identifies the caller but is not
/// part of the predicate. The auth identity itself is removed by the
/// frontend.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DeleteAccountRequest {
    pub user_id: String,
    #[validate(email)]
    pub email: String,
}
