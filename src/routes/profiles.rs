use crate::errors::ApiError;
use crate::models::{
    DeleteAccountRequest, DeleteAccountResponse, EmptyMatchesResponse, FindMatchesRequest,
    FindMatchesResponse, HealthResponse, MatchList, Profile, SaveProfileResponse,
    ValidateFieldRequest, ValidateFieldResponse,
};
use crate::prompts;
use crate::services::{OpenAiClient, SupabaseClient, SupabaseError};
use actix_web::{web, HttpResponse};
use std::sync::Arc;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<OpenAiClient>,
    pub store: Arc<SupabaseClient>,
    pub max_candidates: Option<usize>,
}

/// Configure all profile gateway routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/validate-field", web::post().to(validate_field))
        .route("/save-profile", web::post().to(save_profile))
        .route("/find-matches", web::post().to(find_matches))
        .route("/delete-account", web::post().to(delete_account))
        .route("/health", web::get().to(health_check));
}

/// Health check endpoint
///
/// Always reports healthy; neither collaborator is probed.
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        message: "Music collab API is running".to_string(),
    })
}

/// Validate a single profile field through the model service
///
/// POST /validate-field
///
/// The model's judgment is returned as-is, even when it is not the JSON
/// shape the template asked for.
async fn validate_field(
    state: web::Data<AppState>,
    req: web::Json<ValidateFieldRequest>,
) -> Result<HttpResponse, ApiError> {
    tracing::info!("Validating field: {}", req.field_name);

    let instruction = prompts::validation_instruction(&req.field_name);

    let validation = state
        .model
        .validate_field(&format!("{}{}", instruction, req.value))
        .await
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    Ok(HttpResponse::Ok().json(ValidateFieldResponse {
        field: req.field_name.clone(),
        original: req.value.clone(),
        validation,
        valid: true,
    }))
}

/// Save a profile to the store
///
/// POST /save-profile
///
/// Rejects syntactically invalid emails before any store call. Repeated
/// saves with the same email create distinct rows; no uniqueness is
/// enforced.
async fn save_profile(
    state: web::Data<AppState>,
    profile: web::Json<Profile>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = profile.validate() {
        tracing::info!("Rejected profile save: {}", errors);
        return Err(ApiError::BadRequest(errors.to_string()));
    }

    let rows = state
        .store
        .insert_profile(&profile)
        .await
        .map_err(|e| ApiError::Save(e.to_string()))?;

    let saved = rows
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::Save("Failed to save profile".to_string()))?;

    tracing::info!("Saved profile {}", saved.id);

    Ok(HttpResponse::Ok().json(SaveProfileResponse {
        success: true,
        profile_id: saved.id,
        message: "Profile saved successfully".to_string(),
    }))
}

/// Find ranked collaborator matches for a saved profile
///
/// POST /find-matches
///
/// Fetches the target profile and every other profile, then delegates the
/// ranking to the model service. Unparseable model output degrades to an
/// empty match list rather than an error.
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> Result<HttpResponse, ApiError> {
    tracing::info!("Finding matches for profile: {}", req.profile_id);

    let user_profile = match state.store.get_profile(&req.profile_id).await {
        Ok(profile) => profile,
        Err(SupabaseError::NotFound(_)) => {
            return Err(ApiError::NotFound("Profile not found".to_string()));
        }
        Err(e) => return Err(ApiError::Matching(e.to_string())),
    };

    let mut candidates = state
        .store
        .list_other_profiles(&req.profile_id)
        .await
        .map_err(|e| ApiError::Matching(e.to_string()))?;

    if candidates.is_empty() {
        return Ok(HttpResponse::Ok().json(EmptyMatchesResponse {
            matches: vec![],
            message: "No other profiles found yet".to_string(),
        }));
    }

    // The whole candidate set is embedded in the prompt; the configured
    // cap keeps that growth bounded.
    if let Some(cap) = state.max_candidates {
        if candidates.len() > cap {
            tracing::warn!(
                "Truncating candidate set from {} to {} before prompt embedding",
                candidates.len(),
                cap
            );
            candidates.truncate(cap);
        }
    }

    let prompt = prompts::matching_prompt(&user_profile, &candidates);

    let output = state
        .model
        .rank_matches(&prompt)
        .await
        .map_err(|e| ApiError::Matching(e.to_string()))?;

    let matches = MatchList::from_model_output(&output);

    tracing::info!(
        "Returning {} matches for profile {} (from {} candidates)",
        matches.matches.len(),
        req.profile_id,
        candidates.len()
    );

    Ok(HttpResponse::Ok().json(FindMatchesResponse {
        success: true,
        matches,
        user_profile,
    }))
}

/// Delete all profile rows for an account's email
///
/// POST /delete-account
///
/// The auth identity is deleted by the frontend; only profile rows are
/// removed here. `user_id` is accepted for the audit log but the predicate
/// is the email alone.
async fn delete_account(
    state: web::Data<AppState>,
    req: web::Json<DeleteAccountRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Rejected account deletion: {}", errors);
        return Err(ApiError::BadRequest(errors.to_string()));
    }

    tracing::info!("Deleting profile rows for user: {}", req.user_id);

    let deleted = state
        .store
        .delete_profiles_by_email(&req.email)
        .await
        .map_err(|e| ApiError::Delete(e.to_string()))?;

    if deleted.is_empty() {
        return Err(ApiError::NotFound("Profile not found".to_string()));
    }

    tracing::info!(
        "Deleted {} profile row(s) for user {}",
        deleted.len(),
        req.user_id
    );

    Ok(HttpResponse::Ok().json(DeleteAccountResponse {
        success: true,
        message: "Account deleted successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_shape() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            message: "Music collab API is running".to_string(),
        };

        assert_eq!(response.status, "healthy");
    }
}
