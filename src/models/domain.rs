use serde::{Deserialize, Serialize};
use validator::Validate;

/// Maximum number of ranked matches returned by the match finder
pub const MAX_MATCHES: usize = 3;

/// A music collaboration profile as submitted by the frontend
///
/// Email must be syntactically valid before a profile is accepted; the
/// remaining fields are free text. The `_raw` fields hold comma-separated
/// lists the model standardizes during field validation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Profile {
    #[validate(email)]
    pub email: String,
    pub name: String,
    pub role: String,
    pub genres_raw: String,
    pub location: String,
    pub availability: String,
    pub skills_raw: String,
    pub experience_level: String,
    pub collab_type: String,
    pub social_links: String,
}

/// A profile row as held by the store, with its assigned identifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredProfile {
    pub id: String,
    #[serde(flatten)]
    pub profile: Profile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// One ranked match suggestion produced by the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub profile_id: String,
    pub name: String,
    pub score: f32,
    pub reason: String,
}

/// The ranked match list in the shape the model is asked to produce
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchList {
    #[serde(default)]
    pub matches: Vec<MatchCandidate>,
}

impl MatchList {
    /// Parse model output into a match list
    ///
    /// Accepts either `{"matches": [...]}` or a bare array, with optional
    /// markdown code fences. Unparseable output yields an empty list
    /// instead of an error; the list is capped at [`MAX_MATCHES`].
    pub fn from_model_output(text: &str) -> Self {
        let text = strip_json_fences(text);

        let mut list = if let Ok(list) = serde_json::from_str::<MatchList>(text) {
            list
        } else if let Ok(matches) = serde_json::from_str::<Vec<MatchCandidate>>(text) {
            MatchList { matches }
        } else {
            tracing::warn!("Model returned non-JSON match output, substituting empty list");
            MatchList::default()
        };

        list.matches.truncate(MAX_MATCHES);
        list
    }
}

/// Strip ```json ... ``` fences the model may wrap around JSON output
fn strip_json_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed)
        .trim_start();
    body.strip_suffix("```")
        .map(str::trim_end)
        .unwrap_or(body)
}
