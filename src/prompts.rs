//! Instruction templates sent to the model service.
//!
//! All prompt text lives here so call sites stay free of string literals.

use crate::models::StoredProfile;

/// System instruction for field validation calls
pub const VALIDATOR_SYSTEM: &str = "You are a helpful data validator for music collaboration profiles. Be concise and return structured JSON when requested.";

/// System instruction for match ranking calls
pub const MATCHMAKER_SYSTEM: &str = "You are an expert at matching music collaborators based on complementary skills, genres, and preferences.";

/// Per-field validation instruction templates
const VALIDATION_TEMPLATES: &[(&str, &str)] = &[
    (
        "email",
        "Validate this email format strictly. Check if it's a valid email address (has @ symbol, domain, etc). Return JSON: {valid: true/false, message: 'explanation'}",
    ),
    (
        "name",
        "Validate if this looks like a real person's name (not random text, numbers, or fake entries). It should have at least a first name, can include last name. Return JSON: {valid: true/false, message: 'explanation'}",
    ),
    (
        "genres_raw",
        "Parse these music genres (comma-separated) and return a clean, standardized list. Return JSON: {genres: [...], valid: true/false}",
    ),
    (
        "skills_raw",
        "Parse these music production skills (comma-separated) and standardize them. Return JSON: {skills: [...], valid: true/false}",
    ),
    (
        "social_links",
        "Validate these social media URLs and extract platform names. Return JSON: {links: [{platform: str, url: str}], valid: true/false}",
    ),
];

/// Look up the validation instruction for a field name
///
/// Unrecognized field names fall back to a generic template embedding the
/// field name itself.
pub fn validation_instruction(field_name: &str) -> String {
    VALIDATION_TEMPLATES
        .iter()
        .find(|(name, _)| *name == field_name)
        .map(|(_, template)| (*template).to_string())
        .unwrap_or_else(|| format!("Validate this {}: ", field_name))
}

/// Build the single user message for match ranking
///
/// Embeds the target profile's collaboration attributes followed by the
/// serialized candidate list. The caller is responsible for capping the
/// candidate count before this point.
pub fn matching_prompt(target: &StoredProfile, candidates: &[StoredProfile]) -> String {
    let candidates_json = serde_json::to_string(candidates).unwrap();

    format!(
        "Given this user profile:\n\
         - Role: {role}\n\
         - Genres: {genres}\n\
         - Skills: {skills}\n\
         - Experience: {experience}\n\
         - Collab Type: {collab_type}\n\
         - Location: {location}\n\
         \n\
         And these potential collaborators:\n\
         {candidates}\n\
         \n\
         Return the top 3 best matches with a compatibility score (0-100) and reasoning.\n\
         Focus on complementary skills, genre overlap, and collaboration compatibility.\n\
         Keep the reason concise (1-2 sentences max).\n\
         Format as JSON: {{\"matches\": [{{\"profile_id\": \"...\", \"name\": \"...\", \"score\": 85, \"reason\": \"...\"}}]}}",
        role = target.profile.role,
        genres = target.profile.genres_raw,
        skills = target.profile.skills_raw,
        experience = target.profile.experience_level,
        collab_type = target.profile.collab_type,
        location = target.profile.location,
        candidates = candidates_json,
    )
}
