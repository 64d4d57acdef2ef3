// Unit tests for the collab gateway

use collab_gateway::models::{
    DeleteAccountRequest, MatchCandidate, MatchList, Profile, StoredProfile, MAX_MATCHES,
};
use collab_gateway::models::responses::FindMatchesResponse;
use collab_gateway::prompts::{matching_prompt, validation_instruction};
use validator::Validate;

fn test_profile(email: &str, name: &str) -> Profile {
    Profile {
        email: email.to_string(),
        name: name.to_string(),
        role: "producer".to_string(),
        genres_raw: "house, techno".to_string(),
        location: "Berlin".to_string(),
        availability: "weekends".to_string(),
        skills_raw: "mixing, sound design".to_string(),
        experience_level: "intermediate".to_string(),
        collab_type: "remote".to_string(),
        social_links: "https://soundcloud.com/ada".to_string(),
    }
}

fn stored(id: &str, email: &str, name: &str) -> StoredProfile {
    StoredProfile {
        id: id.to_string(),
        profile: test_profile(email, name),
        created_at: None,
    }
}

#[test]
fn test_validation_instruction_recognized_fields() {
    assert!(validation_instruction("email").starts_with("Validate this email format strictly"));
    assert!(validation_instruction("name").contains("real person's name"));
    assert!(validation_instruction("genres_raw").contains("music genres"));
    assert!(validation_instruction("skills_raw").contains("music production skills"));
    assert!(validation_instruction("social_links").contains("social media URLs"));
}

#[test]
fn test_validation_instruction_fallback() {
    assert_eq!(
        validation_instruction("availability"),
        "Validate this availability: "
    );
    assert_eq!(
        validation_instruction("experience_level"),
        "Validate this experience_level: "
    );
    assert_eq!(
        validation_instruction("something_else"),
        "Validate this something_else: "
    );
}

#[test]
fn test_recognized_fields_never_use_generic_template() {
    for field in ["email", "name", "genres_raw", "skills_raw", "social_links"] {
        assert_ne!(
            validation_instruction(field),
            format!("Validate this {}: ", field),
            "field {} fell back to the generic template",
            field
        );
    }
}

#[test]
fn test_matching_prompt_embeds_target_attributes() {
    let target = stored("p1", "ada@example.com", "Ada");
    let candidates = vec![stored("p2", "ben@example.com", "Ben")];

    let prompt = matching_prompt(&target, &candidates);

    assert!(prompt.contains("- Role: producer"));
    assert!(prompt.contains("- Genres: house, techno"));
    assert!(prompt.contains("- Skills: mixing, sound design"));
    assert!(prompt.contains("- Experience: intermediate"));
    assert!(prompt.contains("- Collab Type: remote"));
    assert!(prompt.contains("- Location: Berlin"));
    assert!(prompt.contains("Return the top 3 best matches"));
}

#[test]
fn test_matching_prompt_embeds_candidate_list() {
    let target = stored("p1", "ada@example.com", "Ada");
    let candidates = vec![
        stored("p2", "ben@example.com", "Ben"),
        stored("p3", "cleo@example.com", "Cleo"),
    ];

    let prompt = matching_prompt(&target, &candidates);

    // Candidates are embedded as serialized JSON including store ids
    assert!(prompt.contains("\"id\":\"p2\""));
    assert!(prompt.contains("\"id\":\"p3\""));
    assert!(prompt.contains("Ben"));
    assert!(prompt.contains("Cleo"));
    // The requested output shape is spelled out
    assert!(prompt.contains("\"profile_id\""));
}

#[test]
fn test_match_list_parses_object_shape() {
    let output = r#"{"matches": [{"profile_id": "p2", "name": "Ben", "score": 91, "reason": "Complementary skills"}]}"#;

    let list = MatchList::from_model_output(output);

    assert_eq!(list.matches.len(), 1);
    assert_eq!(list.matches[0].profile_id, "p2");
    assert_eq!(list.matches[0].name, "Ben");
    assert_eq!(list.matches[0].score, 91.0);
}

#[test]
fn test_match_list_parses_bare_array() {
    let output = r#"[{"profile_id": "p2", "name": "Ben", "score": 77, "reason": "Genre overlap"}]"#;

    let list = MatchList::from_model_output(output);

    assert_eq!(list.matches.len(), 1);
    assert_eq!(list.matches[0].reason, "Genre overlap");
}

#[test]
fn test_match_list_parses_fenced_output() {
    let output = "```json\n{\"matches\": [{\"profile_id\": \"p2\", \"name\": \"Ben\", \"score\": 80, \"reason\": \"ok\"}]}\n```";

    let list = MatchList::from_model_output(output);

    assert_eq!(list.matches.len(), 1);
}

#[test]
fn test_match_list_accepts_fractional_scores() {
    let output = r#"{"matches": [{"profile_id": "p2", "name": "Ben", "score": 87.5, "reason": "ok"}]}"#;

    let list = MatchList::from_model_output(output);

    assert_eq!(list.matches[0].score, 87.5);
}

#[test]
fn test_match_list_non_json_yields_empty() {
    // Current behavior: unparseable model output silently degrades to an
    // empty list instead of surfacing a parse error.
    let list = MatchList::from_model_output("Sorry, I cannot rank these profiles.");

    assert!(list.matches.is_empty());
}

#[test]
fn test_match_list_truncates_to_max() {
    let entries: Vec<String> = (0..5)
        .map(|i| {
            format!(
                r#"{{"profile_id": "p{}", "name": "User {}", "score": 50, "reason": "ok"}}"#,
                i, i
            )
        })
        .collect();
    let output = format!(r#"{{"matches": [{}]}}"#, entries.join(","));

    let list = MatchList::from_model_output(&output);

    assert_eq!(list.matches.len(), MAX_MATCHES);
}

#[test]
fn test_profile_email_validation() {
    assert!(test_profile("ada@example.com", "Ada").validate().is_ok());
    assert!(test_profile("not-an-email", "Ada").validate().is_err());
    assert!(test_profile("", "Ada").validate().is_err());
}

#[test]
fn test_delete_request_email_validation() {
    let valid = DeleteAccountRequest {
        user_id: "user-1".to_string(),
        email: "ada@example.com".to_string(),
    };
    assert!(valid.validate().is_ok());

    let invalid = DeleteAccountRequest {
        user_id: "user-1".to_string(),
        email: "nope".to_string(),
    };
    assert!(invalid.validate().is_err());
}

#[test]
fn test_find_matches_response_keeps_match_object_nesting() {
    // The parsed model object sits under "matches", so the wire shape is
    // matches.matches[...]
    let response = FindMatchesResponse {
        success: true,
        matches: MatchList {
            matches: vec![MatchCandidate {
                profile_id: "p2".to_string(),
                name: "Ben".to_string(),
                score: 91.0,
                reason: "Complementary skills".to_string(),
            }],
        },
        user_profile: stored("p1", "ada@example.com", "Ada"),
    };

    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["success"], true);
    assert_eq!(value["matches"]["matches"][0]["profile_id"], "p2");
    assert_eq!(value["user_profile"]["id"], "p1");
    assert_eq!(value["user_profile"]["email"], "ada@example.com");
}

#[test]
fn test_stored_profile_flattens_to_row_shape() {
    let row = r#"{
        "id": "p1",
        "email": "ada@example.com",
        "name": "Ada",
        "role": "producer",
        "genres_raw": "house, techno",
        "location": "Berlin",
        "availability": "weekends",
        "skills_raw": "mixing, sound design",
        "experience_level": "intermediate",
        "collab_type": "remote",
        "social_links": "https://soundcloud.com/ada",
        "created_at": "2024-05-01T12:00:00Z"
    }"#;

    let profile: StoredProfile = serde_json::from_str(row).unwrap();

    assert_eq!(profile.id, "p1");
    assert_eq!(profile.profile.email, "ada@example.com");
    assert!(profile.created_at.is_some());

    // Rows without a timestamp still parse
    let bare = stored("p2", "ben@example.com", "Ben");
    let value = serde_json::to_value(&bare).unwrap();
    assert_eq!(value["id"], "p2");
    assert!(value.get("created_at").is_none());
}
