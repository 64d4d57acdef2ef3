//! Collab Gateway - profile gateway for the music collab matching API
//!
//! A thin HTTP front door that forwards profile fields to a chat-completion
//! model for validation and match ranking, and persists profiles in a
//! hosted Supabase table. All meaningful decisions are delegated to those
//! two collaborators.

pub mod config;
pub mod errors;
pub mod models;
pub mod prompts;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use errors::ApiError;
pub use models::{MatchList, Profile, StoredProfile};
pub use services::{OpenAiClient, OpenAiModels, SupabaseClient};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let instruction = prompts::validation_instruction("email");
        assert!(instruction.contains("email"));
    }
}
