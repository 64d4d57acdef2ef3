// Service exports
pub mod openai;
pub mod supabase;

pub use openai::{OpenAiClient, OpenAiError, OpenAiModels};
pub use supabase::{SupabaseClient, SupabaseError};
