// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{MatchCandidate, MatchList, Profile, StoredProfile, MAX_MATCHES};
pub use requests::{DeleteAccountRequest, FindMatchesRequest, ValidateFieldRequest};
pub use responses::{
    DeleteAccountResponse, EmptyMatchesResponse, FindMatchesResponse, HealthResponse,
    SaveProfileResponse, ValidateFieldResponse,
};
