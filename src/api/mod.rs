//! HTTP client for the lead service

pub mod client;
pub mod leads;
pub mod types;

pub use leads::LeadApiClient;
pub use types::{Credentials, ErrorBody, ImportSummary, Lead, LoginResponse, UserRecord};
