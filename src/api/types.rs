use serde::{Deserialize, Serialize};

/// A sales-prospect record owned by exactly one user
///
/// Server-owned and immutable from the client's perspective. `created_at` is
/// carried as opaque text: the client displays it but never computes with it,
/// and the server's timestamp format is not part of the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub created_at: String,
    pub user_uuid: String,
    pub lead_id: String,
    pub lead_name: String,
    pub contact_information: String,
    pub source: String,
    pub interest_level: String,
    pub status: String,
    pub salesperson: String,
}

/// A user record as the server returns it. The wire key for the username is
/// camelCase, unlike every other field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub uuid: String,
    #[serde(rename = "userName")]
    pub user_name: String,
    pub created_at: String,
}

/// Login / account creation request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub user_name: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            password: password.into(),
        }
    }
}

/// Successful login response body
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: String,
    pub user: UserRecord,
}

/// Per-row outcome of a CSV import, as reported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub success_count: u64,
    pub error_count: u64,
}

/// Error body shape shared by every failing endpoint: `{"error": "..."}`
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
