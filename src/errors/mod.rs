//! Structured error handling for the leadbook client
//!
//! Every fallible client operation returns a [`LeadbookError`]. The caller is
//! responsible for surfacing the message to the user; nothing in this crate
//! retries automatically or escalates to a panic.

// =============================================================================
// MAIN ERROR TYPE
// =============================================================================

#[derive(Debug, Clone)]
pub enum LeadbookError {
    // Login / account creation rejections
    Auth(AuthError),

    // Transport failures, unexpected statuses, malformed bodies
    Network(NetworkError),

    // CSV upload failures, local or server-side
    Import(ImportError),

    // Local pre-flight validation
    Validation(ValidationError),
}

impl std::fmt::Display for LeadbookError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeadbookError::Auth(e) => write!(f, "Auth Error: {}", e),
            LeadbookError::Network(e) => write!(f, "Network Error: {}", e),
            LeadbookError::Import(e) => write!(f, "Import Error: {}", e),
            LeadbookError::Validation(e) => write!(f, "Validation Error: {}", e),
        }
    }
}

impl std::error::Error for LeadbookError {}

// =============================================================================
// AUTH ERROR TYPES
// =============================================================================

#[derive(Debug, Clone)]
pub enum AuthError {
    InvalidCredentials {
        message: String,
    },
    DuplicateAccount {
        username: String,
        message: String,
    },
    Rejected {
        status: u16,
        message: String,
    },
}

impl AuthError {
    /// The server-provided `{"error": ...}` message, whatever the variant.
    pub fn message(&self) -> &str {
        match self {
            AuthError::InvalidCredentials { message } => message,
            AuthError::DuplicateAccount { message, .. } => message,
            AuthError::Rejected { message, .. } => message,
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::InvalidCredentials { message } => write!(f, "{}", message),
            AuthError::DuplicateAccount { username, message } => {
                write!(f, "account '{}' not created: {}", username, message)
            }
            AuthError::Rejected { status, message } => {
                write!(f, "rejected with HTTP {}: {}", status, message)
            }
        }
    }
}

// =============================================================================
// NETWORK ERROR TYPES
// =============================================================================

#[derive(Debug, Clone)]
pub enum NetworkError {
    Transport {
        endpoint: String,
        error: String,
    },
    HttpStatus {
        endpoint: String,
        status: u16,
        body: Option<String>,
    },
    MalformedBody {
        endpoint: String,
        error: String,
    },
    Generic {
        message: String,
    },
}

impl std::fmt::Display for NetworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkError::Transport { endpoint, error } => {
                write!(f, "request to {} failed: {}", endpoint, error)
            }
            NetworkError::HttpStatus {
                endpoint,
                status,
                body,
            } => {
                write!(
                    f,
                    "HTTP {} from {}: {}",
                    status,
                    endpoint,
                    body.as_deref().unwrap_or("no body")
                )
            }
            NetworkError::MalformedBody { endpoint, error } => {
                write!(f, "unreadable response from {}: {}", endpoint, error)
            }
            NetworkError::Generic { message } => write!(f, "{}", message),
        }
    }
}

// =============================================================================
// IMPORT ERROR TYPES
// =============================================================================

#[derive(Debug, Clone)]
pub enum ImportError {
    NotCsv {
        file_name: String,
    },
    Unreadable {
        path: String,
        error: String,
    },
    InvalidCsv {
        error: String,
    },
    Rejected {
        status: u16,
        message: String,
    },
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::NotCsv { file_name } => {
                write!(f, "'{}' is not a .csv file", file_name)
            }
            ImportError::Unreadable { path, error } => {
                write!(f, "cannot read '{}': {}", path, error)
            }
            ImportError::InvalidCsv { error } => write!(f, "invalid CSV: {}", error),
            ImportError::Rejected { status, message } => {
                write!(f, "server rejected import (HTTP {}): {}", status, message)
            }
        }
    }
}

// =============================================================================
// VALIDATION ERROR TYPES
// =============================================================================

#[derive(Debug, Clone)]
pub enum ValidationError {
    EmptyField { field: String },
    Generic { message: String },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyField { field } => {
                write!(f, "{} must not be empty", field)
            }
            ValidationError::Generic { message } => write!(f, "{}", message),
        }
    }
}

// =============================================================================
// ERROR CONVERSIONS
// =============================================================================

impl From<String> for LeadbookError {
    fn from(err: String) -> Self {
        LeadbookError::Network(NetworkError::Generic { message: err })
    }
}

impl From<&str> for LeadbookError {
    fn from(err: &str) -> Self {
        LeadbookError::Network(NetworkError::Generic {
            message: err.to_string(),
        })
    }
}

impl From<reqwest::Error> for LeadbookError {
    fn from(err: reqwest::Error) -> Self {
        LeadbookError::Network(NetworkError::Generic {
            message: format!("HTTP request failed: {}", err),
        })
    }
}

impl From<serde_json::Error> for LeadbookError {
    fn from(err: serde_json::Error) -> Self {
        LeadbookError::Network(NetworkError::Generic {
            message: format!("JSON decode failed: {}", err),
        })
    }
}

// =============================================================================
// STRUCTURED ERROR BUILDERS
// =============================================================================

impl LeadbookError {
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        LeadbookError::Auth(AuthError::InvalidCredentials {
            message: message.into(),
        })
    }

    pub fn duplicate_account(username: impl Into<String>, message: impl Into<String>) -> Self {
        LeadbookError::Auth(AuthError::DuplicateAccount {
            username: username.into(),
            message: message.into(),
        })
    }

    pub fn auth_rejected(status: u16, message: impl Into<String>) -> Self {
        LeadbookError::Auth(AuthError::Rejected {
            status,
            message: message.into(),
        })
    }

    pub fn transport(endpoint: impl Into<String>, error: impl std::fmt::Display) -> Self {
        LeadbookError::Network(NetworkError::Transport {
            endpoint: endpoint.into(),
            error: error.to_string(),
        })
    }

    pub fn http_status(endpoint: impl Into<String>, status: u16, body: Option<String>) -> Self {
        LeadbookError::Network(NetworkError::HttpStatus {
            endpoint: endpoint.into(),
            status,
            body,
        })
    }

    pub fn malformed_body(endpoint: impl Into<String>, error: impl std::fmt::Display) -> Self {
        LeadbookError::Network(NetworkError::MalformedBody {
            endpoint: endpoint.into(),
            error: error.to_string(),
        })
    }

    pub fn not_csv(file_name: impl Into<String>) -> Self {
        LeadbookError::Import(ImportError::NotCsv {
            file_name: file_name.into(),
        })
    }

    pub fn import_rejected(status: u16, message: impl Into<String>) -> Self {
        LeadbookError::Import(ImportError::Rejected {
            status,
            message: message.into(),
        })
    }

    pub fn empty_field(field: impl Into<String>) -> Self {
        LeadbookError::Validation(ValidationError::EmptyField {
            field: field.into(),
        })
    }
}
