//! Lead service API client
//!
//! Endpoints (all JSON except import, which is multipart/form-data):
//! 1. POST /login            - authenticate, returns the user record
//! 2. POST /user             - create account, returns the created record(s)
//! 3. GET  /{username}       - list leads, filter subset as query parameters
//! 4. POST /{username}       - bulk import, multipart field `file` = CSV bytes
//!
//! The client trusts server-side filtering and ownership scoping completely:
//! list responses are returned in server order with no re-filtering, sorting,
//! or deduplication. Nothing here retries; a failure is normalized into a
//! [`LeadbookError`] and handed to the caller.

use reqwest::multipart::{Form, Part};
use reqwest::Response;
use url::Url;

use crate::config::get_config_clone;
use crate::errors::{ImportError, LeadbookError};
use crate::filters::FilterStore;
use crate::import::is_csv_file_name;
use crate::logger::{self, LogTag};
use crate::session::Session;

use super::client::HttpClient;
use super::types::{Credentials, ErrorBody, ImportSummary, Lead, LoginResponse, UserRecord};

/// The login endpoint answers invalid credentials with this status
const STATUS_UNAUTHORIZED: u16 = 401;

/// Account creation answers duplicates (and other request problems) with 400
const STATUS_BAD_REQUEST: u16 = 400;

pub struct LeadApiClient {
    http: HttpClient,
    base_url: String,
}

impl LeadApiClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, String> {
        let parsed =
            Url::parse(base_url).map_err(|e| format!("Invalid base URL '{}': {}", base_url, e))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(format!(
                "Unsupported base URL scheme '{}'",
                parsed.scheme()
            ));
        }

        Ok(Self {
            http: HttpClient::new(timeout_secs)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build from the global configuration (`server.base_url`,
    /// `server.timeout_secs`)
    pub fn from_config() -> Result<Self, String> {
        let config = get_config_clone();
        Self::new(&config.server.base_url, config.server.timeout_secs)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Authenticate and return the session the server echoes back
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, LeadbookError> {
        validate_credentials(credentials)?;

        let endpoint = format!("{}/login", self.base_url);
        let response = self
            .http
            .client()
            .post(&endpoint)
            .json(credentials)
            .send()
            .await
            .map_err(|e| LeadbookError::transport(&endpoint, e))?;

        if !response.status().is_success() {
            let (status, message) = rejection_message(response).await;
            return Err(if status == STATUS_UNAUTHORIZED {
                LeadbookError::invalid_credentials(message)
            } else {
                LeadbookError::auth_rejected(status, message)
            });
        }

        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| LeadbookError::malformed_body(&endpoint, e))?;

        logger::info(
            LogTag::Auth,
            &format!("logged in as {}", body.user.user_name),
        );
        Ok(Session::new(body.user.user_name))
    }

    /// Create an account and return the session for the new user
    pub async fn create_account(&self, credentials: &Credentials) -> Result<Session, LeadbookError> {
        validate_credentials(credentials)?;

        let endpoint = format!("{}/user", self.base_url);
        let response = self
            .http
            .client()
            .post(&endpoint)
            .json(credentials)
            .send()
            .await
            .map_err(|e| LeadbookError::transport(&endpoint, e))?;

        if !response.status().is_success() {
            let (status, message) = rejection_message(response).await;
            return Err(if status == STATUS_BAD_REQUEST {
                LeadbookError::duplicate_account(&credentials.user_name, message)
            } else {
                LeadbookError::auth_rejected(status, message)
            });
        }

        // The server returns the created rows as an array
        let created: Vec<UserRecord> = response
            .json()
            .await
            .map_err(|e| LeadbookError::malformed_body(&endpoint, e))?;

        let user = created
            .into_iter()
            .next()
            .ok_or_else(|| LeadbookError::malformed_body(&endpoint, "empty user array"))?;

        logger::info(LogTag::Auth, &format!("created account {}", user.user_name));
        Ok(Session::new(user.user_name))
    }

    /// Retrieve the user's leads, scoped by the active filters
    ///
    /// An empty filter state issues a request with zero query parameters; the
    /// server interprets that as "no filter". The response sequence is
    /// returned exactly as the server ordered it.
    pub async fn fetch_leads(
        &self,
        session: &Session,
        filters: &FilterStore,
    ) -> Result<Vec<Lead>, LeadbookError> {
        let endpoint = format!("{}/{}", self.base_url, session.username);
        let mut request = self.http.client().get(&endpoint);

        let params = filters.to_query_params();
        if !params.is_empty() {
            request = request.query(&params);
        }

        let response = request
            .send()
            .await
            .map_err(|e| LeadbookError::transport(&endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.ok().filter(|b| !b.is_empty());
            return Err(LeadbookError::http_status(&endpoint, status.as_u16(), body));
        }

        let leads: Vec<Lead> = response
            .json()
            .await
            .map_err(|e| LeadbookError::malformed_body(&endpoint, e))?;

        logger::debug(
            LogTag::Api,
            &format!(
                "fetched {} leads for {} ({} filter(s))",
                leads.len(),
                session.username,
                params.len()
            ),
        );
        Ok(leads)
    }

    /// Upload a CSV file by path
    ///
    /// The `.csv` extension check is local and precedes any file or network
    /// I/O. On success the caller is expected to re-fetch the list; the
    /// client never predicts server-side import results.
    pub async fn import_csv(
        &self,
        session: &Session,
        path: &std::path::Path,
    ) -> Result<ImportSummary, LeadbookError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| LeadbookError::not_csv(path.to_string_lossy()))?
            .to_string();

        if !is_csv_file_name(&file_name) {
            return Err(LeadbookError::not_csv(file_name));
        }

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            LeadbookError::Import(ImportError::Unreadable {
                path: path.display().to_string(),
                error: e.to_string(),
            })
        })?;

        self.import_bytes(session, &file_name, bytes).await
    }

    /// Upload already-read CSV bytes as multipart field `file`
    pub async fn import_bytes(
        &self,
        session: &Session,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<ImportSummary, LeadbookError> {
        if !is_csv_file_name(file_name) {
            return Err(LeadbookError::not_csv(file_name));
        }

        let endpoint = format!("{}/{}", self.base_url, session.username);
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("text/csv")?;
        let form = Form::new().part("file", part);

        let response = self
            .http
            .client()
            .post(&endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| LeadbookError::transport(&endpoint, e))?;

        if !response.status().is_success() {
            let (status, message) = rejection_message(response).await;
            return Err(LeadbookError::import_rejected(status, message));
        }

        let summary: ImportSummary = response
            .json()
            .await
            .map_err(|e| LeadbookError::malformed_body(&endpoint, e))?;

        logger::info(
            LogTag::Import,
            &format!(
                "import finished: {} imported, {} rejected",
                summary.success_count, summary.error_count
            ),
        );
        Ok(summary)
    }
}

/// Pull the server's `{"error": ...}` message out of a failing response,
/// falling back to the raw body text
async fn rejection_message(response: Response) -> (u16, String) {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|e| e.error)
        .unwrap_or(body);
    (status, message)
}

fn validate_credentials(credentials: &Credentials) -> Result<(), LeadbookError> {
    if credentials.user_name.trim().is_empty() {
        return Err(LeadbookError::empty_field("username"));
    }
    if credentials.password.is_empty() {
        return Err(LeadbookError::empty_field("password"));
    }
    Ok(())
}
