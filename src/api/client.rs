//! Base HTTP client wrapper

use reqwest::Client;
use std::time::Duration;

/// HTTP client with a configured request timeout
///
/// One instance per [`super::LeadApiClient`]; the underlying reqwest client
/// pools connections internally. No retry and no throttling live here: the
/// service is a single private backend and every operation is
/// fire-once-report-failure.
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(timeout_secs: u64) -> Result<Self, String> {
        if timeout_secs == 0 {
            return Err("Timeout must be greater than zero".to_string());
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            client,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
