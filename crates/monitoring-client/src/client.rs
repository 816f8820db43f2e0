//! HTTP client for the monitoring directory service.
//!
//! Wraps the directory's REST API behind the narrow [`MonitoringDirectory`]
//! interface consumed by the registration procedure:
//! - `lookup`: fetch the directory's current record for a service name
//! - `submit`: register (or re-register) a name-to-url mapping
//!
//! Endpoints, encoding, and timeouts are implementation details of this
//! module. Each operation is attempted exactly once; there is no retry.

use crate::error::{MonitoringError, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Timeout for directory API calls.
const API_TIMEOUT: Duration = Duration::from_secs(10);

/// A registration submitted to the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRegistration {
    /// Name the instance registers under. Never empty.
    pub service_name: String,
    /// Reachable address, or the `0.0.0.0` placeholder when unknown.
    pub url: String,
}

/// The directory's current record for a service name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoredService {
    pub service_name: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Client operations against the monitoring directory.
///
/// The registration procedure consumes this interface; the default
/// implementation is [`MonitoringServiceClient`].
#[async_trait]
pub trait MonitoringDirectory: Send + Sync {
    /// Fetch the current registration for a service name.
    ///
    /// Fails with [`MonitoringError::RegistrationNotFound`] when the
    /// directory has no record under that name.
    async fn lookup(&self, service_name: &str) -> Result<MonitoredService>;

    /// Submit a registration.
    async fn submit(&self, registration: &ServiceRegistration) -> Result<()>;
}

/// reqwest-backed client bound to one monitoring directory instance.
pub struct MonitoringServiceClient {
    base_url: String,
    client: reqwest::Client,
}

impl MonitoringServiceClient {
    /// Create a new client targeting the given base url.
    ///
    /// Trailing slashes on `base_url` are ignored.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();

        let client = reqwest::Client::builder()
            .timeout(API_TIMEOUT)
            .user_agent("monitoring-client")
            .build()
            .map_err(|e| MonitoringError::Network {
                message: format!("Failed to create HTTP client: {}", e),
                source: Some(e),
            })?;

        Ok(Self { base_url, client })
    }

    fn lookup_url(&self, service_name: &str) -> String {
        format!("{}/api/monitoring/{}", self.base_url, service_name)
    }

    fn submit_url(&self) -> String {
        format!("{}/api/monitoring/url", self.base_url)
    }
}

#[async_trait]
impl MonitoringDirectory for MonitoringServiceClient {
    async fn lookup(&self, service_name: &str) -> Result<MonitoredService> {
        let url = self.lookup_url(service_name);
        debug!("Looking up monitoring registration at {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| MonitoringError::Network {
                message: format!("GET {} failed: {}", url, e),
                source: Some(e),
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(MonitoringError::RegistrationNotFound {
                service_name: service_name.to_string(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MonitoringError::Api {
                status: status.as_u16(),
                url,
                message: body,
            });
        }

        response
            .json::<MonitoredService>()
            .await
            .map_err(|e| MonitoringError::Json {
                message: format!("Failed to parse monitoring lookup response: {}", e),
                source: None,
            })
    }

    async fn submit(&self, registration: &ServiceRegistration) -> Result<()> {
        let url = self.submit_url();
        debug!(
            "Submitting monitoring registration for {} to {}",
            registration.service_name, url
        );

        let response = self
            .client
            .post(&url)
            .json(registration)
            .send()
            .await
            .map_err(|e| MonitoringError::Network {
                message: format!("POST {} failed: {}", url, e),
                source: Some(e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MonitoringError::Api {
                status: status.as_u16(),
                url,
                message: body,
            });
        }

        Ok(())
    }
}
