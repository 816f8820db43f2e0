//! Monitoring Client - service self-registration in a central monitoring
//! directory.
//!
//! A hosting application calls [`register`] once at startup (or
//! [`spawn_register`] for fire-and-forget) to announce its name and url to
//! the monitoring directory. The attempt is best-effort: runtime failures
//! are written to the monitor log and never surface to the host, so
//! registration can never impede startup.
//!
//! # Example
//!
//! ```rust,ignore
//! use monitoring_client::{register, EnvConfig, TracingMonitorLog};
//!
//! #[tokio::main]
//! async fn main() {
//!     let outcome = register(&EnvConfig, "http://monitoring:5000", &TracingMonitorLog)
//!         .await
//!         .expect("monitoring service url is configured");
//!     tracing::info!("monitoring registration outcome: {:?}", outcome);
//! }
//! ```
//!
//! Behavior is driven by four environment-style configuration keys:
//! `DisableAutoRegistrationInMonitoring`, `MyMonitoringUrl`,
//! `MyMonitoringName`, and `ENV_INFO` (pod/instance tag). See
//! [`registration`] for the exact flow.

pub mod client;
pub mod config;
pub mod error;
pub mod identity;
pub mod log;
pub mod registration;

// Re-export commonly used types
pub use client::{
    MonitoredService, MonitoringDirectory, MonitoringServiceClient, ServiceRegistration,
};
pub use config::{ConfigSource, EnvConfig, MapConfig};
pub use error::{MonitoringError, Result};
pub use identity::{AppIdentity, ProcessIdentity};
pub use log::{MonitorLog, TracingMonitorLog};
pub use registration::{register, register_with, spawn_register, RegistrationOutcome, UNKNOWN_URL};
