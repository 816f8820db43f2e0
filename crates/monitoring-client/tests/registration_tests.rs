//! Integration tests for the public registration interface.
//!
//! These tests drive the crate the way a hosting application would: through
//! the re-exported entry points with collaborators supplied behind the
//! public traits.

use monitoring_client::{
    register, register_with, AppIdentity, MapConfig, MonitoredService, MonitoringDirectory,
    MonitoringError, MonitorLog, RegistrationOutcome, ServiceRegistration, UNKNOWN_URL,
};
use std::sync::Mutex;

/// Directory double with an empty registry that accepts every submission.
#[derive(Default)]
struct EmptyDirectory {
    submissions: Mutex<Vec<ServiceRegistration>>,
}

#[async_trait::async_trait]
impl MonitoringDirectory for EmptyDirectory {
    async fn lookup(&self, service_name: &str) -> monitoring_client::Result<MonitoredService> {
        Err(MonitoringError::RegistrationNotFound {
            service_name: service_name.to_string(),
        })
    }

    async fn submit(&self, registration: &ServiceRegistration) -> monitoring_client::Result<()> {
        self.submissions.lock().unwrap().push(registration.clone());
        Ok(())
    }
}

/// Log double keeping every message.
#[derive(Default)]
struct CollectingLog {
    messages: Mutex<Vec<String>>,
}

impl MonitorLog for CollectingLog {
    fn write_monitor(&self, _component: &str, _tag: &str, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

struct NamedIdentity(&'static str);

impl AppIdentity for NamedIdentity {
    fn application_name(&self) -> String {
        self.0.to_string()
    }
}

#[tokio::test]
async fn test_disabled_registration_returns_without_validation() {
    let config = MapConfig::new().with("DisableAutoRegistrationInMonitoring", "true");
    let log = CollectingLog::default();

    // Even a blank directory address is accepted when disabled.
    let outcome = register(&config, "", &log).await.unwrap();

    assert_eq!(outcome, RegistrationOutcome::Disabled);
    assert!(log
        .messages
        .lock()
        .unwrap()
        .iter()
        .any(|m| m.contains("disabled")));
}

#[tokio::test]
async fn test_blank_directory_address_fails_fast() {
    let config = MapConfig::new();
    let log = CollectingLog::default();

    let result = register(&config, "  ", &log).await;

    match result {
        Err(MonitoringError::InvalidArgument { name, .. }) => {
            assert_eq!(name, "monitoring_service_url");
        }
        other => panic!("expected an invalid-argument error, got {:?}", other),
    }
    assert!(log.messages.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_fresh_registration_submits_configured_values() {
    let config = MapConfig::new()
        .with("MyMonitoringName", "billing-api")
        .with("MyMonitoringUrl", "http://10.0.0.2:5000");
    let directory = EmptyDirectory::default();
    let log = CollectingLog::default();

    let outcome = register_with(&config, &directory, &NamedIdentity("fallback"), &log).await;

    assert_eq!(
        outcome,
        RegistrationOutcome::Registered {
            service_name: "billing-api".to_string(),
            url: "http://10.0.0.2:5000".to_string(),
        }
    );
    let submissions = directory.submissions.lock().unwrap();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].service_name, "billing-api");
    assert!(log
        .messages
        .lock()
        .unwrap()
        .iter()
        .any(|m| m.contains("Auto-registered in Monitoring")));
}

#[tokio::test]
async fn test_unconfigured_instance_registers_under_identity_and_placeholder() {
    let config = MapConfig::new();
    let directory = EmptyDirectory::default();
    let log = CollectingLog::default();

    let outcome = register_with(&config, &directory, &NamedIdentity("billing-api"), &log).await;

    assert_eq!(
        outcome,
        RegistrationOutcome::Registered {
            service_name: "billing-api".to_string(),
            url: UNKNOWN_URL.to_string(),
        }
    );
}
