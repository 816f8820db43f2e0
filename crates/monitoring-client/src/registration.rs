//! Automatic registration of a service instance in the monitoring directory.
//!
//! At startup a service can announce its name and network address to the
//! central monitoring directory so operators can find it. The flow is one
//! best-effort pass:
//! 1. Honor the `DisableAutoRegistrationInMonitoring` switch
//! 2. Resolve the instance's url and name from configuration
//! 3. Check the directory for an existing registration under that name
//! 4. Rename on collision, then submit
//!
//! Runtime failures are written to the monitor log and swallowed:
//! self-registration must never block the host application's startup. There
//! is no retry, no periodic re-registration, and no de-registration on
//! shutdown.

use crate::client::{MonitoringDirectory, MonitoringServiceClient, ServiceRegistration};
use crate::config::{parse_flag, ConfigSource};
use crate::error::{MonitoringError, Result};
use crate::identity::{AppIdentity, ProcessIdentity};
use crate::log::MonitorLog;
use std::sync::Arc;
use tracing::debug;

/// Configuration key for the disable switch.
const DISABLE_VAR: &str = "DisableAutoRegistrationInMonitoring";

/// Configuration key for the instance's self-reported url.
const MONITORING_URL_VAR: &str = "MyMonitoringUrl";

/// Configuration key for the instance's registration name.
const MONITORING_NAME_VAR: &str = "MyMonitoringName";

/// Configuration key for the pod/instance tag.
const POD_TAG_VAR: &str = "ENV_INFO";

/// Placeholder address reported when the real url is unknown.
pub const UNKNOWN_URL: &str = "0.0.0.0";

/// Component name stamped on every monitor log entry.
const LOG_COMPONENT: &str = "Auto-registration in monitoring";

/// Terminal outcome of a registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// Auto-registration is disabled via configuration.
    Disabled,
    /// The directory already maps this name to the same url.
    AlreadyRegistered,
    /// A registration was submitted under the final name and url.
    Registered { service_name: String, url: String },
    /// The attempt failed; details went to the monitor log.
    Failed,
}

/// Register the calling application in the monitoring directory.
///
/// Reads the instance's url and name from `config`, checks the directory at
/// `monitoring_service_url` for an existing registration under that name,
/// and submits a (possibly renamed) entry. Progress and failures are logged
/// through `log`.
///
/// Fails only on wiring errors: a blank `monitoring_service_url` while
/// registration is enabled. Every runtime failure is written to the monitor
/// log and reported as [`RegistrationOutcome::Failed`], so a host can always
/// `await` this during startup without guarding against errors.
///
/// # Arguments
///
/// * `config` - Configuration source used for the registration keys
/// * `monitoring_service_url` - Base address of the monitoring directory
/// * `log` - Sink for monitor-style log entries
pub async fn register(
    config: &dyn ConfigSource,
    monitoring_service_url: &str,
    log: &dyn MonitorLog,
) -> Result<RegistrationOutcome> {
    // The disable switch is checked before any validation; a disabled
    // registration never fails on wiring.
    let disabled = config
        .get(DISABLE_VAR)
        .as_deref()
        .and_then(parse_flag)
        .unwrap_or(false);
    if disabled {
        log.write_monitor(LOG_COMPONENT, "", "Auto-registration is disabled");
        return Ok(RegistrationOutcome::Disabled);
    }

    if monitoring_service_url.trim().is_empty() {
        return Err(MonitoringError::InvalidArgument {
            name: "monitoring_service_url".to_string(),
            message: "monitoring service url must not be blank".to_string(),
        });
    }

    let directory = match MonitoringServiceClient::new(monitoring_service_url) {
        Ok(client) => client,
        Err(e) => {
            let pod_tag = config.get(POD_TAG_VAR).unwrap_or_default();
            log.write_monitor(LOG_COMPONENT, &pod_tag, &failure_chain(e));
            return Ok(RegistrationOutcome::Failed);
        }
    };

    Ok(register_with(config, &directory, &ProcessIdentity, log).await)
}

/// Run the registration flow against explicit collaborators.
///
/// [`register`] delegates here after applying the disable switch and
/// building the default directory client; hosts and tests can call this
/// directly with their own [`MonitoringDirectory`] and [`AppIdentity`]
/// implementations. Never fails: runtime errors are written to the monitor
/// log and reported as [`RegistrationOutcome::Failed`].
pub async fn register_with(
    config: &dyn ConfigSource,
    directory: &dyn MonitoringDirectory,
    identity: &dyn AppIdentity,
    log: &dyn MonitorLog,
) -> RegistrationOutcome {
    let pod_tag = config.get(POD_TAG_VAR).unwrap_or_default();

    match try_register(config, directory, identity, log, &pod_tag).await {
        Ok(outcome) => outcome,
        Err(e) => {
            // Fatal-to-log: everything past argument validation is
            // logged and suppressed.
            log.write_monitor(LOG_COMPONENT, &pod_tag, &failure_chain(e));
            RegistrationOutcome::Failed
        }
    }
}

/// Spawn [`register`] on a background task for fire-and-forget callers.
///
/// Requires a running tokio runtime. The handle can be awaited for the
/// outcome, but callers that do not care may drop it.
pub fn spawn_register(
    config: Arc<dyn ConfigSource>,
    monitoring_service_url: String,
    log: Arc<dyn MonitorLog>,
) -> tokio::task::JoinHandle<Result<RegistrationOutcome>> {
    tokio::spawn(async move {
        register(config.as_ref(), &monitoring_service_url, log.as_ref()).await
    })
}

/// The steps that run under the catch-all: resolve, deduplicate, submit.
async fn try_register(
    config: &dyn ConfigSource,
    directory: &dyn MonitoringDirectory,
    identity: &dyn AppIdentity,
    log: &dyn MonitorLog,
    pod_tag: &str,
) -> Result<RegistrationOutcome> {
    let mut url = match non_blank(config.get(MONITORING_URL_VAR)) {
        Some(value) => value,
        None => {
            log.write_monitor(
                LOG_COMPONENT,
                pod_tag,
                &format!(
                    "{} environment variable is not found. Using {} for monitoring registration",
                    MONITORING_URL_VAR, UNKNOWN_URL
                ),
            );
            UNKNOWN_URL.to_string()
        }
    };

    let mut service_name =
        non_blank(config.get(MONITORING_NAME_VAR)).unwrap_or_else(|| identity.application_name());

    match directory.lookup(&service_name).await {
        Ok(existing) => {
            let same_url = existing
                .url
                .as_deref()
                .is_some_and(|u| u.eq_ignore_ascii_case(&url));
            if same_url {
                log.write_monitor(
                    LOG_COMPONENT,
                    pod_tag,
                    "Service is already registered in monitoring with such url. Skipping.",
                );
                return Ok(RegistrationOutcome::AlreadyRegistered);
            }

            // A record under this name with a real (non-placeholder) url is
            // a naming collision: give up on the own url and register under
            // a suffixed name instead.
            if existing.url.as_deref() != Some(UNKNOWN_URL) {
                log.write_monitor(
                    LOG_COMPONENT,
                    pod_tag,
                    &format!(
                        "There is a registration for {} in monitoring service!",
                        service_name
                    ),
                );

                url = UNKNOWN_URL.to_string();
                let suffix = if pod_tag.is_empty() {
                    uuid::Uuid::new_v4().to_string()
                } else {
                    pod_tag.to_string()
                };
                service_name = format!("{}-{}", service_name, suffix);
            }
        }
        Err(e) => {
            // Ignorable: a failed lookup and an absent record are
            // indistinguishable here.
            debug!(
                "Monitoring lookup for {} failed, assuming no existing registration: {}",
                service_name, e
            );
        }
    }

    let registration = ServiceRegistration {
        service_name: service_name.clone(),
        url: url.clone(),
    };
    directory.submit(&registration).await?;

    log.write_monitor(
        LOG_COMPONENT,
        pod_tag,
        &format!(
            "Auto-registered in Monitoring with name {} on {}",
            service_name, url
        ),
    );

    Ok(RegistrationOutcome::Registered { service_name, url })
}

/// Treat unset and whitespace-only configuration values the same way.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Format an error with its full source chain for the monitor log.
fn failure_chain(err: MonitoringError) -> String {
    format!("{:#}", anyhow::Error::from(err))
}
