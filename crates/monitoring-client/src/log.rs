//! Monitor-style log sink.

/// Sink for monitor-style log entries.
///
/// Entries are fire-and-forget: implementations must not fail and should not
/// block the caller.
pub trait MonitorLog: Send + Sync {
    /// Write one entry, tagged with the emitting component and an instance
    /// tag (empty when no tag applies).
    fn write_monitor(&self, component: &str, tag: &str, message: &str);
}

/// [`MonitorLog`] implementation that forwards entries to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMonitorLog;

impl MonitorLog for TracingMonitorLog {
    fn write_monitor(&self, component: &str, tag: &str, message: &str) {
        tracing::info!(component, tag, "{}", message);
    }
}
