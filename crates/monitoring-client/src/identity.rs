//! Ambient application identity.

/// Provides the running application's own name.
///
/// Used as the registration name when `MyMonitoringName` is not configured.
/// Injected rather than looked up globally so the registration flow stays
/// testable without process-wide state.
pub trait AppIdentity: Send + Sync {
    /// Name the running application reports for itself.
    fn application_name(&self) -> String;
}

/// Identity derived from the current executable's file name.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessIdentity;

impl AppIdentity for ProcessIdentity {
    fn application_name(&self) -> String {
        std::env::current_exe()
            .ok()
            .and_then(|path| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "unknown".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_identity_resolves_a_name() {
        let name = ProcessIdentity.application_name();
        assert!(!name.is_empty());
    }
}
