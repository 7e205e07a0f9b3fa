use permfixup_core::{AppId, PermissionFlags, UserId};
use serde::Serialize;

/// A runtime grant cleared (or, in a preview, to be cleared) by the fixup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevokedPermission {
    pub app_id: AppId,
    pub permission: String,
    pub previous_flags: PermissionFlags,
    pub new_flags: PermissionFlags,
}

/// Result of reconciling one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixupReport {
    pub user_id: UserId,
    /// `true` when produced by a preview; nothing was written.
    pub dry_run: bool,
    /// Legacy app ids that also exist in the live store.
    pub app_ids_scanned: usize,
    /// Legacy app ids with no live record, skipped.
    pub app_ids_missing: usize,
    pub revoked: Vec<RevokedPermission>,
}

impl FixupReport {
    pub fn new(user_id: UserId, dry_run: bool) -> Self {
        Self {
            user_id,
            dry_run,
            app_ids_scanned: 0,
            app_ids_missing: 0,
            revoked: Vec::new(),
        }
    }

    /// Whether the live store was changed by this pass.
    pub fn is_state_modified(&self) -> bool {
        !self.dry_run && !self.revoked.is_empty()
    }
}

/// How a fixup pass for one user ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FixupOutcome {
    /// No legacy permission state provider is installed.
    ProviderUnavailable,
    /// The provider has no legacy state for the user.
    NoLegacyState,
    /// The legacy state was reconciled against the live store.
    Completed(FixupReport),
}

impl FixupOutcome {
    /// Whether the live store was changed.
    pub fn is_state_modified(&self) -> bool {
        match self {
            Self::Completed(report) => report.is_state_modified(),
            Self::ProviderUnavailable | Self::NoLegacyState => false,
        }
    }

    pub fn report(&self) -> Option<&FixupReport> {
        match self {
            Self::Completed(report) => Some(report),
            Self::ProviderUnavailable | Self::NoLegacyState => None,
        }
    }

    pub fn revoked(&self) -> &[RevokedPermission] {
        self.report()
            .map(|report| report.revoked.as_slice())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use permfixup_core::INTERNET;

    fn revoked() -> RevokedPermission {
        RevokedPermission {
            app_id: AppId::new(10057),
            permission: INTERNET.to_string(),
            previous_flags: PermissionFlags::RUNTIME_GRANTED,
            new_flags: PermissionFlags::empty(),
        }
    }

    #[test]
    fn test_preview_never_reports_modification() {
        let mut report = FixupReport::new(UserId::SYSTEM, true);
        report.revoked.push(revoked());
        assert!(!report.is_state_modified());

        let mut report = FixupReport::new(UserId::SYSTEM, false);
        assert!(!report.is_state_modified());
        report.revoked.push(revoked());
        assert!(report.is_state_modified());
    }

    #[test]
    fn test_noop_outcomes() {
        assert!(!FixupOutcome::ProviderUnavailable.is_state_modified());
        assert!(FixupOutcome::NoLegacyState.report().is_none());
        assert!(FixupOutcome::NoLegacyState.revoked().is_empty());
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(FixupOutcome::NoLegacyState).unwrap();
        assert_eq!(json, serde_json::json!({"status": "no_legacy_state"}));

        let mut report = FixupReport::new(UserId::SYSTEM, false);
        report.revoked.push(revoked());
        let json = serde_json::to_value(FixupOutcome::Completed(report)).unwrap();
        assert_eq!(json["status"], "completed");
        assert_eq!(json["revoked"][0]["permission"], INTERNET);
        assert_eq!(json["revoked"][0]["previous_flags"], 16);
    }
}
