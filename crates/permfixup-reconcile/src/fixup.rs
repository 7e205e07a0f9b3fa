//! The special runtime permission fixup.

use permfixup_core::{
    AppId, LegacyAppIdPermissionStates, LegacyPermissionStates, SPECIAL_RUNTIME_PERMISSIONS,
    UserId,
};
use permfixup_storage::{AppIdPermissionFlags, DynLegacyProvider, PermissionFlagRecord};
use tracing::{debug, info};

use crate::error::FixupError;
use crate::report::{FixupOutcome, FixupReport, RevokedPermission};
use crate::rule::{is_revocation_candidate, runtime_grant_correction};

/// Resets special runtime permission grants to their last known good state.
///
/// The pass is idempotent: once a runtime grant has been cleared, a later
/// pass finds nothing left to correct. It is not transactional across app
/// ids, but every individual write leaves its record in the final state, so
/// an interrupted pass is completed by running it again.
#[derive(Clone, Default)]
pub struct SpecialRuntimePermissionFixup {
    provider: Option<DynLegacyProvider>,
}

enum LegacyLookup {
    ProviderUnavailable,
    NoLegacyState,
    Found(LegacyAppIdPermissionStates),
}

impl SpecialRuntimePermissionFixup {
    /// Creates a fixup reading legacy state from `provider`.
    ///
    /// `None` stands for an environment where no legacy state provider was
    /// installed; every pass is then a no-op.
    pub fn new(provider: Option<DynLegacyProvider>) -> Self {
        Self { provider }
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Runs the fixup for `user_id` against the user's live flags.
    ///
    /// The caller must hold whatever guard the live store requires for
    /// mutation until this returns.
    ///
    /// # Errors
    ///
    /// Returns `FixupError::Provider` if the legacy state provider fails.
    pub fn maybe_run<S>(&self, flags: &mut S, user_id: UserId) -> Result<FixupOutcome, FixupError>
    where
        S: AppIdPermissionFlags + ?Sized,
    {
        let legacy_states = match self.lookup(user_id)? {
            LegacyLookup::Found(states) => states,
            LegacyLookup::ProviderUnavailable => return Ok(FixupOutcome::ProviderUnavailable),
            LegacyLookup::NoLegacyState => return Ok(FixupOutcome::NoLegacyState),
        };

        let mut report = FixupReport::new(user_id, false);
        for (&app_id, legacy) in &legacy_states {
            debug!(app_id = %app_id, "processing app id");

            let Some(current) = flags.mutate(app_id) else {
                debug!(app_id = %app_id, "no current permission state");
                report.app_ids_missing += 1;
                continue;
            };
            report.app_ids_scanned += 1;

            for permission in SPECIAL_RUNTIME_PERMISSIONS {
                let Some(revoked) = plan_revocation(app_id, permission, legacy, &*current) else {
                    continue;
                };
                current.set(permission, revoked.new_flags);
                debug!(
                    app_id = %app_id,
                    permission = %permission,
                    "revoked runtime grant"
                );
                report.revoked.push(revoked);
            }
        }

        info!(
            user_id = %user_id,
            app_ids_scanned = report.app_ids_scanned,
            app_ids_missing = report.app_ids_missing,
            revoked = report.revoked.len(),
            "special runtime permission fixup finished"
        );

        Ok(FixupOutcome::Completed(report))
    }

    /// Computes what [`maybe_run`](Self::maybe_run) would revoke without
    /// touching the live flags.
    ///
    /// # Errors
    ///
    /// Returns `FixupError::Provider` if the legacy state provider fails.
    pub fn preview<S>(&self, flags: &S, user_id: UserId) -> Result<FixupOutcome, FixupError>
    where
        S: AppIdPermissionFlags + ?Sized,
    {
        let legacy_states = match self.lookup(user_id)? {
            LegacyLookup::Found(states) => states,
            LegacyLookup::ProviderUnavailable => return Ok(FixupOutcome::ProviderUnavailable),
            LegacyLookup::NoLegacyState => return Ok(FixupOutcome::NoLegacyState),
        };

        let mut report = FixupReport::new(user_id, true);
        for (&app_id, legacy) in &legacy_states {
            let Some(current) = flags.get(app_id) else {
                report.app_ids_missing += 1;
                continue;
            };
            report.app_ids_scanned += 1;
            report.revoked.extend(
                SPECIAL_RUNTIME_PERMISSIONS
                    .iter()
                    .filter_map(|permission| plan_revocation(app_id, permission, legacy, current)),
            );
        }

        info!(
            user_id = %user_id,
            app_ids_scanned = report.app_ids_scanned,
            would_revoke = report.revoked.len(),
            "special runtime permission fixup preview finished"
        );

        Ok(FixupOutcome::Completed(report))
    }

    fn lookup(&self, user_id: UserId) -> Result<LegacyLookup, FixupError> {
        let Some(provider) = self.provider.as_ref() else {
            debug!(user_id = %user_id, "no legacy permission state provider installed");
            return Ok(LegacyLookup::ProviderUnavailable);
        };

        debug!(user_id = %user_id, backend = provider.backend_name(), "running for user");

        let has_state = provider
            .has_legacy_permission_state(user_id)
            .map_err(|e| FixupError::provider(provider.backend_name(), e))?;
        if !has_state {
            debug!(user_id = %user_id, "no legacy permission state");
            return Ok(LegacyLookup::NoLegacyState);
        }

        // System packages were never subject to the faulty auto-grant.
        provider
            .get_legacy_permission_states(user_id, true)
            .map(LegacyLookup::Found)
            .map_err(|e| FixupError::provider(provider.backend_name(), e))
    }
}

impl std::fmt::Debug for SpecialRuntimePermissionFixup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpecialRuntimePermissionFixup")
            .field(
                "provider",
                &self.provider.as_ref().map(|provider| provider.backend_name()),
            )
            .finish()
    }
}

/// Decides whether `permission` of `app_id` needs its runtime grant cleared.
fn plan_revocation<R>(
    app_id: AppId,
    permission: &str,
    legacy: &LegacyPermissionStates,
    current: &R,
) -> Option<RevokedPermission>
where
    R: PermissionFlagRecord + ?Sized,
{
    let legacy_state = legacy.get(permission)?;
    debug!(
        app_id = %app_id,
        permission = %permission,
        is_granted = legacy_state.is_granted,
        flags = format_args!("{:#x}", legacy_state.flags.bits()),
        "legacy state"
    );
    if !is_revocation_candidate(legacy_state) {
        return None;
    }

    let current_flags = current.get(permission)?;
    debug!(
        app_id = %app_id,
        permission = %permission,
        flags = format_args!("{:#x}", current_flags.bits()),
        "current flags"
    );

    let new_flags = runtime_grant_correction(legacy_state, current_flags)?;
    Some(RevokedPermission {
        app_id,
        permission: permission.to_string(),
        previous_flags: current_flags,
        new_flags,
    })
}
