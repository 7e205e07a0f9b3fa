//! Collaborator traits consumed by the fixup.
//!
//! Neither the legacy state provider nor the live permission store is owned
//! by the fixup. It only reads the former and borrows a mutable view of the
//! latter for one user.

use permfixup_core::{AppId, LegacyAppIdPermissionStates, PermissionFlags, UserId};

use crate::error::StorageError;

/// Source of permission state captured by the previous permission service.
///
/// Implementations must be thread-safe (`Send + Sync`) because a single
/// provider instance is shared by every caller that runs the fixup.
///
/// # Example
///
/// ```ignore
/// use permfixup_storage::{LegacyPermissionStateProvider, StorageError};
///
/// fn count_app_ids(
///     provider: &dyn LegacyPermissionStateProvider,
///     user_id: UserId,
/// ) -> Result<usize, StorageError> {
///     if !provider.has_legacy_permission_state(user_id)? {
///         return Ok(0);
///     }
///     Ok(provider.get_legacy_permission_states(user_id, true)?.len())
/// }
/// ```
pub trait LegacyPermissionStateProvider: Send + Sync {
    /// Returns whether any legacy state was captured for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues, not for a user
    /// without legacy state.
    fn has_legacy_permission_state(&self, user_id: UserId) -> Result<bool, StorageError>;

    /// Returns the legacy permission states of `user_id`, keyed by app id.
    ///
    /// When `exclude_system_packages` is set, states contributed by system
    /// packages are left out.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::UserNotFound` if no legacy state exists for the
    /// user, and other variants for infrastructure issues.
    fn get_legacy_permission_states(
        &self,
        user_id: UserId,
        exclude_system_packages: bool,
    ) -> Result<LegacyAppIdPermissionStates, StorageError>;

    /// Returns the name of this provider for logging/debugging.
    fn backend_name(&self) -> &'static str;
}

/// Mutable permission flags of a single app id.
pub trait PermissionFlagRecord {
    /// Returns the flags of `permission_name`, or `None` if the app id has
    /// no record for that permission.
    fn get(&self, permission_name: &str) -> Option<PermissionFlags>;

    /// Replaces the flags of `permission_name`.
    fn set(&mut self, permission_name: &str, flags: PermissionFlags);
}

/// Live permission flags of one user, keyed by app id.
///
/// The caller is responsible for holding whatever guard the backing store
/// needs between a `get` and the following `set`.
pub trait AppIdPermissionFlags {
    type Record: PermissionFlagRecord;

    /// Returns the record of `app_id` for reading.
    fn get(&self, app_id: AppId) -> Option<&Self::Record>;

    /// Returns the record of `app_id` for in-place mutation.
    ///
    /// Returns `None` if the app id is not present; a record is never created
    /// by this call.
    fn mutate(&mut self, app_id: AppId) -> Option<&mut Self::Record>;
}
