use permfixup_core::{LegacyPermissionState, PermissionFlags};

/// Whether the legacy state allows a runtime grant to be revoked.
///
/// Only permissions that were not granted and not explicitly set by the user
/// can have been affected by the faulty auto-grant.
pub fn is_revocation_candidate(legacy: &LegacyPermissionState) -> bool {
    !legacy.is_granted && !legacy.is_user_set()
}

/// Corrected live flags for one permission, or `None` if nothing changes.
///
/// The correction only ever clears `RUNTIME_GRANTED`; every other bit of
/// `current` is carried over.
pub fn runtime_grant_correction(
    legacy: &LegacyPermissionState,
    current: PermissionFlags,
) -> Option<PermissionFlags> {
    if !is_revocation_candidate(legacy) || !current.contains(PermissionFlags::RUNTIME_GRANTED) {
        return None;
    }
    Some(current.without(PermissionFlags::RUNTIME_GRANTED))
}
