//! Permission names handled by the fixup.

use crate::error::{CoreError, Result};

pub const INTERNET: &str = "android.permission.INTERNET";
pub const OTHER_SENSORS: &str = "android.permission.OTHER_SENSORS";

/// Special runtime permissions whose auto-grant ran on app updates.
///
/// This list is deliberately fixed. It must not be replaced with whatever the
/// permission service currently reports as "special runtime", because that
/// set may grow while only these two were affected.
pub const SPECIAL_RUNTIME_PERMISSIONS: [&str; 2] = [INTERNET, OTHER_SENSORS];

pub fn is_special_runtime_permission(name: &str) -> bool {
    SPECIAL_RUNTIME_PERMISSIONS.contains(&name)
}

/// Reject names that can never match a permission record. Names are
/// otherwise opaque.
pub fn validate_permission_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(CoreError::invalid_permission_name(name));
    }
    Ok(())
}
