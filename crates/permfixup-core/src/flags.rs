//! Typed flag bitsets for live and legacy permission state.
//!
//! The live store and the legacy snapshot use unrelated bit layouts, so each
//! gets its own type. Bits without a name are retained as-is: clearing one
//! named flag never disturbs anything else in the word.

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Flags of a permission in the live permission store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionFlags(u32);

bitflags! {
    impl PermissionFlags: u32 {
        const INSTALL_GRANTED = 1 << 0;
        const INSTALL_REVOKED = 1 << 1;
        const PROTECTION_GRANTED = 1 << 2;
        const ROLE = 1 << 3;
        /// Granted through the runtime (dangerous permission) grant path.
        const RUNTIME_GRANTED = 1 << 4;
        const USER_SET = 1 << 5;
        const USER_FIXED = 1 << 6;
        const POLICY_FIXED = 1 << 7;
        const SYSTEM_FIXED = 1 << 8;
        const PREGRANT = 1 << 9;
        const LEGACY_GRANTED = 1 << 10;
        const IMPLICIT_GRANTED = 1 << 11;
        const IMPLICIT = 1 << 12;
        const USER_SENSITIVE_WHEN_GRANTED = 1 << 13;
        const USER_SENSITIVE_WHEN_REVOKED = 1 << 14;
        const INSTALLER_EXEMPT = 1 << 15;
        const SYSTEM_EXEMPT = 1 << 16;
        const UPGRADE_EXEMPT = 1 << 17;
        const RESTRICTION_REVOKED = 1 << 18;
        const SOFT_RESTRICTED = 1 << 19;
        const APP_OP_REVOKED = 1 << 20;
        const ONE_TIME = 1 << 21;
        const HIBERNATION = 1 << 22;
        const USER_SELECTED = 1 << 23;
    }
}

/// Flags of a permission as recorded by the previous permission service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LegacyPermissionFlags(u32);

bitflags! {
    impl LegacyPermissionFlags: u32 {
        /// The user explicitly changed the grant state.
        const USER_SET = 1 << 0;
        const USER_FIXED = 1 << 1;
        const POLICY_FIXED = 1 << 2;
        const REVOKE_ON_UPGRADE = 1 << 3;
        const SYSTEM_FIXED = 1 << 4;
        const GRANTED_BY_DEFAULT = 1 << 5;
        const REVIEW_REQUIRED = 1 << 6;
        const REVOKE_WHEN_REQUESTED = 1 << 7;
        const USER_SENSITIVE_WHEN_GRANTED = 1 << 8;
        const USER_SENSITIVE_WHEN_DENIED = 1 << 9;
        const RESTRICTION_INSTALLER_EXEMPT = 1 << 11;
        const RESTRICTION_SYSTEM_EXEMPT = 1 << 12;
        const RESTRICTION_UPGRADE_EXEMPT = 1 << 13;
        const APPLY_RESTRICTION = 1 << 14;
        const GRANTED_BY_ROLE = 1 << 15;
        const ONE_TIME = 1 << 16;
        const AUTO_REVOKED = 1 << 17;
    }
}

impl PermissionFlags {
    /// Returns a copy of these flags with `other` cleared.
    #[must_use]
    pub fn without(self, other: Self) -> Self {
        self.difference(other)
    }
}

fn write_names<'a>(
    f: &mut fmt::Formatter<'_>,
    names: impl Iterator<Item = &'a str>,
    remaining: u32,
) -> fmt::Result {
    let mut first = true;
    for name in names {
        if !first {
            f.write_str(" | ")?;
        }
        f.write_str(name)?;
        first = false;
    }
    if remaining != 0 {
        if !first {
            f.write_str(" | ")?;
        }
        write!(f, "{remaining:#x}")?;
        first = false;
    }
    if first {
        f.write_str("0")?;
    }
    Ok(())
}

impl fmt::Display for PermissionFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.iter_names();
        let names: Vec<&str> = iter.by_ref().map(|(name, _)| name).collect();
        write_names(f, names.into_iter(), iter.remaining().bits())
    }
}

impl fmt::Display for LegacyPermissionFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.iter_names();
        let names: Vec<&str> = iter.by_ref().map(|(name, _)| name).collect();
        write_names(f, names.into_iter(), iter.remaining().bits())
    }
}
