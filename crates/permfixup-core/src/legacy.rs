//! Permission state captured by the previous permission service.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::flags::LegacyPermissionFlags;
use crate::id::AppId;

/// Last known-good state of one permission for one app id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LegacyPermissionState {
    #[serde(rename = "granted")]
    pub is_granted: bool,
    #[serde(default)]
    pub flags: LegacyPermissionFlags,
}

impl LegacyPermissionState {
    pub fn new(is_granted: bool, flags: LegacyPermissionFlags) -> Self {
        Self { is_granted, flags }
    }

    pub fn granted() -> Self {
        Self::new(true, LegacyPermissionFlags::empty())
    }

    pub fn denied() -> Self {
        Self::new(false, LegacyPermissionFlags::empty())
    }

    /// Whether the user explicitly chose this state.
    pub fn is_user_set(&self) -> bool {
        self.flags.contains(LegacyPermissionFlags::USER_SET)
    }
}

/// Legacy states of one app id, keyed by permission name.
pub type LegacyPermissionStates = BTreeMap<String, LegacyPermissionState>;

/// Legacy states of one user, keyed by app id.
pub type LegacyAppIdPermissionStates = BTreeMap<AppId, LegacyPermissionStates>;
