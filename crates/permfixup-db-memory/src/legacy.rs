//! In-memory legacy permission state provider.
//!
//! The previous permission service recorded state per package. Packages that
//! share an app id are folded together when the provider answers per app id.

use std::collections::BTreeMap;

use permfixup_core::{
    AppId, LegacyAppIdPermissionStates, LegacyPermissionState, LegacyPermissionStates, UserId,
};
use permfixup_storage::{LegacyPermissionStateProvider, StorageError};
use serde::{Deserialize, Serialize};

use crate::document::LegacySnapshotDocument;

/// Legacy permission state of one installed package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyPackageState {
    pub package_name: String,
    pub app_id: AppId,
    /// Whether the package was part of the system image.
    #[serde(default)]
    pub system: bool,
    #[serde(default)]
    pub permissions: LegacyPermissionStates,
}

impl LegacyPackageState {
    pub fn new(package_name: impl Into<String>, app_id: AppId) -> Self {
        Self {
            package_name: package_name.into(),
            app_id,
            system: false,
            permissions: LegacyPermissionStates::new(),
        }
    }

    #[must_use]
    pub fn system(mut self) -> Self {
        self.system = true;
        self
    }

    #[must_use]
    pub fn with_permission(
        mut self,
        name: impl Into<String>,
        state: LegacyPermissionState,
    ) -> Self {
        self.permissions.insert(name.into(), state);
        self
    }
}

/// Legacy state provider backed by per-user package records held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLegacyPermissionStates {
    users: BTreeMap<UserId, Vec<LegacyPackageState>>,
}

impl InMemoryLegacyPermissionStates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_document(document: LegacySnapshotDocument) -> Self {
        Self {
            users: document.users,
        }
    }

    pub fn to_document(&self) -> LegacySnapshotDocument {
        LegacySnapshotDocument {
            users: self.users.clone(),
            ..LegacySnapshotDocument::default()
        }
    }

    /// Records `package` for `user_id`. Registering a user with no packages
    /// still counts as having legacy state.
    pub fn add_package(&mut self, user_id: UserId, package: LegacyPackageState) {
        self.users.entry(user_id).or_default().push(package);
    }

    #[must_use]
    pub fn with_package(mut self, user_id: UserId, package: LegacyPackageState) -> Self {
        self.add_package(user_id, package);
        self
    }

    #[must_use]
    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.users.entry(user_id).or_default();
        self
    }
}

impl LegacyPermissionStateProvider for InMemoryLegacyPermissionStates {
    fn has_legacy_permission_state(&self, user_id: UserId) -> Result<bool, StorageError> {
        Ok(self.users.contains_key(&user_id))
    }

    fn get_legacy_permission_states(
        &self,
        user_id: UserId,
        exclude_system_packages: bool,
    ) -> Result<LegacyAppIdPermissionStates, StorageError> {
        let packages = self
            .users
            .get(&user_id)
            .ok_or_else(|| StorageError::user_not_found(user_id))?;

        let mut states = LegacyAppIdPermissionStates::new();
        for package in packages {
            if exclude_system_packages && package.system {
                continue;
            }
            let app_states = states.entry(package.app_id).or_default();
            for (name, state) in &package.permissions {
                // Shared app id: the first package that recorded a permission wins.
                app_states.entry(name.clone()).or_insert(*state);
            }
        }
        Ok(states)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
