//! Plain map implementations of the live permission flag view.

use std::collections::BTreeMap;

use permfixup_core::{AppId, PermissionFlags};
use permfixup_storage::{AppIdPermissionFlags, PermissionFlagRecord};
use serde::{Deserialize, Serialize};

/// Permission flags of one app id, keyed by permission name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionFlagMap {
    permissions: BTreeMap<String, PermissionFlags>,
}

impl PermissionFlagMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mainly for fixtures.
    #[must_use]
    pub fn with_permission(mut self, name: impl Into<String>, flags: PermissionFlags) -> Self {
        self.permissions.insert(name.into(), flags);
        self
    }

    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, PermissionFlags)> {
        self.permissions
            .iter()
            .map(|(name, flags)| (name.as_str(), *flags))
    }
}

impl PermissionFlagRecord for PermissionFlagMap {
    fn get(&self, permission_name: &str) -> Option<PermissionFlags> {
        self.permissions.get(permission_name).copied()
    }

    fn set(&mut self, permission_name: &str, flags: PermissionFlags) {
        match self.permissions.get_mut(permission_name) {
            Some(existing) => *existing = flags,
            None => {
                self.permissions.insert(permission_name.to_string(), flags);
            }
        }
    }
}

/// Live permission flags of one user, keyed by app id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppIdPermissionFlagMap {
    app_ids: BTreeMap<AppId, PermissionFlagMap>,
}

impl AppIdPermissionFlagMap {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_app_id(mut self, app_id: AppId, record: PermissionFlagMap) -> Self {
        self.app_ids.insert(app_id, record);
        self
    }

    pub fn insert(&mut self, app_id: AppId, record: PermissionFlagMap) -> Option<PermissionFlagMap> {
        self.app_ids.insert(app_id, record)
    }

    pub fn contains(&self, app_id: AppId) -> bool {
        self.app_ids.contains_key(&app_id)
    }

    pub fn len(&self) -> usize {
        self.app_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.app_ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AppId, &PermissionFlagMap)> {
        self.app_ids.iter().map(|(app_id, record)| (*app_id, record))
    }

    /// Flags of one (app id, permission) pair, if both exist.
    pub fn flags(&self, app_id: AppId, permission_name: &str) -> Option<PermissionFlags> {
        self.app_ids.get(&app_id)?.get(permission_name)
    }
}

impl AppIdPermissionFlags for AppIdPermissionFlagMap {
    type Record = PermissionFlagMap;

    fn get(&self, app_id: AppId) -> Option<&PermissionFlagMap> {
        self.app_ids.get(&app_id)
    }

    fn mutate(&mut self, app_id: AppId) -> Option<&mut PermissionFlagMap> {
        self.app_ids.get_mut(&app_id)
    }
}
