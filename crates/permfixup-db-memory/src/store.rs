use dashmap::DashMap;
use permfixup_core::UserId;

use crate::document::LivePermissionDocument;
use crate::flags::AppIdPermissionFlagMap;

/// Process-wide live permission store holding every user's flags.
///
/// Each user's view sits behind its own `DashMap` shard guard, so a fixup
/// pass over one user holds exclusive access to that user's records for the
/// whole read-modify-write sequence while other users stay available.
#[derive(Debug, Default)]
pub struct InMemoryPermissionStore {
    users: DashMap<UserId, AppIdPermissionFlagMap>,
}

impl InMemoryPermissionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
        }
    }

    /// Creates a store populated from a live state document.
    pub fn from_document(document: LivePermissionDocument) -> Self {
        let store = Self::new();
        for (user_id, flags) in document.users {
            store.users.insert(user_id, flags);
        }
        store
    }

    /// Captures the current state of every user as a document.
    pub fn to_document(&self) -> LivePermissionDocument {
        let mut document = LivePermissionDocument::default();
        for entry in self.users.iter() {
            document.users.insert(*entry.key(), entry.value().clone());
        }
        document
    }

    /// Replaces the flags of `user_id`, returning the previous ones.
    pub fn insert_user(
        &self,
        user_id: UserId,
        flags: AppIdPermissionFlagMap,
    ) -> Option<AppIdPermissionFlagMap> {
        self.users.insert(user_id, flags)
    }

    pub fn contains_user(&self, user_id: UserId) -> bool {
        self.users.contains_key(&user_id)
    }

    /// Known users in ascending order.
    pub fn user_ids(&self) -> Vec<UserId> {
        let mut ids: Vec<UserId> = self.users.iter().map(|entry| *entry.key()).collect();
        ids.sort();
        ids
    }

    /// Runs `f` with shared access to the flags of `user_id`.
    pub fn with_user<R>(
        &self,
        user_id: UserId,
        f: impl FnOnce(&AppIdPermissionFlagMap) -> R,
    ) -> Option<R> {
        self.users.get(&user_id).map(|entry| f(entry.value()))
    }

    /// Runs `f` with exclusive access to the flags of `user_id`.
    ///
    /// The guard is held until `f` returns. Returns `None` if the user is not
    /// present.
    pub fn with_user_mut<R>(
        &self,
        user_id: UserId,
        f: impl FnOnce(&mut AppIdPermissionFlagMap) -> R,
    ) -> Option<R> {
        self.users
            .get_mut(&user_id)
            .map(|mut entry| f(entry.value_mut()))
    }

    /// Clones the current flags of `user_id`.
    pub fn snapshot_user(&self, user_id: UserId) -> Option<AppIdPermissionFlagMap> {
        self.with_user(user_id, |flags| flags.clone())
    }
}
