//! In-memory permission state backend for permfixup.
//!
//! This crate provides in-memory implementations of the collaborator traits
//! from `permfixup-storage`:
//!
//! - [`AppIdPermissionFlagMap`] is a user's live flag view,
//!   [`InMemoryPermissionStore`] holds one per user behind a `DashMap`.
//! - [`InMemoryLegacyPermissionStates`] answers legacy state queries from
//!   per-package records.
//!
//! Both can be loaded from and saved to JSON documents.
//!
//! # Example
//!
//! ```ignore
//! use permfixup_db_memory::{InMemoryPermissionStore, LivePermissionDocument};
//!
//! let store = InMemoryPermissionStore::from_document(LivePermissionDocument::load(path)?);
//! store.with_user_mut(UserId::SYSTEM, |flags| {
//!     // read-modify-write under the user's guard
//! });
//! ```

pub mod document;
pub mod flags;
pub mod legacy;
pub mod store;

pub use document::{DOCUMENT_VERSION, LegacySnapshotDocument, LivePermissionDocument};
pub use flags::{AppIdPermissionFlagMap, PermissionFlagMap};
pub use legacy::{InMemoryLegacyPermissionStates, LegacyPackageState};
pub use store::InMemoryPermissionStore;

// Re-export the collaborator traits for convenience
pub use permfixup_storage::{
    AppIdPermissionFlags, LegacyPermissionStateProvider, PermissionFlagRecord, StorageError,
};

/// Creates a shareable legacy provider from a snapshot document.
pub fn create_legacy_provider(
    document: LegacySnapshotDocument,
) -> permfixup_storage::DynLegacyProvider {
    std::sync::Arc::new(InMemoryLegacyPermissionStates::from_document(document))
}
