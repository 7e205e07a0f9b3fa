//! # permfixup-storage
//!
//! Collaborator contracts for the special runtime permission fixup.
//!
//! This crate defines the traits that the legacy state provider and the live
//! permission store must implement. It does not contain any implementations;
//! those are provided by separate crates such as `permfixup-db-memory`.
//!
//! ## Overview
//!
//! - [`LegacyPermissionStateProvider`] answers whether legacy state exists
//!   for a user and returns it per app id.
//! - [`AppIdPermissionFlags`] is the live, per-user view keyed by app id,
//!   handing out [`PermissionFlagRecord`]s for read-modify-write.

mod error;
mod traits;

pub use error::{ErrorCategory, StorageError};
pub use traits::{AppIdPermissionFlags, LegacyPermissionStateProvider, PermissionFlagRecord};

/// Type alias for a shared legacy state provider.
pub type DynLegacyProvider = std::sync::Arc<dyn LegacyPermissionStateProvider>;
