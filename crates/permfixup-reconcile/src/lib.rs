//! Reconciliation of live permission flags against legacy permission state.
//!
//! Early releases of the reworked permission service re-ran auto-grants of
//! special runtime permissions (`INTERNET`, `OTHER_SENSORS`) when user apps
//! were updated, instead of only at initial install. The fixup in this crate
//! resets those grants to the last known good state recorded by the previous
//! permission service.
//!
//! # Example
//!
//! ```ignore
//! use permfixup_reconcile::SpecialRuntimePermissionFixup;
//!
//! let fixup = SpecialRuntimePermissionFixup::new(Some(provider));
//! let outcome = store
//!     .with_user_mut(user_id, |flags| fixup.maybe_run(flags, user_id))
//!     .transpose()?;
//! ```

mod error;
mod fixup;
mod report;
mod rule;

pub use error::FixupError;
pub use fixup::SpecialRuntimePermissionFixup;
pub use report::{FixupOutcome, FixupReport, RevokedPermission};
pub use rule::{is_revocation_candidate, runtime_grant_correction};
