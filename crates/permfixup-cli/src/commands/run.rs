use std::path::Path;

use anyhow::{Context, Result};
use permfixup_core::UserId;
use permfixup_db_memory::{
    InMemoryPermissionStore, LegacySnapshotDocument, LivePermissionDocument,
    create_legacy_provider,
};
use permfixup_reconcile::SpecialRuntimePermissionFixup;
use tracing::info;

use crate::cli::RunArgs;
use crate::config::Settings;
use crate::output::{self, UserResult};

/// What a `run` invocation did.
#[derive(Debug)]
pub struct RunSummary {
    pub results: Vec<UserResult>,
    pub unknown_users: Vec<UserId>,
    pub saved: bool,
}

pub fn run(settings: &Settings, args: &RunArgs) -> Result<()> {
    let summary = execute(
        settings.legacy_snapshot()?,
        settings.live_state()?,
        &args.users,
        args.dry_run,
    )?;

    for user_id in &summary.unknown_users {
        output::print_warning(&format!("User {user_id} has no live permission state, skipped"));
    }
    output::print_results(&summary.results, settings.format)?;
    if summary.saved {
        output::print_success(&format!(
            "Live state written to {}",
            settings.live_state()?.display()
        ));
    }
    Ok(())
}

/// Loads both documents, reconciles `users` (or every live user when empty)
/// and writes the live document back if anything was revoked.
pub fn execute(
    legacy_path: &Path,
    live_path: &Path,
    users: &[UserId],
    dry_run: bool,
) -> Result<RunSummary> {
    let snapshot = LegacySnapshotDocument::load(legacy_path)
        .with_context(|| format!("Cannot load legacy snapshot {}", legacy_path.display()))?;
    let live = LivePermissionDocument::load(live_path)
        .with_context(|| format!("Cannot load live state {}", live_path.display()))?;

    let fixup = SpecialRuntimePermissionFixup::new(Some(create_legacy_provider(snapshot)));
    let store = InMemoryPermissionStore::from_document(live);

    let users = if users.is_empty() {
        store.user_ids()
    } else {
        users.to_vec()
    };

    let mut results = Vec::with_capacity(users.len());
    let mut unknown_users = Vec::new();
    for user_id in users {
        let outcome = if dry_run {
            store.with_user(user_id, |flags| fixup.preview(flags, user_id))
        } else {
            store.with_user_mut(user_id, |flags| fixup.maybe_run(flags, user_id))
        };

        match outcome.transpose()? {
            Some(result) => results.push(UserResult { user_id, result }),
            None => unknown_users.push(user_id),
        }
    }

    let modified = results.iter().any(|entry| entry.result.is_state_modified());
    if modified {
        store
            .to_document()
            .save(live_path)
            .with_context(|| format!("Cannot write live state {}", live_path.display()))?;
        info!(path = %live_path.display(), "live permission state written");
    }

    Ok(RunSummary {
        results,
        unknown_users,
        saved: modified,
    })
}
