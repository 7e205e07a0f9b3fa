//! End-to-end fixup scenarios against the in-memory backend.

use std::sync::Arc;

use permfixup_core::{
    AppId, INTERNET, LegacyPermissionFlags, LegacyPermissionState, OTHER_SENSORS,
    PermissionFlags, UserId,
};
use permfixup_db_memory::{
    AppIdPermissionFlagMap, InMemoryLegacyPermissionStates, InMemoryPermissionStore,
    LegacyPackageState, PermissionFlagMap,
};
use permfixup_reconcile::{FixupOutcome, SpecialRuntimePermissionFixup};

const APP_A: AppId = AppId::new(10057);
const APP_B: AppId = AppId::new(10058);
const APP_C: AppId = AppId::new(10059);
const CAMERA: &str = "android.permission.CAMERA";

/// Bit outside the ones the fixup knows about.
fn other_bit() -> PermissionFlags {
    PermissionFlags::USER_SENSITIVE_WHEN_GRANTED
}

fn fixup(provider: InMemoryLegacyPermissionStates) -> SpecialRuntimePermissionFixup {
    SpecialRuntimePermissionFixup::new(Some(Arc::new(provider)))
}

// =============================================================================
// Reference scenario
// =============================================================================

#[test]
fn test_internet_scenario() {
    let provider = InMemoryLegacyPermissionStates::new()
        .with_package(
            UserId::SYSTEM,
            LegacyPackageState::new("com.example.a", APP_A)
                .with_permission(INTERNET, LegacyPermissionState::denied()),
        )
        .with_package(
            UserId::SYSTEM,
            LegacyPackageState::new("com.example.b", APP_B).with_permission(
                INTERNET,
                LegacyPermissionState::new(false, LegacyPermissionFlags::USER_SET),
            ),
        );
    let mut flags = AppIdPermissionFlagMap::new()
        .with_app_id(
            APP_A,
            PermissionFlagMap::new()
                .with_permission(INTERNET, PermissionFlags::RUNTIME_GRANTED | other_bit()),
        )
        .with_app_id(
            APP_B,
            PermissionFlagMap::new().with_permission(INTERNET, PermissionFlags::RUNTIME_GRANTED),
        );

    let outcome = fixup(provider).maybe_run(&mut flags, UserId::SYSTEM).unwrap();

    assert!(outcome.is_state_modified());
    assert_eq!(flags.flags(APP_A, INTERNET), Some(other_bit()));
    assert_eq!(
        flags.flags(APP_B, INTERNET),
        Some(PermissionFlags::RUNTIME_GRANTED)
    );
}

// =============================================================================
// Idempotence
// =============================================================================

#[test]
fn test_second_run_changes_nothing() {
    let provider = InMemoryLegacyPermissionStates::new().with_package(
        UserId::SYSTEM,
        LegacyPackageState::new("com.example.a", APP_A)
            .with_permission(INTERNET, LegacyPermissionState::denied())
            .with_permission(OTHER_SENSORS, LegacyPermissionState::denied()),
    );
    let fixup = fixup(provider);
    let mut flags = AppIdPermissionFlagMap::new().with_app_id(
        APP_A,
        PermissionFlagMap::new()
            .with_permission(INTERNET, PermissionFlags::RUNTIME_GRANTED)
            .with_permission(OTHER_SENSORS, PermissionFlags::RUNTIME_GRANTED | other_bit()),
    );

    let first = fixup.maybe_run(&mut flags, UserId::SYSTEM).unwrap();
    assert!(first.is_state_modified());
    assert_eq!(first.revoked().len(), 2);
    let after_first = flags.clone();

    let second = fixup.maybe_run(&mut flags, UserId::SYSTEM).unwrap();
    assert!(!second.is_state_modified());
    assert!(second.revoked().is_empty());
    assert_eq!(flags, after_first);
}

// =============================================================================
// Isolation
// =============================================================================

#[test]
fn test_correction_is_isolated() {
    let provider = InMemoryLegacyPermissionStates::new()
        .with_package(
            UserId::SYSTEM,
            LegacyPackageState::new("com.example.a", APP_A)
                .with_permission(INTERNET, LegacyPermissionState::denied())
                .with_permission(OTHER_SENSORS, LegacyPermissionState::granted())
                .with_permission(CAMERA, LegacyPermissionState::denied()),
        )
        .with_package(
            UserId::SYSTEM,
            LegacyPackageState::new("com.example.b", APP_B)
                .with_permission(INTERNET, LegacyPermissionState::granted()),
        );
    let mut flags = AppIdPermissionFlagMap::new()
        .with_app_id(
            APP_A,
            PermissionFlagMap::new()
                .with_permission(INTERNET, PermissionFlags::RUNTIME_GRANTED)
                .with_permission(OTHER_SENSORS, PermissionFlags::RUNTIME_GRANTED)
                .with_permission(CAMERA, PermissionFlags::RUNTIME_GRANTED),
        )
        .with_app_id(
            APP_B,
            PermissionFlagMap::new().with_permission(INTERNET, PermissionFlags::RUNTIME_GRANTED),
        )
        .with_app_id(
            APP_C,
            PermissionFlagMap::new().with_permission(INTERNET, PermissionFlags::RUNTIME_GRANTED),
        );

    let outcome = fixup(provider).maybe_run(&mut flags, UserId::SYSTEM).unwrap();

    assert_eq!(outcome.revoked().len(), 1);
    assert_eq!(flags.flags(APP_A, INTERNET), Some(PermissionFlags::empty()));
    // Everything else stays exactly as it was.
    assert_eq!(
        flags.flags(APP_A, OTHER_SENSORS),
        Some(PermissionFlags::RUNTIME_GRANTED)
    );
    assert_eq!(
        flags.flags(APP_A, CAMERA),
        Some(PermissionFlags::RUNTIME_GRANTED)
    );
    assert_eq!(
        flags.flags(APP_B, INTERNET),
        Some(PermissionFlags::RUNTIME_GRANTED)
    );
    assert_eq!(
        flags.flags(APP_C, INTERNET),
        Some(PermissionFlags::RUNTIME_GRANTED)
    );
}

#[test]
fn test_system_packages_are_excluded() {
    let provider = InMemoryLegacyPermissionStates::new().with_package(
        UserId::SYSTEM,
        LegacyPackageState::new("com.android.shell", APP_A)
            .system()
            .with_permission(INTERNET, LegacyPermissionState::denied()),
    );
    let mut flags = AppIdPermissionFlagMap::new().with_app_id(
        APP_A,
        PermissionFlagMap::new().with_permission(INTERNET, PermissionFlags::RUNTIME_GRANTED),
    );

    let outcome = fixup(provider).maybe_run(&mut flags, UserId::SYSTEM).unwrap();

    assert!(!outcome.is_state_modified());
    assert_eq!(outcome.report().unwrap().app_ids_scanned, 0);
    assert_eq!(
        flags.flags(APP_A, INTERNET),
        Some(PermissionFlags::RUNTIME_GRANTED)
    );
}

#[test]
fn test_already_correct_live_state_is_noop() {
    let provider = InMemoryLegacyPermissionStates::new().with_package(
        UserId::SYSTEM,
        LegacyPackageState::new("com.example.a", APP_A)
            .with_permission(INTERNET, LegacyPermissionState::denied()),
    );
    let mut flags = AppIdPermissionFlagMap::new().with_app_id(
        APP_A,
        PermissionFlagMap::new().with_permission(INTERNET, other_bit()),
    );
    let before = flags.clone();

    let outcome = fixup(provider).maybe_run(&mut flags, UserId::SYSTEM).unwrap();

    assert!(!outcome.is_state_modified());
    assert_eq!(flags, before);
}

// =============================================================================
// Multi-user store
// =============================================================================

#[test]
fn test_store_runs_per_user() {
    let provider = InMemoryLegacyPermissionStates::new()
        .with_package(
            UserId::SYSTEM,
            LegacyPackageState::new("com.example.a", APP_A)
                .with_permission(INTERNET, LegacyPermissionState::denied()),
        )
        .with_package(
            UserId::new(10),
            LegacyPackageState::new("com.example.a", APP_A)
                .with_permission(INTERNET, LegacyPermissionState::granted()),
        );
    let fixup = fixup(provider);

    let store = InMemoryPermissionStore::new();
    for user_id in [UserId::SYSTEM, UserId::new(10), UserId::new(11)] {
        store.insert_user(
            user_id,
            AppIdPermissionFlagMap::new().with_app_id(
                APP_A,
                PermissionFlagMap::new()
                    .with_permission(INTERNET, PermissionFlags::RUNTIME_GRANTED),
            ),
        );
    }

    let mut modified = Vec::new();
    for user_id in store.user_ids() {
        let outcome = store
            .with_user_mut(user_id, |flags| fixup.maybe_run(flags, user_id))
            .unwrap()
            .unwrap();
        if user_id == UserId::new(11) {
            assert_eq!(outcome, FixupOutcome::NoLegacyState);
        }
        modified.push(outcome.is_state_modified());
    }

    assert_eq!(modified, vec![true, false, false]);
    let flags_of = |user_id| {
        store
            .snapshot_user(user_id)
            .and_then(|flags| flags.flags(APP_A, INTERNET))
    };
    assert_eq!(flags_of(UserId::SYSTEM), Some(PermissionFlags::empty()));
    assert_eq!(flags_of(UserId::new(10)), Some(PermissionFlags::RUNTIME_GRANTED));
    assert_eq!(flags_of(UserId::new(11)), Some(PermissionFlags::RUNTIME_GRANTED));
}
