//! JSON state documents for the live store and the legacy snapshot.
//!
//! Both documents carry a format version. Empty permission names are
//! rejected on load; any other name is kept as is.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use permfixup_core::{UserId, validate_permission_name};
use permfixup_storage::StorageError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::flags::AppIdPermissionFlagMap;
use crate::legacy::LegacyPackageState;

/// Format version written by this crate.
pub const DOCUMENT_VERSION: u32 = 1;

fn default_version() -> u32 {
    DOCUMENT_VERSION
}

/// Serialized live permission flags of every user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LivePermissionDocument {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub users: BTreeMap<UserId, AppIdPermissionFlagMap>,
}

impl Default for LivePermissionDocument {
    fn default() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            users: BTreeMap::new(),
        }
    }
}

impl LivePermissionDocument {
    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        let document: Self = decode(json)?;
        check_version(document.version)?;
        for flags in document.users.values() {
            for (_, record) in flags.iter() {
                for (name, _) in record.iter() {
                    check_permission_name(name)?;
                }
            }
        }
        Ok(document)
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        encode(self)
    }

    pub fn load(path: &Path) -> Result<Self, StorageError> {
        Self::from_json(&read_file(path)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        write_file(path, &self.to_json()?)
    }
}

/// Serialized legacy snapshot: per-user package records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacySnapshotDocument {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub users: BTreeMap<UserId, Vec<LegacyPackageState>>,
}

impl Default for LegacySnapshotDocument {
    fn default() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            users: BTreeMap::new(),
        }
    }
}

impl LegacySnapshotDocument {
    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        let document: Self = decode(json)?;
        check_version(document.version)?;
        for packages in document.users.values() {
            for package in packages {
                if package.package_name.is_empty() {
                    return Err(StorageError::invalid_document(format!(
                        "package with app id {} has an empty name",
                        package.app_id
                    )));
                }
                for name in package.permissions.keys() {
                    check_permission_name(name)?;
                }
            }
        }
        Ok(document)
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        encode(self)
    }

    pub fn load(path: &Path) -> Result<Self, StorageError> {
        Self::from_json(&read_file(path)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        write_file(path, &self.to_json()?)
    }
}

fn decode<T: DeserializeOwned>(json: &str) -> Result<T, StorageError> {
    serde_json::from_str(json).map_err(|e| StorageError::invalid_document(e.to_string()))
}

fn encode<T: Serialize>(value: &T) -> Result<String, StorageError> {
    serde_json::to_string_pretty(value).map_err(|e| StorageError::internal(e.to_string()))
}

fn check_version(version: u32) -> Result<(), StorageError> {
    if version != DOCUMENT_VERSION {
        return Err(StorageError::invalid_document(format!(
            "unsupported document version {version}, expected {DOCUMENT_VERSION}"
        )));
    }
    Ok(())
}

fn check_permission_name(name: &str) -> Result<(), StorageError> {
    validate_permission_name(name).map_err(|e| StorageError::invalid_document(e.to_string()))
}

fn read_file(path: &Path) -> Result<String, StorageError> {
    fs::read_to_string(path)
        .map_err(|e| StorageError::io(format!("failed to read {}: {e}", path.display())))
}

/// Replaces `path` atomically: temp file in the same directory, fsync,
/// rename, then fsync the directory.
fn write_file(path: &Path, contents: &str) -> Result<(), StorageError> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let write_err = |e: std::io::Error| {
        StorageError::io(format!("failed to write {}: {e}", path.display()))
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| {
        StorageError::io(format!("failed to replace {}: {}", path.display(), e.error))
    })?;

    #[cfg(unix)]
    {
        if let Ok(dir) = fs::File::open(dir) {
            let _ = dir.sync_all();
        }
    }

    Ok(())
}
