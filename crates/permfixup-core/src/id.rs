//! Integer identities for apps and users.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Shared Linux-level application identity.
///
/// Several installed packages may share one app id. It is only ever used as a
/// lookup key into the live flag store and the legacy snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(u32);

impl AppId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for AppId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AppId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|_| CoreError::invalid_app_id(s))
    }
}

/// User whose permission state is being reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u32);

impl UserId {
    /// The primary device user.
    pub const SYSTEM: UserId = UserId(0);

    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for UserId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|_| CoreError::invalid_user_id(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_parse_ids() {
        assert_eq!("10057".parse::<AppId>().unwrap(), AppId::new(10057));
        assert_eq!(" 10 ".parse::<UserId>().unwrap(), UserId::new(10));
        assert!("-1".parse::<AppId>().is_err());
        assert!("ten".parse::<UserId>().is_err());
    }

    #[test]
    fn test_ids_as_json_map_keys() {
        let mut map = BTreeMap::new();
        map.insert(AppId::new(10001), true);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"10001":true}"#);

        let back: BTreeMap<AppId, bool> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get(&AppId::new(10001)), Some(&true));
    }
}
