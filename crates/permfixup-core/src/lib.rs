pub mod error;
pub mod flags;
pub mod id;
pub mod legacy;
pub mod permission;

pub use error::{CoreError, ErrorCategory, Result};
pub use flags::{LegacyPermissionFlags, PermissionFlags};
pub use id::{AppId, UserId};
pub use legacy::{LegacyAppIdPermissionStates, LegacyPermissionState, LegacyPermissionStates};
pub use permission::{
    INTERNET, OTHER_SENSORS, SPECIAL_RUNTIME_PERMISSIONS, is_special_runtime_permission,
    validate_permission_name,
};
