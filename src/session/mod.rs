//! Authentication session model and persistence.

pub mod store;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use store::SessionStore;

/// Durable device identity. Survives session renewal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIdentity {
    pub phone_id: String,
    pub uuid: String,
    pub client_session_id: String,
    pub advertising_id: String,
    pub android_device_id: String,
}

impl DeviceIdentity {
    /// Generate a new random device identity.
    pub fn generate() -> Self {
        let android = Uuid::new_v4().simple().to_string();
        Self {
            phone_id: Uuid::new_v4().to_string(),
            uuid: Uuid::new_v4().to_string(),
            client_session_id: Uuid::new_v4().to_string(),
            advertising_id: Uuid::new_v4().to_string(),
            android_device_id: format!("android-{}", &android[..16]),
        }
    }
}

/// Serializable authentication state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique per session; a renewal always produces a new one.
    pub id: Uuid,
    pub device: DeviceIdentity,
    #[serde(default)]
    pub authorization: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub cookies: HashMap<String, String>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// A blank session on a brand new device.
    pub fn new() -> Self {
        Self::with_device(DeviceIdentity::generate())
    }

    /// A blank session on a known device.
    pub fn with_device(device: DeviceIdentity) -> Self {
        Self {
            id: Uuid::new_v4(),
            device,
            authorization: None,
            user_id: None,
            cookies: HashMap::new(),
            last_login: None,
            created_at: Utc::now(),
        }
    }

    /// Carry the device identity of `old` forward and drop everything else.
    pub fn renewed_from(old: &Session) -> Self {
        Self::with_device(old.device.clone())
    }

    pub fn is_authorized(&self) -> bool {
        self.authorization.is_some()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
