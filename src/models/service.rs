//! Emergency service model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyService {
    pub id: i64,
    pub name: String,
    pub service_type: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub is_24x7: bool,
    /// 1 is the most urgent, 3 the least
    #[serde(default)]
    pub priority_level: Option<u8>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Response of the emergency contacts listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactsResponse {
    pub contacts: Vec<EmergencyService>,
}
