use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub uid: String,
    pub email: String,
    pub admin: bool,
    #[serde(rename = "super")]
    pub super_user: bool,
    pub kind: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl User {
    /// Copy safe to print: the password hash is replaced by a mask.
    pub fn masked(&self) -> Self {
        Self {
            password: "*****".to_string(),
            ..self.clone()
        }
    }
}
