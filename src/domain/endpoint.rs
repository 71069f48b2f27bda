use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::null_default;

/// A deployment target, e.g. an OpenStack tenant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoint {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub description: String,
    pub public: bool,
    pub namespace: String,
    #[serde(deserialize_with = "null_default")]
    pub config: BTreeMap<String, String>,
    #[serde(deserialize_with = "null_default")]
    pub features: BTreeMap<String, String>,
    #[serde(deserialize_with = "null_default")]
    pub inputs: BTreeMap<String, String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}
