use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::null_default;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Run {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
    /// Unix seconds.
    #[serde(skip_serializing_if = "is_zero")]
    pub start: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub end: i64,
    pub namespace: String,
    pub endpoint: String,
    #[serde(rename = "appID")]
    pub app_id: String,
    #[serde(deserialize_with = "null_default")]
    pub inputs: BTreeMap<String, String>,
    #[serde(deserialize_with = "null_default")]
    pub sensitive_inputs: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub deployment: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

fn is_zero(v: &i64) -> bool {
    *v == 0
}

impl Run {
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        unix_time(self.start)
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        unix_time(self.end)
    }

    pub fn is_deployed(&self) -> bool {
        !self.deployment.is_empty()
    }
}

fn unix_time(secs: i64) -> Option<DateTime<Utc>> {
    if secs <= 0 {
        return None;
    }
    Utc.timestamp_opt(secs, 0).single()
}
