use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{null_default, null_default_values};

/// Fields shared by recipes, templates and applications.
///
/// The service returns many more attributes (scripts, template bodies,
/// recipe lists); they are kept verbatim in `extra` so `show` can print them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub public: bool,
    pub namespace: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

pub type Recipe = CatalogItem;
pub type Template = CatalogItem;
pub type Application = CatalogItem;

/// Input name -> human readable label.
pub type InputLabels = BTreeMap<String, String>;

/// Input name -> candidate default values.
pub type InputDefaults = BTreeMap<String, Vec<String>>;

/// Inputs an application needs before it can be run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppInputs {
    #[serde(deserialize_with = "null_default")]
    pub template: InputLabels,
    #[serde(deserialize_with = "null_default")]
    pub recipes: InputLabels,
    /// Keyed by endpoint *name*.
    #[serde(deserialize_with = "null_default_values")]
    pub endpoints: BTreeMap<String, InputLabels>,
    #[serde(deserialize_with = "null_default_values")]
    pub defaults: InputDefaults,
}

impl AppInputs {
    pub fn endpoint_inputs(&self, endpoint_name: &str) -> Option<&InputLabels> {
        self.endpoints.get(endpoint_name)
    }
}
