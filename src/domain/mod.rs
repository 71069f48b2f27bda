pub mod catalog;
pub mod endpoint;
pub mod namespace;
pub mod run;
pub mod user;

pub use catalog::*;
pub use endpoint::*;
pub use namespace::*;
pub use run::*;
pub use user::*;

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

/// The service encodes empty lists and maps as `null`.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Like [`null_default`], also for each value of the map.
pub(crate) fn null_default_values<'de, D, V>(
    deserializer: D,
) -> Result<BTreeMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de> + Default,
{
    let map = Option::<BTreeMap<String, Option<V>>>::deserialize(deserializer)?;
    Ok(map
        .unwrap_or_default()
        .into_iter()
        .map(|(k, v)| (k, v.unwrap_or_default()))
        .collect())
}
