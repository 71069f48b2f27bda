use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::null_default;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Namespace {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub owners: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub members: Vec<String>,
    pub freeze: bool,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Namespace {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn add_owner(&mut self, user: &str) {
        add_to_list(&mut self.owners, user);
    }

    pub fn add_member(&mut self, user: &str) {
        add_to_list(&mut self.members, user);
    }

    pub fn remove_owner(&mut self, user: &str) {
        remove_from_list(&mut self.owners, user);
    }

    pub fn remove_member(&mut self, user: &str) {
        remove_from_list(&mut self.members, user);
    }
}

/// Appends `user` unless already present.
fn add_to_list(list: &mut Vec<String>, user: &str) {
    if !list.iter().any(|u| u == user) {
        list.push(user.to_string());
    }
}

fn remove_from_list(list: &mut Vec<String>, user: &str) {
    if let Some(pos) = list.iter().position(|u| u == user) {
        list.remove(pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_owner_skips_duplicates() {
        let mut ns = Namespace::named("team");
        ns.add_owner("alice");
        ns.add_owner("bob");
        ns.add_owner("alice");

        assert_eq!(ns.owners, vec!["alice", "bob"]);
    }

    #[test]
    fn remove_member_missing_is_noop() {
        let mut ns = Namespace::named("team");
        ns.add_member("alice");
        ns.remove_member("carol");
        assert_eq!(ns.members, vec!["alice"]);

        ns.remove_member("alice");
        assert!(ns.members.is_empty());
    }

    #[test]
    fn unknown_fields_survive_roundtrip() {
        let ns: Namespace = serde_json::from_str(
            r#"{"id":"5d1f","name":"genouest","owners":["admin"],"freeze":true,"quota":3}"#,
        )
        .expect("parse namespace");

        assert_eq!(ns.id, "5d1f");
        assert!(ns.freeze);
        assert!(ns.members.is_empty());
        assert_eq!(ns.extra.get("quota"), Some(&serde_json::json!(3)));

        let back = serde_json::to_value(&ns).expect("serialize namespace");
        assert_eq!(back["quota"], serde_json::json!(3));
    }

    #[test]
    fn null_lists_decode_empty() {
        let ns: Namespace = serde_json::from_str(
            r#"{"id":"n1","name":"team","owners":["alice"],"members":null,"freeze":false}"#,
        )
        .expect("parse namespace");

        assert_eq!(ns.owners, vec!["alice"]);
        assert!(ns.members.is_empty());
        assert!(ns.extra.is_empty());
    }
}
