//! Rendering of service objects for the terminal.

use comfy_table::{Cell, Color, Table};
use serde::Serialize;

use crate::domain::*;

const UNSET: &str = "-";

fn table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_header(header.to_vec());
    table
}

pub fn namespaces_table(namespaces: &[Namespace]) -> String {
    let mut t = table(&["ID", "Name", "Owners", "Frozen"]);
    for ns in namespaces {
        t.add_row(vec![
            Cell::new(&ns.id),
            Cell::new(&ns.name),
            Cell::new(ns.owners.join(",")),
            Cell::new(ns.freeze),
        ]);
    }
    t.to_string()
}

pub fn endpoints_table(endpoints: &[Endpoint]) -> String {
    let mut t = table(&["ID", "Name", "Kind", "Public", "Namespace"]);
    for ep in endpoints {
        t.add_row(vec![
            Cell::new(&ep.id),
            Cell::new(&ep.name),
            Cell::new(&ep.kind),
            Cell::new(ep.public),
            Cell::new(&ep.namespace),
        ]);
    }
    t.to_string()
}

/// Recipes, templates and applications share one layout.
pub fn catalog_table(items: &[CatalogItem]) -> String {
    let mut t = table(&["ID", "Name", "Description", "Public", "Namespace"]);
    for item in items {
        t.add_row(vec![
            Cell::new(&item.id),
            Cell::new(&item.name),
            Cell::new(&item.description),
            Cell::new(item.public),
            Cell::new(&item.namespace),
        ]);
    }
    t.to_string()
}

pub fn users_table(users: &[User]) -> String {
    let mut t = table(&["UID", "Admin", "Super user", "Email", "Kind"]);
    for user in users {
        t.add_row(vec![
            Cell::new(&user.uid),
            Cell::new(user.admin),
            Cell::new(user.super_user),
            Cell::new(&user.email),
            Cell::new(&user.kind),
        ]);
    }
    t.to_string()
}

pub fn runs_table(runs: &[Run]) -> String {
    let mut t = table(&["ID", "Name", "Status", "Start", "End", "Namespace"]);
    for run in runs {
        let status = match run.status.as_str() {
            "failure" | "failed" | "error" => Cell::new(&run.status).fg(Color::Red),
            "success" | "deployed" => Cell::new(&run.status).fg(Color::Green),
            _ => Cell::new(&run.status),
        };
        t.add_row(vec![
            Cell::new(&run.id),
            Cell::new(&run.name),
            status,
            Cell::new(format_time(run.started_at())),
            Cell::new(format_time(run.ended_at())),
            Cell::new(&run.namespace),
        ]);
    }
    t.to_string()
}

fn format_time(t: Option<chrono::DateTime<chrono::Utc>>) -> String {
    t.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| UNSET.to_string())
}

pub fn yaml<T: Serialize>(value: &T) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(value)
}
