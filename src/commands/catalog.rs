use std::io::Write;

use clap::Subcommand;
use color_eyre::eyre::Result;

use super::{show, Context};
use crate::domain::CatalogItem;
use crate::output;

#[derive(Subcommand, Debug)]
pub enum EndpointCommand {
    /// List public endpoints, or those of a namespace
    List {
        /// Namespace id
        #[arg(long)]
        ns: Option<String>,
    },
    /// Show one endpoint in detail
    Show {
        /// Namespace id
        #[arg(long)]
        ns: String,
        /// Endpoint id
        #[arg(long)]
        id: String,
    },
}

/// Shared by `recipe`, `template` and `app`.
#[derive(Subcommand, Debug)]
pub enum CatalogCommand {
    /// List public objects, or those of a namespace
    List {
        /// Namespace id
        #[arg(long)]
        ns: Option<String>,
    },
    /// Show one object in detail
    Show {
        /// Namespace id
        #[arg(long)]
        ns: String,
        /// Object id
        #[arg(long)]
        id: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Recipe,
    Template,
    App,
}

pub(super) async fn execute_endpoint(cmd: EndpointCommand, ctx: &mut Context<'_>) -> Result<()> {
    match cmd {
        EndpointCommand::List { ns } => {
            let endpoints = ctx.client.list_endpoints(ns.as_deref()).await?;
            writeln!(ctx.out, "{}", output::endpoints_table(&endpoints))?;
        }
        EndpointCommand::Show { ns, id } => {
            let endpoint = ctx.client.get_endpoint(&ns, &id).await?;
            show(ctx, &endpoint.id, &endpoint)?;
        }
    }
    Ok(())
}

pub(super) async fn execute(
    kind: CatalogKind,
    cmd: CatalogCommand,
    ctx: &mut Context<'_>,
) -> Result<()> {
    match cmd {
        CatalogCommand::List { ns } => {
            let ns = ns.as_deref();
            let items = match kind {
                CatalogKind::Recipe => ctx.client.list_recipes(ns).await?,
                CatalogKind::Template => ctx.client.list_templates(ns).await?,
                CatalogKind::App => ctx.client.list_apps(ns).await?,
            };
            writeln!(ctx.out, "{}", output::catalog_table(&items))?;
        }
        CatalogCommand::Show { ns, id } => {
            let item: CatalogItem = match kind {
                CatalogKind::Recipe => ctx.client.get_recipe(&ns, &id).await?,
                CatalogKind::Template => ctx.client.get_template(&ns, &id).await?,
                CatalogKind::App => ctx.client.get_app(&ns, &id).await?,
            };
            show(ctx, &item.id, &item)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fake::FakeClient;
    use crate::domain::Endpoint;
    use crate::params::tests::ScriptedPrompter;

    fn item(id: &str, ns: &str, public: bool) -> CatalogItem {
        CatalogItem {
            id: id.into(),
            name: format!("{}-name", id),
            namespace: ns.into(),
            public,
            ..CatalogItem::default()
        }
    }

    #[tokio::test]
    async fn list_without_namespace_shows_public_items() {
        let client = FakeClient {
            templates: vec![item("t1", "ns1", true), item("t2", "ns1", false)],
            ..FakeClient::default()
        };
        let mut prompter = ScriptedPrompter::default();
        let mut out = Vec::new();
        let mut ctx = Context {
            client: &client,
            prompter: &mut prompter,
            out: &mut out,
        };

        execute(CatalogKind::Template, CatalogCommand::List { ns: None }, &mut ctx)
            .await
            .expect("list");

        let out = String::from_utf8(out).expect("utf8");
        assert!(out.contains("t1-name"));
        assert!(!out.contains("t2-name"));
    }

    #[tokio::test]
    async fn show_app_prints_id_then_yaml() {
        let client = FakeClient {
            apps: vec![item("a1", "ns1", false)],
            recipes: vec![item("a1", "ns1", false)],
            ..FakeClient::default()
        };
        let mut prompter = ScriptedPrompter::default();
        let mut out = Vec::new();
        let mut ctx = Context {
            client: &client,
            prompter: &mut prompter,
            out: &mut out,
        };

        execute(
            CatalogKind::App,
            CatalogCommand::Show {
                ns: "ns1".into(),
                id: "a1".into(),
            },
            &mut ctx,
        )
        .await
        .expect("show");

        let out = String::from_utf8(out).expect("utf8");
        assert!(out.starts_with("id: a1\n"));
        assert!(out.contains("name: a1-name"));
    }

    #[tokio::test]
    async fn endpoint_show_includes_config() {
        let mut endpoint = Endpoint {
            id: "ep1".into(),
            name: "genostack".into(),
            kind: "openstack".into(),
            ..Endpoint::default()
        };
        endpoint
            .config
            .insert("os_auth_url".into(), "keystone.local".into());
        let client = FakeClient {
            endpoints: vec![endpoint],
            ..FakeClient::default()
        };
        let mut prompter = ScriptedPrompter::default();
        let mut out = Vec::new();
        let mut ctx = Context {
            client: &client,
            prompter: &mut prompter,
            out: &mut out,
        };

        execute_endpoint(
            EndpointCommand::Show {
                ns: "ns1".into(),
                id: "ep1".into(),
            },
            &mut ctx,
        )
        .await
        .expect("show");

        let out = String::from_utf8(out).expect("utf8");
        assert!(out.contains("os_auth_url: keystone.local"));
    }
}
