use std::io::Write;

use clap::{Args, Subcommand};
use color_eyre::eyre::{bail, Result};

use super::{show, Context};
use crate::domain::Namespace;
use crate::output;

#[derive(Subcommand, Debug)]
pub enum NamespaceCommand {
    /// List your namespaces
    List {
        /// Every namespace on the service [admin]
        #[arg(long)]
        all: bool,
    },
    /// Show one namespace in detail
    Show {
        /// Namespace id
        id: String,
    },
    /// Change owners, members or freeze state
    Edit(EditNamespace),
    /// Create a namespace owned by you
    Create {
        /// Namespace name
        name: String,
    },
    /// Delete a namespace
    Delete {
        /// Namespace id
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct EditNamespace {
    /// Namespace id
    pub id: String,
    #[arg(long)]
    pub add_owner: Vec<String>,
    #[arg(long)]
    pub add_member: Vec<String>,
    #[arg(long)]
    pub remove_owner: Vec<String>,
    #[arg(long)]
    pub remove_member: Vec<String>,
    /// Prevent new runs in the namespace
    #[arg(long, conflicts_with = "unfreeze")]
    pub freeze: bool,
    #[arg(long)]
    pub unfreeze: bool,
}

impl EditNamespace {
    fn is_empty(&self) -> bool {
        self.add_owner.is_empty()
            && self.add_member.is_empty()
            && self.remove_owner.is_empty()
            && self.remove_member.is_empty()
            && !self.freeze
            && !self.unfreeze
    }

    /// Additions are applied before removals.
    pub fn apply(&self, ns: &mut Namespace) {
        for user in &self.add_owner {
            ns.add_owner(user);
        }
        for user in &self.add_member {
            ns.add_member(user);
        }
        for user in &self.remove_owner {
            ns.remove_owner(user);
        }
        for user in &self.remove_member {
            ns.remove_member(user);
        }
        if self.freeze {
            ns.freeze = true;
        }
        if self.unfreeze {
            ns.freeze = false;
        }
    }
}

pub(super) async fn execute(cmd: NamespaceCommand, ctx: &mut Context<'_>) -> Result<()> {
    match cmd {
        NamespaceCommand::List { all } => {
            let namespaces = ctx.client.list_namespaces(all).await?;
            writeln!(ctx.out, "{}", output::namespaces_table(&namespaces))?;
        }
        NamespaceCommand::Show { id } => {
            let ns = ctx.client.get_namespace(&id).await?;
            show(ctx, &ns.id, &ns)?;
        }
        NamespaceCommand::Edit(edit) => {
            if edit.is_empty() {
                bail!("nothing to update, see `namespace edit --help`");
            }
            let mut ns = ctx.client.get_namespace(&edit.id).await?;
            edit.apply(&mut ns);
            ctx.client.update_namespace(&ns).await?;
            writeln!(ctx.out, "Namespace updated!")?;
        }
        NamespaceCommand::Create { name } => {
            let id = ctx.client.create_namespace(&Namespace::named(name)).await?;
            if id.is_empty() {
                writeln!(ctx.out, "Namespace created!")?;
            } else {
                writeln!(ctx.out, "Namespace created: {}", id)?;
            }
        }
        NamespaceCommand::Delete { id, yes } => {
            if !yes && !ctx.prompter.confirm(&format!("Delete namespace {}?", id))? {
                writeln!(ctx.out, "Cancelled.")?;
                return Ok(());
            }
            ctx.client.delete_namespace(&id).await?;
            writeln!(ctx.out, "Namespace deleted!")?;
        }
    }
    Ok(())
}
