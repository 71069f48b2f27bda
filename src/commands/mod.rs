//! Subcommand definitions and their execution against a [`GoterraClient`].

mod catalog;
mod namespace;
mod run;
mod user;

use std::io::Write;

use clap::Subcommand;
use color_eyre::eyre::Result;

use crate::client::GoterraClient;
use crate::params::Prompter;

pub use catalog::{CatalogCommand, CatalogKind, EndpointCommand};
pub use namespace::NamespaceCommand;
pub use run::{RunCommand, StartRun};
pub use user::UserCommand;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List, show, edit, create and delete namespaces
    #[command(subcommand)]
    Namespace(NamespaceCommand),

    /// List and show endpoints
    #[command(subcommand)]
    Endpoint(EndpointCommand),

    /// List and show recipes
    #[command(subcommand)]
    Recipe(CatalogCommand),

    /// List and show templates
    #[command(subcommand)]
    Template(CatalogCommand),

    /// List and show applications
    #[command(subcommand)]
    App(CatalogCommand),

    /// List and show users, change passwords
    #[command(subcommand)]
    User(UserCommand),

    /// List, show, start and stop deployment runs
    #[command(subcommand)]
    Run(RunCommand),
}

/// What a command needs besides its arguments.
pub struct Context<'a> {
    pub client: &'a dyn GoterraClient,
    pub prompter: &'a mut dyn Prompter,
    pub out: &'a mut dyn Write,
}

pub async fn execute(command: Command, ctx: &mut Context<'_>) -> Result<()> {
    match command {
        Command::Namespace(cmd) => namespace::execute(cmd, ctx).await,
        Command::Endpoint(cmd) => catalog::execute_endpoint(cmd, ctx).await,
        Command::Recipe(cmd) => catalog::execute(CatalogKind::Recipe, cmd, ctx).await,
        Command::Template(cmd) => catalog::execute(CatalogKind::Template, cmd, ctx).await,
        Command::App(cmd) => catalog::execute(CatalogKind::App, cmd, ctx).await,
        Command::User(cmd) => user::execute(cmd, ctx).await,
        Command::Run(cmd) => run::execute(cmd, ctx).await,
    }
}

/// Prints `value` as YAML after an `id:` line.
fn show<T: serde::Serialize>(ctx: &mut Context<'_>, id: &str, value: &T) -> Result<()> {
    writeln!(ctx.out, "id: {}", id)?;
    write!(ctx.out, "{}", crate::output::yaml(value)?)?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod fake;
