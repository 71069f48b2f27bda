use std::io::Write;

use clap::Subcommand;
use color_eyre::eyre::Result;

use super::{show, Context};
use crate::output;

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// List users [admin]
    List,
    /// Show a user
    Show {
        /// User id
        uid: String,
    },
    /// Change a user's password
    Password {
        /// User id
        uid: String,
        /// New password
        password: String,
    },
}

pub(super) async fn execute(cmd: UserCommand, ctx: &mut Context<'_>) -> Result<()> {
    match cmd {
        UserCommand::List => {
            let users = ctx.client.list_users().await?;
            writeln!(ctx.out, "{}", output::users_table(&users))?;
        }
        UserCommand::Show { uid } => {
            let user = ctx.client.get_user(&uid).await?.masked();
            show(ctx, &user.uid, &user)?;
        }
        UserCommand::Password { uid, password } => {
            ctx.client.set_user_password(&uid, &password).await?;
            writeln!(ctx.out, "Password updated for user {}", uid)?;
        }
    }
    Ok(())
}
