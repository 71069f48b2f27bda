use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use color_eyre::eyre::{bail, Result, WrapErr};

use super::{show, Context};
use crate::domain::Run;
use crate::output;
use crate::params::{self, RunInputs};

#[derive(Subcommand, Debug)]
pub enum RunCommand {
    /// List your runs, or those of a namespace
    List {
        /// Namespace id
        #[arg(long)]
        ns: Option<String>,
    },
    /// Show a run in detail
    Show {
        /// Namespace id
        #[arg(long)]
        ns: String,
        /// Run id
        #[arg(long)]
        id: String,
        /// Also show store data of the deployment
        #[arg(long)]
        store: bool,
    },
    /// Ask the service to stop and remove a run
    Delete {
        /// Namespace id
        #[arg(long)]
        ns: String,
        /// Run id
        #[arg(long)]
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Deploy an application on an endpoint
    Start(StartRun),
}

#[derive(Args, Debug, Clone, Default)]
pub struct StartRun {
    /// Namespace id
    #[arg(long)]
    pub ns: String,
    /// Endpoint id
    #[arg(long)]
    pub endpoint: String,
    /// Application id
    #[arg(long)]
    pub app: String,
    /// Run name
    #[arg(long)]
    pub name: String,
    /// YAML file with pre-filled parameters, skips prompting
    #[arg(long)]
    pub params: Option<PathBuf>,
    /// Print a YAML parameters template instead of starting the run
    #[arg(long)]
    pub template: bool,
}

pub(super) async fn execute(cmd: RunCommand, ctx: &mut Context<'_>) -> Result<()> {
    match cmd {
        RunCommand::List { ns } => {
            let runs = ctx.client.list_runs(ns.as_deref()).await?;
            writeln!(ctx.out, "{}", output::runs_table(&runs))?;
        }
        RunCommand::Show { ns, id, store } => {
            let run = ctx.client.get_run(&ns, &id).await?;
            show(ctx, &run.id, &run)?;
            if store {
                writeln!(ctx.out, "Store data:")?;
                if run.is_deployed() {
                    let data = ctx.client.run_store(&run.deployment).await?;
                    write!(ctx.out, "{}", output::yaml(&data)?)?;
                } else {
                    writeln!(ctx.out, "\tno data")?;
                }
            }
        }
        RunCommand::Delete { ns, id, yes } => {
            if !yes && !ctx.prompter.confirm(&format!("Stop and delete run {}?", id))? {
                writeln!(ctx.out, "Cancelled.")?;
                return Ok(());
            }
            ctx.client.delete_run(&ns, &id).await?;
            writeln!(ctx.out, "Run deletion requested")?;
        }
        RunCommand::Start(request) => {
            if let Some(run_id) = start(&request, ctx).await? {
                writeln!(ctx.out, "Run started: {}", run_id)?;
            }
        }
    }
    Ok(())
}

/// Collects the parameters and starts the run.
///
/// Returns `None` when only the parameters template was requested.
pub(super) async fn start(request: &StartRun, ctx: &mut Context<'_>) -> Result<Option<String>> {
    let client = ctx.client;
    if !client
        .has_endpoint_secret(&request.ns, &request.endpoint)
        .await?
    {
        bail!("no known secret for this endpoint, please create one first");
    }

    let inputs = match &request.params {
        Some(path) => RunInputs::load(path)?.params,
        None => {
            let endpoint = client.get_endpoint(&request.ns, &request.endpoint).await?;
            let app_inputs = client
                .app_inputs(&request.ns, &request.app)
                .await
                .wrap_err("cannot collect run parameters")?;
            let endpoint_defaults = match client
                .endpoint_defaults(&request.ns, &request.endpoint)
                .await
            {
                Ok(defaults) => Some(defaults),
                Err(e) => {
                    tracing::warn!("no endpoint defaults for {}: {}", request.endpoint, e);
                    None
                }
            };
            params::resolve(
                &app_inputs,
                &endpoint.name,
                endpoint_defaults.as_ref(),
                &mut *ctx.prompter,
            )?
        }
    };

    if request.template {
        let yaml = RunInputs::new(inputs).to_yaml()?;
        writeln!(ctx.out, "Yaml parameters template:\n{}", yaml)?;
        return Ok(None);
    }

    let run = Run {
        name: request.name.clone(),
        namespace: request.ns.clone(),
        endpoint: request.endpoint.clone(),
        app_id: request.app.clone(),
        inputs,
        ..Run::default()
    };
    let run_id = client.start_run(&run).await?;
    Ok(Some(run_id))
}
