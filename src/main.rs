use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};

use goterra::client::HttpGoterraClient;
use goterra::commands::{self, Context};
use goterra::config::{Cli, Settings};
use goterra::params::ConsolePrompter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    // Set up logging
    if let Some(ref log_file) = cli.log_file {
        let file = std::fs::File::create(log_file)
            .wrap_err_with(|| format!("cannot create log file {}", log_file))?;
        tracing_subscriber::fmt()
            .with_writer(file)
            .with_ansi(false)
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .init();
    }

    let settings = Settings::resolve(&cli, cli.config_file())?;
    let client = HttpGoterraClient::login(&settings.url, &settings.api_key).await?;

    let mut prompter = ConsolePrompter;
    let mut stdout = std::io::stdout();
    let mut ctx = Context {
        client: &client,
        prompter: &mut prompter,
        out: &mut stdout,
    };
    commands::execute(cli.command, &mut ctx).await
}
