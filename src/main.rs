use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use mailform::cli::{Cli, Commands, ConfigAction};
use mailform::commands::{
    SendOptions, cmd_compose, cmd_config_get, cmd_config_set, cmd_config_show, cmd_send,
    cmd_suggest, cmd_users,
};

/// Log filter variable; defaults to `warn`
const LOG_ENV: &str = "MAILFORM_LOG";

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Users { output } => cmd_users(output).await,
        Commands::Suggest { query, output } => cmd_suggest(&query, output).await,
        Commands::Send {
            to,
            all,
            subject,
            description,
            output,
        } => {
            cmd_send(
                SendOptions {
                    to,
                    all,
                    subject,
                    description,
                },
                output,
            )
            .await
        }
        Commands::Compose => cmd_compose().await,

        Commands::Config { action } => match action {
            ConfigAction::Show { output } => cmd_config_show(output),
            ConfigAction::Set { key, value } => cmd_config_set(&key, &value),
            ConfigAction::Get { key } => cmd_config_get(&key),
        },
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
