/*
[INPUT]:  CLI arguments, YAML configuration file
[OUTPUT]: Interactive renewal workflow against the configured service
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or logging setup
*/

mod cli;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use renewal_adapter::RenewalClient;
use renewal_workflow::{
    BusyGate, ChannelNotifier, Collaborators, Orchestrator, ReturnRoute, WorkflowConfig,
};

use crate::cli::screen::{ConsoleBusyIndicator, ConsoleNavigator, run_screen};

#[derive(Parser, Debug)]
#[command(name = "renewal-workflow", version, about = "Interactive certificate renewal workflow")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    #[arg(long = "config", value_name = "PATH", default_value = "renewal.yaml")]
    config_path: PathBuf,
    /// Overrides logging.level from the config file
    #[arg(long = "log-level", value_name = "LEVEL")]
    log_level: Option<String>,
    #[arg(long = "dry-run")]
    dry_run: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a starter configuration file
    Init {
        #[arg(long, value_name = "PATH", default_value = "renewal.yaml")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    if let Some(Command::Init { output }) = args.command {
        return cli::init::run_init(output);
    }

    let config = WorkflowConfig::from_file(&args.config_path)
        .with_context(|| format!("load config {}", args.config_path.display()))?;
    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    let _log_guard = init_tracing(&level, config.logging.file.as_deref())?;

    info!(
        config_path = %args.config_path.display(),
        base_url = %config.service.base_url,
        client_certificate = config.tls.is_some(),
        dry_run = args.dry_run,
        "starting renewal-workflow"
    );

    let client = RenewalClient::with_config(config.client_config(), &config.service.base_url)
        .context("build renewal client")?;

    if args.dry_run {
        info!("dry-run requested; configuration and client identity validated");
        return Ok(());
    }

    let client = Arc::new(client);
    let (notifier, notifications) = ChannelNotifier::new();
    let navigator = Arc::new(ConsoleNavigator::default());

    let mut orchestrator = Orchestrator::new(Collaborators {
        data: client.clone(),
        submission: client,
        notifier: Arc::new(notifier),
        busy: BusyGate::new(Arc::new(ConsoleBusyIndicator)),
    });
    if let Some(target) = config.navigation.return_route.clone() {
        orchestrator = orchestrator.with_return_route(ReturnRoute {
            target,
            navigator: navigator.clone(),
        });
    }

    run_screen(orchestrator, notifications, navigator).await?;
    info!("renewal-workflow finished");
    Ok(())
}

fn init_tracing(log_level: &str, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|err| anyhow!(err))
            .context("initialize tracing subscriber")?;
        return Ok(None);
    };

    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .context("log file path must name a file")?;
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(Some(guard))
}
