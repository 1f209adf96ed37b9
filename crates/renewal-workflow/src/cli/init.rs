/*
[INPUT]:  Interactive user input via CLI
[OUTPUT]: Generated YAML configuration file
[POS]:    CLI initialization layer
[UPDATE]: When WorkflowConfig schema changes
*/

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use std::path::PathBuf;

use renewal_workflow::config::{TlsConfig, WorkflowConfig};

pub fn run_init(output: PathBuf) -> Result<()> {
    println!("{}", style("Renewal workflow init").bold().cyan());
    println!(
        "{}",
        style("This will guide you through creating a new configuration.").dim()
    );

    let theme = ColorfulTheme::default();

    let base_url: String = Input::with_theme(&theme)
        .with_prompt("Renewal service URL")
        .default("https://renewals.example.com/".to_string())
        .interact_text()?;

    let mut config = WorkflowConfig::example(base_url);

    println!("\n{}", style("--- Client certificate ---").bold());
    let use_identity = Confirm::with_theme(&theme)
        .with_prompt("Present a client certificate?")
        .default(true)
        .interact()?;
    if use_identity {
        let cert_path: String = Input::with_theme(&theme)
            .with_prompt("Certificate (PEM)")
            .default("client.crt".to_string())
            .interact_text()?;
        let key_path: String = Input::with_theme(&theme)
            .with_prompt("Private key (PEM)")
            .default("client.key".to_string())
            .interact_text()?;
        let ca_bundle: String = Input::with_theme(&theme)
            .with_prompt("Extra CA bundle (empty for none)")
            .allow_empty(true)
            .interact_text()?;
        config.tls = Some(TlsConfig {
            cert_path: PathBuf::from(cert_path),
            key_path: PathBuf::from(key_path),
            ca_bundle_path: Some(ca_bundle.trim())
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
        });
    }

    println!("\n{}", style("--- Navigation ---").bold());
    let return_route: String = Input::with_theme(&theme)
        .with_prompt("Route to return to on cancel (empty resets in place)")
        .allow_empty(true)
        .interact_text()?;
    let return_route = return_route.trim();
    if !return_route.is_empty() {
        config.navigation.return_route = Some(return_route.to_string());
    }

    config.validate().context("generated configuration is invalid")?;
    let yaml = config
        .to_yaml()
        .context("failed to serialize config to YAML")?;

    std::fs::write(&output, yaml)
        .with_context(|| format!("failed to write config to {}", output.display()))?;

    println!("\n{}", style("SUCCESS!").bold().green());
    println!(
        "Configuration written to: {}",
        style(output.display()).cyan()
    );

    Ok(())
}
