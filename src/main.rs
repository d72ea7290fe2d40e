// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use smartctl_agent::api::{init_tracing, run_server};
use smartctl_agent::cli::{CheckArgs, Cli, Commands, DefaultsArgs, RunArgs};
use smartctl_agent::config::AgentConfig;
use smartctl_agent::integrations::{smartctl_exporter, IntegrationsManager};
use smartctl_agent::{default_registry, Error};

type BoxError = Box<dyn std::error::Error>;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Run(args)) => run(args).await,
        Some(Commands::Check(args)) => check(&args),
        Some(Commands::Defaults(args)) => defaults(&args),
        // Default to running with whatever configuration is available
        None => run(RunArgs::default()).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<AgentConfig, Error> {
    match path {
        Some(path) => AgentConfig::load(path),
        None => {
            let mut config = AgentConfig::default();
            config
                .integrations
                .insert(smartctl_exporter::NAME.to_string(), serde_yaml::Value::Null);
            Ok(config)
        }
    }
}

async fn run(args: RunArgs) -> Result<(), BoxError> {
    let mut config = load_config(args.config_file.as_deref())?;
    if let Some(port) = args.port {
        config.server.http_listen_port = port;
    }
    init_tracing(&config.server.log_level);

    let registry = default_registry()?;
    let manager = IntegrationsManager::build(
        &registry,
        &config.integrations,
        &config.server.agent_key(),
    )?;
    if manager.is_empty() {
        tracing::warn!("no integrations configured; /metrics will be empty");
    }

    run_server(&config.server, Arc::new(manager)).await?;
    Ok(())
}

fn check(args: &CheckArgs) -> Result<(), BoxError> {
    let config = load_config(Some(args.config_file.as_path()))?;
    init_tracing(&config.server.log_level);

    let registry = default_registry()?;
    let manager = IntegrationsManager::build(
        &registry,
        &config.integrations,
        &config.server.agent_key(),
    )?;

    println!("{}", serde_json::to_string_pretty(&manager.summaries())?);
    Ok(())
}

fn defaults(args: &DefaultsArgs) -> Result<(), BoxError> {
    let registry = default_registry()?;
    let template = registry
        .get(&args.integration)
        .ok_or_else(|| Error::UnknownIntegration(args.integration.clone()))?;
    print!("{}", template.to_yaml()?);
    Ok(())
}
