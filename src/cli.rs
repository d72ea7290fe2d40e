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

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the agent, serving integration metrics in Prometheus format. (default)
    Run(RunArgs),
    /// Build every configured integration, print the instances and exit.
    Check(CheckArgs),
    /// Print the default configuration of an integration as YAML.
    Defaults(DefaultsArgs),
}

#[derive(Parser, Clone, Default)]
pub struct RunArgs {
    /// Path of the agent configuration file. Without it, one smartctl_exporter
    /// instance runs with default settings.
    #[arg(short, long)]
    pub config_file: Option<PathBuf>,
    /// Override the listen port from the configuration file.
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[derive(Parser, Clone)]
pub struct CheckArgs {
    /// Path of the agent configuration file.
    #[arg(short, long)]
    pub config_file: PathBuf,
}

#[derive(Parser, Clone)]
pub struct DefaultsArgs {
    /// Integration name.
    #[arg(default_value = "smartctl_exporter")]
    pub integration: String,
}
