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

//! Agent configuration file.
//!
//! ```yaml
//! server:
//!   http_listen_address: 0.0.0.0
//!   http_listen_port: 9633
//!   log_level: info
//! integrations:
//!   smartctl_exporter:
//!     smartctl.interval: 30s
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::common::config::AppConfig;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgentConfig {
    pub server: ServerConfig,
    /// Raw per-kind integration settings, decoded later through the registry.
    pub integrations: BTreeMap<String, serde_yaml::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub http_listen_address: String,
    pub http_listen_port: u16,
    /// Default tracing filter; `RUST_LOG` takes precedence.
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_listen_address: AppConfig::DEFAULT_LISTEN_ADDRESS.to_string(),
            http_listen_port: AppConfig::DEFAULT_LISTEN_PORT,
            log_level: AppConfig::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ServerConfig {
    /// Identifies this agent to integrations that have no natural key.
    pub fn agent_key(&self) -> String {
        format!("{}:{}", self.http_listen_address, self.http_listen_port)
    }
}

impl AgentConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loaded agent config");
        Self::from_yaml_str(&content)
    }
}
