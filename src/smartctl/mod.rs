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

//! The smartctl collector wrapped by the `smartctl_exporter` integration.
//!
//! The collector only reports whether the configured smartctl binary can be
//! run and which version it is. Per-device SMART attributes are not parsed.

pub mod executor;

use std::time::Instant;

use crate::api::metrics::MetricBuilder;
use crate::error::Result;
use crate::integrations::Collector;
use executor::{execute_command, CommandOptions};

/// Constructor arguments of [`SmartctlExporter`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExporterConfig {
    /// Location of the smartctl binary.
    pub scrape_uri: String,
    /// When non-empty, attached to every sample as the `host` label.
    pub host_override: String,
}

/// Collector that probes a smartctl binary on every collection.
#[derive(Debug)]
pub struct SmartctlExporter {
    config: ExporterConfig,
    options: CommandOptions,
}

impl SmartctlExporter {
    pub fn new(config: ExporterConfig) -> Self {
        Self {
            config,
            options: CommandOptions::default(),
        }
    }

    fn labels(&self) -> Vec<(&str, &str)> {
        if self.config.host_override.is_empty() {
            Vec::new()
        } else {
            vec![("host", self.config.host_override.as_str())]
        }
    }
}

impl Collector for SmartctlExporter {
    fn collect(&self, builder: &mut MetricBuilder) -> Result<()> {
        let start = Instant::now();
        let result = execute_command(&self.config.scrape_uri, &["--version"], &self.options);
        let elapsed = start.elapsed().as_secs_f64();

        let (up, version) = match result {
            Ok(output) if output.success() => (1, parse_version(&output.stdout)),
            Ok(output) => {
                tracing::warn!(
                    path = %self.config.scrape_uri,
                    status = output.status,
                    "smartctl exited with a non-zero status"
                );
                (0, None)
            }
            Err(e) => {
                tracing::warn!(path = %self.config.scrape_uri, "failed to run smartctl: {e}");
                (0, None)
            }
        };

        let labels = self.labels();

        builder
            .help("smartctl_up", "Whether the smartctl binary could be executed")
            .type_("smartctl_up", "gauge")
            .metric("smartctl_up", &labels, up);

        if let Some(version) = version {
            let mut version_labels = labels.clone();
            version_labels.push(("version", version.as_str()));
            builder
                .help("smartctl_version", "smartctl version information")
                .type_("smartctl_version", "gauge")
                .metric("smartctl_version", &version_labels, 1);
        }

        builder
            .help(
                "smartctl_scrape_duration_seconds",
                "Time spent running smartctl in seconds",
            )
            .type_("smartctl_scrape_duration_seconds", "gauge")
            .metric("smartctl_scrape_duration_seconds", &labels, elapsed);

        Ok(())
    }
}

/// Extract the version token from `smartctl --version` output.
///
/// The first line reads `smartctl 7.3 2022-02-28 r5338 [...]`.
fn parse_version(stdout: &str) -> Option<String> {
    let mut fields = stdout.lines().next()?.split_whitespace();
    if fields.next()? != "smartctl" {
        return None;
    }
    fields.next().map(str::to_string)
}
