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

//! Pluggable integrations.
//!
//! An integration kind is described by an [`IntegrationConfig`] value. The
//! composition root registers one template value per kind in an
//! [`IntegrationRegistry`]; the registry then decodes YAML for that kind into
//! concrete configs, which build running [`Integration`] instances.

pub mod collector_integration;
pub mod manager;
pub mod registry;
pub mod smartctl_exporter;

use std::fmt;

use crate::api::metrics::MetricBuilder;
use crate::error::Result;

pub use collector_integration::CollectorIntegration;
pub use manager::{IntegrationInstance, IntegrationsManager};
pub use registry::IntegrationRegistry;

/// Produces a snapshot of metrics on demand.
pub trait Collector: Send + Sync {
    /// Append the current metrics to `builder`.
    fn collect(&self, builder: &mut MetricBuilder) -> Result<()>;
}

/// A running integration exposing metrics to the agent.
pub trait Integration: Send + Sync {
    /// Name of the integration kind this instance belongs to.
    fn name(&self) -> &str;

    /// Append the current metrics of this instance to `builder`.
    fn gather_into(&self, builder: &mut MetricBuilder) -> Result<()>;

    /// Gather the metrics of this instance in Prometheus text format.
    fn gather(&self) -> Result<String> {
        let mut builder = MetricBuilder::new();
        self.gather_into(&mut builder)?;
        Ok(builder.build())
    }
}

/// Configuration of one integration kind.
pub trait IntegrationConfig: fmt::Debug + Send + Sync {
    /// Fixed name of the integration kind, used for registry lookup.
    fn name(&self) -> &'static str;

    /// Key identifying this instance among instances of the same kind.
    ///
    /// `agent_key` identifies the running agent and may be used as a
    /// fallback by kinds without a natural key.
    fn instance_key(&self, agent_key: &str) -> Result<String>;

    /// Build a running integration from this configuration.
    fn new_integration(&self) -> Result<Box<dyn Integration>>;

    /// Decode a YAML value into a configuration of this kind.
    fn decode(&self, value: serde_yaml::Value) -> Result<Box<dyn IntegrationConfig>>;

    /// Render this configuration back to YAML.
    fn to_yaml(&self) -> Result<String>;
}
