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

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use serde::Serialize;

use super::{Integration, IntegrationRegistry};
use crate::api::metrics::MetricBuilder;
use crate::error::{Error, Result};

/// A built integration together with its identity.
#[derive(Clone)]
pub struct IntegrationInstance {
    pub name: String,
    pub instance_key: String,
    pub integration: Arc<dyn Integration>,
}

/// Serializable identity of an instance, as listed over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceSummary {
    pub name: String,
    pub instance_key: String,
}

/// Every integration instance configured for this agent.
#[derive(Clone, Default)]
pub struct IntegrationsManager {
    instances: Vec<IntegrationInstance>,
}

impl IntegrationsManager {
    /// Decode and build every configured integration.
    ///
    /// Each entry of `integrations` is either one mapping (one instance) or a
    /// sequence of mappings (several instances of the kind). Building is
    /// all-or-nothing: the first error aborts and nothing is returned.
    pub fn build(
        registry: &IntegrationRegistry,
        integrations: &BTreeMap<String, serde_yaml::Value>,
        agent_key: &str,
    ) -> Result<Self> {
        let mut instances = Vec::new();
        let mut seen = HashSet::new();

        for (name, value) in integrations {
            let values = match value {
                serde_yaml::Value::Sequence(items) => items.clone(),
                other => vec![other.clone()],
            };

            for value in values {
                let config = registry.decode(name, value)?;
                let instance_key = config.instance_key(agent_key)?;
                if !seen.insert((name.clone(), instance_key.clone())) {
                    return Err(Error::DuplicateInstance {
                        name: name.clone(),
                        key: instance_key,
                    });
                }

                let integration = config.new_integration()?;
                tracing::info!(
                    integration = %name,
                    instance = %instance_key,
                    "integration instance created"
                );
                instances.push(IntegrationInstance {
                    name: name.clone(),
                    instance_key,
                    integration: Arc::from(integration),
                });
            }
        }

        Ok(Self { instances })
    }

    pub fn instances(&self) -> &[IntegrationInstance] {
        &self.instances
    }

    /// Instances of the kind called `name`.
    pub fn get(&self, name: &str) -> Vec<&IntegrationInstance> {
        self.instances.iter().filter(|i| i.name == name).collect()
    }

    pub fn summaries(&self) -> Vec<InstanceSummary> {
        self.instances
            .iter()
            .map(|i| InstanceSummary {
                name: i.name.clone(),
                instance_key: i.instance_key.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Gather every instance of kind `name`, or all instances when `None`.
    ///
    /// Each sample carries an `instance` label holding the instance key, so
    /// several instances of one kind yield distinct series. A failing instance is logged and skipped so one broken integration
    /// does not hide the others.
    pub fn gather(&self, name: Option<&str>) -> String {
        let mut builder = MetricBuilder::new();
        for instance in &self.instances {
            if name.is_some_and(|n| n != instance.name) {
                continue;
            }
            builder.const_labels(&[("instance", instance.instance_key.as_str())]);
            if let Err(e) = instance.integration.gather_into(&mut builder) {
                tracing::warn!(
                    integration = %instance.name,
                    instance = %instance.instance_key,
                    "failed to gather metrics: {e}"
                );
            }
        }
        builder.build()
    }

    pub fn gather_all(&self) -> String {
        self.gather(None)
    }
}
