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

use std::collections::BTreeMap;

use super::IntegrationConfig;
use crate::error::{Error, Result};

/// The set of integration kinds known to the agent.
///
/// Built once by the composition root and only read afterwards.
#[derive(Debug, Default)]
pub struct IntegrationRegistry {
    kinds: BTreeMap<&'static str, Box<dyn IntegrationConfig>>,
}

impl IntegrationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `template` as the descriptor of its integration kind.
    pub fn register(&mut self, template: Box<dyn IntegrationConfig>) -> Result<()> {
        let name = template.name();
        if self.kinds.contains_key(name) {
            return Err(Error::DuplicateIntegration(name.to_string()));
        }
        tracing::debug!(integration = name, "registered integration");
        self.kinds.insert(name, template);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.kinds.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&dyn IntegrationConfig> {
        self.kinds.get(name).map(|template| template.as_ref())
    }

    /// Registered kind names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.kinds.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Decode `value` as the configuration of the kind called `name`.
    pub fn decode(
        &self,
        name: &str,
        value: serde_yaml::Value,
    ) -> Result<Box<dyn IntegrationConfig>> {
        let template = self
            .get(name)
            .ok_or_else(|| Error::UnknownIntegration(name.to_string()))?;
        template.decode(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrations::smartctl_exporter::{self, Config};

    #[test]
    fn test_register_and_lookup() {
        let mut registry = IntegrationRegistry::new();
        assert!(registry.is_empty());

        smartctl_exporter::register(&mut registry).unwrap();
        assert!(registry.contains("smartctl_exporter"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["smartctl_exporter"]);
        assert_eq!(
            registry.get("smartctl_exporter").map(|c| c.name()),
            Some("smartctl_exporter")
        );
    }

    #[test]
    fn test_register_twice_fails() {
        let mut registry = IntegrationRegistry::new();
        registry.register(Box::new(Config::default())).unwrap();

        let err = registry.register(Box::new(Config::default())).unwrap_err();
        assert!(matches!(err, Error::DuplicateIntegration(name) if name == "smartctl_exporter"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_decode_unknown_kind() {
        let registry = IntegrationRegistry::new();
        let err = registry
            .decode("node_exporter", serde_yaml::Value::Null)
            .unwrap_err();
        assert!(matches!(err, Error::UnknownIntegration(name) if name == "node_exporter"));
    }

    #[test]
    fn test_decode_known_kind() {
        let mut registry = IntegrationRegistry::new();
        smartctl_exporter::register(&mut registry).unwrap();

        let value: serde_yaml::Value = serde_yaml::from_str("smartctl.path: /opt/smartctl").unwrap();
        let config = registry.decode("smartctl_exporter", value).unwrap();
        assert_eq!(config.instance_key("agent").unwrap(), "/opt/smartctl");
    }
}
