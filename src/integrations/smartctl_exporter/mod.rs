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

//! The `smartctl_exporter` integration.
//!
//! Wires YAML configuration into a [`SmartctlExporter`] and exposes it as a
//! collector-bearing integration.
//!
//! ```yaml
//! smartctl.path: /usr/sbin/smartctl
//! smartctl.device-exclude: ""
//! smartctl.interval: 60s
//! ```

use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};

use super::{Collector, CollectorIntegration, Integration, IntegrationConfig, IntegrationRegistry};
use crate::common::config::AppConfig;
use crate::error::{Error, Result};
use crate::smartctl::{ExporterConfig, SmartctlExporter};

/// Name of this integration kind.
pub const NAME: &str = "smartctl_exporter";

const INTERVAL_ERROR: &str = "smartctl.interval must end with 's' to indicate seconds";

/// Effective configuration of one smartctl_exporter instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Path of the smartctl binary.
    #[serde(rename = "smartctl.path")]
    pub smartctl_path: String,
    /// Forwarded to the collector's host override.
    #[serde(rename = "smartctl.device-exclude")]
    pub smartctl_device_exclude: String,
    /// Scrape interval; must end in "s".
    #[serde(rename = "smartctl.interval")]
    pub smartctl_interval: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            smartctl_path: AppConfig::DEFAULT_SMARTCTL_PATH.to_string(),
            smartctl_device_exclude: AppConfig::DEFAULT_SMARTCTL_DEVICE_EXCLUDE.to_string(),
            smartctl_interval: AppConfig::DEFAULT_SMARTCTL_INTERVAL.to_string(),
        }
    }
}

/// Fields present in a YAML document; absent ones are `None`.
///
/// Any scalar is accepted and kept as its text, so `smartctl.interval: 60`
/// reads as `"60"`. An explicit `null` reads as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(rename = "smartctl.path", default, deserialize_with = "scalar_text")]
    pub smartctl_path: Option<String>,
    #[serde(
        rename = "smartctl.device-exclude",
        default,
        deserialize_with = "scalar_text"
    )]
    pub smartctl_device_exclude: Option<String>,
    #[serde(rename = "smartctl.interval", default, deserialize_with = "scalar_text")]
    pub smartctl_interval: Option<String>,
}

fn scalar_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_yaml::Value::deserialize(deserializer)? {
        serde_yaml::Value::Null => Ok(Some(String::new())),
        serde_yaml::Value::Bool(b) => Ok(Some(b.to_string())),
        serde_yaml::Value::Number(n) => Ok(Some(n.to_string())),
        serde_yaml::Value::String(s) => Ok(Some(s)),
        serde_yaml::Value::Sequence(_) => Err(de::Error::invalid_type(
            Unexpected::Seq,
            &"a string scalar",
        )),
        serde_yaml::Value::Mapping(_) => Err(de::Error::invalid_type(
            Unexpected::Map,
            &"a string scalar",
        )),
        serde_yaml::Value::Tagged(_) => Err(de::Error::invalid_type(
            Unexpected::Other("tagged value"),
            &"a string scalar",
        )),
    }
}

impl ConfigOverrides {
    /// Decode overrides from a YAML value. `null` means "no overrides".
    pub fn from_yaml_value(value: serde_yaml::Value) -> Result<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_value(value)?)
    }
}

impl Config {
    /// Apply `overrides` on top of `self`. A present field always replaces
    /// the current value; an absent field leaves it untouched.
    pub fn merge(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(path) = overrides.smartctl_path {
            self.smartctl_path = path;
        }
        if let Some(exclude) = overrides.smartctl_device_exclude {
            self.smartctl_device_exclude = exclude;
        }
        if let Some(interval) = overrides.smartctl_interval {
            self.smartctl_interval = interval;
        }
        self
    }

    /// Defaults overlaid with the fields present in `value`.
    pub fn from_yaml_value(value: serde_yaml::Value) -> Result<Self> {
        Ok(Self::default().merge(ConfigOverrides::from_yaml_value(value)?))
    }

    /// Defaults overlaid with the fields present in a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        Self::from_yaml_value(value)
    }

    fn validate(&self) -> Result<()> {
        if !self.smartctl_interval.ends_with('s') {
            return Err(Error::Validation(INTERVAL_ERROR.to_string()));
        }
        Ok(())
    }

    /// Constructor arguments for the wrapped collector.
    pub fn exporter_config(&self) -> ExporterConfig {
        ExporterConfig {
            scrape_uri: self.smartctl_path.clone(),
            host_override: self.smartctl_device_exclude.clone(),
        }
    }
}

impl IntegrationConfig for Config {
    fn name(&self) -> &'static str {
        NAME
    }

    fn instance_key(&self, _agent_key: &str) -> Result<String> {
        Ok(self.smartctl_path.clone())
    }

    fn new_integration(&self) -> Result<Box<dyn Integration>> {
        Ok(Box::new(new(self)?))
    }

    fn decode(&self, value: serde_yaml::Value) -> Result<Box<dyn IntegrationConfig>> {
        Ok(Box::new(Config::from_yaml_value(value)?))
    }

    fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Build a smartctl_exporter integration from `config`.
///
/// Fails before any collector is created when the interval is malformed.
pub fn new(config: &Config) -> Result<CollectorIntegration> {
    if let Err(err) = config.validate() {
        tracing::error!(err = %err, "invalid scrape interval");
        return Err(err);
    }

    let exporter = SmartctlExporter::new(config.exporter_config());

    Ok(CollectorIntegration::new(config.name())
        .with_collectors([Box::new(exporter) as Box<dyn Collector>]))
}

/// Make this integration kind known to `registry`.
pub fn register(registry: &mut IntegrationRegistry) -> Result<()> {
    registry.register(Box::new(Config::default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.smartctl_path, "/usr/sbin/smartctl");
        assert_eq!(config.smartctl_device_exclude, "");
        assert_eq!(config.smartctl_interval, "60s");
    }

    #[test]
    fn test_empty_document_yields_defaults() {
        assert_eq!(Config::from_yaml_str("").unwrap(), Config::default());
        assert_eq!(Config::from_yaml_str("{}").unwrap(), Config::default());
        assert_eq!(
            Config::from_yaml_value(serde_yaml::Value::Null).unwrap(),
            Config::default()
        );
    }

    #[test]
    fn test_partial_override() {
        let config = Config::from_yaml_str("smartctl.interval: \"30s\"").unwrap();
        assert_eq!(config.smartctl_path, "/usr/sbin/smartctl");
        assert_eq!(config.smartctl_device_exclude, "");
        assert_eq!(config.smartctl_interval, "30s");
    }

    #[test]
    fn test_full_override() {
        let yaml = "smartctl.path: /usr/local/sbin/smartctl\n\
                    smartctl.device-exclude: sda\n\
                    smartctl.interval: 15s\n";
        let config = Config::from_yaml_str(yaml).unwrap();
        assert_eq!(
            config,
            Config {
                smartctl_path: "/usr/local/sbin/smartctl".to_string(),
                smartctl_device_exclude: "sda".to_string(),
                smartctl_interval: "15s".to_string(),
            }
        );
    }

    #[test]
    fn test_explicit_empty_value_wins_over_default() {
        let config = Config::from_yaml_str("smartctl.path: \"\"").unwrap();
        assert_eq!(config.smartctl_path, "");
    }

    #[test]
    fn test_non_string_scalars_are_read_as_text() {
        let yaml = "smartctl.path: 123\nsmartctl.device-exclude: true\nsmartctl.interval: 1.5";
        let config = Config::from_yaml_str(yaml).unwrap();
        assert_eq!(config.smartctl_path, "123");
        assert_eq!(config.smartctl_device_exclude, "true");
        assert_eq!(config.smartctl_interval, "1.5");
    }

    #[test]
    fn test_numeric_interval_fails_validation() {
        let config = Config::from_yaml_str("smartctl.interval: 60").unwrap();
        assert_eq!(config.smartctl_interval, "60");
        match config.new_integration().err().expect("must fail") {
            Error::Validation(msg) => assert_eq!(msg, INTERVAL_ERROR),
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn test_explicit_null_field_is_empty() {
        let config = Config::from_yaml_str("smartctl.interval: null\nsmartctl.path: ~").unwrap();
        assert_eq!(config.smartctl_interval, "");
        assert_eq!(config.smartctl_path, "");
        assert!(matches!(
            config.new_integration().err(),
            Some(Error::Validation(_))
        ));
    }

    #[test]
    fn test_merge_precedence() {
        let base = Config {
            smartctl_path: "/a".to_string(),
            smartctl_device_exclude: "x".to_string(),
            smartctl_interval: "5s".to_string(),
        };
        let merged = base.clone().merge(ConfigOverrides {
            smartctl_device_exclude: Some("y".to_string()),
            ..Default::default()
        });
        assert_eq!(merged.smartctl_path, "/a");
        assert_eq!(merged.smartctl_device_exclude, "y");
        assert_eq!(merged.smartctl_interval, "5s");
        assert_eq!(base.merge(ConfigOverrides::default()).smartctl_path, "/a");
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        assert!(matches!(
            Config::from_yaml_str("smartctl.interval: [1, 2]"),
            Err(Error::Yaml(_))
        ));
        assert!(matches!(
            Config::from_yaml_str("just a string"),
            Err(Error::Yaml(_))
        ));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = Config::from_yaml_str("smartctl.pth: /usr/sbin/smartctl").unwrap_err();
        assert!(matches!(err, Error::Yaml(_)));
        assert!(err.to_string().contains("smartctl.pth"));
    }

    #[test]
    fn test_name() {
        assert_eq!(Config::default().name(), "smartctl_exporter");
    }

    #[test]
    fn test_instance_key_is_path() {
        let config = Config::from_yaml_str(
            "smartctl.path: /opt/bin/smartctl\nsmartctl.device-exclude: nvme0\nsmartctl.interval: 10m",
        )
        .unwrap();
        assert_eq!(config.instance_key("").unwrap(), "/opt/bin/smartctl");
        assert_eq!(
            config.instance_key("agent-1:12345").unwrap(),
            "/opt/bin/smartctl"
        );
    }

    #[test]
    fn test_interval_without_seconds_suffix_fails() {
        for interval in ["60", "1m", "", "5 S", "30s "] {
            let config = Config {
                smartctl_interval: interval.to_string(),
                ..Default::default()
            };
            let err = config.new_integration().err().expect("must fail");
            match err {
                Error::Validation(msg) => assert_eq!(msg, INTERVAL_ERROR),
                other => panic!("expected validation error for {interval:?}, got {other}"),
            }
        }
    }

    #[test]
    fn test_interval_with_seconds_suffix_succeeds() {
        for interval in ["60s", "1s", "s", "100ms"] {
            let config = Config {
                smartctl_interval: interval.to_string(),
                ..Default::default()
            };
            let integration = config.new_integration().unwrap();
            assert_eq!(integration.name(), "smartctl_exporter");
        }
    }

    #[test]
    fn test_exporter_config_mapping() {
        let config = Config {
            smartctl_path: "/sbin/smartctl".to_string(),
            smartctl_device_exclude: "sdb".to_string(),
            smartctl_interval: "60s".to_string(),
        };
        assert_eq!(
            config.exporter_config(),
            ExporterConfig {
                scrape_uri: "/sbin/smartctl".to_string(),
                host_override: "sdb".to_string(),
            }
        );
    }

    #[test]
    fn test_new_wraps_one_collector() {
        let integration = new(&Config::default()).unwrap();
        assert_eq!(integration.collector_count(), 1);
    }

    #[test]
    fn test_to_yaml_round_trips_through_decode() {
        let config = Config {
            smartctl_interval: "30s".to_string(),
            ..Default::default()
        };
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("smartctl.interval: 30s"));
        assert_eq!(Config::from_yaml_str(&yaml).unwrap(), config);
    }
}
