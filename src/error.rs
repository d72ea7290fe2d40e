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

//! Unified error types for the smartctl-agent library.
//!
//! Every fallible step of building and serving integrations returns
//! [`enum@Error`], from decoding YAML to constructing integration instances.
//!
//! # Example
//!
//! ```rust
//! use smartctl_agent::integrations::smartctl_exporter::Config;
//! use smartctl_agent::integrations::IntegrationConfig;
//! use smartctl_agent::Error;
//!
//! let config = Config::from_yaml_str("smartctl.interval: 5m").unwrap();
//! let err = config.new_integration().err().unwrap();
//! assert!(matches!(err, Error::Validation(_)));
//! ```

use thiserror::Error;

/// The main error type for smartctl-agent operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration value was decoded but is not acceptable.
    ///
    /// Raised while building an integration; the instance is not created.
    #[error("{0}")]
    Validation(String),

    /// The YAML input could not be decoded.
    ///
    /// The underlying decoder message is surfaced unchanged.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// An integration kind was registered twice.
    #[error("integration {0:?} is already registered")]
    DuplicateIntegration(String),

    /// The configuration names an integration kind nobody registered.
    #[error("unknown integration {0:?}")]
    UnknownIntegration(String),

    /// Two instances of one integration kind share an instance key.
    #[error("integration {name:?} has more than one instance with key {key:?}")]
    DuplicateInstance { name: String, key: String },

    /// An I/O error occurred, e.g. while reading the agent config file.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for smartctl-agent operations.
pub type Result<T> = std::result::Result<T, Error>;
