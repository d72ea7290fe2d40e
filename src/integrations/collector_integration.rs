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

use super::{Collector, Integration};
use crate::api::metrics::MetricBuilder;
use crate::error::Result;

/// An integration whose metrics come from a fixed set of collectors.
pub struct CollectorIntegration {
    name: String,
    collectors: Vec<Box<dyn Collector>>,
}

impl CollectorIntegration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collectors: Vec::new(),
        }
    }

    /// Add collectors whose output is gathered, in order, on every scrape.
    pub fn with_collectors<I>(mut self, collectors: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn Collector>>,
    {
        self.collectors.extend(collectors);
        self
    }

    pub fn collector_count(&self) -> usize {
        self.collectors.len()
    }
}

impl Integration for CollectorIntegration {
    fn name(&self) -> &str {
        &self.name
    }

    fn gather_into(&self, builder: &mut MetricBuilder) -> Result<()> {
        for collector in &self.collectors {
            collector.collect(builder)?;
        }
        Ok(())
    }
}
