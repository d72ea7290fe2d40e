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

use std::collections::HashMap;

/// A metric family: one HELP/TYPE header and all of its samples.
#[derive(Debug, Default)]
struct MetricFamily {
    name: String,
    help: Option<String>,
    metric_type: Option<String>,
    samples: Vec<String>,
}

/// Helper struct to build Prometheus metrics
///
/// Samples are grouped per family, so several collectors (or several
/// integration instances) may report the same metric name into one builder
/// and still produce a single HELP/TYPE header per family.
#[derive(Debug, Default)]
pub struct MetricBuilder {
    families: Vec<MetricFamily>,
    index: HashMap<String, usize>,
    const_labels: Vec<(String, String)>,
}

impl MetricBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn family(&mut self, name: &str) -> &mut MetricFamily {
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => {
                self.families.push(MetricFamily {
                    name: name.to_string(),
                    ..Default::default()
                });
                let idx = self.families.len() - 1;
                self.index.insert(name.to_string(), idx);
                idx
            }
        };
        &mut self.families[idx]
    }

    /// Labels appended to every sample recorded from now on, replacing any
    /// previously set. Used to tell integration instances apart.
    pub fn const_labels(&mut self, labels: &[(&str, &str)]) -> &mut Self {
        self.const_labels = labels
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self
    }

    /// Add a HELP line. The first description given for a family wins.
    pub fn help(&mut self, name: &str, description: &str) -> &mut Self {
        let family = self.family(name);
        if family.help.is_none() {
            family.help = Some(description.to_string());
        }
        self
    }

    /// Add a TYPE line. The first type given for a family wins.
    pub fn type_(&mut self, name: &str, metric_type: &str) -> &mut Self {
        let family = self.family(name);
        if family.metric_type.is_none() {
            family.metric_type = Some(metric_type.to_string());
        }
        self
    }

    /// Add a metric line with labels
    pub fn metric(
        &mut self,
        name: &str,
        labels: &[(&str, &str)],
        value: impl ToString,
    ) -> &mut Self {
        let mut line = String::from(name);
        let all_labels: Vec<(&str, &str)> = labels
            .iter()
            .copied()
            .chain(
                self.const_labels
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str())),
            )
            .collect();

        if !all_labels.is_empty() {
            line.push('{');
            for (i, (key, value)) in all_labels.iter().enumerate() {
                if i > 0 {
                    line.push_str(", ");
                }
                line.push_str(&format!("{key}=\"{}\"", escape_label_value(value)));
            }
            line.push('}');
        }

        line.push(' ');
        line.push_str(&value.to_string());
        self.family(name).samples.push(line);
        self
    }

    /// Number of distinct metric families recorded so far.
    pub fn family_count(&self) -> usize {
        self.families.len()
    }

    /// Build the final metric string
    pub fn build(self) -> String {
        let mut out = String::new();
        for family in self.families {
            if let Some(help) = family.help {
                out.push_str(&format!("# HELP {} {help}\n", family.name));
            }
            if let Some(metric_type) = family.metric_type {
                out.push_str(&format!("# TYPE {} {metric_type}\n", family.name));
            }
            for sample in family.samples {
                out.push_str(&sample);
                out.push('\n');
            }
        }
        out
    }
}

/// Escape a label value for the Prometheus text format.
fn escape_label_value(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_family() {
        let mut builder = MetricBuilder::new();
        builder
            .help("smartctl_up", "Whether smartctl ran")
            .type_("smartctl_up", "gauge")
            .metric("smartctl_up", &[("host", "db-1")], 1);

        assert_eq!(
            builder.build(),
            "# HELP smartctl_up Whether smartctl ran\n\
             # TYPE smartctl_up gauge\n\
             smartctl_up{host=\"db-1\"} 1\n"
        );
    }

    #[test]
    fn test_repeated_family_is_grouped() {
        let mut builder = MetricBuilder::new();
        for host in ["a", "b"] {
            builder
                .help("smartctl_up", "Whether smartctl ran")
                .type_("smartctl_up", "gauge")
                .metric("smartctl_up", &[("host", host)], 1);
            builder
                .help("smartctl_scrape_duration_seconds", "Duration")
                .type_("smartctl_scrape_duration_seconds", "gauge")
                .metric("smartctl_scrape_duration_seconds", &[("host", host)], 0.5);
        }

        assert_eq!(builder.family_count(), 2);
        let text = builder.build();
        assert_eq!(text.matches("# HELP smartctl_up").count(), 1);
        assert_eq!(text.matches("# TYPE smartctl_up").count(), 1);

        let up_a = text.find("smartctl_up{host=\"a\"}").unwrap();
        let up_b = text.find("smartctl_up{host=\"b\"}").unwrap();
        let duration = text.find("# HELP smartctl_scrape_duration_seconds").unwrap();
        assert!(up_a < up_b && up_b < duration);
    }

    #[test]
    fn test_metric_without_labels() {
        let mut builder = MetricBuilder::new();
        builder.metric("smartctl_up", &[], 0);
        assert_eq!(builder.build(), "smartctl_up 0\n");
    }

    #[test]
    fn test_const_labels_follow_sample_labels() {
        let mut builder = MetricBuilder::new();
        builder.const_labels(&[("instance", "/a")]);
        builder.metric("smartctl_up", &[], 0);
        builder.metric("smartctl_up", &[("host", "h")], 1);
        builder.const_labels(&[("instance", "/b")]);
        builder.metric("smartctl_up", &[], 0);
        builder.const_labels(&[]);
        builder.metric("smartctl_up", &[], 1);

        assert_eq!(
            builder.build(),
            "smartctl_up{instance=\"/a\"} 0\n\
             smartctl_up{host=\"h\", instance=\"/a\"} 1\n\
             smartctl_up{instance=\"/b\"} 0\n\
             smartctl_up 1\n"
        );
    }

    #[test]
    fn test_label_escaping() {
        let mut builder = MetricBuilder::new();
        builder.metric("m", &[("v", "a\"b\\c\nd")], 1);
        assert_eq!(builder.build(), "m{v=\"a\\\"b\\\\c\\nd\"} 1\n");
    }
}
