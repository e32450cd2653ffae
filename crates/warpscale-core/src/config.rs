//! Autoscaler configuration schema.
//!
//! These records mirror the declarative schema field for field. Nested
//! blocks are lists, and a block limited to a single item is a one-element
//! list. Field names are part of the schema contract and must not change.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ConfigError;

/// A schema document holding the `spec` block of an autoscaler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HpaDocument {
    #[serde(default)]
    pub spec: Vec<HpaSpecConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HpaSpecConfig {
    pub max_replicas: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_replicas: Option<i32>,
    #[serde(default)]
    pub scale_target_ref: Vec<CrossVersionObjectReferenceConfig>,
    #[serde(default)]
    pub metric: Vec<MetricConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossVersionObjectReferenceConfig {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

/// One `metric` block. `type` is optional here so that a missing tag can be
/// reported by the converter instead of failing deserialization. A tag that
/// is not a string reads as missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricConfig {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "string_tag",
        skip_serializing_if = "Option::is_none"
    )]
    pub metric_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource: Vec<ResourceMetricSourceConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external: Vec<ExternalMetricSourceConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pods: Vec<PodsMetricSourceConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub object: Vec<ObjectMetricSourceConfig>,
}

fn string_tag<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        _ => Ok(None),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceMetricSourceConfig {
    pub name: String,
    #[serde(default)]
    pub target: Vec<MetricTargetConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalMetricSourceConfig {
    #[serde(default)]
    pub metric: Vec<MetricIdentifierConfig>,
    #[serde(default)]
    pub target: Vec<MetricTargetConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PodsMetricSourceConfig {
    #[serde(default)]
    pub metric: Vec<MetricIdentifierConfig>,
    #[serde(default)]
    pub target: Vec<MetricTargetConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectMetricSourceConfig {
    #[serde(default)]
    pub described_object: Vec<CrossVersionObjectReferenceConfig>,
    #[serde(default)]
    pub metric: Vec<MetricIdentifierConfig>,
    #[serde(default)]
    pub target: Vec<MetricTargetConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricIdentifierConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selector: Vec<LabelSelectorConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelSelectorConfig {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub match_labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub match_expressions: Vec<LabelSelectorRequirementConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelSelectorRequirementConfig {
    pub key: String,
    pub operator: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricTargetConfig {
    #[serde(rename = "type")]
    pub target_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_utilization: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl HpaDocument {
    /// Load a document, choosing the parser from the file extension
    /// (`.toml` or `.json`).
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
