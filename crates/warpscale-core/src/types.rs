//! API objects for horizontal pod autoscaling (autoscaling/v2beta2).
//!
//! Field names serialize in the orchestration API's camelCase form. Metric
//! sources and metric targets are sum types tagged by `type`, so a metric
//! spec can never carry more than one source.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::quantity::Quantity;

// ── Spec ──────────────────────────────────────────────────────────

/// Desired autoscaling behaviour for a scale target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorizontalPodAutoscalerSpec {
    /// Upper bound for the replica count. Never below `min_replicas`.
    pub max_replicas: i32,
    /// Lower bound for the replica count. Unset means the API default (1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_replicas: Option<i32>,
    /// The resource whose replica count is managed.
    #[serde(default)]
    pub scale_target_ref: CrossVersionObjectReference,
    /// Metrics used to compute the desired replica count. The largest
    /// proposal across all metrics wins.
    #[serde(default)]
    pub metrics: Vec<MetricSpec>,
}

/// Reference to an object in any API group/version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossVersionObjectReference {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub name: String,
}

// ── Metrics ───────────────────────────────────────────────────────

/// One metric the autoscaler scales on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MetricSpec {
    /// A per-pod resource (cpu, memory) known to the scheduler.
    Resource { resource: ResourceMetricSource },
    /// A metric not associated with any object in the cluster.
    External { external: ExternalMetricSource },
    /// A metric averaged across the pods of the scale target.
    Pods { pods: PodsMetricSource },
    /// A metric describing a single object (an ingress, say).
    Object { object: ObjectMetricSource },
}

impl MetricSpec {
    /// The `type` tag written for this variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            MetricSpec::Resource { .. } => "Resource",
            MetricSpec::External { .. } => "External",
            MetricSpec::Pods { .. } => "Pods",
            MetricSpec::Object { .. } => "Object",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceMetricSource {
    pub name: String,
    pub target: MetricTarget,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalMetricSource {
    pub metric: MetricIdentifier,
    pub target: MetricTarget,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodsMetricSource {
    pub metric: MetricIdentifier,
    pub target: MetricTarget,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMetricSource {
    pub described_object: CrossVersionObjectReference,
    pub metric: MetricIdentifier,
    pub target: MetricTarget,
}

/// Names a metric and optionally narrows it with a label selector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricIdentifier {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<LabelSelector>,
}

/// The value a metric should be held at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MetricTarget {
    /// Percentage of the requested resource, averaged across pods.
    #[serde(rename_all = "camelCase")]
    Utilization { average_utilization: i32 },
    /// Raw value averaged across pods.
    #[serde(rename_all = "camelCase")]
    AverageValue { average_value: Quantity },
    /// Raw value of the metric as reported.
    Value { value: Quantity },
}

impl MetricTarget {
    /// The `type` tag written for this variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            MetricTarget::Utilization { .. } => "Utilization",
            MetricTarget::AverageValue { .. } => "AverageValue",
            MetricTarget::Value { .. } => "Value",
        }
    }
}

// ── Selectors ─────────────────────────────────────────────────────

/// Label query over a set of resources. An empty selector matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelector {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_labels: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_expressions: Option<Vec<LabelSelectorRequirement>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSelectorRequirement {
    pub key: String,
    /// One of `In`, `NotIn`, `Exists`, `DoesNotExist`.
    pub operator: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}
