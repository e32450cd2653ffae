//! API objects → schema records. Flattening is total.

use tracing::debug;
use warpscale_core::config::*;
use warpscale_core::*;

use crate::selector::flatten_label_selector;

/// Flatten a spec into the one-element `spec` block list.
pub fn flatten_spec(spec: &HorizontalPodAutoscalerSpec) -> Vec<HpaSpecConfig> {
    let block = HpaSpecConfig {
        max_replicas: spec.max_replicas,
        min_replicas: spec.min_replicas,
        scale_target_ref: flatten_cross_version_object_reference(&spec.scale_target_ref),
        metric: spec.metrics.iter().map(flatten_metric_spec).collect(),
    };

    debug!(
        max_replicas = block.max_replicas,
        metrics = block.metric.len(),
        "flattened autoscaler spec"
    );

    vec![block]
}

pub fn flatten_cross_version_object_reference(
    reference: &CrossVersionObjectReference,
) -> Vec<CrossVersionObjectReferenceConfig> {
    vec![CrossVersionObjectReferenceConfig {
        api_version: reference.api_version.clone(),
        kind: reference.kind.clone(),
        name: reference.name.clone(),
    }]
}

/// Flatten a metric. Only the block matching the populated source is set.
pub fn flatten_metric_spec(spec: &MetricSpec) -> MetricConfig {
    let mut block = MetricConfig {
        metric_type: Some(spec.type_name().to_string()),
        ..Default::default()
    };

    match spec {
        MetricSpec::Resource { resource } => {
            block.resource = flatten_resource_metric_source(resource);
        }
        MetricSpec::External { external } => {
            block.external = flatten_external_metric_source(external);
        }
        MetricSpec::Pods { pods } => {
            block.pods = flatten_pods_metric_source(pods);
        }
        MetricSpec::Object { object } => {
            block.object = flatten_object_metric_source(object);
        }
    }

    block
}

pub fn flatten_resource_metric_source(
    source: &ResourceMetricSource,
) -> Vec<ResourceMetricSourceConfig> {
    vec![ResourceMetricSourceConfig {
        name: source.name.clone(),
        target: flatten_metric_target(&source.target),
    }]
}

pub fn flatten_external_metric_source(
    source: &ExternalMetricSource,
) -> Vec<ExternalMetricSourceConfig> {
    vec![ExternalMetricSourceConfig {
        metric: flatten_metric_identifier(&source.metric),
        target: flatten_metric_target(&source.target),
    }]
}

pub fn flatten_pods_metric_source(source: &PodsMetricSource) -> Vec<PodsMetricSourceConfig> {
    vec![PodsMetricSourceConfig {
        metric: flatten_metric_identifier(&source.metric),
        target: flatten_metric_target(&source.target),
    }]
}

pub fn flatten_object_metric_source(
    source: &ObjectMetricSource,
) -> Vec<ObjectMetricSourceConfig> {
    vec![ObjectMetricSourceConfig {
        described_object: flatten_cross_version_object_reference(&source.described_object),
        metric: flatten_metric_identifier(&source.metric),
        target: flatten_metric_target(&source.target),
    }]
}

pub fn flatten_metric_identifier(identifier: &MetricIdentifier) -> Vec<MetricIdentifierConfig> {
    vec![MetricIdentifierConfig {
        name: identifier.name.clone(),
        selector: identifier
            .selector
            .as_ref()
            .map(flatten_label_selector)
            .unwrap_or_default(),
    }]
}

pub fn flatten_metric_target(target: &MetricTarget) -> Vec<MetricTargetConfig> {
    let mut block = MetricTargetConfig {
        target_type: target.type_name().to_string(),
        ..Default::default()
    };

    match target {
        MetricTarget::Utilization { average_utilization } => {
            block.average_utilization = Some(*average_utilization);
        }
        MetricTarget::AverageValue { average_value } => {
            block.average_value = Some(average_value.to_string());
        }
        MetricTarget::Value { value } => {
            block.value = Some(value.to_string());
        }
    }

    vec![block]
}
