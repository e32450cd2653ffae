//! Schema records → API objects.
//!
//! Each `expand_*` function takes the schema record (or the block list that
//! holds it) and returns the typed API object. Optional single-item blocks
//! read their first element; anything past it is ignored.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use warpscale_core::config::*;
use warpscale_core::*;

use crate::error::{ConvertError, ConvertResult};
use crate::selector::expand_label_selector;

/// Expand the `spec` block list of an autoscaler.
pub fn expand_spec(blocks: &[HpaSpecConfig]) -> ConvertResult<HorizontalPodAutoscalerSpec> {
    let block = blocks.first().ok_or(ConvertError::EmptyInput)?;

    let max_replicas = non_negative("max_replicas", block.max_replicas)?;
    let min_replicas = expand_min_replicas(block.min_replicas)?;

    let metrics = expand_metrics(&block.metric)?;

    let spec = HorizontalPodAutoscalerSpec {
        max_replicas,
        min_replicas,
        scale_target_ref: expand_cross_version_object_reference(&block.scale_target_ref),
        metrics,
    };

    debug!(
        max_replicas = spec.max_replicas,
        min_replicas = ?spec.min_replicas,
        scale_target = %spec.scale_target_ref.name,
        metrics = spec.metrics.len(),
        "expanded autoscaler spec"
    );

    Ok(spec)
}

/// Expand an untyped configuration tree (`[{ "max_replicas": .. }]`).
///
/// `null`, `[]` and `[null]` are all treated as absent input.
pub fn expand_spec_value(value: &Value) -> ConvertResult<HorizontalPodAutoscalerSpec> {
    let absent = match value {
        Value::Null => true,
        Value::Array(items) => items.first().is_none_or(Value::is_null),
        _ => false,
    };
    if absent {
        return Err(ConvertError::EmptyInput);
    }

    let blocks = Vec::<HpaSpecConfig>::deserialize(value)?;
    expand_spec(&blocks)
}

/// Zero means unset, matching the schema's zero-value convention.
pub(crate) fn expand_min_replicas(value: Option<i32>) -> ConvertResult<Option<i32>> {
    match value {
        Some(v) => Ok(Some(non_negative("min_replicas", v)?).filter(|v| *v > 0)),
        None => Ok(None),
    }
}

pub(crate) fn non_negative(field: &'static str, value: i32) -> ConvertResult<i32> {
    if value < 0 {
        return Err(ConvertError::Negative { field, value });
    }
    Ok(value)
}

pub fn expand_cross_version_object_reference(
    blocks: &[CrossVersionObjectReferenceConfig],
) -> CrossVersionObjectReference {
    let Some(block) = blocks.first() else {
        return CrossVersionObjectReference::default();
    };

    CrossVersionObjectReference {
        api_version: block.api_version.clone(),
        kind: block.kind.clone(),
        name: block.name.clone(),
    }
}

// ── Metrics ───────────────────────────────────────────────────────

/// Expand every `metric` block in order, wrapping the first failure.
pub(crate) fn expand_metrics(blocks: &[MetricConfig]) -> ConvertResult<Vec<MetricSpec>> {
    blocks
        .iter()
        .map(|m| expand_metric_spec(m).map_err(ConvertError::in_metric))
        .collect()
}

/// Expand one `metric` block. The `type` tag picks the source block that is
/// read; blocks for other source kinds are logged and dropped.
pub fn expand_metric_spec(block: &MetricConfig) -> ConvertResult<MetricSpec> {
    let metric_type = block
        .metric_type
        .as_deref()
        .ok_or(ConvertError::MissingMetricType)?;

    let spec = match metric_type {
        "Resource" => MetricSpec::Resource {
            resource: expand_resource_metric_source(source_block(
                &block.resource,
                "Resource",
                "resource",
            )?)?,
        },
        "External" => MetricSpec::External {
            external: expand_external_metric_source(source_block(
                &block.external,
                "External",
                "external",
            )?)?,
        },
        "Pods" => MetricSpec::Pods {
            pods: expand_pods_metric_source(source_block(&block.pods, "Pods", "pods")?)?,
        },
        "Object" => MetricSpec::Object {
            object: expand_object_metric_source(source_block(
                &block.object,
                "Object",
                "object",
            )?)?,
        },
        other => return Err(ConvertError::UnknownMetricType(other.to_string())),
    };

    let populated = [
        ("Resource", "resource", !block.resource.is_empty()),
        ("External", "external", !block.external.is_empty()),
        ("Pods", "pods", !block.pods.is_empty()),
        ("Object", "object", !block.object.is_empty()),
    ];
    for (kind, key, present) in populated {
        if present && kind != spec.type_name() {
            warn!(
                metric_type = spec.type_name(),
                ignored = key,
                "metric block does not match metric type, ignoring it"
            );
        }
    }

    Ok(spec)
}

fn source_block<'a, T>(
    blocks: &'a [T],
    metric_type: &'static str,
    block: &'static str,
) -> ConvertResult<&'a T> {
    blocks
        .first()
        .ok_or(ConvertError::MissingMetricSource { metric_type, block })
}

pub fn expand_resource_metric_source(
    block: &ResourceMetricSourceConfig,
) -> ConvertResult<ResourceMetricSource> {
    Ok(ResourceMetricSource {
        name: block.name.clone(),
        target: expand_target_block(&block.target, "resource metric")?,
    })
}

pub fn expand_external_metric_source(
    block: &ExternalMetricSourceConfig,
) -> ConvertResult<ExternalMetricSource> {
    Ok(ExternalMetricSource {
        metric: expand_identifier_block(&block.metric),
        target: expand_target_block(&block.target, "external metric")?,
    })
}

pub fn expand_pods_metric_source(
    block: &PodsMetricSourceConfig,
) -> ConvertResult<PodsMetricSource> {
    Ok(PodsMetricSource {
        metric: expand_identifier_block(&block.metric),
        target: expand_target_block(&block.target, "pods metric")?,
    })
}

pub fn expand_object_metric_source(
    block: &ObjectMetricSourceConfig,
) -> ConvertResult<ObjectMetricSource> {
    Ok(ObjectMetricSource {
        described_object: expand_cross_version_object_reference(&block.described_object),
        metric: expand_identifier_block(&block.metric),
        target: expand_target_block(&block.target, "object metric")?,
    })
}

fn expand_identifier_block(blocks: &[MetricIdentifierConfig]) -> MetricIdentifier {
    blocks
        .first()
        .map(expand_metric_identifier)
        .unwrap_or_default()
}

pub fn expand_metric_identifier(block: &MetricIdentifierConfig) -> MetricIdentifier {
    MetricIdentifier {
        name: block.name.clone(),
        selector: expand_label_selector(&block.selector),
    }
}

// ── Targets ───────────────────────────────────────────────────────

fn expand_target_block(
    blocks: &[MetricTargetConfig],
    owner: &'static str,
) -> ConvertResult<MetricTarget> {
    let block = blocks.first().ok_or(ConvertError::MissingTarget(owner))?;
    expand_metric_target(block)
}

/// Expand a `target` block into the variant named by its `type`.
pub fn expand_metric_target(block: &MetricTargetConfig) -> ConvertResult<MetricTarget> {
    match block.target_type.as_str() {
        "Utilization" => match block.average_utilization {
            Some(v) if v > 0 => Ok(MetricTarget::Utilization {
                average_utilization: v,
            }),
            Some(v) if v < 0 => Err(ConvertError::Negative {
                field: "average_utilization",
                value: v,
            }),
            _ => Err(ConvertError::MissingTargetValue {
                target_type: "Utilization",
                field: "average_utilization",
            }),
        },
        "AverageValue" => Ok(MetricTarget::AverageValue {
            average_value: target_quantity(
                block.average_value.as_deref(),
                "AverageValue",
                "average_value",
            )?,
        }),
        "Value" => Ok(MetricTarget::Value {
            value: target_quantity(block.value.as_deref(), "Value", "value")?,
        }),
        other => Err(ConvertError::UnknownTargetType(other.to_string())),
    }
}

fn target_quantity(
    raw: Option<&str>,
    target_type: &'static str,
    field: &'static str,
) -> ConvertResult<Quantity> {
    let raw = raw
        .filter(|s| !s.is_empty())
        .ok_or(ConvertError::MissingTargetValue { target_type, field })?;
    Quantity::parse(raw).map_err(|source| ConvertError::InvalidQuantity { field, source })
}
