//! JSON-patch generation for in-place spec updates.
//!
//! Compares the previous and the desired schema records and emits one
//! operation per changed field, in a fixed order: `maxReplicas`,
//! `minReplicas`, `scaleTargetRef`, `metrics`. Fields are compared by the
//! API value they expand to, so edits that expansion normalizes away
//! produce no operation.

use json_patch::{AddOperation, PatchOperation, RemoveOperation, ReplaceOperation};
use jsonptr::{Pointer, PointerBuf};
use serde_json::Value;
use tracing::debug;
use warpscale_core::config::HpaSpecConfig;

use crate::error::ConvertResult;
use crate::expand::{
    expand_cross_version_object_reference, expand_metrics, expand_min_replicas, non_negative,
};

/// Spec fields that can be patched in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecField {
    MaxReplicas,
    MinReplicas,
    ScaleTargetRef,
    Metrics,
}

impl SpecField {
    /// Field name in the configuration schema.
    pub fn schema_name(&self) -> &'static str {
        match self {
            SpecField::MaxReplicas => "max_replicas",
            SpecField::MinReplicas => "min_replicas",
            SpecField::ScaleTargetRef => "scale_target_ref",
            SpecField::Metrics => "metric",
        }
    }

    /// Field name in the API object, the last token of its patch path.
    pub fn api_name(&self) -> &'static str {
        match self {
            SpecField::MaxReplicas => "maxReplicas",
            SpecField::MinReplicas => "minReplicas",
            SpecField::ScaleTargetRef => "scaleTargetRef",
            SpecField::Metrics => "metrics",
        }
    }
}

/// Fields whose expanded value differs between `old` and `new`.
///
/// Fails when `new` does not expand. An `old` metric list that no longer
/// expands counts as changed.
pub fn changed_fields(old: &HpaSpecConfig, new: &HpaSpecConfig) -> ConvertResult<Vec<SpecField>> {
    let mut fields = Vec::new();

    if old.max_replicas != new.max_replicas {
        fields.push(SpecField::MaxReplicas);
    }
    if positive(old.min_replicas) != positive(new.min_replicas) {
        fields.push(SpecField::MinReplicas);
    }
    if expand_cross_version_object_reference(&old.scale_target_ref)
        != expand_cross_version_object_reference(&new.scale_target_ref)
    {
        fields.push(SpecField::ScaleTargetRef);
    }

    let new_metrics = expand_metrics(&new.metric)?;
    if expand_metrics(&old.metric).ok().as_ref() != Some(&new_metrics) {
        fields.push(SpecField::Metrics);
    }

    Ok(fields)
}

fn positive(value: Option<i32>) -> Option<i32> {
    value.filter(|v| *v > 0)
}

/// Build the patch that turns the object expanded from `old` into the one
/// expanded from `new`. `path_prefix` is a JSON pointer prepended to every
/// path (`/spec`, or empty for the spec itself).
pub fn patch_spec(
    path_prefix: &str,
    old: &HpaSpecConfig,
    new: &HpaSpecConfig,
) -> ConvertResult<Vec<PatchOperation>> {
    let prefix = Pointer::parse(path_prefix)?;
    let mut ops = Vec::new();

    for field in changed_fields(old, new)? {
        let mut path: PointerBuf = prefix.to_buf();
        path.push_back(field.api_name());
        debug!(field = field.schema_name(), path = %path, "patching spec field");

        let op = match field {
            SpecField::MaxReplicas => PatchOperation::Replace(ReplaceOperation {
                path,
                value: Value::from(non_negative("max_replicas", new.max_replicas)?),
            }),
            SpecField::MinReplicas => {
                match (positive(old.min_replicas), expand_min_replicas(new.min_replicas)?) {
                    (Some(_), Some(v)) => PatchOperation::Replace(ReplaceOperation {
                        path,
                        value: Value::from(v),
                    }),
                    (None, Some(v)) => PatchOperation::Add(AddOperation {
                        path,
                        value: Value::from(v),
                    }),
                    (_, None) => PatchOperation::Remove(RemoveOperation { path }),
                }
            }
            SpecField::ScaleTargetRef => PatchOperation::Replace(ReplaceOperation {
                path,
                value: serde_json::to_value(expand_cross_version_object_reference(
                    &new.scale_target_ref,
                ))?,
            }),
            SpecField::Metrics => PatchOperation::Replace(ReplaceOperation {
                path,
                value: serde_json::to_value(expand_metrics(&new.metric)?)?,
            }),
        };

        ops.push(op);
    }

    Ok(ops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use serde_json::json;
    use warpscale_core::config::*;

    fn base() -> HpaSpecConfig {
        HpaSpecConfig {
            max_replicas: 3,
            min_replicas: Some(1),
            scale_target_ref: vec![CrossVersionObjectReferenceConfig {
                api_version: "apps/v1".to_string(),
                kind: "Deployment".to_string(),
                name: "api".to_string(),
            }],
            metric: vec![],
        }
    }

    fn cpu_metric(pct: i32) -> MetricConfig {
        MetricConfig {
            metric_type: Some("Resource".to_string()),
            resource: vec![ResourceMetricSourceConfig {
                name: "cpu".to_string(),
                target: vec![MetricTargetConfig {
                    target_type: "Utilization".to_string(),
                    average_utilization: Some(pct),
                    ..Default::default()
                }],
            }],
            ..Default::default()
        }
    }

    fn patch_json(prefix: &str, old: &HpaSpecConfig, new: &HpaSpecConfig) -> Value {
        serde_json::to_value(patch_spec(prefix, old, new).unwrap()).unwrap()
    }

    #[test]
    fn max_replicas_change_is_a_single_replace() {
        let mut new = base();
        new.max_replicas = 5;

        assert_eq!(
            patch_json("", &base(), &new),
            json!([{"op": "replace", "path": "/maxReplicas", "value": 5}])
        );
    }

    #[test]
    fn unchanged_spec_yields_no_operations() {
        assert!(patch_spec("/spec", &base(), &base()).unwrap().is_empty());
        assert!(changed_fields(&base(), &base()).unwrap().is_empty());
    }

    #[test]
    fn prefix_is_prepended() {
        let mut new = base();
        new.max_replicas = 9;

        assert_eq!(patch_json("/spec", &base(), &new)[0]["path"], json!("/spec/maxReplicas"));
    }

    #[test]
    fn prefix_must_be_a_json_pointer() {
        let mut new = base();
        new.max_replicas = 9;

        assert!(matches!(
            patch_spec("spec", &base(), &new),
            Err(ConvertError::PathPrefix(_))
        ));
    }

    #[test]
    fn min_replicas_replace_add_remove() {
        let mut new = base();
        new.min_replicas = Some(2);
        assert_eq!(
            patch_json("", &base(), &new),
            json!([{"op": "replace", "path": "/minReplicas", "value": 2}])
        );

        let mut old = base();
        old.min_replicas = None;
        assert_eq!(
            patch_json("", &old, &new),
            json!([{"op": "add", "path": "/minReplicas", "value": 2}])
        );

        new.min_replicas = None;
        assert_eq!(
            patch_json("", &base(), &new),
            json!([{"op": "remove", "path": "/minReplicas"}])
        );
    }

    #[test]
    fn zero_min_replicas_equals_unset() {
        let mut old = base();
        old.min_replicas = None;
        let mut new = base();
        new.min_replicas = Some(0);

        assert!(patch_spec("", &old, &new).unwrap().is_empty());
    }

    #[test]
    fn empty_reference_block_equals_missing_block() {
        let mut old = base();
        old.scale_target_ref = vec![];
        let mut new = base();
        new.scale_target_ref = vec![CrossVersionObjectReferenceConfig::default()];

        assert!(changed_fields(&old, &new).unwrap().is_empty());
        assert!(patch_spec("", &old, &new).unwrap().is_empty());
    }

    #[test]
    fn ignored_metric_blocks_do_not_patch() {
        let mut old = base();
        old.metric = vec![cpu_metric(70)];
        let mut new = old.clone();
        new.metric[0].pods = vec![PodsMetricSourceConfig::default()];

        assert!(changed_fields(&old, &new).unwrap().is_empty());
        assert!(patch_spec("", &old, &new).unwrap().is_empty());
    }

    #[test]
    fn broken_old_metrics_count_as_changed() {
        let mut old = base();
        old.metric = vec![MetricConfig::default()];
        let mut new = base();
        new.metric = vec![cpu_metric(70)];

        assert_eq!(changed_fields(&old, &new).unwrap(), vec![SpecField::Metrics]);
    }

    #[test]
    fn operations_follow_field_order() {
        let mut new = base();
        new.max_replicas = 6;
        new.min_replicas = Some(2);
        new.scale_target_ref[0].name = "api-v2".to_string();
        new.metric = vec![cpu_metric(70)];

        assert_eq!(
            changed_fields(&base(), &new).unwrap(),
            vec![
                SpecField::MaxReplicas,
                SpecField::MinReplicas,
                SpecField::ScaleTargetRef,
                SpecField::Metrics,
            ]
        );

        let ops = patch_json("", &base(), &new);
        let paths: Vec<&str> = ops
            .as_array()
            .unwrap()
            .iter()
            .map(|op| op["path"].as_str().unwrap())
            .collect();
        assert_eq!(
            paths,
            vec!["/maxReplicas", "/minReplicas", "/scaleTargetRef", "/metrics"]
        );

        assert_eq!(
            ops[3]["value"],
            json!([{
                "type": "Resource",
                "resource": {
                    "name": "cpu",
                    "target": {"type": "Utilization", "averageUtilization": 70}
                }
            }])
        );
    }

    #[test]
    fn invalid_metric_fails_the_patch() {
        let mut new = base();
        new.metric = vec![MetricConfig::default()];

        let err = patch_spec("", &base(), &new).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to expand metric spec: metric must have a type"
        );
    }

    #[test]
    fn schema_names_match_config_keys() {
        assert_eq!(SpecField::MaxReplicas.schema_name(), "max_replicas");
        assert_eq!(SpecField::Metrics.schema_name(), "metric");
        assert_eq!(SpecField::Metrics.api_name(), "metrics");
    }
}
