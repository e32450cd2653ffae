//! Round-trip tests: flatten(expand(x)) reproduces x.
//!
//! Documents are written the way an operator would write them, in TOML,
//! and cover every metric source and target kind.

use serde_json::json;
use warpscale_convert::*;
use warpscale_core::HpaDocument;
use warpscale_core::config::HpaSpecConfig;

const ALL_SOURCES: &str = r#"
[[spec]]
max_replicas = 20
min_replicas = 3

[[spec.scale_target_ref]]
api_version = "apps/v1"
kind = "Deployment"
name = "checkout"

[[spec.metric]]
type = "Resource"

[[spec.metric.resource]]
name = "cpu"

[[spec.metric.resource.target]]
type = "Utilization"
average_utilization = 65

[[spec.metric]]
type = "External"

[[spec.metric.external]]

[[spec.metric.external.metric]]
name = "queue_messages_ready"

[[spec.metric.external.metric.selector]]
match_labels = { queue = "orders" }

[[spec.metric.external.metric.selector.match_expressions]]
key = "region"
operator = "In"
values = ["eu-west-1", "eu-central-1"]

[[spec.metric.external.target]]
type = "Value"
value = "30"

[[spec.metric]]
type = "Pods"

[[spec.metric.pods]]

[[spec.metric.pods.metric]]
name = "packets-per-second"

[[spec.metric.pods.target]]
type = "AverageValue"
average_value = "1k"

[[spec.metric]]
type = "Object"

[[spec.metric.object]]

[[spec.metric.object.described_object]]
api_version = "networking.k8s.io/v1"
kind = "Ingress"
name = "main-route"

[[spec.metric.object.metric]]
name = "requests-per-second"

[[spec.metric.object.target]]
type = "Value"
value = "2k"
"#;

fn load(toml: &str) -> Vec<HpaSpecConfig> {
    HpaDocument::from_toml_str(toml).unwrap().spec
}

#[test]
fn every_metric_kind_roundtrips() {
    let blocks = load(ALL_SOURCES);
    let spec = expand_spec(&blocks).unwrap();

    let kinds: Vec<&str> = spec.metrics.iter().map(|m| m.type_name()).collect();
    assert_eq!(kinds, vec!["Resource", "External", "Pods", "Object"]);

    assert_eq!(flatten_spec(&spec), blocks);
}

#[test]
fn api_json_matches_orchestrator_shape() {
    let spec = expand_spec(&load(ALL_SOURCES)).unwrap();
    let value = serde_json::to_value(&spec).unwrap();

    assert_eq!(value["maxReplicas"], json!(20));
    assert_eq!(value["minReplicas"], json!(3));
    assert_eq!(value["scaleTargetRef"]["kind"], json!("Deployment"));
    assert_eq!(
        value["metrics"][1],
        json!({
            "type": "External",
            "external": {
                "metric": {
                    "name": "queue_messages_ready",
                    "selector": {
                        "matchLabels": {"queue": "orders"},
                        "matchExpressions": [{
                            "key": "region",
                            "operator": "In",
                            "values": ["eu-west-1", "eu-central-1"]
                        }]
                    }
                },
                "target": {"type": "Value", "value": "30"}
            }
        })
    );
    assert_eq!(
        value["metrics"][3]["object"]["describedObject"]["name"],
        json!("main-route")
    );
}

#[test]
fn api_json_parses_back_to_the_same_spec() {
    let spec = expand_spec(&load(ALL_SOURCES)).unwrap();
    let json = serde_json::to_string(&spec).unwrap();
    let parsed: warpscale_core::HorizontalPodAutoscalerSpec = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, spec);
}

#[test]
fn zero_min_replicas_normalizes_away() {
    let blocks = load(
        r#"
[[spec]]
max_replicas = 4
min_replicas = 0

[[spec.scale_target_ref]]
kind = "Deployment"
name = "api"
"#,
    );

    let flattened = flatten_spec(&expand_spec(&blocks).unwrap());
    assert_eq!(flattened[0].min_replicas, None);

    let mut expected = blocks.clone();
    expected[0].min_replicas = None;
    assert_eq!(flattened, expected);
}

#[test]
fn untyped_tree_roundtrips() {
    let tree = json!([{
        "max_replicas": 6,
        "min_replicas": 2,
        "scale_target_ref": [{"kind": "StatefulSet", "name": "db"}],
        "metric": [{
            "type": "Resource",
            "resource": [{
                "name": "memory",
                "target": [{"type": "AverageValue", "average_value": "700Mi"}]
            }]
        }]
    }]);

    let spec = expand_spec_value(&tree).unwrap();
    let flattened = serde_json::to_value(flatten_spec(&spec)).unwrap();
    assert_eq!(flattened, tree);
}

#[test]
fn patch_after_editing_document() {
    let old = load(ALL_SOURCES);
    let mut new = old.clone();
    new[0].max_replicas = 5;

    let ops = patch_spec("/spec", &old[0], &new[0]).unwrap();
    assert_eq!(
        serde_json::to_value(&ops).unwrap(),
        json!([{"op": "replace", "path": "/spec/maxReplicas", "value": 5}])
    );
}
