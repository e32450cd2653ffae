//! Label selectors used to narrow metric identifiers.

use warpscale_core::config::{LabelSelectorConfig, LabelSelectorRequirementConfig};
use warpscale_core::{LabelSelector, LabelSelectorRequirement};

/// Expand the first `selector` block. Returns `None` for an empty list.
pub fn expand_label_selector(blocks: &[LabelSelectorConfig]) -> Option<LabelSelector> {
    let block = blocks.first()?;
    let mut selector = LabelSelector::default();

    if !block.match_labels.is_empty() {
        selector.match_labels = Some(block.match_labels.clone());
    }

    if !block.match_expressions.is_empty() {
        selector.match_expressions = Some(
            block
                .match_expressions
                .iter()
                .map(|r| LabelSelectorRequirement {
                    key: r.key.clone(),
                    operator: r.operator.clone(),
                    values: r.values.clone(),
                })
                .collect(),
        );
    }

    Some(selector)
}

pub fn flatten_label_selector(selector: &LabelSelector) -> Vec<LabelSelectorConfig> {
    let mut block = LabelSelectorConfig::default();

    if let Some(labels) = selector.match_labels.as_ref().filter(|l| !l.is_empty()) {
        block.match_labels = labels.clone();
    }

    if let Some(exprs) = selector.match_expressions.as_ref() {
        block.match_expressions = exprs
            .iter()
            .map(|r| LabelSelectorRequirementConfig {
                key: r.key.clone(),
                operator: r.operator.clone(),
                values: r.values.clone(),
            })
            .collect();
    }

    vec![block]
}
