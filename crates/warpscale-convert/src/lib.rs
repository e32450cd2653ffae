//! warpscale-convert — maps autoscaler schema records to API objects and back.
//!
//! ```text
//! HpaSpecConfig ──expand_spec──▶ HorizontalPodAutoscalerSpec
//!               ◀─flatten_spec──
//! (old, new)    ──patch_spec───▶ Vec<json_patch::PatchOperation>
//! ```
//!
//! Expansion validates as it goes and fails on the first malformed block.
//! Flattening cannot fail. Every call is a pure function of its inputs.

pub mod error;
pub mod expand;
pub mod flatten;
pub mod patch;
pub mod selector;

pub use error::{ConvertError, ConvertResult};
pub use expand::{expand_metric_spec, expand_metric_target, expand_spec, expand_spec_value};
pub use flatten::{flatten_metric_spec, flatten_metric_target, flatten_spec};
pub use patch::{SpecField, changed_fields, patch_spec};
