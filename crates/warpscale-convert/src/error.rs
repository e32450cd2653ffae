//! Converter error types.

use thiserror::Error;
use warpscale_core::QuantityError;

/// Errors that can occur while expanding schema records into API objects.
///
/// Flattening never fails, so every variant here comes from `expand_*` or
/// from building a patch.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to expand HorizontalPodAutoscaler.Spec: null or empty input")]
    EmptyInput,

    #[error("failed to expand HorizontalPodAutoscaler.Spec: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: i32 },

    #[error("failed to expand metric spec: {0}")]
    Metric(Box<ConvertError>),

    #[error("metric must have a type")]
    MissingMetricType,

    #[error("unknown metric type {0:?}, expected one of Resource, External, Pods, Object")]
    UnknownMetricType(String),

    #[error("metric of type {metric_type} must have a {block} block")]
    MissingMetricSource {
        metric_type: &'static str,
        block: &'static str,
    },

    #[error("{0} must have a target block")]
    MissingTarget(&'static str),

    #[error("unknown metric target type {0:?}, expected one of Utilization, AverageValue, Value")]
    UnknownTargetType(String),

    #[error("metric target of type {target_type} must set {field}")]
    MissingTargetValue {
        target_type: &'static str,
        field: &'static str,
    },

    #[error("invalid patch path prefix: {0}")]
    PathPrefix(#[from] jsonptr::ParseError),

    #[error("invalid quantity for {field}: {source}")]
    InvalidQuantity {
        field: &'static str,
        #[source]
        source: QuantityError,
    },
}

impl ConvertError {
    pub(crate) fn in_metric(self) -> Self {
        ConvertError::Metric(Box::new(self))
    }
}

pub type ConvertResult<T> = Result<T, ConvertError>;
