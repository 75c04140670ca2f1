//! Rendering shapes for metrics and the wire encoding of widget metric sets.
//!
//! [`MetricRenderConfig`] is the pure, typed description of how one metric or
//! expression is queried — the two shapes are mutually exclusive by
//! construction. [`MetricSetEncoder`] turns a widget's metrics into the wire
//! format's metric arrays: `["Namespace", "Name", "DimName", "DimValue",
//! {options}]` for stat queries, `[{expression, …}]` for math expressions,
//! with every referenced sub-metric emitted as a hidden entry keyed by its id.

use crate::error::BoardError;
use crate::metric::{Dimensions, MetricExpr, Statistic, Unit, DEFAULT_PERIOD};
use crate::types::Color;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::time::Duration;

/// How a metric renders into a query: exactly one of the two shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricRenderConfig {
    /// A direct stat query against a named time series.
    Stat(StatQueryConfig),
    /// A math expression over other metrics.
    Expression(ExpressionConfig),
}

/// The stat-query rendering shape.
#[derive(Debug, Clone, PartialEq)]
pub struct StatQueryConfig {
    pub namespace: String,
    pub metric_name: String,
    pub dimensions: Dimensions,
    pub statistic: Statistic,
    pub period: Duration,
    pub unit: Option<Unit>,
    pub label: Option<String>,
    pub color: Option<Color>,
    pub account: Option<String>,
    pub region: Option<String>,
}

/// The math-expression rendering shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionConfig {
    pub expression: String,
    pub using_metrics: BTreeMap<String, MetricExpr>,
    pub period: Duration,
    pub label: Option<String>,
    pub color: Option<Color>,
    pub search_account: Option<String>,
    pub search_region: Option<String>,
}

/// Accumulates the metric arrays for one widget.
///
/// Entries keep insertion order; sub-metrics follow their referencing
/// expression depth-first. Ids are the expression map keys, so one id naming
/// two different definitions cannot be encoded and is rejected.
#[derive(Debug, Default)]
pub(crate) struct MetricSetEncoder {
    entries: Vec<Value>,
    seen: BTreeMap<String, MetricExpr>,
}

impl MetricSetEncoder {
    pub fn new() -> Self {
        MetricSetEncoder::default()
    }

    /// Adds one of the widget's own metrics, optionally tagged onto the
    /// right y-axis.
    pub fn add_visible(
        &mut self,
        metric: &MetricExpr,
        y_axis: Option<&'static str>,
    ) -> Result<(), BoardError> {
        self.add(metric, None, true, y_axis)
    }

    /// The accumulated metric arrays, in emission order.
    pub fn finish(self) -> Vec<Value> {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn add(
        &mut self,
        metric: &MetricExpr,
        id: Option<&str>,
        visible: bool,
        y_axis: Option<&'static str>,
    ) -> Result<(), BoardError> {
        if let Some(id) = id {
            match self.seen.get(id) {
                Some(existing) if existing == metric => return Ok(()),
                Some(_) => {
                    return Err(BoardError::DuplicateMetricId { id: id.to_string() });
                }
                None => {
                    self.seen.insert(id.to_string(), metric.clone());
                }
            }
        }

        match metric.render_config() {
            MetricRenderConfig::Stat(config) => {
                self.entries
                    .push(stat_entry(&config, id, visible, y_axis));
            }
            MetricRenderConfig::Expression(config) => {
                self.entries
                    .push(expression_entry(&config, id, visible, y_axis));
                for (sub_id, sub) in &config.using_metrics {
                    self.add(sub, Some(sub_id.as_str()), false, None)?;
                }
            }
        }
        Ok(())
    }
}

fn stat_entry(
    config: &StatQueryConfig,
    id: Option<&str>,
    visible: bool,
    y_axis: Option<&'static str>,
) -> Value {
    let mut entry: Vec<Value> = vec![
        Value::String(config.namespace.clone()),
        Value::String(config.metric_name.clone()),
    ];
    for (name, value) in &config.dimensions {
        entry.push(Value::String(name.clone()));
        entry.push(Value::String(value.clone()));
    }

    let mut options = Map::new();
    options.insert("stat".to_string(), json!(config.statistic.as_str()));
    if config.period != DEFAULT_PERIOD {
        options.insert("period".to_string(), json!(config.period.as_secs()));
    }
    if let Some(label) = &config.label {
        options.insert("label".to_string(), json!(label));
    }
    if let Some(color) = config.color {
        options.insert("color".to_string(), json!(color.to_hex()));
    }
    if let Some(region) = &config.region {
        options.insert("region".to_string(), json!(region));
    }
    if let Some(account) = &config.account {
        options.insert("accountId".to_string(), json!(account));
    }
    append_render_flags(&mut options, id, visible, y_axis);
    entry.push(Value::Object(options));
    Value::Array(entry)
}

fn expression_entry(
    config: &ExpressionConfig,
    id: Option<&str>,
    visible: bool,
    y_axis: Option<&'static str>,
) -> Value {
    let mut options = Map::new();
    options.insert("expression".to_string(), json!(config.expression));
    if let Some(label) = &config.label {
        options.insert("label".to_string(), json!(label));
    }
    if let Some(color) = config.color {
        options.insert("color".to_string(), json!(color.to_hex()));
    }
    if config.period != DEFAULT_PERIOD {
        options.insert("period".to_string(), json!(config.period.as_secs()));
    }
    if let Some(region) = &config.search_region {
        options.insert("region".to_string(), json!(region));
    }
    if let Some(account) = &config.search_account {
        options.insert("accountId".to_string(), json!(account));
    }
    append_render_flags(&mut options, id, visible, y_axis);
    Value::Array(vec![Value::Object(options)])
}

fn append_render_flags(
    options: &mut Map<String, Value>,
    id: Option<&str>,
    visible: bool,
    y_axis: Option<&'static str>,
) {
    if let Some(id) = id {
        options.insert("id".to_string(), json!(id));
    }
    if !visible {
        options.insert("visible".to_string(), json!(false));
    }
    if let Some(axis) = y_axis {
        options.insert("yAxis".to_string(), json!(axis));
    }
}

/// Convenience for widgets: encode a left and a right metric group.
pub(crate) fn encode_metric_groups(
    left: &[MetricExpr],
    right: &[MetricExpr],
) -> Result<Vec<Value>, BoardError> {
    let mut encoder = MetricSetEncoder::new();
    for metric in left {
        encoder.add_visible(metric, None)?;
    }
    for metric in right {
        encoder.add_visible(metric, Some("right"))?;
    }
    Ok(encoder.finish())
}
