//! Metrics and metric-math expressions.
//!
//! A [`Metric`] names one time series: namespace, metric name, dimensions,
//! plus the aggregation applied to it (statistic, period, unit filter) and
//! rendering hints (label, color). A [`MathExpression`] derives a time series
//! from other metrics or expressions via a server-evaluated formula.
//!
//! Both are immutable value objects: construction validates the identifying
//! fields and fails fast, [`Metric::with`] produces a modified copy, and
//! sharing one metric across several widgets is plain cloning.

mod render;
mod statistic;
mod unit;

pub use render::{ExpressionConfig, MetricRenderConfig, StatQueryConfig};
pub(crate) use render::{encode_metric_groups, MetricSetEncoder};
pub use statistic::Statistic;
pub use unit::Unit;

use crate::error::BuildError;
use crate::types::Color;
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;
use tracing::warn;

/// Dimensions identifying a time series within a namespace: unique names
/// mapped to values, in a deterministic order.
pub type Dimensions = BTreeMap<String, String>;

/// The default aggregation period, five minutes.
pub const DEFAULT_PERIOD: Duration = Duration::from_secs(300);

/// Construction options for [`Metric`].
///
/// `namespace` and `metric_name` are required; everything else defaults.
/// There is no dynamic key space here: an option this struct does not name
/// cannot be expressed, so misspelled options are compile errors.
#[derive(Debug, Clone, Default)]
pub struct MetricProps {
    pub namespace: String,
    pub metric_name: String,
    pub dimensions: Dimensions,
    pub statistic: Option<Statistic>,
    pub period: Option<Duration>,
    pub unit: Option<Unit>,
    pub label: Option<String>,
    pub color: Option<Color>,
    pub account: Option<String>,
    pub region: Option<String>,
}

/// A named, dimensioned, aggregated time series.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    namespace: String,
    metric_name: String,
    dimensions: Dimensions,
    statistic: Statistic,
    period: Duration,
    unit: Option<Unit>,
    label: Option<String>,
    color: Option<Color>,
    account: Option<String>,
    region: Option<String>,
}

impl Metric {
    /// Builds a metric, failing fast when `namespace` or `metric_name` is
    /// missing.
    pub fn new(props: MetricProps) -> Result<Self, BuildError> {
        if props.namespace.is_empty() {
            return Err(BuildError::MissingField {
                entity: "Metric",
                field: "namespace",
            });
        }
        if props.metric_name.is_empty() {
            return Err(BuildError::MissingField {
                entity: "Metric",
                field: "metric_name",
            });
        }
        Ok(Metric {
            namespace: props.namespace,
            metric_name: props.metric_name,
            dimensions: props.dimensions,
            statistic: props.statistic.unwrap_or_default(),
            period: props.period.unwrap_or(DEFAULT_PERIOD),
            unit: props.unit,
            label: props.label,
            color: props.color,
            account: props.account,
            region: props.region,
        })
    }

    /// Returns a copy of this metric with only the overridden fields changed.
    ///
    /// The receiver is never mutated; an all-`None` override returns an equal
    /// metric.
    pub fn with(&self, overrides: MetricOverrides) -> Metric {
        Metric {
            namespace: self.namespace.clone(),
            metric_name: self.metric_name.clone(),
            dimensions: overrides.dimensions.unwrap_or_else(|| self.dimensions.clone()),
            statistic: overrides.statistic.unwrap_or_else(|| self.statistic.clone()),
            period: overrides.period.unwrap_or(self.period),
            unit: overrides.unit.or(self.unit),
            label: overrides.label.or_else(|| self.label.clone()),
            color: overrides.color.or(self.color),
            account: overrides.account.or_else(|| self.account.clone()),
            region: overrides.region.or_else(|| self.region.clone()),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn metric_name(&self) -> &str {
        &self.metric_name
    }

    pub fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    pub fn statistic(&self) -> &Statistic {
        &self.statistic
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// The stat-query rendering shape for this metric. Pure.
    pub fn render_config(&self) -> MetricRenderConfig {
        MetricRenderConfig::Stat(StatQueryConfig {
            namespace: self.namespace.clone(),
            metric_name: self.metric_name.clone(),
            dimensions: self.dimensions.clone(),
            statistic: self.statistic.clone(),
            period: self.period,
            unit: self.unit,
            label: self.label.clone(),
            color: self.color,
            account: self.account.clone(),
            region: self.region.clone(),
        })
    }
}

/// Field overrides for [`Metric::with`]. Unset fields keep the receiver's
/// value.
#[derive(Debug, Clone, Default)]
pub struct MetricOverrides {
    pub dimensions: Option<Dimensions>,
    pub statistic: Option<Statistic>,
    pub period: Option<Duration>,
    pub unit: Option<Unit>,
    pub label: Option<String>,
    pub color: Option<Color>,
    pub account: Option<String>,
    pub region: Option<String>,
}

/// Construction options for [`MathExpression`].
#[derive(Debug, Clone, Default)]
pub struct MathExpressionProps {
    pub expression: String,
    pub using_metrics: BTreeMap<String, MetricExpr>,
    pub period: Option<Duration>,
    pub label: Option<String>,
    pub color: Option<Color>,
    pub search_account: Option<String>,
    pub search_region: Option<String>,
}

/// A derived time series: a formula over other metrics and expressions,
/// evaluated server-side.
#[derive(Debug, Clone, PartialEq)]
pub struct MathExpression {
    expression: String,
    using_metrics: BTreeMap<String, MetricExpr>,
    period: Duration,
    label: Option<String>,
    color: Option<Color>,
    search_account: Option<String>,
    search_region: Option<String>,
}

impl MathExpression {
    /// Builds a math expression, failing fast when `expression` is missing.
    ///
    /// Identifiers referenced by the formula but absent from `using_metrics`
    /// are legal — the service resolves them at evaluation time — but each
    /// one is reported through `tracing::warn!` so the deferral is visible.
    pub fn new(props: MathExpressionProps) -> Result<Self, BuildError> {
        if props.expression.is_empty() {
            return Err(BuildError::MissingField {
                entity: "MathExpression",
                field: "expression",
            });
        }
        for ident in expression_identifiers(&props.expression) {
            if !props.using_metrics.contains_key(&ident) {
                warn!(
                    expression = %props.expression,
                    identifier = %ident,
                    "math expression references an identifier not present in using_metrics"
                );
            }
        }
        Ok(MathExpression {
            expression: props.expression,
            using_metrics: props.using_metrics,
            period: props.period.unwrap_or(DEFAULT_PERIOD),
            label: props.label,
            color: props.color,
            search_account: props.search_account,
            search_region: props.search_region,
        })
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn using_metrics(&self) -> &BTreeMap<String, MetricExpr> {
        &self.using_metrics
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// The math-expression rendering shape. Pure.
    pub fn render_config(&self) -> MetricRenderConfig {
        MetricRenderConfig::Expression(ExpressionConfig {
            expression: self.expression.clone(),
            using_metrics: self.using_metrics.clone(),
            period: self.period,
            label: self.label.clone(),
            color: self.color,
            search_account: self.search_account.clone(),
            search_region: self.search_region.clone(),
        })
    }
}

/// Either a plain metric or a math expression. The closed set of things a
/// widget can plot and an expression can reference.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricExpr {
    Metric(Metric),
    Math(MathExpression),
}

impl MetricExpr {
    /// The rendering shape of the wrapped value.
    pub fn render_config(&self) -> MetricRenderConfig {
        match self {
            MetricExpr::Metric(m) => m.render_config(),
            MetricExpr::Math(e) => e.render_config(),
        }
    }

    pub fn period(&self) -> Duration {
        match self {
            MetricExpr::Metric(m) => m.period(),
            MetricExpr::Math(e) => e.period(),
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            MetricExpr::Metric(m) => m.label(),
            MetricExpr::Math(e) => e.label(),
        }
    }
}

impl From<Metric> for MetricExpr {
    fn from(m: Metric) -> Self {
        MetricExpr::Metric(m)
    }
}

impl From<MathExpression> for MetricExpr {
    fn from(e: MathExpression) -> Self {
        MetricExpr::Math(e)
    }
}

/// Collects the variable identifiers referenced by a math expression.
///
/// Variables start with a lowercase letter; uppercase-initial tokens are
/// function names (`SUM`, `SEARCH`, `IF`, …). Quoted sections — search
/// expressions embed them — are skipped.
fn expression_identifiers(expression: &str) -> BTreeSet<String> {
    let mut idents = BTreeSet::new();
    let mut chars = expression.char_indices().peekable();
    let mut in_quote: Option<char> = None;

    while let Some((start, c)) = chars.next() {
        if let Some(q) = in_quote {
            if c == q {
                in_quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => in_quote = Some(c),
            'a'..='z' => {
                let mut end = start + c.len_utf8();
                while let Some(&(i, n)) = chars.peek() {
                    if n.is_ascii_alphanumeric() || n == '_' {
                        end = i + n.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                idents.insert(expression[start..end].to_string());
            }
            'A'..='Z' | '_' => {
                // Function name or constant; consume the token without
                // recording it.
                while let Some(&(_, n)) = chars.peek() {
                    if n.is_ascii_alphanumeric() || n == '_' {
                        chars.next();
                    } else {
                        break;
                    }
                }
            }
            _ => {}
        }
    }
    idents
}
