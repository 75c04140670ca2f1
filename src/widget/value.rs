//! Single-value and table widgets.

use crate::error::{BoardError, BuildError};
use crate::metric::{MetricExpr, MetricSetEncoder};
use crate::types::{GridPos, GridSize};
use crate::widget::{validate_size, RenderedWidget};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::time::Duration;

/// Construction options for [`SingleValueWidget`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SingleValueWidgetProps {
    pub title: Option<String>,
    pub region: Option<String>,
    pub metrics: Vec<MetricExpr>,
    /// Render all digits instead of the rounded display value.
    pub full_precision: bool,
    /// Draw a sparkline of recent history behind the value.
    pub sparkline: bool,
    /// Aggregate over the whole visible time range instead of the most
    /// recent period. Cannot be combined with `sparkline`.
    pub set_period_to_time_range: bool,
    pub period: Option<Duration>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Shows the most recent value of each metric.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleValueWidget {
    props: SingleValueWidgetProps,
    size: GridSize,
}

impl SingleValueWidget {
    pub const DEFAULT_SIZE: GridSize = GridSize::new(6, 3);

    /// Builds the widget. `sparkline` and `set_period_to_time_range` cannot
    /// both be set: a sparkline plots per-period history, which a
    /// whole-range aggregate does not have.
    pub fn new(props: SingleValueWidgetProps) -> Result<Self, BuildError> {
        if props.sparkline && props.set_period_to_time_range {
            return Err(BuildError::MutuallyExclusive {
                entity: "SingleValueWidget",
                first: "sparkline",
                second: "set_period_to_time_range",
            });
        }
        let size = validate_size(
            "SingleValueWidget",
            props.width.unwrap_or(Self::DEFAULT_SIZE.width),
            props.height.unwrap_or(Self::DEFAULT_SIZE.height),
        )?;
        Ok(SingleValueWidget { props, size })
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Appends a metric to the widget.
    pub fn add_metric(&mut self, metric: impl Into<MetricExpr>) {
        self.props.metrics.push(metric.into());
    }

    pub(crate) fn render(&self, origin: GridPos) -> Result<RenderedWidget, BoardError> {
        let mut properties = Map::new();
        properties.insert("view".to_string(), json!("singleValue"));
        if let Some(title) = &self.props.title {
            properties.insert("title".to_string(), json!(title));
        }
        if let Some(region) = &self.props.region {
            properties.insert("region".to_string(), json!(region));
        }

        let mut encoder = MetricSetEncoder::new();
        for metric in &self.props.metrics {
            encoder.add_visible(metric, None)?;
        }
        if !encoder.is_empty() {
            properties.insert("metrics".to_string(), Value::Array(encoder.finish()));
        }

        if self.props.sparkline {
            properties.insert("sparkline".to_string(), json!(true));
        }
        if self.props.full_precision {
            properties.insert("singleValueFullPrecision".to_string(), json!(true));
        }
        if self.props.set_period_to_time_range {
            properties.insert("setPeriodToTimeRange".to_string(), json!(true));
        }
        if let Some(period) = self.props.period {
            properties.insert("period".to_string(), json!(period.as_secs()));
        }

        Ok(RenderedWidget::new(
            "metric",
            origin,
            self.size,
            Value::Object(properties),
        ))
    }
}

/// Table orientation: metrics as rows or as columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableLayout {
    Horizontal,
    Vertical,
}

/// A summary column appended to a table widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSummaryColumn {
    Minimum,
    Maximum,
    Sum,
    Average,
    Last,
}

impl TableSummaryColumn {
    fn as_str(&self) -> &'static str {
        match self {
            TableSummaryColumn::Minimum => "MIN",
            TableSummaryColumn::Maximum => "MAX",
            TableSummaryColumn::Sum => "SUM",
            TableSummaryColumn::Average => "AVG",
            TableSummaryColumn::Last => "LAST",
        }
    }
}

/// Summary display settings for [`TableWidget`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableSummaryProps {
    /// Which aggregate columns to append.
    pub columns: Vec<TableSummaryColumn>,
    /// Hide the per-period data columns, keeping only the summary.
    pub hide_non_summary_columns: bool,
    /// Keep the summary columns visible while scrolling horizontally.
    pub sticky: bool,
}

/// Construction options for [`TableWidget`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableWidgetProps {
    pub title: Option<String>,
    pub region: Option<String>,
    pub metrics: Vec<MetricExpr>,
    pub layout: Option<TableLayout>,
    pub summary: Option<TableSummaryProps>,
    pub show_units_in_label: bool,
    pub full_precision: bool,
    pub live_data: Option<bool>,
    pub period: Option<Duration>,
    pub set_period_to_time_range: Option<bool>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Shows each metric's data points over time as a table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableWidget {
    props: TableWidgetProps,
    size: GridSize,
}

impl TableWidget {
    pub const DEFAULT_SIZE: GridSize = GridSize::new(6, 6);

    pub fn new(props: TableWidgetProps) -> Result<Self, BuildError> {
        let size = validate_size(
            "TableWidget",
            props.width.unwrap_or(Self::DEFAULT_SIZE.width),
            props.height.unwrap_or(Self::DEFAULT_SIZE.height),
        )?;
        Ok(TableWidget { props, size })
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Appends a metric to the table.
    pub fn add_metric(&mut self, metric: impl Into<MetricExpr>) {
        self.props.metrics.push(metric.into());
    }

    pub(crate) fn render(&self, origin: GridPos) -> Result<RenderedWidget, BoardError> {
        let mut properties = Map::new();
        properties.insert("view".to_string(), json!("table"));
        if let Some(title) = &self.props.title {
            properties.insert("title".to_string(), json!(title));
        }
        if let Some(region) = &self.props.region {
            properties.insert("region".to_string(), json!(region));
        }

        let mut encoder = MetricSetEncoder::new();
        for metric in &self.props.metrics {
            encoder.add_visible(metric, None)?;
        }
        if !encoder.is_empty() {
            properties.insert("metrics".to_string(), Value::Array(encoder.finish()));
        }

        let mut table = Map::new();
        if let Some(layout) = self.props.layout {
            table.insert("layout".to_string(), json!(layout));
        }
        if let Some(summary) = &self.props.summary {
            if !summary.columns.is_empty() {
                let columns: Vec<&str> =
                    summary.columns.iter().map(TableSummaryColumn::as_str).collect();
                table.insert("summaryColumns".to_string(), json!(columns));
            }
            if summary.hide_non_summary_columns {
                table.insert("showTimeSeriesData".to_string(), json!(false));
            }
            if summary.sticky {
                table.insert("stickySummary".to_string(), json!(true));
            }
        }
        if !table.is_empty() {
            properties.insert("table".to_string(), Value::Object(table));
        }

        if self.props.show_units_in_label {
            properties.insert(
                "yAxis".to_string(),
                json!({ "left": { "showUnits": true } }),
            );
        }
        if self.props.full_precision {
            properties.insert("singleValueFullPrecision".to_string(), json!(true));
        }
        if let Some(live) = self.props.live_data {
            properties.insert("liveData".to_string(), json!(live));
        }
        if let Some(period) = self.props.period {
            properties.insert("period".to_string(), json!(period.as_secs()));
        }
        if let Some(set) = self.props.set_period_to_time_range {
            properties.insert("setPeriodToTimeRange".to_string(), json!(set));
        }

        Ok(RenderedWidget::new(
            "metric",
            origin,
            self.size,
            Value::Object(properties),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::{Metric, MetricProps};
    use pretty_assertions::assert_eq;

    fn metric() -> MetricExpr {
        Metric::new(MetricProps {
            namespace: "AWS/SQS".to_string(),
            metric_name: "ApproximateNumberOfMessagesVisible".to_string(),
            ..Default::default()
        })
        .unwrap()
        .into()
    }

    #[test]
    fn sparkline_and_whole_range_period_are_mutually_exclusive() {
        let err = SingleValueWidget::new(SingleValueWidgetProps {
            sparkline: true,
            set_period_to_time_range: true,
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(
            err,
            BuildError::MutuallyExclusive {
                entity: "SingleValueWidget",
                first: "sparkline",
                second: "set_period_to_time_range",
            }
        );
    }

    #[test]
    fn either_option_alone_is_accepted() {
        assert!(SingleValueWidget::new(SingleValueWidgetProps {
            sparkline: true,
            ..Default::default()
        })
        .is_ok());
        assert!(SingleValueWidget::new(SingleValueWidgetProps {
            set_period_to_time_range: true,
            ..Default::default()
        })
        .is_ok());
    }

    #[test]
    fn single_value_renders_view_and_flags() {
        let widget = SingleValueWidget::new(SingleValueWidgetProps {
            metrics: vec![metric()],
            sparkline: true,
            full_precision: true,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(widget.size(), GridSize::new(6, 3));
        let props = widget.render(GridPos::ORIGIN).unwrap().properties;
        assert_eq!(props["view"], json!("singleValue"));
        assert_eq!(props["sparkline"], json!(true));
        assert_eq!(props["singleValueFullPrecision"], json!(true));
        assert_eq!(
            props["metrics"],
            json!([["AWS/SQS", "ApproximateNumberOfMessagesVisible", { "stat": "Average" }]])
        );
    }

    #[test]
    fn table_renders_summary_settings() {
        let widget = TableWidget::new(TableWidgetProps {
            metrics: vec![metric()],
            layout: Some(TableLayout::Vertical),
            summary: Some(TableSummaryProps {
                columns: vec![TableSummaryColumn::Average, TableSummaryColumn::Maximum],
                hide_non_summary_columns: true,
                sticky: true,
            }),
            ..Default::default()
        })
        .unwrap();
        let props = widget.render(GridPos::ORIGIN).unwrap().properties;
        assert_eq!(props["view"], json!("table"));
        assert_eq!(
            props["table"],
            json!({
                "layout": "vertical",
                "summaryColumns": ["AVG", "MAX"],
                "showTimeSeriesData": false,
                "stickySummary": true
            })
        );
    }

    #[test]
    fn table_without_settings_omits_table_key() {
        let widget = TableWidget::new(TableWidgetProps::default()).unwrap();
        let props = widget.render(GridPos::ORIGIN).unwrap().properties;
        assert_eq!(props.get("table"), None);
    }
}
