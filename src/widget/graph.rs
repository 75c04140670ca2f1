//! Graph and gauge widgets.

use crate::error::{BoardError, BuildError};
use crate::metric::{encode_metric_groups, MetricExpr, MetricSetEncoder};
use crate::types::{Color, GridPos, GridSize};
use crate::widget::{validate_size, RenderedWidget};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::time::Duration;

/// How a graph widget plots its metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GraphView {
    #[default]
    TimeSeries,
    Bar,
    Pie,
}

/// Where a graph widget places its legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Bottom,
    Right,
    Hidden,
}

/// Fill direction for a horizontal annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shading {
    None,
    Above,
    Below,
}

/// Fill direction for a vertical annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalShading {
    None,
    Before,
    After,
}

/// A horizontal threshold line drawn across a graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HorizontalAnnotation {
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Shading>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

impl HorizontalAnnotation {
    /// A bare threshold line at `value`.
    pub fn at(value: f64) -> Self {
        HorizontalAnnotation {
            value,
            label: None,
            color: None,
            fill: None,
            visible: None,
        }
    }
}

/// A vertical marker at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerticalAnnotation {
    /// The marked instant, ISO-8601.
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<VerticalShading>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

/// Y-axis display settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YAxisProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_units: Option<bool>,
}

/// Construction options for [`GraphWidget`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphWidgetProps {
    pub title: Option<String>,
    pub region: Option<String>,
    /// Metrics plotted against the left y-axis.
    pub left: Vec<MetricExpr>,
    /// Metrics plotted against the right y-axis.
    pub right: Vec<MetricExpr>,
    pub left_y_axis: Option<YAxisProps>,
    pub right_y_axis: Option<YAxisProps>,
    pub left_annotations: Vec<HorizontalAnnotation>,
    pub right_annotations: Vec<HorizontalAnnotation>,
    pub vertical_annotations: Vec<VerticalAnnotation>,
    pub view: Option<GraphView>,
    pub stacked: Option<bool>,
    pub legend_position: Option<LegendPosition>,
    pub live_data: Option<bool>,
    pub period: Option<Duration>,
    pub set_period_to_time_range: Option<bool>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub timezone: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// A line/bar/pie graph over one or two metric sets.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphWidget {
    props: GraphWidgetProps,
    size: GridSize,
    view: GraphView,
}

impl GraphWidget {
    pub const DEFAULT_SIZE: GridSize = GridSize::new(6, 6);

    pub fn new(props: GraphWidgetProps) -> Result<Self, BuildError> {
        let size = validate_size(
            "GraphWidget",
            props.width.unwrap_or(Self::DEFAULT_SIZE.width),
            props.height.unwrap_or(Self::DEFAULT_SIZE.height),
        )?;
        let view = props.view.unwrap_or_default();
        Ok(GraphWidget { props, size, view })
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Appends a metric to the left y-axis set.
    pub fn add_left_metric(&mut self, metric: impl Into<MetricExpr>) {
        self.props.left.push(metric.into());
    }

    /// Appends a metric to the right y-axis set.
    pub fn add_right_metric(&mut self, metric: impl Into<MetricExpr>) {
        self.props.right.push(metric.into());
    }

    pub(crate) fn render(&self, origin: GridPos) -> Result<RenderedWidget, BoardError> {
        let mut properties = Map::new();
        properties.insert("view".to_string(), json!(self.view));
        if let Some(stacked) = self.props.stacked {
            properties.insert("stacked".to_string(), json!(stacked));
        }
        if let Some(title) = &self.props.title {
            properties.insert("title".to_string(), json!(title));
        }
        if let Some(region) = &self.props.region {
            properties.insert("region".to_string(), json!(region));
        }

        let metrics = encode_metric_groups(&self.props.left, &self.props.right)?;
        if !metrics.is_empty() {
            properties.insert("metrics".to_string(), Value::Array(metrics));
        }

        if let Some(annotations) = render_annotations(
            &self.props.left_annotations,
            &self.props.right_annotations,
            &self.props.vertical_annotations,
        ) {
            properties.insert("annotations".to_string(), annotations);
        }

        if let Some(y_axis) = render_y_axis(&self.props.left_y_axis, &self.props.right_y_axis) {
            properties.insert("yAxis".to_string(), y_axis);
        }
        if let Some(position) = self.props.legend_position {
            properties.insert("legend".to_string(), json!({ "position": position }));
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
        if let Some(start) = &self.props.start {
            properties.insert("start".to_string(), json!(start));
        }
        if let Some(end) = &self.props.end {
            properties.insert("end".to_string(), json!(end));
        }
        if let Some(timezone) = &self.props.timezone {
            properties.insert("timezone".to_string(), json!(timezone));
        }

        Ok(RenderedWidget::new(
            "metric",
            origin,
            self.size,
            Value::Object(properties),
        ))
    }
}

/// Construction options for [`GaugeWidget`].
#[derive(Debug, Clone, Default)]
pub struct GaugeWidgetProps {
    pub title: Option<String>,
    pub region: Option<String>,
    pub metrics: Vec<MetricExpr>,
    /// The gauge span. Defaults to 0..100.
    pub left_y_axis: Option<YAxisProps>,
    pub annotations: Vec<HorizontalAnnotation>,
    pub legend_position: Option<LegendPosition>,
    pub live_data: Option<bool>,
    pub period: Option<Duration>,
    pub set_period_to_time_range: Option<bool>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// A gauge showing the latest value of each metric within a fixed span.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeWidget {
    title: Option<String>,
    region: Option<String>,
    metrics: Vec<MetricExpr>,
    left_y_axis: YAxisProps,
    annotations: Vec<HorizontalAnnotation>,
    legend_position: Option<LegendPosition>,
    live_data: Option<bool>,
    period: Option<Duration>,
    set_period_to_time_range: Option<bool>,
    size: GridSize,
}

impl GaugeWidget {
    pub const DEFAULT_SIZE: GridSize = GridSize::new(6, 6);

    pub fn new(props: GaugeWidgetProps) -> Result<Self, BuildError> {
        let size = validate_size(
            "GaugeWidget",
            props.width.unwrap_or(Self::DEFAULT_SIZE.width),
            props.height.unwrap_or(Self::DEFAULT_SIZE.height),
        )?;
        let left_y_axis = props.left_y_axis.unwrap_or(YAxisProps {
            min: Some(0.0),
            max: Some(100.0),
            label: None,
            show_units: None,
        });
        Ok(GaugeWidget {
            title: props.title,
            region: props.region,
            metrics: props.metrics,
            left_y_axis,
            annotations: props.annotations,
            legend_position: props.legend_position,
            live_data: props.live_data,
            period: props.period,
            set_period_to_time_range: props.set_period_to_time_range,
            size,
        })
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Appends a metric to the gauge.
    pub fn add_metric(&mut self, metric: impl Into<MetricExpr>) {
        self.metrics.push(metric.into());
    }

    pub(crate) fn render(&self, origin: GridPos) -> Result<RenderedWidget, BoardError> {
        let mut properties = Map::new();
        properties.insert("view".to_string(), json!("gauge"));
        if let Some(title) = &self.title {
            properties.insert("title".to_string(), json!(title));
        }
        if let Some(region) = &self.region {
            properties.insert("region".to_string(), json!(region));
        }

        let mut encoder = MetricSetEncoder::new();
        for metric in &self.metrics {
            encoder.add_visible(metric, None)?;
        }
        if !encoder.is_empty() {
            properties.insert("metrics".to_string(), Value::Array(encoder.finish()));
        }

        properties.insert("yAxis".to_string(), json!({ "left": self.left_y_axis }));
        if let Some(annotations) = render_annotations(&self.annotations, &[], &[]) {
            properties.insert("annotations".to_string(), annotations);
        }
        if let Some(position) = self.legend_position {
            properties.insert("legend".to_string(), json!({ "position": position }));
        }
        if let Some(live) = self.live_data {
            properties.insert("liveData".to_string(), json!(live));
        }
        if let Some(period) = self.period {
            properties.insert("period".to_string(), json!(period.as_secs()));
        }
        if let Some(set) = self.set_period_to_time_range {
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

/// Builds the `annotations` property value from the annotation groups.
/// Returns `None` when every group is empty so the key is omitted entirely.
fn render_annotations(
    left: &[HorizontalAnnotation],
    right: &[HorizontalAnnotation],
    vertical: &[VerticalAnnotation],
) -> Option<Value> {
    let mut annotations = Map::new();

    let mut horizontal: Vec<Value> = Vec::new();
    for annotation in left {
        horizontal.push(json!(annotation));
    }
    for annotation in right {
        let mut value = json!(annotation);
        if let Value::Object(map) = &mut value {
            map.insert("yAxis".to_string(), json!("right"));
        }
        horizontal.push(value);
    }
    if !horizontal.is_empty() {
        annotations.insert("horizontal".to_string(), Value::Array(horizontal));
    }
    if !vertical.is_empty() {
        annotations.insert("vertical".to_string(), json!(vertical));
    }

    if annotations.is_empty() {
        None
    } else {
        Some(Value::Object(annotations))
    }
}

fn render_y_axis(left: &Option<YAxisProps>, right: &Option<YAxisProps>) -> Option<Value> {
    if left.is_none() && right.is_none() {
        return None;
    }
    let mut y_axis = Map::new();
    if let Some(left) = left {
        y_axis.insert("left".to_string(), json!(left));
    }
    if let Some(right) = right {
        y_axis.insert("right".to_string(), json!(right));
    }
    Some(Value::Object(y_axis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::{Dimensions, Metric, MetricProps};
    use pretty_assertions::assert_eq;

    fn metric(name: &str) -> MetricExpr {
        Metric::new(MetricProps {
            namespace: "AWS/Lambda".to_string(),
            metric_name: name.to_string(),
            dimensions: Dimensions::from([("FunctionName".to_string(), "f".to_string())]),
            ..Default::default()
        })
        .unwrap()
        .into()
    }

    #[test]
    fn default_size_is_six_by_six() {
        let widget = GraphWidget::new(GraphWidgetProps::default()).unwrap();
        assert_eq!(widget.size(), GridSize::new(6, 6));
    }

    #[test]
    fn oversized_width_is_rejected() {
        let err = GraphWidget::new(GraphWidgetProps {
            width: Some(30),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, BuildError::OutOfRange { field: "width", .. }));
    }

    #[test]
    fn renders_view_metrics_and_title() {
        let widget = GraphWidget::new(GraphWidgetProps {
            title: Some("Errors".to_string()),
            left: vec![metric("Errors")],
            ..Default::default()
        })
        .unwrap();
        let rendered = widget.render(GridPos::new(6, 0)).unwrap();
        assert_eq!(rendered.widget_type, "metric");
        assert_eq!((rendered.x, rendered.y), (6, 0));
        assert_eq!(
            rendered.properties,
            json!({
                "view": "timeSeries",
                "title": "Errors",
                "metrics": [
                    ["AWS/Lambda", "Errors", "FunctionName", "f", { "stat": "Average" }]
                ]
            })
        );
    }

    #[test]
    fn annotations_key_is_omitted_when_empty() {
        let widget = GraphWidget::new(GraphWidgetProps::default()).unwrap();
        let rendered = widget.render(GridPos::ORIGIN).unwrap();
        assert_eq!(rendered.properties.get("annotations"), None);
        assert_eq!(rendered.properties.get("metrics"), None);
    }

    #[test]
    fn right_annotations_carry_axis_marker() {
        let widget = GraphWidget::new(GraphWidgetProps {
            left_annotations: vec![HorizontalAnnotation {
                label: Some("limit".to_string()),
                fill: Some(Shading::Above),
                ..HorizontalAnnotation::at(90.0)
            }],
            right_annotations: vec![HorizontalAnnotation::at(1.0)],
            ..Default::default()
        })
        .unwrap();
        let rendered = widget.render(GridPos::ORIGIN).unwrap();
        assert_eq!(
            rendered.properties["annotations"],
            json!({
                "horizontal": [
                    { "value": 90.0, "label": "limit", "fill": "above" },
                    { "value": 1.0, "yAxis": "right" }
                ]
            })
        );
    }

    #[test]
    fn gauge_defaults_span_to_percent_range() {
        let widget = GaugeWidget::new(GaugeWidgetProps {
            metrics: vec![metric("CpuUtilization")],
            ..Default::default()
        })
        .unwrap();
        let rendered = widget.render(GridPos::ORIGIN).unwrap();
        assert_eq!(rendered.properties["view"], json!("gauge"));
        assert_eq!(
            rendered.properties["yAxis"],
            json!({ "left": { "min": 0.0, "max": 100.0 } })
        );
    }

    #[test]
    fn appended_metrics_appear_in_the_next_render() {
        let mut widget = GraphWidget::new(GraphWidgetProps {
            left: vec![metric("Errors")],
            ..Default::default()
        })
        .unwrap();
        widget.add_right_metric(metric("Duration"));
        let metrics = widget.render(GridPos::ORIGIN).unwrap().properties["metrics"]
            .as_array()
            .unwrap()
            .len();
        assert_eq!(metrics, 2);
    }

    #[test]
    fn legend_and_live_data_render_when_set() {
        let widget = GraphWidget::new(GraphWidgetProps {
            legend_position: Some(LegendPosition::Right),
            live_data: Some(true),
            stacked: Some(true),
            period: Some(Duration::from_secs(60)),
            ..Default::default()
        })
        .unwrap();
        let props = widget.render(GridPos::ORIGIN).unwrap().properties;
        assert_eq!(props["legend"], json!({ "position": "right" }));
        assert_eq!(props["liveData"], json!(true));
        assert_eq!(props["stacked"], json!(true));
        assert_eq!(props["period"], json!(60));
    }
}
