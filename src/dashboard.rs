//! The dashboard assembler.
//!
//! A [`Dashboard`] owns an ordered list of widget rows and compiles them into
//! the dashboard JSON document: rows are laid out top to bottom, each row's
//! widgets left to right, and every widget's serialized cells are
//! concatenated into one `widgets` array alongside the dashboard-level
//! time-range settings and variables.
//!
//! Placement is strictly sequential and additive — each row starts at
//! `(0, y)` where `y` is the sum of the preceding rows' heights, and each
//! widget at the cumulative width of its preceding siblings — so widgets
//! cannot overlap by construction.

use crate::config::LayoutConfig;
use crate::error::{BoardError, BuildError};
use crate::types::{GridPos, GRID_WIDTH};
use crate::variable::DashboardVariable;
use crate::widget::{RenderedWidget, Widget};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::time::Duration;
use tracing::warn;

/// How widgets that specify their own period react to the dashboard's
/// visible time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodOverride {
    /// The period adapts to the visible time range.
    #[default]
    Auto,
    /// Widgets keep the period they specify.
    Inherit,
}

/// Construction options for [`Dashboard`].
#[derive(Debug, Clone, Default)]
pub struct DashboardProps {
    /// The initial rows of widgets; each inner list is one row.
    pub widgets: Vec<Vec<Widget>>,
    /// Show this much trailing history by default. Exclusive with `start`.
    pub default_interval: Option<Duration>,
    /// Explicit start of the visible range: relative (`-PT8H`) or absolute
    /// ISO-8601. Exclusive with `default_interval`.
    pub start: Option<String>,
    /// Explicit end of the visible range. Requires `start`; defaults to now.
    pub end: Option<String>,
    pub period_override: Option<PeriodOverride>,
    pub variables: Vec<DashboardVariable>,
}

/// An ordered collection of widget rows, compilable to the dashboard JSON
/// document.
#[derive(Debug, Clone)]
pub struct Dashboard {
    rows: Vec<Vec<Widget>>,
    start: Option<String>,
    end: Option<String>,
    period_override: Option<PeriodOverride>,
    variables: Vec<DashboardVariable>,
    grid_width: u32,
}

impl Dashboard {
    /// Builds a dashboard with the default grid width.
    pub fn new(props: DashboardProps) -> Result<Self, BuildError> {
        Self::build(props, GRID_WIDTH)
    }

    /// Builds a dashboard using layout settings from configuration.
    pub fn with_config(props: DashboardProps, layout: &LayoutConfig) -> Result<Self, BuildError> {
        Self::build(props, layout.grid_width)
    }

    fn build(props: DashboardProps, grid_width: u32) -> Result<Self, BuildError> {
        if props.default_interval.is_some() && props.start.is_some() {
            return Err(BuildError::MutuallyExclusive {
                entity: "Dashboard",
                first: "default_interval",
                second: "start",
            });
        }
        if props.end.is_some() && props.start.is_none() && props.default_interval.is_none() {
            return Err(BuildError::Incompatible {
                entity: "Dashboard",
                message: "'end' requires 'start' or 'default_interval'".to_string(),
            });
        }
        let start = match props.default_interval {
            Some(interval) => Some(format!("-{}", duration_iso8601(interval))),
            None => props.start,
        };
        Ok(Dashboard {
            rows: props.widgets.into_iter().filter(|row| !row.is_empty()).collect(),
            start,
            end: props.end,
            period_override: props.period_override,
            variables: props.variables,
            grid_width,
        })
    }

    /// Appends one new row holding all the given widgets. Successive calls
    /// stack rows vertically; widgets within one call sit side by side.
    pub fn add_widgets(&mut self, widgets: Vec<Widget>) {
        if !widgets.is_empty() {
            self.rows.push(widgets);
        }
    }

    /// Appends a variable. Variables have no position; order is kept only
    /// for the serialized list.
    pub fn add_variable(&mut self, variable: DashboardVariable) {
        self.variables.push(variable);
    }

    pub fn rows(&self) -> &[Vec<Widget>] {
        &self.rows
    }

    /// Lays out every row and widget and assembles the dashboard document.
    pub fn render(&self) -> Result<Value, BoardError> {
        let mut cells: Vec<RenderedWidget> = Vec::new();
        let mut y = 0;
        for row in &self.rows {
            let mut x = 0;
            let mut row_height = 0;
            for widget in row {
                widget.render_into(GridPos::new(x, y), &mut cells)?;
                let size = widget.size();
                x += size.width;
                row_height = row_height.max(size.height);
            }
            if x > self.grid_width {
                warn!(
                    row_width = x,
                    grid_width = self.grid_width,
                    "dashboard row exceeds the grid width; the rendering client decides how to wrap"
                );
            }
            y += row_height;
        }

        let mut document = Map::new();
        if let Some(start) = &self.start {
            document.insert("start".to_string(), json!(start));
        }
        if let Some(end) = &self.end {
            document.insert("end".to_string(), json!(end));
        }
        if let Some(period_override) = self.period_override {
            document.insert("periodOverride".to_string(), json!(period_override));
        }
        document.insert("widgets".to_string(), serde_json::to_value(&cells)?);
        if !self.variables.is_empty() {
            let variables: Vec<Value> =
                self.variables.iter().map(DashboardVariable::render).collect();
            document.insert("variables".to_string(), Value::Array(variables));
        }
        Ok(Value::Object(document))
    }

    /// The document as a pretty-printed JSON string.
    pub fn to_json_string(&self) -> Result<String, BoardError> {
        Ok(serde_json::to_string_pretty(&self.render()?)?)
    }
}

/// Formats an instant for the dashboard's absolute `start`/`end` fields.
pub fn absolute_time(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Renders a duration in ISO-8601 form: `PT5M`, `PT1H30M`, `P2DT12H`.
fn duration_iso8601(duration: Duration) -> String {
    let total = duration.as_secs();
    if total == 0 {
        return "PT0S".to_string();
    }
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;

    let mut out = String::from("P");
    if days > 0 {
        out.push_str(&format!("{}D", days));
    }
    if hours > 0 || minutes > 0 || seconds > 0 {
        out.push('T');
        if hours > 0 {
            out.push_str(&format!("{}H", hours));
        }
        if minutes > 0 {
            out.push_str(&format!("{}M", minutes));
        }
        if seconds > 0 {
            out.push_str(&format!("{}S", seconds));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::{Metric, MetricProps};
    use crate::types::{GridRect, GridSize};
    use crate::variable::{
        DashboardVariableProps, VariableInputType, VariableType, VariableValue, VariableValues,
    };
    use crate::widget::{GraphWidget, GraphWidgetProps, Row, TextWidget, TextWidgetProps};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn graph(width: u32, height: u32) -> Widget {
        GraphWidget::new(GraphWidgetProps {
            left: vec![Metric::new(MetricProps {
                namespace: "AWS/Lambda".to_string(),
                metric_name: "Errors".to_string(),
                ..Default::default()
            })
            .unwrap()
            .into()],
            width: Some(width),
            height: Some(height),
            ..Default::default()
        })
        .unwrap()
        .into()
    }

    fn cells(document: &Value) -> Vec<(u64, u64, u64, u64)> {
        document["widgets"]
            .as_array()
            .unwrap()
            .iter()
            .map(|w| {
                (
                    w["x"].as_u64().unwrap(),
                    w["y"].as_u64().unwrap(),
                    w["width"].as_u64().unwrap(),
                    w["height"].as_u64().unwrap(),
                )
            })
            .collect()
    }

    #[test]
    fn successive_rows_stack_by_max_height() {
        let mut dashboard = Dashboard::new(DashboardProps::default()).unwrap();
        dashboard.add_widgets(vec![graph(12, 6), graph(12, 6)]);
        dashboard.add_widgets(vec![graph(12, 6), graph(12, 6)]);
        let document = dashboard.render().unwrap();
        assert_eq!(
            cells(&document),
            vec![(0, 0, 12, 6), (12, 0, 12, 6), (0, 6, 12, 6), (12, 6, 12, 6)]
        );
    }

    #[test]
    fn row_y_offsets_increase_by_each_rows_max_height() {
        let mut dashboard = Dashboard::new(DashboardProps::default()).unwrap();
        dashboard.add_widgets(vec![graph(6, 4), graph(6, 8)]);
        dashboard.add_widgets(vec![graph(6, 2)]);
        dashboard.add_widgets(vec![graph(6, 3)]);
        let placed = cells(&dashboard.render().unwrap());
        // Second row starts below the tallest widget of the first.
        assert_eq!(placed[2].1, 8);
        assert_eq!(placed[3].1, 10);
    }

    #[test]
    fn widgets_within_a_row_sit_at_cumulative_widths() {
        let dashboard = Dashboard::new(DashboardProps {
            widgets: vec![vec![graph(6, 6), graph(4, 6), graph(8, 6)]],
            ..Default::default()
        })
        .unwrap();
        let placed = cells(&dashboard.render().unwrap());
        let xs: Vec<u64> = placed.iter().map(|c| c.0).collect();
        assert_eq!(xs, vec![0, 6, 10]);
    }

    #[test]
    fn a_row_container_behaves_like_an_inline_row() {
        let row = Row::new(vec![graph(12, 6), graph(12, 6)]);
        assert_eq!(row.size().width, 24);
        assert_eq!(row.size().height, 6);

        let mut dashboard = Dashboard::new(DashboardProps::default()).unwrap();
        dashboard.add_widgets(vec![row.clone().into()]);
        dashboard.add_widgets(vec![row.into()]);
        let placed = cells(&dashboard.render().unwrap());
        assert_eq!(
            placed,
            vec![(0, 0, 12, 6), (12, 0, 12, 6), (0, 6, 12, 6), (12, 6, 12, 6)]
        );
    }

    #[test]
    fn no_two_cells_overlap() {
        let mut dashboard = Dashboard::new(DashboardProps::default()).unwrap();
        dashboard.add_widgets(vec![graph(6, 4), graph(10, 6), graph(8, 2)]);
        dashboard.add_widgets(vec![graph(24, 3)]);
        let rects: Vec<GridRect> = cells(&dashboard.render().unwrap())
            .iter()
            .map(|&(x, y, w, h)| {
                GridRect::new(
                    GridPos::new(x as u32, y as u32),
                    GridSize::new(w as u32, h as u32),
                )
            })
            .collect();
        for (i, a) in rects.iter().enumerate() {
            for b in rects.iter().skip(i + 1) {
                assert!(!a.intersects(b), "{:?} overlaps {:?}", a, b);
            }
        }
    }

    #[test]
    fn default_interval_renders_as_relative_start() {
        let dashboard = Dashboard::new(DashboardProps {
            default_interval: Some(Duration::from_secs(8 * 3600)),
            period_override: Some(PeriodOverride::Inherit),
            ..Default::default()
        })
        .unwrap();
        let document = dashboard.render().unwrap();
        assert_eq!(document["start"], json!("-PT8H"));
        assert_eq!(document["periodOverride"], json!("inherit"));
    }

    #[test]
    fn default_interval_and_start_are_mutually_exclusive() {
        let err = Dashboard::new(DashboardProps {
            default_interval: Some(Duration::from_secs(300)),
            start: Some("-PT1H".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, BuildError::MutuallyExclusive { .. }));
    }

    #[test]
    fn end_requires_a_start() {
        let err = Dashboard::new(DashboardProps {
            end: Some("2026-01-01T00:00:00Z".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, BuildError::Incompatible { .. }));
    }

    #[test]
    fn absolute_time_range_round_trips() {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap();
        let dashboard = Dashboard::new(DashboardProps {
            start: Some(absolute_time(start)),
            end: Some(absolute_time(end)),
            ..Default::default()
        })
        .unwrap();
        let document = dashboard.render().unwrap();
        assert_eq!(document["start"], json!("2026-01-01T00:00:00Z"));
        assert_eq!(document["end"], json!("2026-01-02T00:00:00Z"));
    }

    #[test]
    fn variables_are_appended_in_order() {
        let variable = |id: &str| {
            DashboardVariable::new(DashboardVariableProps {
                id: id.to_string(),
                variable_type: VariableType::Property,
                input_type: VariableInputType::Select,
                value: "region".to_string(),
                label: None,
                default_value: None,
                visible: None,
                values: Some(VariableValues::from_values(vec![VariableValue::new(
                    "us-east-1",
                )])),
            })
            .unwrap()
        };
        let mut dashboard = Dashboard::new(DashboardProps::default()).unwrap();
        dashboard.add_variable(variable("first"));
        dashboard.add_variable(variable("second"));
        let document = dashboard.render().unwrap();
        let ids: Vec<&str> = document["variables"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn empty_dashboard_renders_an_empty_widget_array() {
        let dashboard = Dashboard::new(DashboardProps::default()).unwrap();
        let document = dashboard.render().unwrap();
        assert_eq!(document, json!({ "widgets": [] }));
    }

    #[test]
    fn text_widgets_flow_through_the_document() {
        let dashboard = Dashboard::new(DashboardProps {
            widgets: vec![vec![TextWidget::new(TextWidgetProps {
                markdown: "# Title".to_string(),
                width: Some(24),
                ..Default::default()
            })
            .unwrap()
            .into()]],
            ..Default::default()
        })
        .unwrap();
        let document = dashboard.render().unwrap();
        assert_eq!(document["widgets"][0]["type"], json!("text"));
        assert_eq!(document["widgets"][0]["width"], json!(24));
    }

    #[rstest]
    #[case(Duration::from_secs(300), "PT5M")]
    #[case(Duration::from_secs(8 * 3600), "PT8H")]
    #[case(Duration::from_secs(90 * 60), "PT1H30M")]
    #[case(Duration::from_secs(2 * 86_400 + 12 * 3600), "P2DT12H")]
    #[case(Duration::from_secs(86_400), "P1D")]
    #[case(Duration::from_secs(0), "PT0S")]
    #[case(Duration::from_secs(61), "PT1M1S")]
    fn iso8601_durations(#[case] duration: Duration, #[case] expected: &str) {
        assert_eq!(duration_iso8601(duration), expected);
    }
}
