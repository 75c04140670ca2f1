//! Alarm-backed widgets: the annotated graph and the status grid.

use crate::alarm::AlarmState;
use crate::error::BuildError;
use crate::types::{GridPos, GridSize};
use crate::widget::graph::YAxisProps;
use crate::widget::{validate_size, RenderedWidget};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Construction options for [`AlarmWidget`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlarmWidgetProps {
    /// ARN of the alarm to graph. Required.
    pub alarm_arn: String,
    pub title: Option<String>,
    pub region: Option<String>,
    pub left_y_axis: Option<YAxisProps>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Graphs one alarm's metric with the alarm threshold drawn as an
/// annotation. The service resolves the metric from the alarm, so no metric
/// set is emitted here.
#[derive(Debug, Clone, PartialEq)]
pub struct AlarmWidget {
    alarm_arn: String,
    title: Option<String>,
    region: Option<String>,
    left_y_axis: Option<YAxisProps>,
    size: GridSize,
}

impl AlarmWidget {
    pub const DEFAULT_SIZE: GridSize = GridSize::new(6, 6);

    pub fn new(props: AlarmWidgetProps) -> Result<Self, BuildError> {
        if props.alarm_arn.is_empty() {
            return Err(BuildError::MissingField {
                entity: "AlarmWidget",
                field: "alarm_arn",
            });
        }
        let size = validate_size(
            "AlarmWidget",
            props.width.unwrap_or(Self::DEFAULT_SIZE.width),
            props.height.unwrap_or(Self::DEFAULT_SIZE.height),
        )?;
        Ok(AlarmWidget {
            alarm_arn: props.alarm_arn,
            title: props.title,
            region: props.region,
            left_y_axis: props.left_y_axis,
            size,
        })
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub(crate) fn render(&self, origin: GridPos) -> RenderedWidget {
        let mut properties = Map::new();
        properties.insert("view".to_string(), json!("timeSeries"));
        if let Some(title) = &self.title {
            properties.insert("title".to_string(), json!(title));
        }
        if let Some(region) = &self.region {
            properties.insert("region".to_string(), json!(region));
        }
        properties.insert(
            "annotations".to_string(),
            json!({ "alarms": [self.alarm_arn] }),
        );
        if let Some(left) = &self.left_y_axis {
            properties.insert("yAxis".to_string(), json!({ "left": left }));
        }
        RenderedWidget::new("metric", origin, self.size, Value::Object(properties))
    }
}

/// Sort order for the alarm status grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AlarmStatusSortBy {
    Default,
    StateUpdatedTimestamp,
    Timestamp,
}

/// Construction options for [`AlarmStatusWidget`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlarmStatusWidgetProps {
    /// ARNs of the alarms to show. At least one is required.
    pub alarm_arns: Vec<String>,
    pub title: Option<String>,
    pub sort_by: Option<AlarmStatusSortBy>,
    /// Show only alarms currently in one of these states.
    pub states: Vec<AlarmState>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// A grid of colored cells, one per alarm, showing each alarm's state.
#[derive(Debug, Clone, PartialEq)]
pub struct AlarmStatusWidget {
    alarm_arns: Vec<String>,
    title: Option<String>,
    sort_by: Option<AlarmStatusSortBy>,
    states: Vec<AlarmState>,
    size: GridSize,
}

impl AlarmStatusWidget {
    pub const DEFAULT_SIZE: GridSize = GridSize::new(6, 3);

    pub fn new(props: AlarmStatusWidgetProps) -> Result<Self, BuildError> {
        if props.alarm_arns.is_empty() {
            return Err(BuildError::MissingField {
                entity: "AlarmStatusWidget",
                field: "alarm_arns",
            });
        }
        let size = validate_size(
            "AlarmStatusWidget",
            props.width.unwrap_or(Self::DEFAULT_SIZE.width),
            props.height.unwrap_or(Self::DEFAULT_SIZE.height),
        )?;
        Ok(AlarmStatusWidget {
            alarm_arns: props.alarm_arns,
            title: props.title,
            sort_by: props.sort_by,
            states: props.states,
            size,
        })
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub(crate) fn render(&self, origin: GridPos) -> RenderedWidget {
        let mut properties = Map::new();
        if let Some(title) = &self.title {
            properties.insert("title".to_string(), json!(title));
        }
        properties.insert("alarms".to_string(), json!(self.alarm_arns));
        if let Some(sort_by) = self.sort_by {
            properties.insert("sortBy".to_string(), json!(sort_by));
        }
        if !self.states.is_empty() {
            let states: Vec<&str> = self.states.iter().map(AlarmState::as_str).collect();
            properties.insert("states".to_string(), json!(states));
        }
        RenderedWidget::new("alarm", origin, self.size, Value::Object(properties))
    }
}
