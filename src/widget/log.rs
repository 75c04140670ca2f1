//! Log-query widgets.

use crate::error::BuildError;
use crate::types::{GridPos, GridSize};
use crate::widget::{validate_size, RenderedWidget};
use serde_json::{json, Map, Value};

/// How a log-query widget displays its results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogQueryVisualizationType {
    #[default]
    Table,
    Line,
    StackedArea,
    Bar,
    Pie,
}

impl LogQueryVisualizationType {
    /// The wire `view` value and, for time-series views, the `stacked` flag.
    fn view(&self) -> (&'static str, Option<bool>) {
        match self {
            LogQueryVisualizationType::Table => ("table", None),
            LogQueryVisualizationType::Line => ("timeSeries", Some(false)),
            LogQueryVisualizationType::StackedArea => ("timeSeries", Some(true)),
            LogQueryVisualizationType::Bar => ("bar", None),
            LogQueryVisualizationType::Pie => ("pie", None),
        }
    }
}

/// Construction options for [`LogQueryWidget`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogQueryWidgetProps {
    /// Names of the log groups to query. At least one is required.
    pub log_group_names: Vec<String>,
    /// The full query string. Exclusive with `query_lines`.
    pub query_string: Option<String>,
    /// The query as individual pipeline stages, joined with `\n| `.
    /// Exclusive with `query_string`.
    pub query_lines: Vec<String>,
    pub region: Option<String>,
    pub title: Option<String>,
    pub view: Option<LogQueryVisualizationType>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Displays the results of a log insights query.
#[derive(Debug, Clone, PartialEq)]
pub struct LogQueryWidget {
    log_group_names: Vec<String>,
    query: String,
    region: Option<String>,
    title: Option<String>,
    view: LogQueryVisualizationType,
    size: GridSize,
}

impl LogQueryWidget {
    pub const DEFAULT_SIZE: GridSize = GridSize::new(6, 6);

    pub fn new(props: LogQueryWidgetProps) -> Result<Self, BuildError> {
        if props.log_group_names.is_empty() {
            return Err(BuildError::MissingField {
                entity: "LogQueryWidget",
                field: "log_group_names",
            });
        }
        let query = match (&props.query_string, props.query_lines.is_empty()) {
            (Some(query), true) => query.clone(),
            (None, false) => props.query_lines.join("\n| "),
            (Some(_), false) => {
                return Err(BuildError::MutuallyExclusive {
                    entity: "LogQueryWidget",
                    first: "query_string",
                    second: "query_lines",
                });
            }
            (None, true) => {
                return Err(BuildError::MissingField {
                    entity: "LogQueryWidget",
                    field: "query_string",
                });
            }
        };
        let size = validate_size(
            "LogQueryWidget",
            props.width.unwrap_or(Self::DEFAULT_SIZE.width),
            props.height.unwrap_or(Self::DEFAULT_SIZE.height),
        )?;
        Ok(LogQueryWidget {
            log_group_names: props.log_group_names,
            query,
            region: props.region,
            title: props.title,
            view: props.view.unwrap_or_default(),
            size,
        })
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub(crate) fn render(&self, origin: GridPos) -> RenderedWidget {
        let sources = self
            .log_group_names
            .iter()
            .map(|group| format!("SOURCE '{}'", group))
            .collect::<Vec<_>>()
            .join(" | ");
        let full_query = format!("{} | {}", sources, self.query);

        let (view, stacked) = self.view.view();
        let mut properties = Map::new();
        properties.insert("view".to_string(), json!(view));
        if let Some(stacked) = stacked {
            properties.insert("stacked".to_string(), json!(stacked));
        }
        if let Some(title) = &self.title {
            properties.insert("title".to_string(), json!(title));
        }
        if let Some(region) = &self.region {
            properties.insert("region".to_string(), json!(region));
        }
        properties.insert("query".to_string(), json!(full_query));

        RenderedWidget::new("log", origin, self.size, Value::Object(properties))
    }
}
