//! Dashboard widgets.
//!
//! [`Widget`] is the closed set of things a dashboard can place on its grid:
//! the leaf widgets (graphs, tables, text, …) and the layout containers
//! ([`Row`], [`Column`], [`Spacer`]). Serialization is an exhaustive match
//! over this enum — adding a widget kind is a compile-checked change, not a
//! new duck-typed participant.
//!
//! Widgets know their own extent: leaves carry a validated width and height,
//! containers compute theirs from their children on demand. Placement is a
//! pure recursive walk that turns the tree into a flat list of
//! [`RenderedWidget`] cells; no two cells can overlap because the walk only
//! ever advances its cursor.

mod alarm;
mod custom;
mod graph;
mod layout;
mod log;
mod text;
mod value;

pub use alarm::{AlarmStatusSortBy, AlarmStatusWidget, AlarmStatusWidgetProps, AlarmWidget, AlarmWidgetProps};
pub use custom::{CustomWidget, CustomWidgetProps};
pub use graph::{
    GaugeWidget, GaugeWidgetProps, GraphView, GraphWidget, GraphWidgetProps,
    HorizontalAnnotation, LegendPosition, Shading, VerticalAnnotation, VerticalShading,
    YAxisProps,
};
pub use layout::{Column, Row, Spacer, SpacerProps};
pub use log::{LogQueryVisualizationType, LogQueryWidget, LogQueryWidgetProps};
pub use text::{TextBackground, TextWidget, TextWidgetProps};
pub use value::{
    SingleValueWidget, SingleValueWidgetProps, TableLayout, TableSummaryColumn,
    TableSummaryProps, TableWidget, TableWidgetProps,
};

use crate::error::{BoardError, BuildError};
use crate::types::{GridPos, GridSize};
use serde::Serialize;
use serde_json::Value;

/// One serialized cell of the dashboard document:
/// `{type, x, y, width, height, properties}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedWidget {
    #[serde(rename = "type")]
    pub widget_type: &'static str,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub properties: Value,
}

impl RenderedWidget {
    pub(crate) fn new(
        widget_type: &'static str,
        origin: GridPos,
        size: GridSize,
        properties: Value,
    ) -> Self {
        RenderedWidget {
            widget_type,
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
            properties,
        }
    }
}

/// The closed sum of widget kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Graph(GraphWidget),
    Gauge(GaugeWidget),
    SingleValue(SingleValueWidget),
    Table(TableWidget),
    Text(TextWidget),
    Alarm(AlarmWidget),
    AlarmStatus(AlarmStatusWidget),
    LogQuery(LogQueryWidget),
    Custom(CustomWidget),
    Row(Row),
    Column(Column),
    Spacer(Spacer),
}

impl Widget {
    /// This widget's extent, in grid units. Container extents are aggregate
    /// functions over their children, computed on every call — nothing is
    /// cached, so appending to a container is always reflected.
    pub fn size(&self) -> GridSize {
        match self {
            Widget::Graph(w) => w.size(),
            Widget::Gauge(w) => w.size(),
            Widget::SingleValue(w) => w.size(),
            Widget::Table(w) => w.size(),
            Widget::Text(w) => w.size(),
            Widget::Alarm(w) => w.size(),
            Widget::AlarmStatus(w) => w.size(),
            Widget::LogQuery(w) => w.size(),
            Widget::Custom(w) => w.size(),
            Widget::Row(w) => w.size(),
            Widget::Column(w) => w.size(),
            Widget::Spacer(w) => w.size(),
        }
    }

    pub fn width(&self) -> u32 {
        self.size().width
    }

    pub fn height(&self) -> u32 {
        self.size().height
    }

    /// Places this widget at `origin` and appends its serialized cells to
    /// `out`. Containers walk their children with a running cursor; spacers
    /// occupy their extent but emit nothing.
    pub(crate) fn render_into(
        &self,
        origin: GridPos,
        out: &mut Vec<RenderedWidget>,
    ) -> Result<(), BoardError> {
        match self {
            Widget::Graph(w) => out.push(w.render(origin)?),
            Widget::Gauge(w) => out.push(w.render(origin)?),
            Widget::SingleValue(w) => out.push(w.render(origin)?),
            Widget::Table(w) => out.push(w.render(origin)?),
            Widget::Text(w) => out.push(w.render(origin)),
            Widget::Alarm(w) => out.push(w.render(origin)),
            Widget::AlarmStatus(w) => out.push(w.render(origin)),
            Widget::LogQuery(w) => out.push(w.render(origin)),
            Widget::Custom(w) => out.push(w.render(origin)),
            Widget::Row(w) => w.render_into(origin, out)?,
            Widget::Column(w) => w.render_into(origin, out)?,
            Widget::Spacer(_) => {}
        }
        Ok(())
    }
}

macro_rules! widget_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(impl From<$ty> for Widget {
            fn from(w: $ty) -> Widget {
                Widget::$variant(w)
            }
        })*
    };
}

widget_from!(
    Graph(GraphWidget),
    Gauge(GaugeWidget),
    SingleValue(SingleValueWidget),
    Table(TableWidget),
    Text(TextWidget),
    Alarm(AlarmWidget),
    AlarmStatus(AlarmStatusWidget),
    LogQuery(LogQueryWidget),
    Custom(CustomWidget),
    Row(Row),
    Column(Column),
    Spacer(Spacer),
);

/// Validates a leaf widget's extent: widths fit the grid, heights are
/// bounded by the document schema.
pub(crate) fn validate_size(
    entity: &'static str,
    width: u32,
    height: u32,
) -> Result<GridSize, BuildError> {
    if !(1..=24).contains(&width) {
        return Err(BuildError::OutOfRange {
            entity,
            field: "width",
            min: 1,
            max: 24,
            value: width,
        });
    }
    if !(1..=1000).contains(&height) {
        return Err(BuildError::OutOfRange {
            entity,
            field: "height",
            min: 1,
            max: 1000,
            value: height,
        });
    }
    Ok(GridSize::new(width, height))
}
