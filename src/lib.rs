//! # watchboard
//!
//! `watchboard` models monitoring-dashboard definitions as strongly-typed,
//! immutable value objects and compiles them into the CloudWatch dashboard
//! JSON document. It is a pure model layer: no I/O against any service, no
//! resource lifecycle — the output is the document a dashboard service (or a
//! provisioning template embedding one) consumes.
//!
//! ## What it provides
//!
//! - **Metrics**: [`Metric`] names one aggregated time series;
//!   [`MathExpression`] derives one from others via a server-evaluated
//!   formula. Both are immutable; [`Metric::with`] produces modified copies.
//! - **Alarm rules**: [`AlarmRule`] builds boolean expressions over named
//!   alarms' states and renders them into the composite-alarm grammar.
//! - **Widgets**: the closed [`Widget`] sum type — graphs, gauges, tables,
//!   single values, text, alarm views, log queries, custom widgets — plus
//!   the layout containers [`Row`], [`Column`] and [`Spacer`].
//! - **Dashboards**: [`Dashboard`] stacks widget rows on a fixed-width grid,
//!   assigning coordinates sequentially, and serializes everything into one
//!   document together with time-range settings and [`DashboardVariable`]s.
//! - **Configuration and logging**: TOML-based authoring defaults via
//!   [`ConfigLoader`], and `tracing`-based logging setup in [`logging`].
//!
//! ## Example
//!
//! ```rust
//! use watchboard::{
//!     Dashboard, DashboardProps, GraphWidget, GraphWidgetProps, Metric, MetricProps,
//! };
//!
//! # fn main() -> Result<(), watchboard::BoardError> {
//! let errors = Metric::new(MetricProps {
//!     namespace: "AWS/Lambda".to_string(),
//!     metric_name: "Errors".to_string(),
//!     ..Default::default()
//! })?;
//!
//! let mut dashboard = Dashboard::new(DashboardProps::default())?;
//! dashboard.add_widgets(vec![GraphWidget::new(GraphWidgetProps {
//!     title: Some("Errors".to_string()),
//!     left: vec![errors.into()],
//!     ..Default::default()
//! })?
//! .into()]);
//!
//! let document = dashboard.render()?;
//! assert_eq!(document["widgets"][0]["type"], "metric");
//! # Ok(())
//! # }
//! ```

pub mod alarm;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod logging;
pub mod metric;
pub mod types;
pub mod variable;
pub mod widget;

// Re-export key types for convenience.
pub use alarm::{AlarmRule, AlarmState};
pub use config::{BoardConfig, ConfigLoader, LayoutConfig, LoggingConfig};
pub use dashboard::{absolute_time, Dashboard, DashboardProps, PeriodOverride};
pub use error::{BoardError, BuildError, ConfigError, LoggingError};
pub use logging::{init_minimal_logging, initialize_logging};
pub use metric::{
    Dimensions, ExpressionConfig, MathExpression, MathExpressionProps, Metric, MetricExpr,
    MetricOverrides, MetricProps, MetricRenderConfig, StatQueryConfig, Statistic, Unit,
    DEFAULT_PERIOD,
};
pub use types::{Color, GridPos, GridRect, GridSize, GRID_WIDTH};
pub use variable::{
    DashboardVariable, DashboardVariableProps, VariableInputType, VariableType, VariableValue,
    VariableValues,
};
pub use widget::{
    AlarmStatusSortBy, AlarmStatusWidget, AlarmStatusWidgetProps, AlarmWidget, AlarmWidgetProps,
    Column, CustomWidget, CustomWidgetProps, GaugeWidget, GaugeWidgetProps, GraphView,
    GraphWidget, GraphWidgetProps, HorizontalAnnotation, LegendPosition,
    LogQueryVisualizationType, LogQueryWidget, LogQueryWidgetProps, RenderedWidget, Row, Shading,
    SingleValueWidget, SingleValueWidgetProps, Spacer, SpacerProps, TableLayout, TableSummaryColumn,
    TableSummaryProps, TableWidget, TableWidgetProps, TextBackground, TextWidget, TextWidgetProps,
    VerticalAnnotation, VerticalShading, Widget, YAxisProps,
};
