//! Custom widgets backed by a user function.

use crate::error::BuildError;
use crate::types::{GridPos, GridSize};
use crate::widget::{validate_size, RenderedWidget};
use serde_json::{json, Map, Value};

/// Construction options for [`CustomWidget`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomWidgetProps {
    /// ARN of the function that produces the widget content. Required.
    pub function_arn: String,
    pub title: Option<String>,
    /// Parameters passed to the function on each invocation.
    pub params: Option<Value>,
    /// Re-invoke when the dashboard auto-refreshes. Defaults to on.
    pub update_on_refresh: Option<bool>,
    /// Re-invoke when the widget is resized. Defaults to on.
    pub update_on_resize: Option<bool>,
    /// Re-invoke when the visible time range changes. Defaults to on.
    pub update_on_time_range_change: Option<bool>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// A widget whose content is produced by calling out to a function.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomWidget {
    props: CustomWidgetProps,
    size: GridSize,
}

impl CustomWidget {
    pub const DEFAULT_SIZE: GridSize = GridSize::new(6, 6);

    pub fn new(props: CustomWidgetProps) -> Result<Self, BuildError> {
        if props.function_arn.is_empty() {
            return Err(BuildError::MissingField {
                entity: "CustomWidget",
                field: "function_arn",
            });
        }
        let size = validate_size(
            "CustomWidget",
            props.width.unwrap_or(Self::DEFAULT_SIZE.width),
            props.height.unwrap_or(Self::DEFAULT_SIZE.height),
        )?;
        Ok(CustomWidget { props, size })
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub(crate) fn render(&self, origin: GridPos) -> RenderedWidget {
        let mut properties = Map::new();
        properties.insert("endpoint".to_string(), json!(self.props.function_arn));
        if let Some(params) = &self.props.params {
            properties.insert("params".to_string(), params.clone());
        }
        if let Some(title) = &self.props.title {
            properties.insert("title".to_string(), json!(title));
        }

        let mut update_on = Map::new();
        if let Some(refresh) = self.props.update_on_refresh {
            update_on.insert("refresh".to_string(), json!(refresh));
        }
        if let Some(resize) = self.props.update_on_resize {
            update_on.insert("resize".to_string(), json!(resize));
        }
        if let Some(time_range) = self.props.update_on_time_range_change {
            update_on.insert("timeRange".to_string(), json!(time_range));
        }
        if !update_on.is_empty() {
            properties.insert("updateOn".to_string(), Value::Object(update_on));
        }

        RenderedWidget::new("custom", origin, self.size, Value::Object(properties))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn function_arn_is_required() {
        let err = CustomWidget::new(CustomWidgetProps::default()).unwrap_err();
        assert_eq!(
            err,
            BuildError::MissingField {
                entity: "CustomWidget",
                field: "function_arn",
            }
        );
    }

    #[test]
    fn renders_endpoint_params_and_update_behaviors() {
        let widget = CustomWidget::new(CustomWidgetProps {
            function_arn: "arn:aws:lambda:us-east-1:1234:function:widget".to_string(),
            title: Some("Deploys".to_string()),
            params: Some(json!({ "service": "api" })),
            update_on_refresh: Some(true),
            update_on_time_range_change: Some(false),
            ..Default::default()
        })
        .unwrap();
        let rendered = widget.render(GridPos::ORIGIN);
        assert_eq!(rendered.widget_type, "custom");
        assert_eq!(
            rendered.properties,
            json!({
                "endpoint": "arn:aws:lambda:us-east-1:1234:function:widget",
                "params": { "service": "api" },
                "title": "Deploys",
                "updateOn": { "refresh": true, "timeRange": false }
            })
        );
    }

    #[test]
    fn update_on_is_omitted_when_unset() {
        let widget = CustomWidget::new(CustomWidgetProps {
            function_arn: "arn:fn".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            widget.render(GridPos::ORIGIN).properties,
            json!({ "endpoint": "arn:fn" })
        );
    }
}
