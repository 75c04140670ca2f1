//! Text widgets.

use crate::error::BuildError;
use crate::types::{GridPos, GridSize};
use crate::widget::{validate_size, RenderedWidget};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Background style of a text widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextBackground {
    Solid,
    Transparent,
}

/// Construction options for [`TextWidget`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextWidgetProps {
    /// Markdown content of the widget.
    pub markdown: String,
    pub background: Option<TextBackground>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// A block of rendered markdown.
#[derive(Debug, Clone, PartialEq)]
pub struct TextWidget {
    markdown: String,
    background: Option<TextBackground>,
    size: GridSize,
}

impl TextWidget {
    pub const DEFAULT_SIZE: GridSize = GridSize::new(6, 2);

    pub fn new(props: TextWidgetProps) -> Result<Self, BuildError> {
        let size = validate_size(
            "TextWidget",
            props.width.unwrap_or(Self::DEFAULT_SIZE.width),
            props.height.unwrap_or(Self::DEFAULT_SIZE.height),
        )?;
        Ok(TextWidget {
            markdown: props.markdown,
            background: props.background,
            size,
        })
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub(crate) fn render(&self, origin: GridPos) -> RenderedWidget {
        let mut properties = Map::new();
        properties.insert("markdown".to_string(), json!(self.markdown));
        if let Some(background) = self.background {
            properties.insert("background".to_string(), json!(background));
        }
        RenderedWidget::new("text", origin, self.size, Value::Object(properties))
    }
}
