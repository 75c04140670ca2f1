//! Layout containers: rows, columns, and spacers.
//!
//! Containers are the only mutable part of the widget model — appending a
//! child is the single mutation — and they never cache their extent:
//! `size()` recomputes the aggregate on every call, so it is always
//! consistent with the child list.
//!
//! Placement is strictly sequential: a row walks its children left to right,
//! a column top to bottom, each child offset by the accumulated extent of its
//! preceding siblings. Nothing wraps; a too-wide row is the caller's choice.

use crate::error::BoardError;
use crate::types::{GridPos, GridSize};
use crate::widget::{RenderedWidget, Widget};

/// A horizontal sequence of widgets.
///
/// Width is the sum of the children's widths, height the maximum of their
/// heights; an empty row is zero-size.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    children: Vec<Widget>,
}

impl Row {
    pub fn new(children: Vec<Widget>) -> Self {
        Row { children }
    }

    /// Appends a child. Previously computed extents are not invalidated
    /// because extents are never stored.
    pub fn add_widget(&mut self, widget: impl Into<Widget>) {
        self.children.push(widget.into());
    }

    pub fn children(&self) -> &[Widget] {
        &self.children
    }

    pub fn size(&self) -> GridSize {
        let mut size = GridSize::ZERO;
        for child in &self.children {
            let child_size = child.size();
            size.width += child_size.width;
            size.height = size.height.max(child_size.height);
        }
        size
    }

    pub(crate) fn render_into(
        &self,
        origin: GridPos,
        out: &mut Vec<RenderedWidget>,
    ) -> Result<(), BoardError> {
        let mut x = origin.x;
        for child in &self.children {
            child.render_into(GridPos::new(x, origin.y), out)?;
            x += child.width();
        }
        Ok(())
    }
}

/// A vertical sequence of widgets.
///
/// Height is the sum of the children's heights, width the maximum of their
/// widths; an empty column is zero-size.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Column {
    children: Vec<Widget>,
}

impl Column {
    pub fn new(children: Vec<Widget>) -> Self {
        Column { children }
    }

    pub fn add_widget(&mut self, widget: impl Into<Widget>) {
        self.children.push(widget.into());
    }

    pub fn children(&self) -> &[Widget] {
        &self.children
    }

    pub fn size(&self) -> GridSize {
        let mut size = GridSize::ZERO;
        for child in &self.children {
            let child_size = child.size();
            size.width = size.width.max(child_size.width);
            size.height += child_size.height;
        }
        size
    }

    pub(crate) fn render_into(
        &self,
        origin: GridPos,
        out: &mut Vec<RenderedWidget>,
    ) -> Result<(), BoardError> {
        let mut y = origin.y;
        for child in &self.children {
            child.render_into(GridPos::new(origin.x, y), out)?;
            y += child.height();
        }
        Ok(())
    }
}

/// Construction options for [`Spacer`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpacerProps {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Occupies grid space and renders nothing; shifts subsequent siblings.
#[derive(Debug, Clone, PartialEq)]
pub struct Spacer {
    size: GridSize,
}

impl Spacer {
    /// A spacer of the given extent. Zero is allowed — a zero-size spacer
    /// shifts nothing.
    pub fn new(props: SpacerProps) -> Self {
        Spacer {
            size: GridSize::new(props.width.unwrap_or(1), props.height.unwrap_or(1)),
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }
}

impl Default for Spacer {
    fn default() -> Self {
        Spacer::new(SpacerProps::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{TextWidget, TextWidgetProps};
    use pretty_assertions::assert_eq;

    fn text(width: u32, height: u32) -> Widget {
        TextWidget::new(TextWidgetProps {
            markdown: "x".to_string(),
            width: Some(width),
            height: Some(height),
            ..Default::default()
        })
        .unwrap()
        .into()
    }

    #[test]
    fn row_sums_widths_and_takes_max_height() {
        let row = Row::new(vec![text(12, 6), text(12, 6)]);
        assert_eq!(row.size(), GridSize::new(24, 6));

        let uneven = Row::new(vec![text(6, 2), text(6, 8), text(3, 4)]);
        assert_eq!(uneven.size(), GridSize::new(15, 8));
    }

    #[test]
    fn column_sums_heights_and_takes_max_width() {
        let column = Column::new(vec![text(6, 2), text(12, 6), text(3, 4)]);
        assert_eq!(column.size(), GridSize::new(12, 12));
    }

    #[test]
    fn empty_containers_are_zero_size() {
        assert_eq!(Row::default().size(), GridSize::ZERO);
        assert_eq!(Column::default().size(), GridSize::ZERO);
    }

    #[test]
    fn adding_a_widget_is_reflected_in_the_next_size_call() {
        let mut row = Row::new(vec![text(6, 6)]);
        assert_eq!(row.size(), GridSize::new(6, 6));
        row.add_widget(text(6, 8));
        assert_eq!(row.size(), GridSize::new(12, 8));
    }

    #[test]
    fn row_places_children_at_cumulative_x_offsets() {
        let row = Row::new(vec![text(6, 2), text(4, 2), text(5, 2)]);
        let mut out = Vec::new();
        row.render_into(GridPos::new(0, 10), &mut out).unwrap();
        let offsets: Vec<(u32, u32)> = out.iter().map(|w| (w.x, w.y)).collect();
        assert_eq!(offsets, vec![(0, 10), (6, 10), (10, 10)]);
    }

    #[test]
    fn column_places_children_at_cumulative_y_offsets() {
        let column = Column::new(vec![text(6, 2), text(6, 5), text(6, 1)]);
        let mut out = Vec::new();
        column.render_into(GridPos::new(3, 0), &mut out).unwrap();
        let offsets: Vec<(u32, u32)> = out.iter().map(|w| (w.x, w.y)).collect();
        assert_eq!(offsets, vec![(3, 0), (3, 2), (3, 7)]);
    }

    #[test]
    fn spacer_occupies_space_but_renders_nothing() {
        let row = Row::new(vec![
            text(6, 2),
            Spacer::new(SpacerProps {
                width: Some(6),
                ..Default::default()
            })
            .into(),
            text(6, 2),
        ]);
        assert_eq!(row.size(), GridSize::new(18, 2));
        let mut out = Vec::new();
        row.render_into(GridPos::ORIGIN, &mut out).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!((out[1].x, out[1].y), (12, 0));
    }

    #[test]
    fn nested_containers_offset_recursively() {
        let inner = Column::new(vec![text(6, 3), text(6, 3)]);
        let row = Row::new(vec![text(6, 6), inner.into()]);
        assert_eq!(row.size(), GridSize::new(12, 6));
        let mut out = Vec::new();
        row.render_into(GridPos::ORIGIN, &mut out).unwrap();
        let offsets: Vec<(u32, u32)> = out.iter().map(|w| (w.x, w.y)).collect();
        assert_eq!(offsets, vec![(0, 0), (6, 0), (6, 3)]);
    }
}
