//! FILENAME: core/pivot-grid/src/view.rs
//! Grid View - Renderable output for the table widget.
//!
//! A `Grid` is a rectangular block of `GridCell`s: corner cells, column
//! headers along the top, row headers down the left, data in the body and
//! optionally a summary row at the bottom. Header cells carry a group id so
//! the renderer can merge neighbouring cells of the same dimension node.

use serde::{Deserialize, Serialize};

use crate::definition::{CellValue, NodeRef};

/// Group id of the corner block.
pub const CORNER_GROUP: GroupId = 1;

/// Group ids handed out to dimension nodes start here.
pub const FIRST_NODE_GROUP: GroupId = 2;

/// Identifier shared by all header cells produced from one dimension node.
pub type GroupId = u32;

// ============================================================================
// CELL
// ============================================================================

/// Visual hints attached to a cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellStyle {
    #[serde(rename = "font-weight", default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u16>,
}

impl CellStyle {
    pub fn weight(font_weight: u16) -> Self {
        CellStyle {
            font_weight: Some(font_weight),
        }
    }
}

/// A single cell in the grid view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCell {
    /// Header group this cell belongs to; data cells have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupId>,

    /// True for corner, header and summary-label cells.
    #[serde(default)]
    pub is_caption: bool,

    /// The dimension node a header cell was produced from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<NodeRef>,

    pub value: CellValue,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<CellStyle>,
}

impl GridCell {
    /// Creates a data cell.
    pub fn data(value: CellValue) -> Self {
        GridCell {
            group: None,
            is_caption: false,
            source: None,
            value,
            style: None,
        }
    }

    /// Creates a header cell for a dimension node.
    pub fn header(group: GroupId, source: NodeRef, caption: impl Into<String>) -> Self {
        GridCell {
            group: Some(group),
            is_caption: true,
            source: Some(source),
            value: CellValue::Text(caption.into()),
            style: None,
        }
    }

    /// Creates a corner cell showing the cube name.
    pub fn corner(cube_name: impl Into<String>) -> Self {
        GridCell {
            group: Some(CORNER_GROUP),
            is_caption: true,
            source: None,
            value: CellValue::Text(cube_name.into()),
            style: None,
        }
    }

    /// Creates a caption cell with no source node (summary labels).
    pub fn label(group: GroupId, caption: impl Into<String>) -> Self {
        GridCell {
            group: Some(group),
            is_caption: true,
            source: None,
            value: CellValue::Text(caption.into()),
            style: None,
        }
    }

    pub fn with_style(mut self, style: CellStyle) -> Self {
        self.style = Some(style);
        self
    }
}

// ============================================================================
// GRID
// ============================================================================

/// A rectangular grid of cells, row-major.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Vec<GridCell>>,
}

impl Grid {
    pub fn new() -> Self {
        Grid { rows: Vec::new() }
    }

    pub fn from_rows(rows: Vec<Vec<GridCell>>) -> Self {
        Grid { rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<GridCell>] {
        &self.rows
    }

    pub fn row(&self, row: usize) -> Option<&[GridCell]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&GridCell> {
        self.rows.get(row)?.get(col)
    }

    pub fn push_row(&mut self, row: Vec<GridCell>) {
        self.rows.push(row);
    }

    pub fn into_rows(self) -> Vec<Vec<GridCell>> {
        self.rows
    }

    /// True when every row has the same length.
    pub fn is_rectangular(&self) -> bool {
        let width = self.col_count();
        self.rows.iter().all(|r| r.len() == width)
    }

    /// The cell values alone, row-major.
    pub fn values(&self) -> Vec<Vec<CellValue>> {
        self.rows
            .iter()
            .map(|r| r.iter().map(|c| c.value.clone()).collect())
            .collect()
    }

    /// Display strings, row-major. Handy for snapshots and logging.
    pub fn display_values(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|r| r.iter().map(|c| c.value.display_value()).collect())
            .collect()
    }

    /// Serializes the grid for a renderer.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> Grid {
        Grid::from_rows(vec![
            vec![GridCell::corner("C"), GridCell::data(1.0.into())],
            vec![GridCell::data("a".into()), GridCell::data(2.0.into())],
        ])
    }

    #[test]
    fn test_dimensions_and_access() {
        let grid = two_by_two();
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.col_count(), 2);
        assert!(grid.is_rectangular());
        assert_eq!(grid.cell(1, 1).map(|c| &c.value), Some(&CellValue::Number(2.0)));
        assert!(grid.cell(2, 0).is_none());
    }

    #[test]
    fn test_ragged_grid_is_detected() {
        let mut grid = two_by_two();
        grid.push_row(vec![GridCell::data(CellValue::blank())]);
        assert!(!grid.is_rectangular());
    }

    #[test]
    fn test_json_shape() {
        let grid = Grid::from_rows(vec![vec![
            GridCell::corner("C"),
            GridCell::data(10.0.into()).with_style(CellStyle::weight(900)),
        ]]);
        let json: serde_json::Value = serde_json::from_str(&grid.to_json().unwrap()).unwrap();
        assert_eq!(json[0][0]["group"], 1);
        assert_eq!(json[0][0]["isCaption"], true);
        assert_eq!(json[0][0]["value"], "C");
        assert_eq!(json[0][1]["value"], 10.0);
        assert_eq!(json[0][1]["style"]["font-weight"], 900);
        assert!(json[0][1].get("group").is_none());
    }
}
