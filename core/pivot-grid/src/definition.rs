//! FILENAME: core/pivot-grid/src/definition.rs
//! Cube Definition - The serializable input.
//!
//! This module contains the types that DESCRIBE a cube result set:
//! two dimension forests (row axis, column axis), a flat row-major array of
//! values and some descriptive info. The field names follow the JSON the
//! query layer produces (`dataArray`, `cubeName`, ...).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::GridError;
use crate::validation;

/// Index of the row axis inside `CubeData::dimensions`.
pub const ROW_AXIS: usize = 0;

/// Index of the column axis inside `CubeData::dimensions`.
pub const COLUMN_AXIS: usize = 1;

// ============================================================================
// VALUES
// ============================================================================

/// A scalar value from the cube or a grid cell.
///
/// Deserialized untagged, so plain JSON scalars map directly:
/// `null` -> `Empty`, `1.5` -> `Number`, `"x"` -> `Text`, `true` -> `Boolean`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Boolean(bool),
    Empty,
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    /// The empty-string value used for blank cells.
    pub fn blank() -> Self {
        CellValue::Text(String::new())
    }

    /// True for `Empty` and for text that is the empty string.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Loose numeric coercion used when totalling a column.
    ///
    /// Blank values count as zero, numeric text is parsed. Booleans are
    /// accepted but contribute nothing to the sum.
    /// Returns `None` for anything that does not coerce to a finite number.
    pub fn coerce_number(&self) -> Option<f64> {
        let n = match self {
            CellValue::Empty => 0.0,
            CellValue::Number(n) => *n,
            CellValue::Boolean(_) => 0.0,
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().ok()?
                }
            }
        };
        if n.is_finite() { Some(n) } else { None }
    }

    /// Returns the display value as a String.
    pub fn display_value(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => {
                // Format without unnecessary decimal places
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{:.0}", n)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Text(s) => s.clone(),
            CellValue::Boolean(b) => {
                if *b { "TRUE" } else { "FALSE" }.to_string()
            }
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

// ============================================================================
// DIMENSIONS
// ============================================================================

/// A node in a dimension forest.
///
/// A node with `children` (even an empty list) is a grouping header;
/// a node without is a leaf and contributes one row or column to the grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<DimensionNode>>,
}

impl DimensionNode {
    /// Creates a leaf node.
    pub fn leaf(caption: impl Into<String>) -> Self {
        DimensionNode {
            caption: Some(caption.into()),
            children: None,
        }
    }

    /// Creates a grouping node.
    pub fn group(caption: impl Into<String>, children: Vec<DimensionNode>) -> Self {
        DimensionNode {
            caption: Some(caption.into()),
            children: Some(children),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Caption as displayed; a missing caption is the empty string.
    pub fn caption_or_empty(&self) -> &str {
        self.caption.as_deref().unwrap_or("")
    }
}

/// Which axis a header cell came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Rows,
    Columns,
}

impl Axis {
    /// Position of this axis inside `CubeData::dimensions`.
    pub fn index(self) -> usize {
        match self {
            Axis::Rows => ROW_AXIS,
            Axis::Columns => COLUMN_AXIS,
        }
    }
}

/// Locates a `DimensionNode` inside a cube: the axis plus the child index at
/// every level from the axis root list down to the node.
///
/// Header cells carry one of these instead of a borrowed node, so a grid
/// can outlive (or be cloned independently of) the cube it came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeRef {
    pub axis: Axis,
    pub path: SmallVec<[usize; 4]>,
}

impl NodeRef {
    pub fn new(axis: Axis, path: SmallVec<[usize; 4]>) -> Self {
        NodeRef { axis, path }
    }

    /// Nesting depth of the referenced node (0 = axis root).
    pub fn depth(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

// ============================================================================
// CUBE
// ============================================================================

/// Descriptive info that travels with the cube.
///
/// `top_header_rows_number` and `left_header_columns_number` are written
/// back by the grid builder; the sorter reads them to find the data body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CubeInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cube_name: Option<String>,

    /// Data row count used when the row axis has no dimensions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_count: Option<usize>,

    /// Data column count used when the column axis has no dimensions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col_count: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_header_rows_number: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_header_columns_number: Option<usize>,
}

impl CubeInfo {
    pub fn named(cube_name: impl Into<String>) -> Self {
        CubeInfo {
            cube_name: Some(cube_name.into()),
            ..Default::default()
        }
    }
}

/// A cube result set as handed over by the query layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CubeData {
    /// `[row axis roots, column axis roots]`.
    #[serde(default)]
    pub dimensions: Vec<Vec<DimensionNode>>,

    /// Values in row-major order, one per (row leaf, column leaf) pair.
    #[serde(default, rename = "dataArray")]
    pub data_array: Vec<CellValue>,

    #[serde(default)]
    pub info: CubeInfo,
}

impl CubeData {
    pub fn new(
        rows: Vec<DimensionNode>,
        columns: Vec<DimensionNode>,
        data_array: Vec<CellValue>,
        cube_name: impl Into<String>,
    ) -> Self {
        CubeData {
            dimensions: vec![rows, columns],
            data_array,
            info: CubeInfo::named(cube_name),
        }
    }

    /// Builds a cube from a JSON value after checking its shape.
    ///
    /// Shape problems (wrong container types, missing captions, missing
    /// cube name) come back as `GridError::Validation` with every violation
    /// listed; type errors inside otherwise well-shaped input come back as
    /// `GridError::Json`.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, GridError> {
        validation::validate_value(&value)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Parses and shape-checks a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, GridError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_json_value(value)
    }

    /// Root nodes of one axis; a missing axis reads as empty.
    pub fn axis(&self, axis: Axis) -> &[DimensionNode] {
        self.dimensions
            .get(axis.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Resolves a header cell's source back to its dimension node.
    pub fn node(&self, node_ref: &NodeRef) -> Option<&DimensionNode> {
        let (first, rest) = node_ref.path.split_first()?;
        let mut node = self.axis(node_ref.axis).get(*first)?;
        for &idx in rest {
            node = node.children.as_ref()?.get(idx)?;
        }
        Some(node)
    }

    pub fn cube_name(&self) -> &str {
        self.info.cube_name.as_deref().unwrap_or("")
    }
}
