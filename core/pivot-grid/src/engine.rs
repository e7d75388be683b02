//! FILENAME: core/pivot-grid/src/engine.rs
//! Grid Assembler - combines header blocks and values into one grid.
//!
//! Layout of the produced grid (xh = column-header depth, yw = row-header
//! depth):
//!
//! ```text
//!          yw cols        xw cols
//!       +-----------+------------------+
//!  xh   |  corner   |  column headers  |
//!       +-----------+------------------+
//!  yh   |  row      |  data            |
//!       |  headers  |  dataArray[...]  |
//!       +-----------+------------------+
//!       |  summary row (optional)      |
//!       +------------------------------+
//! ```

use crate::definition::{Axis, CellValue, CubeData};
use crate::flatten::{flatten_axis, HeaderBlock};
use crate::summary;
use crate::view::{Grid, GridCell, GroupId, FIRST_NODE_GROUP};

/// Where the headers end and how big the data body is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderLayout {
    /// Rows taken by column headers (xh).
    pub top_header_rows: usize,
    /// Columns taken by row headers (yw).
    pub left_header_columns: usize,
    /// Data rows (yh).
    pub data_rows: usize,
    /// Data columns (xw).
    pub data_columns: usize,
    /// First group id not used by any header cell.
    pub next_group: GroupId,
}

impl HeaderLayout {
    pub fn total_rows(&self) -> usize {
        self.top_header_rows + self.data_rows
    }

    pub fn total_columns(&self) -> usize {
        self.left_header_columns + self.data_columns
    }
}

/// A freshly derived grid plus what the sorter needs to know about it.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltGrid {
    pub grid: Grid,
    pub layout: HeaderLayout,
    pub summary_shown: bool,
}

// ============================================================================
// ASSEMBLY
// ============================================================================

/// Value for the data cell at (`row`, `col`) of the body.
/// Out-of-range and `null` entries render as the empty string.
fn data_value(data: &[CellValue], data_columns: usize, row: usize, col: usize) -> CellValue {
    match data.get(data_columns * row + col) {
        None | Some(CellValue::Empty) => CellValue::blank(),
        Some(v) => v.clone(),
    }
}

fn assemble_row(
    y: usize,
    layout: &HeaderLayout,
    row_block: &HeaderBlock,
    col_block: &HeaderBlock,
    cube: &CubeData,
) -> Vec<GridCell> {
    let xh = layout.top_header_rows;
    let yw = layout.left_header_columns;
    let mut row = Vec::with_capacity(layout.total_columns());

    for x in 0..layout.total_columns() {
        let cell = match (y < xh, x < yw) {
            (true, true) => GridCell::corner(cube.cube_name()),
            (true, false) => col_block.cells[y][x - yw].clone(),
            (false, true) => row_block.cells[y - xh][x].clone(),
            (false, false) => GridCell::data(data_value(
                &cube.data_array,
                layout.data_columns,
                y - xh,
                x - yw,
            )),
        };
        row.push(cell);
    }

    row
}

/// Length of an axis that has no dimension tree, taken from the cube info.
///
/// Capped at the number of values: an axis longer than `dataArray` could
/// only hold blank cells.
fn implicit_count(field: &str, declared: Option<usize>, values: usize) -> usize {
    let declared = declared.unwrap_or(0);
    if declared > values {
        log_warn!(
            "GRID",
            "info.{} = {} exceeds the {} values in dataArray; capped",
            field,
            declared,
            values
        );
        values
    } else {
        declared
    }
}

/// Flattens both axes and lays the result out as a grid, without summary.
///
/// Records `topHeaderRowsNumber` and `leftHeaderColumnsNumber` on the
/// cube's info.
pub fn assemble(cube: &mut CubeData) -> (Grid, HeaderLayout) {
    let (row_block, next_group) = flatten_axis(cube.axis(Axis::Rows), Axis::Rows, FIRST_NODE_GROUP);
    let (col_block, next_group) = flatten_axis(cube.axis(Axis::Columns), Axis::Columns, next_group);

    let data_rows = if row_block.is_empty() {
        implicit_count("rowCount", cube.info.row_count, cube.data_array.len())
    } else {
        row_block.leaves
    };
    let data_columns = if col_block.is_empty() {
        implicit_count("colCount", cube.info.col_count, cube.data_array.len())
    } else {
        col_block.leaves
    };

    // An implicit axis still needs a block of the right length, just 0 wide/tall.
    let row_block = if row_block.is_empty() {
        HeaderBlock {
            cells: vec![Vec::new(); data_rows],
            ..row_block
        }
    } else {
        row_block
    };

    let layout = HeaderLayout {
        top_header_rows: col_block.depth,
        left_header_columns: row_block.depth,
        data_rows,
        data_columns,
        next_group,
    };

    let source: &CubeData = cube;
    let grid = Grid::from_rows(
        (0..layout.total_rows())
            .map(|y| assemble_row(y, &layout, &row_block, &col_block, source))
            .collect(),
    );

    cube.info.top_header_rows_number = Some(layout.top_header_rows);
    cube.info.left_header_columns_number = Some(layout.left_header_columns);

    log_debug!(
        "GRID",
        "assembled {}x{} grid (headers {}x{}, {} values)",
        grid.row_count(),
        layout.total_columns(),
        layout.top_header_rows,
        layout.left_header_columns,
        cube.data_array.len()
    );

    (grid, layout)
}

/// Derives the full grid for a cube: headers, data and the optional summary row.
pub fn build_grid(cube: &mut CubeData, show_summary: bool, locale: &str) -> BuiltGrid {
    let (mut grid, layout) = assemble(cube);

    let summary_shown = show_summary
        && summary::append_summary(&mut grid, &layout, summary::summary_label(locale));

    BuiltGrid {
        grid,
        layout,
        summary_shown,
    }
}
