//! FILENAME: core/pivot-grid/src/sort.rs
//! Sort Engine - reorders the data body of a grid by one data column.
//!
//! Repeated clicks on the same column cycle descending -> ascending ->
//! original order. Picking a different column restarts the cycle at
//! descending. Header rows and the summary row never move, and the origin
//! grid is never touched: every sort derives a new view from it.

use std::cmp::Ordering;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::definition::CellValue;
use crate::error::GridError;
use crate::stack::GridState;
use crate::view::{Grid, GridCell};

// ============================================================================
// SORT STATE
// ============================================================================

/// Stored sort order of a frame, serialized as its `-1 | 0 | 1` code.
///
/// A frame starts out as `Descending` with no column selected, which means
/// "unsorted": the code only takes effect once a column is picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum SortOrder {
    Descending = -1,
    Original = 0,
    Ascending = 1,
}

impl SortOrder {
    /// Next step of the cycle: `-1 -> 1 -> 0 -> -1`.
    pub fn next(self) -> Self {
        match self {
            SortOrder::Descending => SortOrder::Ascending,
            SortOrder::Ascending => SortOrder::Original,
            SortOrder::Original => SortOrder::Descending,
        }
    }

    pub fn code(self) -> i8 {
        self as i8
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Descending
    }
}

impl From<SortOrder> for i8 {
    fn from(order: SortOrder) -> Self {
        order.code()
    }
}

impl TryFrom<i8> for SortOrder {
    type Error = String;

    fn try_from(code: i8) -> Result<Self, Self::Error> {
        match code {
            -1 => Ok(SortOrder::Descending),
            0 => Ok(SortOrder::Original),
            1 => Ok(SortOrder::Ascending),
            other => Err(format!("invalid sort order code {}", other)),
        }
    }
}

/// Which data column a frame is sorted by, and how.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    /// Data column index (0 = first column after the row headers).
    pub column: Option<usize>,
    pub order: SortOrder,
}

impl SortState {
    /// Advances the state for a click on `column` and returns the new order.
    pub fn select(&mut self, column: usize) -> SortOrder {
        if self.column != Some(column) {
            self.order = SortOrder::Original;
        }
        self.order = self.order.next();
        self.column = Some(column);
        self.order
    }
}

// ============================================================================
// COMPARISON
// ============================================================================

/// What a value sorts as: a number, or text that does not read as one.
#[derive(Debug, Clone, Copy, PartialEq)]
enum SortKey<'a> {
    Number(f64),
    Text(&'a str),
}

/// Blank values sort as 0, booleans as 0/1 and numeric text as its number,
/// so sparse cells and text-typed measures interleave with real numbers.
fn sort_key(value: &CellValue) -> SortKey<'_> {
    match value {
        CellValue::Empty => SortKey::Number(0.0),
        CellValue::Number(n) => SortKey::Number(*n),
        CellValue::Boolean(b) => SortKey::Number(if *b { 1.0 } else { 0.0 }),
        CellValue::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return SortKey::Number(0.0);
            }
            match trimmed.parse::<f64>() {
                Ok(n) if n.is_finite() => SortKey::Number(n),
                _ => SortKey::Text(s),
            }
        }
    }
}

/// Total order over cell values used by the sorter.
///
/// Numeric-like values (numbers, blanks, booleans, numeric text) compare by
/// their number and come before non-numeric text, which compares
/// lexicographically.
pub fn compare_values(a: &CellValue, b: &CellValue) -> Ordering {
    match (sort_key(a), sort_key(b)) {
        (SortKey::Number(x), SortKey::Number(y)) => x.total_cmp(&y),
        (SortKey::Text(x), SortKey::Text(y)) => x.cmp(y),
        (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
        (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
    }
}

static MISSING: CellValue = CellValue::Empty;

fn cell_value(row: &[GridCell], column: usize) -> &CellValue {
    row.get(column).map_or(&MISSING, |c| &c.value)
}

/// Builds a view of `origin` with the rows in `body` reordered by `column`.
///
/// `column` is an absolute grid column here. The sort is stable, so rows
/// with equal values keep their original relative order.
pub fn sorted_view(origin: &Grid, body: Range<usize>, column: usize, order: SortOrder) -> Grid {
    if order == SortOrder::Original {
        return origin.clone();
    }

    let rows = origin.rows();
    let start = body.start.min(rows.len());
    let end = body.end.clamp(start, rows.len());

    let mut sorted_body = rows[start..end].to_vec();
    sorted_body.sort_by(|a, b| {
        let (a, b) = (cell_value(a, column), cell_value(b, column));
        match order {
            SortOrder::Ascending => compare_values(a, b),
            _ => compare_values(b, a),
        }
    });

    let mut result = Vec::with_capacity(rows.len());
    result.extend_from_slice(&rows[..start]);
    result.extend(sorted_body);
    result.extend_from_slice(&rows[end..]);
    Grid::from_rows(result)
}

// ============================================================================
// FRAME SORTING
// ============================================================================

/// Sorts a frame by data column `column` and advances its sort state.
///
/// Fails without touching the frame when it holds no data or the column is
/// outside the data area.
pub fn sort_frame(frame: &mut GridState, column: usize) -> Result<SortOrder, GridError> {
    let info = match frame.data() {
        Some(cube) => &cube.info,
        None => return Err(GridError::NoData),
    };
    let top = info.top_header_rows_number.unwrap_or(0);
    let left = info.left_header_columns_number.unwrap_or(0);

    let origin = frame.origin_grid();
    let data_columns = origin.col_count().saturating_sub(left);
    if column >= data_columns {
        return Err(GridError::ColumnOutOfRange { column, data_columns });
    }

    let body_end = origin
        .row_count()
        .saturating_sub(usize::from(frame.summary_shown()));
    let mut state = frame.sort_state();
    let order = state.select(column);
    let view = sorted_view(origin, top..body_end, left + column, order);

    frame.set_sorted(view, state);
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_grid(header: &str, values: &[f64]) -> Grid {
        let mut grid = Grid::from_rows(vec![vec![GridCell::corner(header)]]);
        for v in values {
            grid.push_row(vec![GridCell::data((*v).into())]);
        }
        grid
    }

    fn numbers(grid: &Grid) -> Vec<f64> {
        grid.rows()
            .iter()
            .filter_map(|r| match r[0].value {
                CellValue::Number(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_cycle_on_same_column() {
        let mut state = SortState::default();
        assert_eq!(state.select(0), SortOrder::Descending);
        assert_eq!(state.select(0), SortOrder::Ascending);
        assert_eq!(state.select(0), SortOrder::Original);
        assert_eq!(state.select(0), SortOrder::Descending);
    }

    #[test]
    fn test_new_column_restarts_at_descending() {
        let mut state = SortState::default();
        state.select(0);
        state.select(0);
        assert_eq!(state.order, SortOrder::Ascending);
        assert_eq!(state.select(1), SortOrder::Descending);
        assert_eq!(state.column, Some(1));
    }

    #[test]
    fn test_order_codes_round_trip_through_serde() {
        let state = SortState {
            column: Some(2),
            order: SortOrder::Descending,
        };
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"column":2,"order":-1}"#);
        let back: SortState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
        assert!(serde_json::from_str::<SortState>(r#"{"column":null,"order":5}"#).is_err());
    }

    #[test]
    fn test_sorted_view_keeps_header_and_tail() {
        let mut grid = column_grid("H", &[1.0, 3.0, 2.0]);
        grid.push_row(vec![GridCell::label(9, "Total")]);
        let rows = grid.row_count();

        let view = sorted_view(&grid, 1..rows - 1, 0, SortOrder::Descending);
        assert_eq!(numbers(&view), vec![3.0, 2.0, 1.0]);
        assert_eq!(view.cell(0, 0), grid.cell(0, 0));
        assert_eq!(view.cell(rows - 1, 0), grid.cell(rows - 1, 0));

        let view = sorted_view(&grid, 1..rows - 1, 0, SortOrder::Ascending);
        assert_eq!(numbers(&view), vec![1.0, 2.0, 3.0]);

        let view = sorted_view(&grid, 1..rows - 1, 0, SortOrder::Original);
        assert_eq!(view, grid);
    }

    #[test]
    fn test_mixed_kinds_order() {
        let mut values = vec![
            CellValue::text("b"),
            CellValue::Number(2.0),
            CellValue::blank(),
            CellValue::Boolean(true),
            CellValue::Number(-1.0),
            CellValue::text("a"),
            CellValue::text("12"),
            CellValue::Empty,
        ];
        values.sort_by(compare_values);
        assert_eq!(
            values,
            vec![
                CellValue::Number(-1.0),
                CellValue::blank(),
                CellValue::Empty,
                CellValue::Boolean(true),
                CellValue::Number(2.0),
                CellValue::text("12"),
                CellValue::text("a"),
                CellValue::text("b"),
            ]
        );
    }

    #[test]
    fn test_numeric_text_compares_as_number() {
        assert_eq!(compare_values(&CellValue::text("12"), &CellValue::Number(9.0)), Ordering::Greater);
        assert_eq!(compare_values(&CellValue::text(" 3 "), &CellValue::text("12")), Ordering::Less);
        assert_eq!(compare_values(&CellValue::blank(), &CellValue::Number(-3.0)), Ordering::Greater);
        assert_eq!(compare_values(&CellValue::Empty, &CellValue::blank()), Ordering::Equal);
        assert_eq!(compare_values(&CellValue::text("inf"), &CellValue::Number(1e300)), Ordering::Greater);
    }

    #[test]
    fn test_ties_keep_original_order() {
        let grid = Grid::from_rows(vec![
            vec![GridCell::data("first".into()), GridCell::data(1.0.into())],
            vec![GridCell::data("second".into()), GridCell::data(1.0.into())],
            vec![GridCell::data("third".into()), GridCell::data(0.0.into())],
        ]);
        let desc = sorted_view(&grid, 0..3, 1, SortOrder::Descending);
        let labels: Vec<String> = desc.rows().iter().map(|r| r[0].value.display_value()).collect();
        assert_eq!(labels, vec!["first", "second", "third"]);

        let asc = sorted_view(&grid, 0..3, 1, SortOrder::Ascending);
        let labels: Vec<String> = asc.rows().iter().map(|r| r[0].value.display_value()).collect();
        assert_eq!(labels, vec!["third", "first", "second"]);
    }
}
