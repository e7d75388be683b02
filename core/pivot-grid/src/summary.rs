//! FILENAME: core/pivot-grid/src/summary.rs
//! Summary Row Builder - appends a totals row under the data body.

use crate::definition::CellValue;
use crate::engine::HeaderLayout;
use crate::view::{CellStyle, Grid, GridCell};

/// Font weight carried by summary value cells.
pub const SUMMARY_FONT_WEIGHT: u16 = 900;

/// Label for the summary row's header cells.
///
/// Russian locales (`ru`, `ru-RU`, `ru_UA`, ...) get "Всего", everything else "Total".
pub fn summary_label(locale: &str) -> &'static str {
    let language = locale.split(['-', '_']).next().unwrap_or("");
    if language.eq_ignore_ascii_case("ru") {
        "Всего"
    } else {
        "Total"
    }
}

/// Sums one column over the data rows.
///
/// Any value that does not coerce to a finite number blanks the whole
/// total. A total of exactly zero is also shown blank.
fn column_total(rows: &[Vec<GridCell>], column: usize) -> CellValue {
    let mut sum = 0.0;
    for row in rows {
        let number = match row.get(column) {
            Some(cell) => cell.value.coerce_number(),
            None => Some(0.0),
        };
        match number {
            Some(n) => sum += n,
            None => return CellValue::blank(),
        }
    }
    if sum == 0.0 {
        CellValue::blank()
    } else {
        CellValue::Number(sum)
    }
}

/// Appends the summary row when the body qualifies.
///
/// The body qualifies when it has more than one data row and the first cell
/// of its last row is a caption (i.e. the rows are labeled). Returns whether
/// a row was added.
pub fn append_summary(grid: &mut Grid, layout: &HeaderLayout, label: &str) -> bool {
    let body_start = layout.top_header_rows.min(grid.row_count());
    if grid.row_count() - body_start <= 1 {
        return false;
    }

    let last = match grid.rows().last() {
        Some(row) if row.first().map_or(false, |c| c.is_caption) => row,
        _ => return false,
    };

    let body = &grid.rows()[body_start..];
    let summary: Vec<GridCell> = last
        .iter()
        .enumerate()
        .map(|(column, cell)| {
            if cell.is_caption {
                GridCell::label(layout.next_group, label)
            } else {
                GridCell::data(column_total(body, column))
                    .with_style(CellStyle::weight(SUMMARY_FONT_WEIGHT))
            }
        })
        .collect();

    log_debug!("GRID", "summary row appended over {} data rows", body.len());
    grid.push_row(summary);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{CubeData, DimensionNode};
    use crate::engine::assemble;

    fn cube(values: Vec<CellValue>) -> CubeData {
        CubeData::new(
            vec![
                DimensionNode::leaf("r1"),
                DimensionNode::leaf("r2"),
                DimensionNode::leaf("r3"),
            ],
            vec![DimensionNode::leaf("a"), DimensionNode::leaf("b")],
            values,
            "C",
        )
    }

    #[test]
    fn test_labels() {
        assert_eq!(summary_label("ru"), "Всего");
        assert_eq!(summary_label("ru-RU"), "Всего");
        assert_eq!(summary_label("RU_ua"), "Всего");
        assert_eq!(summary_label("en-US"), "Total");
        assert_eq!(summary_label("rus"), "Total");
        assert_eq!(summary_label(""), "Total");
    }

    #[test]
    fn test_numeric_columns_are_summed() {
        let mut cube = cube(vec![
            1.0.into(), "x".into(),
            2.0.into(), 4.0.into(),
            "3".into(), 5.0.into(),
        ]);
        let (mut grid, layout) = assemble(&mut cube);
        assert!(append_summary(&mut grid, &layout, "Total"));

        let summary = grid.rows().last().unwrap();
        assert_eq!(summary[0].value, CellValue::text("Total"));
        assert!(summary[0].is_caption);
        assert_eq!(summary[0].group, Some(layout.next_group));
        assert_eq!(summary[1].value, CellValue::Number(6.0));
        assert_eq!(summary[1].style, Some(CellStyle::weight(SUMMARY_FONT_WEIGHT)));
        // "x" is not numeric, so the whole column total is dropped
        assert_eq!(summary[2].value, CellValue::blank());
    }

    #[test]
    fn test_zero_total_is_blank() {
        let mut cube = cube(vec![
            1.0.into(), 0.0.into(),
            (-1.0).into(), 0.0.into(),
            0.0.into(), CellValue::Empty,
        ]);
        let (mut grid, layout) = assemble(&mut cube);
        assert!(append_summary(&mut grid, &layout, "Total"));
        let summary = grid.rows().last().unwrap();
        assert_eq!(summary[1].value, CellValue::blank());
        assert_eq!(summary[2].value, CellValue::blank());
    }

    #[test]
    fn test_booleans_add_nothing_to_total() {
        let mut cube = cube(vec![
            CellValue::Boolean(true), 2.0.into(),
            CellValue::Boolean(true), CellValue::Boolean(false),
            CellValue::Boolean(false), 3.0.into(),
        ]);
        let (mut grid, layout) = assemble(&mut cube);
        assert!(append_summary(&mut grid, &layout, "Total"));
        let summary = grid.rows().last().unwrap();
        // All-boolean column sums to 0, which renders blank
        assert_eq!(summary[1].value, CellValue::blank());
        assert_eq!(summary[2].value, CellValue::Number(5.0));
    }

    #[test]
    fn test_single_data_row_gets_no_summary() {
        let mut cube = CubeData::new(
            vec![DimensionNode::leaf("r1")],
            vec![DimensionNode::leaf("a")],
            vec![1.0.into()],
            "C",
        );
        let (mut grid, layout) = assemble(&mut cube);
        assert!(!append_summary(&mut grid, &layout, "Total"));
        assert_eq!(grid.row_count(), 2);
    }

    #[test]
    fn test_unlabeled_rows_get_no_summary() {
        let mut cube = CubeData {
            dimensions: vec![vec![], vec![DimensionNode::leaf("a")]],
            data_array: vec![1.0.into(), 2.0.into()],
            info: crate::definition::CubeInfo {
                cube_name: Some("C".to_string()),
                row_count: Some(2),
                ..Default::default()
            },
        };
        let (mut grid, layout) = assemble(&mut cube);
        assert!(!append_summary(&mut grid, &layout, "Total"));
    }
}
