//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for pivot-grid integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use pivot_grid::{
    CellValue, CubeData, CubeInfo, DataController, DimensionNode, Grid, PivotConfig,
};

/// Test harness wrapping a controller and counting its notifications.
pub struct TestHarness {
    pub controller: DataController,
    notifications: Rc<Cell<usize>>,
}

impl TestHarness {
    /// Create a harness with summaries off and an English locale.
    pub fn new() -> Self {
        Self::with_config(PivotConfig::new(false, "en"))
    }

    /// Create a harness with summaries on.
    pub fn with_summary(locale: &str) -> Self {
        Self::with_config(PivotConfig::new(true, locale))
    }

    pub fn with_config(config: PivotConfig) -> Self {
        let notifications = Rc::new(Cell::new(0));
        let counter = Rc::clone(&notifications);
        let controller =
            DataController::with_observer(config, move || counter.set(counter.get() + 1));
        TestHarness {
            controller,
            notifications,
        }
    }

    /// How many times the observer has fired.
    pub fn notifications(&self) -> usize {
        self.notifications.get()
    }

    /// The shown grid; panics when no data has been set.
    pub fn grid(&self) -> &Grid {
        self.controller.grid().expect("grid should be set")
    }

    /// Values of the data column `column` across the data body.
    pub fn body_column(&self, column: usize) -> Vec<CellValue> {
        let cube = self.controller.get_data().expect("data should be set");
        let top = cube.info.top_header_rows_number.unwrap_or(0);
        let left = cube.info.left_header_columns_number.unwrap_or(0);
        let end = self.grid().row_count() - usize::from(self.controller.summary_shown());
        self.grid().rows()[top..end]
            .iter()
            .map(|r| r[left + column].value.clone())
            .collect()
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub fn leaves(captions: &[&str]) -> Vec<DimensionNode> {
    captions.iter().map(|c| DimensionNode::leaf(*c)).collect()
}

pub fn numbers(values: &[f64]) -> Vec<CellValue> {
    values.iter().map(|v| CellValue::Number(*v)).collect()
}

/// The 1x2 cube: row A, columns X/Y, values 10/20, cube C.
pub fn scenario_cube() -> CubeData {
    CubeData::new(leaves(&["A"]), leaves(&["X", "Y"]), numbers(&[10.0, 20.0]), "C")
}

/// One data column with rows r1..rN holding `values`.
pub fn single_column_cube(values: &[f64]) -> CubeData {
    let rows: Vec<String> = (1..=values.len()).map(|i| format!("r{}", i)).collect();
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    CubeData::new(leaves(&rows), leaves(&["v"]), numbers(values), "C")
}

/// Two-level rows (region > city) by two-level columns (year > quarter).
pub fn nested_cube() -> CubeData {
    let rows = vec![
        DimensionNode::group("East", leaves(&["NY", "Boston"])),
        DimensionNode::group("West", leaves(&["LA"])),
    ];
    let columns = vec![
        DimensionNode::group("2023", leaves(&["Q1", "Q2"])),
        DimensionNode::group("2024", leaves(&["Q1"])),
    ];
    CubeData {
        dimensions: vec![rows, columns],
        data_array: numbers(&[
            1.0, 2.0, 3.0,
            4.0, 5.0, 6.0,
            7.0, 8.0, 9.0,
        ]),
        info: CubeInfo::named("Sales"),
    }
}

// ============================================================================
// ASSERTIONS
// ============================================================================

pub fn assert_cell_text(grid: &Grid, row: usize, col: usize, expected: &str) {
    match grid.cell(row, col).map(|c| &c.value) {
        Some(CellValue::Text(s)) => assert_eq!(s, expected, "cell ({}, {})", row, col),
        other => panic!("Expected text at ({}, {}), got {:?}", row, col, other),
    }
}

pub fn assert_cell_number(grid: &Grid, row: usize, col: usize, expected: f64) {
    match grid.cell(row, col).map(|c| &c.value) {
        Some(CellValue::Number(n)) => assert_eq!(*n, expected, "cell ({}, {})", row, col),
        other => panic!("Expected number at ({}, {}), got {:?}", row, col, other),
    }
}
