//! FILENAME: core/pivot-grid/src/validation.rs
//! Structural checks for cube input.
//!
//! Two entry points: `validate_value` checks raw JSON before it is
//! deserialized (so "dataArray is not a list" can be reported as such
//! instead of as a serde type error), and `validate` checks an already
//! typed `CubeData`. Both collect every violation instead of stopping at the
//! first one.

use serde_json::Value;
use thiserror::Error;

use crate::definition::{CubeData, ROW_AXIS};

/// One broken structural invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("dimensions are missing or not a list")]
    DimensionsMissing,

    #[error("expected 2 dimension axes, found {0}")]
    DimensionAxisCount(usize),

    #[error("dimension axis {0} is not a list")]
    AxisNotList(usize),

    #[error("row dimension list is empty")]
    RowDimensionEmpty,

    #[error("first row dimension has no caption")]
    FirstRowCaptionMissing,

    #[error("dataArray is missing or not a list")]
    DataArrayNotList,

    #[error("info is missing or not an object")]
    InfoMissing,

    #[error("info.cubeName is missing or empty")]
    CubeNameMissing,
}

/// The set of violations found in one cube.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", join_violations(.violations))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn contains(&self, violation: &Violation) -> bool {
        self.violations.contains(violation)
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn finish(violations: Vec<Violation>) -> Result<(), ValidationError> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { violations })
    }
}

/// Checks a typed cube.
pub fn validate(cube: &CubeData) -> Result<(), ValidationError> {
    let mut violations = Vec::new();

    match cube.dimensions.len() {
        0 => violations.push(Violation::DimensionsMissing),
        2 => {}
        n => violations.push(Violation::DimensionAxisCount(n)),
    }

    if let Some(rows) = cube.dimensions.get(ROW_AXIS) {
        match rows.first() {
            None => violations.push(Violation::RowDimensionEmpty),
            Some(first) if first.caption.is_none() => {
                violations.push(Violation::FirstRowCaptionMissing)
            }
            Some(_) => {}
        }
    }

    if cube.info.cube_name.as_deref().map_or(true, str::is_empty) {
        violations.push(Violation::CubeNameMissing);
    }

    finish(violations)
}

/// Checks the shape of a raw JSON cube.
pub fn validate_value(value: &Value) -> Result<(), ValidationError> {
    let mut violations = Vec::new();

    match value.get("dimensions").and_then(Value::as_array) {
        None => violations.push(Violation::DimensionsMissing),
        Some(axes) => {
            if axes.len() != 2 {
                violations.push(Violation::DimensionAxisCount(axes.len()));
            }
            for (i, axis) in axes.iter().enumerate() {
                if !axis.is_array() {
                    violations.push(Violation::AxisNotList(i));
                }
            }
            if let Some(rows) = axes.get(ROW_AXIS).and_then(Value::as_array) {
                match rows.first() {
                    None => violations.push(Violation::RowDimensionEmpty),
                    Some(first) => {
                        let has_caption = first
                            .as_object()
                            .map_or(false, |node| node.contains_key("caption"));
                        if !has_caption {
                            violations.push(Violation::FirstRowCaptionMissing);
                        }
                    }
                }
            }
        }
    }

    if !value.get("dataArray").map_or(false, Value::is_array) {
        violations.push(Violation::DataArrayNotList);
    }

    match value.get("info").and_then(Value::as_object) {
        None => {
            violations.push(Violation::InfoMissing);
            violations.push(Violation::CubeNameMissing);
        }
        Some(info) => {
            let named = info
                .get("cubeName")
                .and_then(Value::as_str)
                .map_or(false, |s| !s.is_empty());
            if !named {
                violations.push(Violation::CubeNameMissing);
            }
        }
    }

    finish(violations)
}
