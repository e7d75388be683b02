//! FILENAME: core/pivot-grid/src/lib.rs
//! Cube-to-grid subsystem.
//!
//! This crate turns a two-axis cube result set (row/column dimension trees
//! plus a flat value array) into a rectangular grid of labeled cells that a
//! table widget can render, and lets the host re-sort that grid by a data
//! column.
//!
//! Layers:
//! - `definition`: Serializable cube input (what the data IS)
//! - `view`: Renderable grid output (WHAT we display)
//! - `flatten` / `engine` / `summary`: Grid derivation (HOW we build it)
//! - `sort`: Column sorting over a built grid
//! - `stack`: Drill-down history of grid frames
//! - `controller`: Public operations and change notification

#[macro_use]
pub mod logging;

pub mod config;
pub mod controller;
pub mod definition;
pub mod engine;
pub mod error;
pub mod flatten;
pub mod sort;
pub mod stack;
pub mod summary;
pub mod validation;
pub mod view;

pub use config::{PivotConfig, PivotHost};
pub use controller::{DataController, Observer};
pub use definition::*;
pub use engine::{assemble, build_grid, BuiltGrid, HeaderLayout};
pub use error::GridError;
pub use flatten::{flatten_axis, HeaderBlock};
pub use sort::{SortOrder, SortState};
pub use stack::{DataStack, GridState};
pub use summary::{summary_label, SUMMARY_FONT_WEIGHT};
pub use validation::{validate, validate_value, ValidationError, Violation};
pub use view::*;
