//! FILENAME: core/pivot-grid/src/controller.rs
//! PURPOSE: Public entry point that a table widget drives.
//! CONTEXT: Owns the data stack and the change observer. Every operation
//! runs to completion before returning; the observer is called synchronously
//! at the end of a successful `set_data*` or `sort_by_column`. Because the
//! controller is borrowed mutably for the whole call, the observer cannot
//! re-enter it.
//!
//! Failures are logged and swallowed by the plain operations, leaving the
//! shown grid exactly as it was. The `try_*` variants return them instead.

use serde_json::Value;

use crate::config::{PivotConfig, PivotHost};
use crate::definition::CubeData;
use crate::error::GridError;
use crate::sort::{sort_frame, SortState};
use crate::stack::DataStack;
use crate::validation;
use crate::view::Grid;

/// Zero-argument change callback. Observers re-read the grid through the
/// controller's accessors.
pub type Observer = Box<dyn FnMut()>;

pub struct DataController<H: PivotHost = PivotConfig> {
    host: H,
    stack: DataStack,
    observer: Option<Observer>,
}

impl<H: PivotHost> DataController<H> {
    /// Creates a controller with a single empty frame.
    pub fn new(host: H, observer: Option<Observer>) -> Self {
        DataController {
            host,
            stack: DataStack::new(),
            observer,
        }
    }

    /// Creates a controller that calls `observer` after every change.
    pub fn with_observer(host: H, observer: impl FnMut() + 'static) -> Self {
        Self::new(host, Some(Box::new(observer)))
    }

    pub fn set_observer(&mut self, observer: Option<Observer>) {
        self.observer = observer;
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host access. Changes to the summary flag or locale take
    /// effect on the next `set_data` or `reset_raw_data`.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn trigger(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            observer();
        }
    }

    // ========================================================================
    // STACK NAVIGATION
    // ========================================================================

    /// Opens a new empty frame (drill-down).
    pub fn push_data(&mut self) {
        self.stack.push();
        log_info!("STACK", "push_data depth={}", self.stack.depth());
    }

    /// Returns to the previous frame (drill-up). No-op on the last frame.
    pub fn pop_data(&mut self) {
        if self.stack.pop() {
            log_info!("STACK", "pop_data depth={}", self.stack.depth());
        } else {
            log_debug!("STACK", "pop_data ignored on root frame");
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn stack(&self) -> &DataStack {
        &self.stack
    }

    // ========================================================================
    // DATA
    // ========================================================================

    /// The active frame's cube, if one has been set.
    pub fn get_data(&self) -> Option<&CubeData> {
        self.stack.top().data()
    }

    pub fn is_valid_data(&self, cube: &CubeData) -> bool {
        validation::validate(cube).is_ok()
    }

    /// Validates and stores `cube` on the active frame, derives its grid and
    /// notifies the observer. Nothing changes when validation fails.
    pub fn try_set_data(&mut self, cube: CubeData) -> Result<&CubeData, GridError> {
        log_enter!("DATA", "set_data", "cube={:?}", cube.info.cube_name);
        validation::validate(&cube)?;

        let frame = self.stack.top_mut();
        frame.store(cube);
        frame.rebuild(self.host.show_summary(), self.host.locale());

        self.trigger();

        let grid = self.stack.top().grid();
        log_exit!("DATA", "set_data", "grid={}x{}", grid.row_count(), grid.col_count());
        self.stack.top().data().ok_or(GridError::NoData)
    }

    /// Like `try_set_data`, but logs and swallows failures.
    pub fn set_data(&mut self, cube: CubeData) -> Option<&CubeData> {
        match self.try_set_data(cube) {
            Ok(data) => Some(data),
            Err(e) => {
                log_error!("DATA", "Invalid data to set: {}", e);
                None
            }
        }
    }

    /// Shape-checks a raw JSON cube, then sets it.
    pub fn set_data_value(&mut self, value: Value) -> Option<&CubeData> {
        match CubeData::from_json_value(value) {
            Ok(cube) => self.set_data(cube),
            Err(e) => {
                log_error!("DATA", "Invalid data to set: {}", e);
                None
            }
        }
    }

    /// Parses a JSON document, then sets it.
    pub fn set_data_json(&mut self, json: &str) -> Option<&CubeData> {
        match CubeData::from_json_str(json) {
            Ok(cube) => self.set_data(cube),
            Err(e) => {
                log_error!("DATA", "Invalid data to set: {}", e);
                None
            }
        }
    }

    /// Re-derives the active frame's grid from its stored cube, e.g. after
    /// the host flipped its summary flag. Does not notify.
    pub fn try_reset_raw_data(&mut self) -> Result<&Grid, GridError> {
        let frame = self.stack.top_mut();
        frame
            .rebuild(self.host.show_summary(), self.host.locale())
            .ok_or(GridError::NoData)
    }

    /// Like `try_reset_raw_data`, but logs a warning when there is no data.
    pub fn reset_raw_data(&mut self) -> Option<&Grid> {
        match self.try_reset_raw_data() {
            Ok(grid) => Some(grid),
            Err(e) => {
                log_warn!("GRID", "Unable to create raw data for given data set: {}", e);
                None
            }
        }
    }

    // ========================================================================
    // VIEW
    // ========================================================================

    /// The grid currently shown, or `None` before any data was set.
    pub fn grid(&self) -> Option<&Grid> {
        let frame = self.stack.top();
        frame.data().map(|_| frame.grid())
    }

    /// The unsorted grid of the active frame.
    pub fn origin_grid(&self) -> Option<&Grid> {
        let frame = self.stack.top();
        frame.data().map(|_| frame.origin_grid())
    }

    /// Sort state of the active frame.
    pub fn sort_state(&self) -> SortState {
        self.stack.top().sort_state()
    }

    /// Whether the active frame's grid ends in a summary row.
    pub fn summary_shown(&self) -> bool {
        self.stack.top().summary_shown()
    }

    // ========================================================================
    // SORTING
    // ========================================================================

    /// Sorts the active frame by data column `column` (0 = first column
    /// after the row headers) and notifies the observer.
    pub fn try_sort_by_column(&mut self, column: usize) -> Result<(), GridError> {
        let order = sort_frame(self.stack.top_mut(), column)?;
        log_debug!("SORT", "column={} order={}", column, order.code());
        self.trigger();
        Ok(())
    }

    /// Like `try_sort_by_column`, but logs and swallows failures.
    pub fn sort_by_column(&mut self, column: usize) {
        if let Err(e) = self.try_sort_by_column(column) {
            log_warn!("SORT", "sort_by_column({}) ignored: {}", column, e);
        }
    }
}

impl Default for DataController<PivotConfig> {
    fn default() -> Self {
        Self::new(PivotConfig::default(), None)
    }
}
