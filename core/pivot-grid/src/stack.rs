//! FILENAME: core/pivot-grid/src/stack.rs
//! PURPOSE: Drill-down history of grid frames.
//! CONTEXT: Each frame owns one cube, the grid derived from it, the origin
//! grid that sorting derives from, and its own sort state. Navigating into a
//! sub-view pushes a frame; navigating back pops it and the parent's grid and
//! sort state become current again.

use crate::definition::CubeData;
use crate::engine::{build_grid, HeaderLayout};
use crate::sort::SortState;
use crate::view::Grid;

/// One frame of the data stack.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridState {
    data: Option<CubeData>,
    /// The view currently shown (sorted or not).
    grid: Grid,
    /// The grid as built, before any sorting.
    origin_grid: Grid,
    layout: HeaderLayout,
    sort_state: SortState,
    summary_shown: bool,
}

impl GridState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> Option<&CubeData> {
        self.data.as_ref()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn origin_grid(&self) -> &Grid {
        &self.origin_grid
    }

    pub fn layout(&self) -> HeaderLayout {
        self.layout
    }

    pub fn sort_state(&self) -> SortState {
        self.sort_state
    }

    pub fn summary_shown(&self) -> bool {
        self.summary_shown
    }

    /// Stores a cube without deriving anything from it yet.
    pub(crate) fn store(&mut self, cube: CubeData) {
        self.data = Some(cube);
    }

    /// Rebuilds grid and origin grid from the stored cube.
    ///
    /// Returns `None` when the frame has no cube. The shown grid is reset to
    /// the unsorted origin; the sort state is left as is.
    pub(crate) fn rebuild(&mut self, show_summary: bool, locale: &str) -> Option<&Grid> {
        let cube = self.data.as_mut()?;
        let built = build_grid(cube, show_summary, locale);

        self.layout = built.layout;
        self.summary_shown = built.summary_shown;
        self.grid = built.grid.clone();
        self.origin_grid = built.grid;
        Some(&self.grid)
    }

    /// Replaces the shown grid with a sorted view and records the new state.
    pub(crate) fn set_sorted(&mut self, grid: Grid, sort_state: SortState) {
        self.grid = grid;
        self.sort_state = sort_state;
    }
}

/// The stack of frames. Never shorter than one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DataStack {
    frames: Vec<GridState>,
}

impl DataStack {
    pub fn new() -> Self {
        DataStack {
            frames: vec![GridState::new()],
        }
    }

    /// Pushes an empty frame and makes it active.
    pub fn push(&mut self) {
        self.frames.push(GridState::new());
    }

    /// Drops the active frame. Returns false (and does nothing) when only
    /// one frame is left.
    pub fn pop(&mut self) -> bool {
        if self.frames.len() < 2 {
            return false;
        }
        self.frames.pop();
        true
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn top(&self) -> &GridState {
        // `frames` is never empty: `new` seeds one frame and `pop` keeps it.
        &self.frames[self.frames.len() - 1]
    }

    pub fn top_mut(&mut self) -> &mut GridState {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    pub fn frames(&self) -> &[GridState] {
        &self.frames
    }
}

impl Default for DataStack {
    fn default() -> Self {
        Self::new()
    }
}
