//! FILENAME: core/pivot-grid/src/flatten.rs
//! Dimension Flattener - turns one axis's dimension forest into a header block.
//!
//! Algorithm:
//! 1. Walk the forest in pre-order, giving every visited node a fresh group id.
//! 2. Emit one path per leaf: the header cells from the root down to that leaf.
//! 3. Pad shorter paths to the axis depth by repeating their leaf cell.
//! 4. Row axis: paths become rows (leaf count x depth).
//!    Column axis: paths become columns (depth x leaf count).
//!
//! The walk is pure: each call takes an immutable prefix and the next free
//! group id and returns the paths it built plus the next free id.

use smallvec::SmallVec;

use crate::definition::{Axis, DimensionNode, NodeRef};
use crate::view::{GridCell, GroupId};

// ============================================================================
// HEADER BLOCK
// ============================================================================

/// The header cells produced for one axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderBlock {
    /// Row-major cells of the block.
    pub cells: Vec<Vec<GridCell>>,
    /// Number of leaves on the axis (data rows or data columns).
    pub leaves: usize,
    /// Deepest root-to-leaf path on the axis.
    pub depth: usize,
}

impl HeaderBlock {
    pub fn height(&self) -> usize {
        self.cells.len()
    }

    pub fn width(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.leaves == 0
    }
}

// ============================================================================
// TREE WALK
// ============================================================================

/// Leaf paths built by one level of the walk.
struct LeafPaths {
    paths: Vec<Vec<GridCell>>,
    next_group: GroupId,
}

fn leaf_paths(
    nodes: &[DimensionNode],
    axis: Axis,
    prefix: &[GridCell],
    index_prefix: &[usize],
    first_group: GroupId,
) -> LeafPaths {
    let mut paths = Vec::new();
    let mut next_group = first_group;

    for (i, node) in nodes.iter().enumerate() {
        let mut index_path: SmallVec<[usize; 4]> = SmallVec::from_slice(index_prefix);
        index_path.push(i);

        let cell = GridCell::header(
            next_group,
            NodeRef::new(axis, index_path.clone()),
            node.caption_or_empty(),
        );
        next_group += 1;

        let mut path = prefix.to_vec();
        path.push(cell);

        match &node.children {
            Some(children) => {
                let nested = leaf_paths(children, axis, &path, &index_path, next_group);
                paths.extend(nested.paths);
                next_group = nested.next_group;
            }
            None => paths.push(path),
        }
    }

    LeafPaths { paths, next_group }
}

/// Extends every path to `depth` cells by repeating its last cell.
fn pad_paths(paths: Vec<Vec<GridCell>>, depth: usize) -> Vec<Vec<GridCell>> {
    paths
        .into_iter()
        .map(|mut path| {
            if let Some(last) = path.last().cloned() {
                path.resize(depth, last);
            }
            path
        })
        .collect()
}

fn transpose(paths: &[Vec<GridCell>], depth: usize) -> Vec<Vec<GridCell>> {
    (0..depth)
        .map(|level| paths.iter().map(|path| path[level].clone()).collect())
        .collect()
}

/// Flattens one axis into its header block.
///
/// `first_group` is the first group id to hand out; the returned id is the
/// next unused one, so axes can be chained.
pub fn flatten_axis(
    nodes: &[DimensionNode],
    axis: Axis,
    first_group: GroupId,
) -> (HeaderBlock, GroupId) {
    let walked = leaf_paths(nodes, axis, &[], &[], first_group);
    let depth = walked.paths.iter().map(Vec::len).max().unwrap_or(0);
    let leaves = walked.paths.len();
    let paths = pad_paths(walked.paths, depth);

    let cells = match axis {
        Axis::Rows => paths,
        Axis::Columns => transpose(&paths, depth),
    };

    (HeaderBlock { cells, leaves, depth }, walked.next_group)
}
