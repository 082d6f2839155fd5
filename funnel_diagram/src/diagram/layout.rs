//! Funnel layout: pure geometry mapping (viewport, selection) to node
//! positions, plus the per-frame hit-test registry.

use bevy::prelude::*;

use crate::data::{BranchKind, ResultKind};
use crate::diagram::interaction::Selection;
use crate::diagram::ViewportSize;

pub const ROOT_RADIUS: f32 = 55.0;
pub const BRANCH_RADIUS: f32 = 42.0;
pub const RESULT_RADIUS: f32 = 35.0;

const ROOT_BAND_Y: f32 = 80.0;
const BRANCH_BAND_Y: f32 = 200.0;
const RESULT_BAND_Y: f32 = 340.0;

/// Branch x offsets as fractions of viewport width, left to right.
const BRANCH_X_FRACTIONS: [f32; 4] = [-0.3, -0.1, 0.1, 0.3];
/// Lateral offsets of the three outcome orbs under the selected branch.
const RESULT_X_OFFSETS: [f32; 3] = [-80.0, 0.0, 80.0];

/// Identity of a drawn node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeId {
    Root,
    Branch(BranchKind),
    Result(ResultKind),
}

impl NodeId {
    pub fn label(&self) -> &'static str {
        match self {
            NodeId::Root => "Sent",
            NodeId::Branch(kind) => kind.label(),
            NodeId::Result(kind) => kind.label(),
        }
    }
}

/// One node's geometry in logical screen coordinates (origin top-left).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeGeom {
    pub id: NodeId,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl NodeGeom {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Node geometry for one frame: the root, the four branches, and the
/// outcome orbs of the selected branch (empty when the whole funnel is
/// shown).
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct DiagramLayout {
    pub root: NodeGeom,
    pub branches: [NodeGeom; 4],
    pub results: Vec<NodeGeom>,
}

impl DiagramLayout {
    pub fn compute(width: f32, _height: f32, selection: Selection) -> Self {
        let center_x = width * 0.5;

        let root = NodeGeom {
            id: NodeId::Root,
            x: center_x,
            y: ROOT_BAND_Y,
            radius: ROOT_RADIUS,
        };

        let branches = std::array::from_fn(|i| NodeGeom {
            id: NodeId::Branch(BranchKind::ALL[i]),
            x: center_x + BRANCH_X_FRACTIONS[i] * width,
            y: BRANCH_BAND_Y,
            radius: BRANCH_RADIUS,
        });

        let results = match selection.branch() {
            None => Vec::new(),
            Some(kind) => {
                let branch_x = center_x + BRANCH_X_FRACTIONS[branch_index(kind)] * width;
                ResultKind::ALL
                    .iter()
                    .zip(RESULT_X_OFFSETS)
                    .map(|(&result, dx)| NodeGeom {
                        id: NodeId::Result(result),
                        x: branch_x + dx,
                        y: RESULT_BAND_Y,
                        radius: RESULT_RADIUS,
                    })
                    .collect()
            }
        };

        Self {
            root,
            branches,
            results,
        }
    }

    /// Nodes in registry/paint order: root, branches, then results.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeGeom> {
        std::iter::once(&self.root)
            .chain(self.branches.iter())
            .chain(self.results.iter())
    }

    pub fn branch_geom(&self, kind: BranchKind) -> &NodeGeom {
        &self.branches[branch_index(kind)]
    }
}

impl Default for DiagramLayout {
    fn default() -> Self {
        Self::compute(0.0, 0.0, Selection::All)
    }
}

fn branch_index(kind: BranchKind) -> usize {
    match kind {
        BranchKind::Initial => 0,
        BranchKind::Followup => 1,
        BranchKind::Manual => 2,
        BranchKind::Conditional => 3,
    }
}

/// Per-frame hit-test registry. Written exclusively by `layout_system` each
/// frame; read exclusively by the pointer systems afterwards. Both run on
/// the single-threaded Update schedule, so ordering is the only contract.
#[derive(Resource, Default)]
pub struct NodeRegistry {
    pub nodes: Vec<NodeGeom>,
}

/// Recompute the layout and overwrite the registry. A zero-area rendering
/// surface skips the tick entirely, leaving the previous registry in place.
pub fn layout_system(
    viewport: Res<ViewportSize>,
    selection: Res<Selection>,
    mut layout: ResMut<DiagramLayout>,
    mut registry: ResMut<NodeRegistry>,
) {
    if viewport.is_zero() {
        return;
    }

    let next = DiagramLayout::compute(viewport.width, viewport.height, *selection);
    layout.set_if_neq(next);

    registry.nodes.clear();
    registry.nodes.extend(layout.nodes().copied());
}

/// Convert logical screen coordinates (origin top-left, y down) to 2D world
/// coordinates (origin center, y up).
pub fn screen_to_world(point: Vec2, viewport: &ViewportSize) -> Vec2 {
    Vec2::new(
        point.x - viewport.width * 0.5,
        viewport.height * 0.5 - point.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_deterministic() {
        let a = DiagramLayout::compute(1280.0, 720.0, Selection::Branch(BranchKind::Manual));
        let b = DiagramLayout::compute(1280.0, 720.0, Selection::Branch(BranchKind::Manual));
        assert_eq!(a, b);
    }

    #[test]
    fn result_nodes_exist_iff_a_branch_is_selected() {
        let all = DiagramLayout::compute(1280.0, 720.0, Selection::All);
        assert!(all.results.is_empty());

        for kind in BranchKind::ALL {
            let selected = DiagramLayout::compute(1280.0, 720.0, Selection::Branch(kind));
            assert_eq!(selected.results.len(), 3);
        }
    }

    #[test]
    fn results_sit_under_the_selected_branch() {
        let layout = DiagramLayout::compute(1000.0, 700.0, Selection::Branch(BranchKind::Followup));
        let branch = layout.branch_geom(BranchKind::Followup);

        let xs: Vec<f32> = layout.results.iter().map(|n| n.x - branch.x).collect();
        assert_eq!(xs, vec![-80.0, 0.0, 80.0]);
        assert!(layout.results.iter().all(|n| n.y > branch.y));
    }

    #[test]
    fn root_is_horizontally_centered() {
        let layout = DiagramLayout::compute(900.0, 600.0, Selection::All);
        assert_eq!(layout.root.x, 450.0);
        assert_eq!(layout.root.y, 80.0);
    }

    #[test]
    fn radii_shrink_down_the_hierarchy() {
        let layout = DiagramLayout::compute(1280.0, 720.0, Selection::Branch(BranchKind::Initial));
        let branch = layout.branch_geom(BranchKind::Initial);

        assert!(layout.root.radius > branch.radius);
        assert!(branch.radius > layout.results[0].radius);
    }

    #[test]
    fn nodes_iterate_in_registry_order() {
        let layout = DiagramLayout::compute(1280.0, 720.0, Selection::Branch(BranchKind::Initial));
        let ids: Vec<NodeId> = layout.nodes().map(|n| n.id).collect();

        assert_eq!(ids[0], NodeId::Root);
        assert_eq!(ids[1], NodeId::Branch(BranchKind::Initial));
        assert_eq!(ids[4], NodeId::Branch(BranchKind::Conditional));
        assert_eq!(ids[5], NodeId::Result(ResultKind::Delivered));
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn screen_to_world_flips_y_around_the_viewport_center() {
        let viewport = ViewportSize {
            width: 800.0,
            height: 600.0,
        };

        assert_eq!(
            screen_to_world(Vec2::new(400.0, 300.0), &viewport),
            Vec2::ZERO
        );
        assert_eq!(
            screen_to_world(Vec2::new(0.0, 0.0), &viewport),
            Vec2::new(-400.0, 300.0)
        );
    }
}
