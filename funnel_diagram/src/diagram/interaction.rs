//! Pointer hit-testing and the selection state machine.
//!
//! Pointer systems read the registry the layout system wrote this frame;
//! their selection/hover writes are picked up on the next tick.

use bevy::prelude::*;

use crate::data::BranchKind;
use crate::diagram::layout::{NodeId, NodeRegistry};

/// Extra radius added to a node's visual radius for pointer hit-testing.
pub const HIT_PADDING: f32 = 10.0;

/// Which slice of the funnel is drilled into.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    All,
    Branch(BranchKind),
}

impl Selection {
    pub fn branch(&self) -> Option<BranchKind> {
        match self {
            Selection::All => None,
            Selection::Branch(kind) => Some(*kind),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Selection::All => "All branches",
            Selection::Branch(kind) => kind.label(),
        }
    }
}

/// Transient hover target, refreshed from the registry every pointer move.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Hover(pub Option<NodeId>);

/// Set while the pointer is over an egui panel, so panel interactions don't
/// leak into the diagram. Written by the UI layer, which owns the egui
/// context; defaults to unblocked when no UI is mounted.
#[derive(Resource, Default)]
pub struct PointerGuard(pub bool);

/// First node in registry insertion order within hit range wins; overlap
/// ties resolve to the earlier entry, never the nearer one.
pub fn hit_test(registry: &NodeRegistry, point: Vec2) -> Option<NodeId> {
    registry
        .nodes
        .iter()
        .find(|node| node.center().distance(point) < node.radius + HIT_PADDING)
        .map(|node| node.id)
}

/// Click transitions: the root always widens back to `All`; clicking the
/// selected branch toggles it off; outcome orbs and misses change nothing.
pub fn apply_click(selection: Selection, hit: Option<NodeId>) -> Selection {
    match hit {
        Some(NodeId::Root) => Selection::All,
        Some(NodeId::Branch(kind)) => {
            if selection == Selection::Branch(kind) {
                Selection::All
            } else {
                Selection::Branch(kind)
            }
        }
        Some(NodeId::Result(_)) | None => selection,
    }
}

pub fn pointer_move_system(
    windows: Query<&Window>,
    guard: Res<PointerGuard>,
    registry: Res<NodeRegistry>,
    mut hover: ResMut<Hover>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };

    let next = if guard.0 {
        None
    } else {
        window
            .cursor_position()
            .and_then(|cursor| hit_test(&registry, cursor))
    };
    hover.set_if_neq(Hover(next));
}

pub fn click_system(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    guard: Res<PointerGuard>,
    registry: Res<NodeRegistry>,
    mut selection: ResMut<Selection>,
) {
    if !mouse.just_pressed(MouseButton::Left) || guard.0 {
        return;
    }

    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    let next = apply_click(*selection, hit_test(&registry, cursor));
    selection.set_if_neq(next);
}

/// `Esc` widens back to the whole funnel.
pub fn clear_selection_system(keys: Res<ButtonInput<KeyCode>>, mut selection: ResMut<Selection>) {
    if keys.just_pressed(KeyCode::Escape) {
        selection.set_if_neq(Selection::All);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ResultKind;
    use crate::diagram::layout::{DiagramLayout, NodeGeom};

    fn registry_for(selection: Selection) -> NodeRegistry {
        let layout = DiagramLayout::compute(1280.0, 720.0, selection);
        NodeRegistry {
            nodes: layout.nodes().copied().collect(),
        }
    }

    #[test]
    fn pointer_at_a_node_center_always_matches_it() {
        let registry = registry_for(Selection::Branch(BranchKind::Conditional));
        for node in &registry.nodes {
            assert_eq!(hit_test(&registry, node.center()), Some(node.id));
        }
    }

    #[test]
    fn hit_range_is_radius_plus_padding_exclusive() {
        let registry = registry_for(Selection::All);
        let root = registry.nodes[0];

        let inside = root.center() + Vec2::new(root.radius + HIT_PADDING - 0.5, 0.0);
        let outside = root.center() + Vec2::new(root.radius + HIT_PADDING, 0.0);

        assert_eq!(hit_test(&registry, inside), Some(NodeId::Root));
        assert_eq!(hit_test(&registry, outside), None);
    }

    #[test]
    fn overlapping_nodes_resolve_by_registry_order() {
        let registry = NodeRegistry {
            nodes: vec![
                NodeGeom {
                    id: NodeId::Branch(BranchKind::Initial),
                    x: 100.0,
                    y: 100.0,
                    radius: 42.0,
                },
                NodeGeom {
                    id: NodeId::Branch(BranchKind::Manual),
                    x: 104.0,
                    y: 100.0,
                    radius: 42.0,
                },
            ],
        };

        // Nearer to the second node, but the first registered entry wins.
        assert_eq!(
            hit_test(&registry, Vec2::new(104.0, 100.0)),
            Some(NodeId::Branch(BranchKind::Initial))
        );
    }

    #[test]
    fn empty_registry_never_matches() {
        let registry = NodeRegistry::default();
        assert_eq!(hit_test(&registry, Vec2::new(10.0, 10.0)), None);
    }

    #[test]
    fn branch_clicks_toggle_selection() {
        let initial = NodeId::Branch(BranchKind::Initial);

        let selected = apply_click(Selection::All, Some(initial));
        assert_eq!(selected, Selection::Branch(BranchKind::Initial));

        let toggled_off = apply_click(selected, Some(initial));
        assert_eq!(toggled_off, Selection::All);
    }

    #[test]
    fn clicking_another_branch_switches_directly() {
        let from_initial = apply_click(
            Selection::Branch(BranchKind::Initial),
            Some(NodeId::Branch(BranchKind::Followup)),
        );
        assert_eq!(from_initial, Selection::Branch(BranchKind::Followup));
    }

    #[test]
    fn root_click_always_widens_to_all() {
        for kind in BranchKind::ALL {
            assert_eq!(
                apply_click(Selection::Branch(kind), Some(NodeId::Root)),
                Selection::All
            );
        }
        assert_eq!(apply_click(Selection::All, Some(NodeId::Root)), Selection::All);
    }

    #[test]
    fn result_clicks_and_misses_change_nothing() {
        let selected = Selection::Branch(BranchKind::Manual);

        assert_eq!(
            apply_click(selected, Some(NodeId::Result(ResultKind::Failed))),
            selected
        );
        assert_eq!(apply_click(selected, None), selected);
    }
}
