//! End-to-end drill-down scenario against a fixed snapshot.

use funnel_diagram::{
    apply_click, hit_test, pct, BranchKind, CurrentSnapshot, DiagramLayout, HierarchySnapshot,
    NodeId, NodeRegistry, ResultKind, Selection,
};

const WIDTH: f32 = 1280.0;
const HEIGHT: f32 = 720.0;

fn demo_snapshot() -> HierarchySnapshot {
    serde_json::from_str(
        r#"{
            "totals": {"sent": 100},
            "byType": {
                "Initial": {"sent": 40, "delivered": 35},
                "Followup": {"sent": 30, "delivered": 20},
                "Manual": {"sent": 20, "delivered": 15},
                "Conditional": {"sent": 10, "delivered": 8}
            }
        }"#,
    )
    .unwrap()
}

fn registry_for(selection: Selection) -> NodeRegistry {
    let layout = DiagramLayout::compute(WIDTH, HEIGHT, selection);
    NodeRegistry {
        nodes: layout.nodes().copied().collect(),
    }
}

#[test]
fn drill_down_from_root_to_delivered() {
    let snapshot = CurrentSnapshot(demo_snapshot());
    let mut selection = Selection::All;

    // With everything in view the root orb reads the funnel-wide sends.
    assert_eq!(snapshot.node_value(NodeId::Root, selection), 100);
    assert!(DiagramLayout::compute(WIDTH, HEIGHT, selection)
        .results
        .is_empty());

    // Click the Initial branch orb at its center.
    let initial_center = DiagramLayout::compute(WIDTH, HEIGHT, selection)
        .branch_geom(BranchKind::Initial)
        .center();
    let hit = hit_test(&registry_for(selection), initial_center);
    assert_eq!(hit, Some(NodeId::Branch(BranchKind::Initial)));

    selection = apply_click(selection, hit);
    assert_eq!(selection, Selection::Branch(BranchKind::Initial));

    // The outcome orbs appear; delivered reads the branch's count and its
    // percentage derives from the branch's sends.
    let layout = DiagramLayout::compute(WIDTH, HEIGHT, selection);
    assert_eq!(layout.results.len(), 3);
    assert_eq!(
        snapshot.node_value(NodeId::Result(ResultKind::Delivered), selection),
        35
    );

    let branch = snapshot.0.branch(BranchKind::Initial);
    assert_eq!(format!("{:.1}%", pct(branch.delivered, branch.sent)), "87.5%");

    // Clicking a result orb changes nothing.
    let delivered_center = layout.results[0].center();
    let hit = hit_test(&registry_for(selection), delivered_center);
    assert_eq!(hit, Some(NodeId::Result(ResultKind::Delivered)));
    assert_eq!(apply_click(selection, hit), selection);

    // Re-clicking the selected branch widens back out.
    let hit = hit_test(&registry_for(selection), initial_center);
    selection = apply_click(selection, hit);
    assert_eq!(selection, Selection::All);
    assert!(DiagramLayout::compute(WIDTH, HEIGHT, selection)
        .results
        .is_empty());

    // And the root click widens out from any branch.
    assert_eq!(
        apply_click(Selection::Branch(BranchKind::Manual), Some(NodeId::Root)),
        Selection::All
    );
}
