//! Armature Template Tests
//!
//! Tests for:
//! - Topological-order validation at construction
//! - Absent input handling for loader output
//! - Track lookup by name and duration queries
//! - Hierarchy helpers (roots, children, rest pose)

use glam::{Mat4, Vec3};

use pbr_runtime::animation::AnimationTrackInfo;
use pbr_runtime::errors::PbrRuntimeError;
use pbr_runtime::scene::{ArmatureTemplate, NodeTemplate};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn chain(len: usize) -> Vec<NodeTemplate> {
    (0..len)
        .map(|i| {
            if i == 0 {
                NodeTemplate::root("root")
            } else {
                NodeTemplate::child(format!("joint{i}"), i - 1)
            }
        })
        .collect()
}

fn walk_idle() -> ArmatureTemplate {
    ArmatureTemplate::new(
        chain(3),
        Some(vec![
            AnimationTrackInfo::new("walk", 1.2),
            AnimationTrackInfo::new("idle", 0.0),
        ]),
    )
    .unwrap()
}

// ============================================================================
// Construction: valid hierarchies
// ============================================================================

#[test]
fn valid_sequences_report_their_length() {
    for len in [0, 1, 2, 17, 128] {
        let armature = ArmatureTemplate::new(chain(len), None).unwrap();
        assert_eq!(armature.count(), len);
        assert_eq!(armature.len(), len);
        assert_eq!(armature.is_empty(), len == 0);
    }
}

#[test]
fn multiple_roots_and_wide_fanout_are_valid() {
    let nodes = vec![
        NodeTemplate::root("hips"),
        NodeTemplate::root("prop"),
        NodeTemplate::child("spine", 0),
        NodeTemplate::child("leg.l", 0),
        NodeTemplate::child("leg.r", 0),
        NodeTemplate::child("prop.tip", 1),
    ];

    let armature = ArmatureTemplate::new(nodes, None).unwrap();

    assert_eq!(armature.roots().collect::<Vec<_>>(), [0, 1]);
    assert_eq!(armature.children_of(0).collect::<Vec<_>>(), [2, 3, 4]);
    assert_eq!(armature.children_of(1).collect::<Vec<_>>(), [5]);
    assert_eq!(armature.children_of(5).count(), 0);
    assert_eq!(armature.children_of(6).count(), 0);
    assert_eq!(armature.children_of(usize::MAX).count(), 0);
    assert_eq!(armature[3].name, "leg.l");
    assert_eq!(armature[3].parent_index(), Some(0));
}

#[test]
fn negative_raw_parent_means_root() {
    let nodes = vec![
        NodeTemplate::from_raw_parent("a", -1),
        NodeTemplate::from_raw_parent("b", 0),
        NodeTemplate::from_raw_parent("c", -7),
    ];

    let armature = ArmatureTemplate::new(nodes, None).unwrap();
    assert!(armature[0].is_root());
    assert_eq!(armature[1].parent_index(), Some(0));
    assert!(armature[2].is_root());
}

// ============================================================================
// Construction: invalid hierarchies
// ============================================================================

#[test]
fn parent_at_or_after_own_index_is_rejected() {
    for bad in 1..6 {
        for parent in [bad, bad + 1, 10] {
            let mut nodes = chain(6);
            nodes[bad] = NodeTemplate::child("bad", parent);

            let err = ArmatureTemplate::new(nodes, None).unwrap_err();
            assert_eq!(err, PbrRuntimeError::InvalidHierarchy { index: bad, parent });
        }
    }
}

#[test]
fn root_pointing_at_itself_is_rejected() {
    let err = ArmatureTemplate::new(vec![NodeTemplate::child("self", 0)], None).unwrap_err();
    assert_eq!(err, PbrRuntimeError::InvalidHierarchy { index: 0, parent: 0 });
}

#[test]
fn first_invalid_node_is_reported() {
    let mut nodes = chain(5);
    nodes[2] = NodeTemplate::child("early", 4);
    nodes[4] = NodeTemplate::child("late", 4);

    let err = ArmatureTemplate::new(nodes, None).unwrap_err();
    assert_eq!(err, PbrRuntimeError::InvalidHierarchy { index: 2, parent: 4 });
}

#[test]
fn out_of_order_input_is_not_repaired() {
    // Valid tree, but the child is stored before its parent.
    let nodes = vec![NodeTemplate::child("hand", 1), NodeTemplate::root("arm")];

    assert!(matches!(
        ArmatureTemplate::new(nodes, None),
        Err(PbrRuntimeError::InvalidHierarchy { index: 0, parent: 1 })
    ));
}

// ============================================================================
// Construction: loader output with absent values
// ============================================================================

#[test]
fn absent_node_array_is_invalid_argument() {
    let err = ArmatureTemplate::from_parsed(None, None).unwrap_err();
    assert!(matches!(err, PbrRuntimeError::InvalidArgument(_)));
}

#[test]
fn absent_element_names_its_index() {
    let nodes = vec![
        Some(NodeTemplate::root("root")),
        Some(NodeTemplate::child("a", 0)),
        None,
    ];

    let err = ArmatureTemplate::from_parsed(Some(nodes), None).unwrap_err();
    assert_eq!(err, PbrRuntimeError::InvalidArgument("nodes[2] is absent".to_string()));
    assert!(err.to_string().contains("nodes[2]"));
}

#[test]
fn validation_runs_in_index_order() {
    let nodes = vec![
        Some(NodeTemplate::root("root")),
        Some(NodeTemplate::child("bad", 3)),
        None,
    ];

    let err = ArmatureTemplate::from_parsed(Some(nodes), None).unwrap_err();
    assert_eq!(err, PbrRuntimeError::InvalidHierarchy { index: 1, parent: 3 });
}

#[test]
fn parsed_input_without_tracks_is_valid() -> anyhow::Result<()> {
    let nodes = chain(4).into_iter().map(Some).collect();
    let armature = ArmatureTemplate::from_parsed(Some(nodes), None)?;

    assert_eq!(armature.count(), 4);
    assert!(armature.tracks().is_empty());
    assert_eq!(armature.index_of_track("walk"), None);
    assert!(approx(armature.track_duration(0), 0.0));
    Ok(())
}

// ============================================================================
// Track queries
// ============================================================================

#[test]
fn track_lookup_by_name() {
    let armature = walk_idle();

    assert_eq!(armature.index_of_track("walk"), Some(0));
    assert_eq!(armature.index_of_track("idle"), Some(1));
    assert_eq!(armature.index_of_track("run"), None);
    // Byte-exact comparison
    assert_eq!(armature.index_of_track("Idle"), None);
    assert_eq!(armature.index_of_track("idle "), None);
}

#[test]
fn track_duration_defaults_to_zero_out_of_range() {
    let armature = walk_idle();

    assert!(approx(armature.track_duration(0), 1.2));
    assert!(approx(armature.track_duration(1), 0.0));
    assert!(approx(armature.track_duration(5), 0.0));
    assert!(approx(armature.track_duration(-1), 0.0));
    assert!(approx(armature.track_duration(i64::MIN), 0.0));
    assert!(approx(armature.track_duration(usize::MAX), 0.0));
}

#[test]
fn track_duration_accepts_lookup_result() {
    let armature = walk_idle();

    let walk = armature.index_of_track("walk").unwrap();
    assert!(approx(armature.track_duration(walk), 1.2));
    assert_eq!(armature.tracks()[walk].name, "walk");
}

// ============================================================================
// Node access & rest pose
// ============================================================================

#[test]
fn get_is_bounds_checked() {
    let armature = walk_idle();
    assert_eq!(armature.get(2).map(|n| n.name.as_str()), Some("joint2"));
    assert!(armature.get(3).is_none());
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn indexing_out_of_range_panics() {
    let armature = walk_idle();
    let _ = &armature[3];
}

#[test]
fn rest_pose_accumulates_parent_transforms() {
    let step = Mat4::from_translation(Vec3::X);
    let nodes = vec![
        NodeTemplate::root("root").with_local_matrix(Mat4::from_translation(Vec3::Y)),
        NodeTemplate::child("a", 0).with_local_matrix(step),
        NodeTemplate::child("b", 1).with_local_matrix(step),
        NodeTemplate::child("c", 0).with_local_matrix(step),
    ];

    let world = ArmatureTemplate::new(nodes, None).unwrap().rest_world_matrices();

    assert_eq!(world[2].w_axis.truncate(), Vec3::new(2.0, 1.0, 0.0));
    assert_eq!(world[3].w_axis.truncate(), Vec3::new(1.0, 1.0, 0.0));
}

// ============================================================================
// Sharing
// ============================================================================

#[test]
fn template_is_shared_read_only_across_threads() {
    let armature = walk_idle();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                assert_eq!(armature.count(), 3);
                assert_eq!(armature.index_of_track("idle"), Some(1));
            });
        }
    });
}

#[test]
fn each_template_has_its_own_id() {
    assert_ne!(walk_idle().id(), walk_idle().id());
}

#[test]
fn clone_is_the_same_asset() {
    let armature = walk_idle();
    let copy = armature.clone();

    assert_eq!(copy.id(), armature.id());
    assert_eq!(copy.nodes(), armature.nodes());
}
