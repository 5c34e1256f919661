use std::ops::Index;

use glam::Mat4;
use rustc_hash::FxHashMap;
use uuid::Uuid;

use crate::animation::AnimationTrackInfo;
use crate::errors::{PbrRuntimeError, Result};
use crate::scene::NodeTemplate;

/// Immutable skeleton descriptor: a flattened joint hierarchy plus the
/// metadata of the animation tracks that drive it.
///
/// The node array must already be in topological (parent-before-child) order.
/// Construction only verifies that order, in a single linear pass; it never
/// reorders. The loader flattening the source hierarchy is responsible for
/// remapping parent indices.
///
/// Once built, a template never changes and can be shared read-only between
/// any number of threads. A clone is the same asset and keeps its [`id`](Self::id).
#[derive(Debug, Clone)]
pub struct ArmatureTemplate {
    id: Uuid,

    // === Core Data ===
    // nodes[i] is joint i; nodes[i].parent_index < i for every non-root
    nodes: Vec<NodeTemplate>,
    tracks: Vec<AnimationTrackInfo>,

    // First occurrence of every track name
    track_lookup: FxHashMap<String, usize>,
}

impl ArmatureTemplate {
    /// Creates an armature from an already flattened array of nodes.
    ///
    /// A missing track list is treated as empty.
    ///
    /// # Errors
    /// [`PbrRuntimeError::InvalidHierarchy`] if any node's parent does not
    /// precede it.
    pub fn new(
        nodes: Vec<NodeTemplate>,
        tracks: Option<Vec<AnimationTrackInfo>>,
    ) -> Result<Self> {
        for (index, node) in nodes.iter().enumerate() {
            validate_parent(index, node)?;
        }

        Ok(Self::from_validated(nodes, tracks.unwrap_or_default()))
    }

    /// Creates an armature from loader output where the array itself, or
    /// any of its elements, may be absent.
    ///
    /// Nodes are checked in index order; the first problem found is reported.
    ///
    /// # Errors
    /// - [`PbrRuntimeError::InvalidArgument`] if `nodes` or one of its elements is `None`
    /// - [`PbrRuntimeError::InvalidHierarchy`] if a parent does not precede its child
    pub fn from_parsed(
        nodes: Option<Vec<Option<NodeTemplate>>>,
        tracks: Option<Vec<AnimationTrackInfo>>,
    ) -> Result<Self> {
        let Some(nodes) = nodes else {
            log::warn!("ArmatureTemplate: node array is absent");
            return Err(PbrRuntimeError::InvalidArgument("nodes is absent".to_string()));
        };

        let mut validated = Vec::with_capacity(nodes.len());

        for (index, node) in nodes.into_iter().enumerate() {
            let Some(node) = node else {
                log::warn!("ArmatureTemplate: nodes[{index}] is absent");
                return Err(PbrRuntimeError::InvalidArgument(format!(
                    "nodes[{index}] is absent"
                )));
            };

            validate_parent(index, &node)?;
            validated.push(node);
        }

        Ok(Self::from_validated(validated, tracks.unwrap_or_default()))
    }

    fn from_validated(nodes: Vec<NodeTemplate>, tracks: Vec<AnimationTrackInfo>) -> Self {
        let mut track_lookup =
            FxHashMap::with_capacity_and_hasher(tracks.len(), Default::default());
        for (index, track) in tracks.iter().enumerate() {
            track_lookup.entry(track.name.clone()).or_insert(index);
        }

        let template = Self {
            id: Uuid::new_v4(),
            nodes,
            tracks,
            track_lookup,
        };

        log::debug!(
            "ArmatureTemplate {} created: {} nodes, {} tracks",
            template.id,
            template.nodes.len(),
            template.tracks.len()
        );

        template
    }

    // ========================================================================
    // Properties
    // ========================================================================

    /// Asset id, assigned at construction and shared by clones.
    #[inline]
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Number of nodes (joints).
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&NodeTemplate> {
        self.nodes.get(index)
    }

    #[inline]
    #[must_use]
    pub fn nodes(&self) -> &[NodeTemplate] {
        &self.nodes
    }

    /// All animation tracks, in source order.
    #[inline]
    #[must_use]
    pub fn tracks(&self) -> &[AnimationTrackInfo] {
        &self.tracks
    }

    /// Indices of the nodes whose parent is `index`, in ascending order.
    pub fn children_of(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        // Children always come after their parent.
        self.nodes
            .iter()
            .enumerate()
            .skip(index.saturating_add(1))
            .filter(move |(_, node)| node.parent_index == Some(index))
            .map(|(i, _)| i)
    }

    /// Indices of the nodes without a parent.
    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.is_root())
            .map(|(i, _)| i)
    }

    /// Model-space rest pose of every node.
    ///
    /// One forward pass: each parent is already resolved when its children
    /// are visited.
    #[must_use]
    pub fn rest_world_matrices(&self) -> Vec<Mat4> {
        let mut world = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let matrix = match node.parent_index {
                Some(parent) => world[parent] * node.local_matrix,
                None => node.local_matrix,
            };
            world.push(matrix);
        }
        world
    }

    // ========================================================================
    // Track queries
    // ========================================================================

    /// Returns the index of the first track named exactly `name`.
    #[must_use]
    pub fn index_of_track(&self, name: &str) -> Option<usize> {
        self.track_lookup.get(name).copied()
    }

    /// Returns the duration of a track, or `0.0` for any index outside
    /// `[0, track_count)`, negative indices included.
    #[must_use]
    pub fn track_duration<I: TryInto<usize>>(&self, index: I) -> f32 {
        let Ok(index) = index.try_into() else {
            return 0.0;
        };

        self.tracks.get(index).map_or(0.0, |track| track.duration)
    }
}

impl Index<usize> for ArmatureTemplate {
    type Output = NodeTemplate;

    /// Panics if `index >= self.count()`.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.nodes[index]
    }
}

fn validate_parent(index: usize, node: &NodeTemplate) -> Result<()> {
    if let Some(parent) = node.parent_index
        && parent >= index
    {
        log::warn!(
            "ArmatureTemplate: nodes[{index}].parent_index ({parent}) does not precede the node"
        );
        return Err(PbrRuntimeError::InvalidHierarchy { index, parent });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_duplicate_track_wins() {
        let armature = ArmatureTemplate::new(
            vec![NodeTemplate::root("root")],
            Some(vec![
                AnimationTrackInfo::new("idle", 1.0),
                AnimationTrackInfo::new("idle", 2.0),
            ]),
        )
        .unwrap();

        assert_eq!(armature.index_of_track("idle"), Some(0));
        assert!((armature.track_duration(1_usize) - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn self_parent_is_rejected() {
        let err = ArmatureTemplate::new(
            vec![NodeTemplate::root("root"), NodeTemplate::child("loop", 1)],
            None,
        )
        .unwrap_err();

        assert_eq!(err, PbrRuntimeError::InvalidHierarchy { index: 1, parent: 1 });
    }
}
