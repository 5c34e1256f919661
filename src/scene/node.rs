use glam::Mat4;

/// Static description of one joint in a flattened skeleton hierarchy.
///
/// # Hierarchy
///
/// The node's own index is implicit: it is its position inside the
/// [`ArmatureTemplate`](super::ArmatureTemplate) that owns it.
/// - `parent_index`: index of the parent in the same array (None for root nodes)
///
/// The owning armature guarantees that every parent precedes its children.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeTemplate {
    /// Parent node index (None for root nodes)
    pub(crate) parent_index: Option<usize>,

    /// Node name as found in the source asset (may be empty)
    pub name: String,

    /// Rest pose, relative to the parent
    pub local_matrix: Mat4,
}

impl NodeTemplate {
    /// Creates a root node with an identity rest pose.
    #[must_use]
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            parent_index: None,
            name: name.into(),
            local_matrix: Mat4::IDENTITY,
        }
    }

    /// Creates a node attached to `parent` with an identity rest pose.
    #[must_use]
    pub fn child(name: impl Into<String>, parent: usize) -> Self {
        Self {
            parent_index: Some(parent),
            name: name.into(),
            local_matrix: Mat4::IDENTITY,
        }
    }

    /// Creates a node from the loader convention where any negative parent
    /// index means "no parent".
    #[must_use]
    pub fn from_raw_parent(name: impl Into<String>, parent: i32) -> Self {
        Self {
            parent_index: usize::try_from(parent).ok(),
            name: name.into(),
            local_matrix: Mat4::IDENTITY,
        }
    }

    #[must_use]
    pub fn with_local_matrix(mut self, local_matrix: Mat4) -> Self {
        self.local_matrix = local_matrix;
        self
    }

    /// Returns the parent node index, if any.
    #[inline]
    #[must_use]
    pub fn parent_index(&self) -> Option<usize> {
        self.parent_index
    }

    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent_index.is_none()
    }
}
