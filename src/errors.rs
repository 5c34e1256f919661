//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`PbrRuntimeError`] covers the structural failures that
//! can be detected before anything reaches the GPU:
//! - Absent or malformed skeleton input handed over by a scene loader
//! - Skeleton hierarchies that are not stored parent-before-child
//! - Shader parameter sets missing a slot the binder writes to
//!
//! Query-time lookups (track names, track durations) never fail: they degrade
//! to `None` / `0.0`. Draw-time contract violations (bone copies past the
//! capacity, light slots past the maximum) panic.
//!
//! # Usage
//!
//! ```rust,ignore
//! use pbr_runtime::errors::{PbrRuntimeError, Result};
//!
//! fn load_armature() -> Result<()> {
//!     // Operations that may fail return Result
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PbrRuntimeError {
    // ========================================================================
    // Construction Errors
    // ========================================================================
    /// A required input (or one of its elements) is absent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A node's parent does not precede it in the flattened node array.
    #[error("Invalid hierarchy: nodes[{index}].parent_index ({parent}) must point to a preceding node")]
    InvalidHierarchy {
        /// Index of the offending node
        index: usize,
        /// The parent index it declared
        parent: usize,
    },

    // ========================================================================
    // Shader Binding Errors
    // ========================================================================
    /// The shader parameter set does not expose a slot the binder writes to.
    #[error("Shader parameter not found: {0}")]
    MissingParameter(String),
}

/// Alias for `Result<T, PbrRuntimeError>`.
pub type Result<T> = std::result::Result<T, PbrRuntimeError>;
