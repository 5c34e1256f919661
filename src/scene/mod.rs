//! Scene description types
//!
//! Static data produced by the scene loader:
//! - NodeTemplate: one joint of a flattened skeleton
//! - ArmatureTemplate: validated, immutable skeleton + animation track metadata
//! - PbrLight: punctual light descriptor consumed by the PBR binder

pub mod armature;
pub mod light;
pub mod node;

pub use armature::ArmatureTemplate;
pub use light::{LightKind, PbrLight, SpotCone};
pub use node::NodeTemplate;
