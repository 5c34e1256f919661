//! Skeleton templates and PBR shader parameter binding for glTF runtimes.
//!
//! Two independent pieces sit between a parsed scene and a PBR shader program:
//!
//! - [`ArmatureTemplate`]: an immutable, validated skeleton (joints stored
//!   parent-before-child) together with the name and duration of each
//!   animation track that targets it.
//! - [`MaterialLightBinder`]: per-draw-call transforms, bone palette, lights
//!   and material maps, flushed into the shader's named parameter slots in one
//!   deterministic pass.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use pbr_runtime::prelude::*;
//!
//! let placeholders = Arc::new(DotTextures::new(|label: &str, rgba: [u8; 4]| upload(label, rgba)));
//! let mut binder = MaterialLightBinder::new(ParameterTable::pbr(), placeholders)?;
//!
//! binder.set_view(camera.view_matrix());
//! binder.set_light(0, Some(PbrLight::new_directional(-Vec3::Y, Vec3::ONE, 3.0)));
//! binder.set_bone_transforms(&pose, 0, skeleton.count());
//! binder.apply();
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod animation;
pub mod errors;
pub mod renderer;
pub mod scene;

pub use animation::AnimationTrackInfo;
pub use errors::{PbrRuntimeError, Result};
pub use renderer::{
    BinderSettings, DotTextures, LightParams, MapBinding, MaterialLightBinder, ParameterSet,
    ParameterTable, SlotNames, MAX_BONES, MAX_LIGHTS,
};
pub use scene::{ArmatureTemplate, LightKind, NodeTemplate, PbrLight};

/// Everything a renderer needs, including the capability traits.
pub mod prelude {
    pub use crate::animation::AnimationTrackInfo;
    pub use crate::errors::{PbrRuntimeError, Result};
    pub use crate::renderer::{
        BinderSettings, DotTextures, EffectBones, EffectLights, EffectMatrices, LightParams,
        MapBinding, MaterialLightBinder, Parameter, ParameterSet, ParameterTable,
        ParameterValue, SlotNames, TextureFactory, MAX_BONES, MAX_LIGHTS,
    };
    pub use crate::scene::{ArmatureTemplate, LightKind, NodeTemplate, PbrLight, SpotCone};
}
