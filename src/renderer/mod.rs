//! Shader-facing state
//!
//! - light_packer: fixed-slot light encoding
//! - parameters: named shader parameter sets
//! - placeholder: shared fallback textures
//! - effect: the per-draw-call PBR binder

pub mod effect;
pub mod light_packer;
pub mod parameters;
pub mod placeholder;
pub mod settings;

#[cfg(feature = "wgpu")]
pub mod wgpu_dots;

pub use effect::{
    EffectBones, EffectLights, EffectMatrices, MAX_BONES, MapBinding, MaterialLightBinder,
};
pub use light_packer::{LightParams, MAX_LIGHTS, encode_lights};
pub use parameters::{Parameter, ParameterSet, ParameterTable, ParameterValue, SlotId};
pub use placeholder::{DotTextures, TextureFactory, WHITE_DOT};
pub use settings::{BinderSettings, SlotNames};

#[cfg(feature = "wgpu")]
pub use wgpu_dots::WgpuDotTextureFactory;
