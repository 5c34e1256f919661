//! Binder Settings
//!
//! Configuration consumed when a [`MaterialLightBinder`](super::MaterialLightBinder)
//! is created: initial lighting values and the names of the shader slots the
//! binder writes to.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use pbr_runtime::renderer::{BinderSettings, SlotNames};
//!
//! // Default: canonical PBR shader slot names, neutral exposure
//! let settings = BinderSettings::default();
//!
//! // A shader variant that names its bone palette differently
//! let settings = BinderSettings {
//!     exposure: 1.5,
//!     slot_names: SlotNames {
//!         bones: "JointMatrices".into(),
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//! ```

use glam::Vec3;

/// Names of every shader slot the binder writes.
///
/// These are a binding contract with the paired shader and must match it
/// exactly; a missing name is a fatal configuration error at binder creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotNames {
    pub world: String,
    pub view: String,
    pub projection: String,
    pub bones: String,
    pub camera_position: String,
    pub exposure: String,
    pub light_params: [String; 4],
    pub ambient_light_color: String,
    pub normal_scale: String,
    pub normal_texture: String,
    pub occlusion_scale: String,
    pub occlusion_texture: String,
    pub emissive_scale: String,
    pub emissive_texture: String,
}

impl Default for SlotNames {
    fn default() -> Self {
        Self {
            world: "World".into(),
            view: "View".into(),
            projection: "Projection".into(),
            bones: "Bones".into(),
            camera_position: "CameraPosition".into(),
            exposure: "Exposure".into(),
            light_params: [
                "LightParam0".into(),
                "LightParam1".into(),
                "LightParam2".into(),
                "LightParam3".into(),
            ],
            ambient_light_color: "AmbientLightColor".into(),
            normal_scale: "NormalScale".into(),
            normal_texture: "NormalTextureSampler+NormalTexture".into(),
            occlusion_scale: "OcclusionScale".into(),
            occlusion_texture: "OcclusionTextureSampler+OcclusionTexture".into(),
            emissive_scale: "EmissiveScale".into(),
            emissive_texture: "EmissiveTextureSampler+EmissiveTexture".into(),
        }
    }
}

impl SlotNames {
    /// Every slot name, in flush order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        [
            &self.world,
            &self.view,
            &self.projection,
            &self.bones,
            &self.camera_position,
            &self.exposure,
        ]
        .into_iter()
        .chain(&self.light_params)
        .chain([
            &self.ambient_light_color,
            &self.normal_scale,
            &self.normal_texture,
            &self.occlusion_scale,
            &self.occlusion_texture,
            &self.emissive_scale,
            &self.emissive_texture,
        ])
        .map(String::as_str)
    }
}

/// Initial state and shader contract of a binder.
#[derive(Debug, Clone, PartialEq)]
pub struct BinderSettings {
    /// Linear exposure multiplier applied by the shader before tone mapping.
    pub exposure: f32,
    /// Constant ambient term, linear RGB.
    pub ambient_light_color: Vec3,
    pub slot_names: SlotNames,
}

impl Default for BinderSettings {
    fn default() -> Self {
        Self {
            exposure: 1.0,
            ambient_light_color: Vec3::ZERO,
            slot_names: SlotNames::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names_are_unique() {
        let names = SlotNames::default();
        let all: Vec<&str> = names.iter().collect();
        let unique: std::collections::HashSet<&str> = all.iter().copied().collect();

        assert_eq!(all.len(), 17);
        assert_eq!(unique.len(), all.len());
        assert_eq!(all[0], "World");
        assert_eq!(all[6], "LightParam0");
    }
}
