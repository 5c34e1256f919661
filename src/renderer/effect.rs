//! PBR Material / Light Binder
//!
//! [`MaterialLightBinder`] stages everything a PBR draw call needs (transforms,
//! bone palette, lights, material maps) and writes it into the shader's
//! parameter set in a single [`apply`](MaterialLightBinder::apply) call made
//! right before the draw.
//!
//! Its public surface is split into three capability traits so code that only
//! cares about one aspect can stay generic:
//! - [`EffectMatrices`]: world / view / projection
//! - [`EffectBones`]: skinning palette
//! - [`EffectLights`]: exposure, ambient term and punctual lights
//!
//! # Flush order
//!
//! `apply` always runs the same steps, in this order:
//! 1. World, View, Projection
//! 2. Bones, only when skinning is enabled (`bone_count > 0`)
//! 3. CameraPosition
//! 4. Placeholder textures are created if needed
//! 5. Exposure
//! 6. LightParam0..3, then AmbientLightColor
//! 7. NormalScale + NormalTexture, if a normal map is set
//! 8. OcclusionScale + OcclusionTexture, if an occlusion map is set
//! 9. EmissiveScale + EmissiveTexture, if an emissive map is set
//!
//! Every slot is resolved when the binder is created, so `apply` cannot fail.
//!
//! # Threading
//!
//! A binder is mutated by one rendering thread at a time (`&mut self`). Share
//! one across threads only behind a mutex covering both staging and `apply`.

use std::sync::Arc;

use glam::{Mat4, Vec3, Vec4};

use crate::errors::{PbrRuntimeError, Result};
use crate::renderer::light_packer::{LightParams, MAX_LIGHTS, encode_lights};
use crate::renderer::parameters::{ParameterSet, ParameterValue, SlotId};
use crate::renderer::placeholder::DotTextures;
use crate::renderer::settings::{BinderSettings, SlotNames};
use crate::scene::PbrLight;

/// Capacity of the bone palette.
pub const MAX_BONES: usize = 128;

// ============================================================================
// Capabilities
// ============================================================================

pub trait EffectMatrices {
    fn world(&self) -> Mat4;
    fn set_world(&mut self, world: Mat4);

    fn view(&self) -> Mat4;
    fn set_view(&mut self, view: Mat4);

    fn projection(&self) -> Mat4;
    fn set_projection(&mut self, projection: Mat4);
}

pub trait EffectBones {
    /// Capacity of the bone palette.
    fn max_bones(&self) -> usize;

    /// Number of active bones; `0` means skinning is disabled.
    fn bone_count(&self) -> usize;

    /// Copies `count` matrices starting at `transforms[start]` into the
    /// palette and makes them the active bones.
    ///
    /// `count == 0` disables skinning and copies nothing.
    ///
    /// # Panics
    /// If `start + count` exceeds `transforms`, or `count` exceeds
    /// [`max_bones`](Self::max_bones).
    fn set_bone_transforms(&mut self, transforms: &[Mat4], start: usize, count: usize);
}

pub trait EffectLights {
    fn exposure(&self) -> f32;
    fn set_exposure(&mut self, exposure: f32);

    fn ambient_light_color(&self) -> Vec3;
    fn set_ambient_light_color(&mut self, color: Vec3);

    /// Host-side lighting switch, off until set or until
    /// [`enable_default_lighting`](Self::enable_default_lighting).
    ///
    /// The PBR shader is always lit: the flag is stored for callers and
    /// does not gate anything written by `apply`.
    fn lighting_enabled(&self) -> bool;
    fn set_lighting_enabled(&mut self, enabled: bool);

    /// # Panics
    /// If `index >= MAX_LIGHTS`.
    fn light(&self, index: usize) -> Option<&PbrLight>;

    /// Puts `light` in slot `index`; `None` empties the slot.
    ///
    /// # Panics
    /// If `index >= MAX_LIGHTS`.
    fn set_light(&mut self, index: usize, light: Option<PbrLight>);

    /// Installs the classic key / fill / back three-light rig and turns
    /// lighting on.
    fn enable_default_lighting(&mut self);
}

// ============================================================================
// Material maps
// ============================================================================

/// Binding state of an optional material map.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MapBinding<T> {
    /// No map: the scale and texture slots are left untouched.
    #[default]
    Unset,
    /// Map enabled without a texture: the shared white placeholder is bound.
    Placeholder,
    Texture(T),
}

impl<T> MapBinding<T> {
    #[inline]
    #[must_use]
    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }

    #[inline]
    #[must_use]
    pub fn texture(&self) -> Option<&T> {
        match self {
            Self::Texture(texture) => Some(texture),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ResolvedSlots {
    world: SlotId,
    view: SlotId,
    projection: SlotId,
    bones: SlotId,
    camera_position: SlotId,
    exposure: SlotId,
    light_params: [SlotId; 4],
    ambient_light_color: SlotId,
    normal_scale: SlotId,
    normal_texture: SlotId,
    occlusion_scale: SlotId,
    occlusion_texture: SlotId,
    emissive_scale: SlotId,
    emissive_texture: SlotId,
}

impl ResolvedSlots {
    fn resolve<P: ParameterSet>(parameters: &P, names: &SlotNames) -> Result<Self> {
        let find = |name: &str| {
            parameters.find_slot(name).ok_or_else(|| {
                log::error!("MaterialLightBinder: shader has no parameter named '{name}'");
                PbrRuntimeError::MissingParameter(name.to_string())
            })
        };

        Ok(Self {
            world: find(names.world.as_str())?,
            view: find(names.view.as_str())?,
            projection: find(names.projection.as_str())?,
            bones: find(names.bones.as_str())?,
            camera_position: find(names.camera_position.as_str())?,
            exposure: find(names.exposure.as_str())?,
            light_params: [
                find(names.light_params[0].as_str())?,
                find(names.light_params[1].as_str())?,
                find(names.light_params[2].as_str())?,
                find(names.light_params[3].as_str())?,
            ],
            ambient_light_color: find(names.ambient_light_color.as_str())?,
            normal_scale: find(names.normal_scale.as_str())?,
            normal_texture: find(names.normal_texture.as_str())?,
            occlusion_scale: find(names.occlusion_scale.as_str())?,
            occlusion_texture: find(names.occlusion_texture.as_str())?,
            emissive_scale: find(names.emissive_scale.as_str())?,
            emissive_texture: find(names.emissive_texture.as_str())?,
        })
    }
}

// ============================================================================
// Binder
// ============================================================================

/// Per-draw-call PBR state, flushed into a shader parameter set by [`apply`](Self::apply).
pub struct MaterialLightBinder<P: ParameterSet> {
    parameters: P,
    slots: ResolvedSlots,
    placeholders: Arc<DotTextures<P::Texture>>,

    // === Transforms ===
    world: Mat4,
    view: Mat4,
    projection: Mat4,

    // === Skinning ===
    bone_count: usize,
    bones: Box<[Mat4; MAX_BONES]>,

    // === Lighting ===
    lights: [Option<PbrLight>; MAX_LIGHTS],
    light_params: LightParams,
    lighting_enabled: bool,
    exposure: f32,
    ambient_light_color: Vec3,

    // === Material ===
    normal_map: MapBinding<P::Texture>,
    normal_scale: Vec4,
    occlusion_map: MapBinding<P::Texture>, // ambient occlusion
    occlusion_scale: Vec4,
    emissive_map: MapBinding<P::Texture>,
    emissive_scale: Vec4,
}

impl<P: ParameterSet> MaterialLightBinder<P> {
    /// Creates a binder writing to the canonical PBR slot names.
    ///
    /// # Errors
    /// [`PbrRuntimeError::MissingParameter`] if `parameters` lacks any slot.
    pub fn new(parameters: P, placeholders: Arc<DotTextures<P::Texture>>) -> Result<Self> {
        Self::with_settings(parameters, placeholders, &BinderSettings::default())
    }

    /// # Errors
    /// [`PbrRuntimeError::MissingParameter`] if `parameters` lacks any slot
    /// named in `settings.slot_names`.
    pub fn with_settings(
        parameters: P,
        placeholders: Arc<DotTextures<P::Texture>>,
        settings: &BinderSettings,
    ) -> Result<Self> {
        let slots = ResolvedSlots::resolve(&parameters, &settings.slot_names)?;
        log::debug!("MaterialLightBinder: all shader slots resolved");

        Ok(Self {
            parameters,
            slots,
            placeholders,
            world: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            bone_count: 0,
            bones: Box::new([Mat4::IDENTITY; MAX_BONES]),
            lights: [None; MAX_LIGHTS],
            light_params: LightParams::default(),
            lighting_enabled: false,
            exposure: settings.exposure,
            ambient_light_color: settings.ambient_light_color,
            normal_map: MapBinding::Unset,
            normal_scale: Vec4::ONE,
            occlusion_map: MapBinding::Unset,
            occlusion_scale: Vec4::ONE,
            emissive_map: MapBinding::Unset,
            emissive_scale: Vec4::ONE,
        })
    }

    // ========================================================================
    // Parameter set access
    // ========================================================================

    #[inline]
    pub fn parameters(&self) -> &P {
        &self.parameters
    }

    #[inline]
    pub fn parameters_mut(&mut self) -> &mut P {
        &mut self.parameters
    }

    pub fn into_parameters(self) -> P {
        self.parameters
    }

    #[inline]
    pub fn placeholders(&self) -> &Arc<DotTextures<P::Texture>> {
        &self.placeholders
    }

    // ========================================================================
    // Skinning
    // ========================================================================

    /// The whole palette, including inactive entries.
    #[inline]
    pub fn bones(&self) -> &[Mat4; MAX_BONES] {
        &self.bones
    }

    #[inline]
    pub fn active_bones(&self) -> &[Mat4] {
        &self.bones[..self.bone_count]
    }

    /// Camera world position as written to the shader.
    ///
    /// Precondition: the view matrix is rigid (orthonormal rotation, no
    /// scale). The value is the negated translation of the view matrix, the
    /// convention the paired shader is written against; it is intentionally
    /// not derived from a full inverse.
    #[inline]
    pub fn camera_position(&self) -> Vec3 {
        -self.view.w_axis.truncate()
    }

    /// Light parameters produced by the last [`apply`](Self::apply).
    #[inline]
    pub fn light_params(&self) -> &LightParams {
        &self.light_params
    }

    // ========================================================================
    // Material maps
    // ========================================================================

    pub fn normal_map(&self) -> &MapBinding<P::Texture> {
        &self.normal_map
    }

    pub fn set_normal_map(&mut self, map: MapBinding<P::Texture>) {
        self.normal_map = map;
    }

    pub fn normal_scale(&self) -> Vec4 {
        self.normal_scale
    }

    pub fn set_normal_scale(&mut self, scale: Vec4) {
        self.normal_scale = scale;
    }

    pub fn occlusion_map(&self) -> &MapBinding<P::Texture> {
        &self.occlusion_map
    }

    pub fn set_occlusion_map(&mut self, map: MapBinding<P::Texture>) {
        self.occlusion_map = map;
    }

    pub fn occlusion_scale(&self) -> Vec4 {
        self.occlusion_scale
    }

    pub fn set_occlusion_scale(&mut self, scale: Vec4) {
        self.occlusion_scale = scale;
    }

    pub fn emissive_map(&self) -> &MapBinding<P::Texture> {
        &self.emissive_map
    }

    pub fn set_emissive_map(&mut self, map: MapBinding<P::Texture>) {
        self.emissive_map = map;
    }

    pub fn emissive_scale(&self) -> Vec4 {
        self.emissive_scale
    }

    pub fn set_emissive_scale(&mut self, scale: Vec4) {
        self.emissive_scale = scale;
    }

    // ========================================================================
    // Flush
    // ========================================================================

    /// Writes all staged state into the parameter set. See the module docs
    /// for the exact order.
    pub fn apply(&mut self) {
        let slots = self.slots;
        let parameters = &mut self.parameters;

        parameters.write(slots.world, ParameterValue::Matrix(self.world));
        parameters.write(slots.view, ParameterValue::Matrix(self.view));
        parameters.write(slots.projection, ParameterValue::Matrix(self.projection));

        // When skinning is off the shader's own flag gates the palette.
        if self.bone_count > 0 {
            parameters.write(
                slots.bones,
                ParameterValue::Matrices(&self.bones[..self.bone_count]),
            );
        }

        parameters.write(
            slots.camera_position,
            ParameterValue::Vector3(-self.view.w_axis.truncate()),
        );

        self.placeholders.ensure();

        parameters.write(slots.exposure, ParameterValue::Scalar(self.exposure));

        encode_lights(&self.lights, &mut self.light_params);
        let packed = [
            &self.light_params.param0,
            &self.light_params.param1,
            &self.light_params.param2,
            &self.light_params.param3,
        ];
        for (slot, values) in slots.light_params.into_iter().zip(packed) {
            parameters.write(slot, ParameterValue::Vectors4(values));
        }
        parameters.write(
            slots.ambient_light_color,
            ParameterValue::Vector3(self.ambient_light_color),
        );

        write_map(
            parameters,
            &self.placeholders,
            &self.normal_map,
            self.normal_scale,
            slots.normal_scale,
            slots.normal_texture,
        );
        write_map(
            parameters,
            &self.placeholders,
            &self.occlusion_map,
            self.occlusion_scale,
            slots.occlusion_scale,
            slots.occlusion_texture,
        );
        write_map(
            parameters,
            &self.placeholders,
            &self.emissive_map,
            self.emissive_scale,
            slots.emissive_scale,
            slots.emissive_texture,
        );
    }
}

fn write_map<P: ParameterSet>(
    parameters: &mut P,
    placeholders: &DotTextures<P::Texture>,
    map: &MapBinding<P::Texture>,
    scale: Vec4,
    scale_slot: SlotId,
    texture_slot: SlotId,
) {
    let texture = match map {
        MapBinding::Unset => return,
        MapBinding::Placeholder => placeholders.white(),
        MapBinding::Texture(texture) => texture,
    };

    parameters.write(scale_slot, ParameterValue::Vector4(scale));
    parameters.write(texture_slot, ParameterValue::Texture(texture));
}

// ============================================================================
// Capability impls
// ============================================================================

impl<P: ParameterSet> EffectMatrices for MaterialLightBinder<P> {
    fn world(&self) -> Mat4 {
        self.world
    }

    fn set_world(&mut self, world: Mat4) {
        self.world = world;
    }

    fn view(&self) -> Mat4 {
        self.view
    }

    fn set_view(&mut self, view: Mat4) {
        self.view = view;
    }

    fn projection(&self) -> Mat4 {
        self.projection
    }

    fn set_projection(&mut self, projection: Mat4) {
        self.projection = projection;
    }
}

impl<P: ParameterSet> EffectBones for MaterialLightBinder<P> {
    fn max_bones(&self) -> usize {
        MAX_BONES
    }

    fn bone_count(&self) -> usize {
        self.bone_count
    }

    fn set_bone_transforms(&mut self, transforms: &[Mat4], start: usize, count: usize) {
        if count == 0 {
            self.bone_count = 0;
            return;
        }

        self.bones[..count].copy_from_slice(&transforms[start..start + count]);
        self.bone_count = count;
    }
}

impl<P: ParameterSet> EffectLights for MaterialLightBinder<P> {
    fn exposure(&self) -> f32 {
        self.exposure
    }

    fn set_exposure(&mut self, exposure: f32) {
        self.exposure = exposure;
    }

    fn ambient_light_color(&self) -> Vec3 {
        self.ambient_light_color
    }

    fn set_ambient_light_color(&mut self, color: Vec3) {
        self.ambient_light_color = color;
    }

    fn lighting_enabled(&self) -> bool {
        self.lighting_enabled
    }

    fn set_lighting_enabled(&mut self, enabled: bool) {
        self.lighting_enabled = enabled;
    }

    fn light(&self, index: usize) -> Option<&PbrLight> {
        self.lights[index].as_ref()
    }

    fn set_light(&mut self, index: usize, light: Option<PbrLight>) {
        self.lights[index] = light;
    }

    fn enable_default_lighting(&mut self) {
        self.lights = [
            // Key
            Some(PbrLight::new_directional(
                Vec3::new(-0.526_540_8, -0.573_576_5, -0.627_506_9),
                Vec3::new(1.0, 0.960_784_4, 0.807_843_2),
                1.0,
            )),
            // Fill
            Some(PbrLight::new_directional(
                Vec3::new(0.719_846_4, 0.342_020_1, 0.604_022_7),
                Vec3::new(0.964_705_9, 0.760_784_4, 0.407_843_2),
                1.0,
            )),
            // Back
            Some(PbrLight::new_directional(
                Vec3::new(0.454_519_5, -0.766_044_4, 0.454_519_5),
                Vec3::new(0.323_137_3, 0.360_784_4, 0.393_725_5),
                1.0,
            )),
        ];
        self.ambient_light_color = Vec3::new(0.053_333_32, 0.098_823_54, 0.181_960_8);
        self.lighting_enabled = true;
    }
}
