//! Light Packing
//!
//! Encodes up to [`MAX_LIGHTS`] punctual lights into the four `vec4` arrays the
//! PBR shader reads its lights from. The shader indexes lights positionally,
//! so slot `i` always lands in element `i` of every array.
//!
//! # Layout
//!
//! | Array         | xyz                          | w          |
//! |---------------|------------------------------|------------|
//! | `param0`      | position                     | range      |
//! | `param1`      | direction (normalized)       | kind code  |
//! | `param2`      | color                        | intensity  |
//! | `param3`      | cos(inner), cos(outer), 0    | 0          |
//!
//! An empty slot is written as all zeros: zero intensity, no contribution.

use bytemuck::{Pod, Zeroable};
use glam::Vec4;

use crate::scene::{LightKind, PbrLight};

/// Number of light slots the shader exposes.
pub const MAX_LIGHTS: usize = 3;

/// The four light parameter arrays, laid out for direct upload.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct LightParams {
    pub param0: [Vec4; MAX_LIGHTS],
    pub param1: [Vec4; MAX_LIGHTS],
    pub param2: [Vec4; MAX_LIGHTS],
    pub param3: [Vec4; MAX_LIGHTS],
}

impl LightParams {
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Intensity encoded in `slot`; `0.0` for an empty slot.
    #[inline]
    #[must_use]
    pub fn intensity(&self, slot: usize) -> f32 {
        self.param2[slot].w
    }
}

/// Overwrites every element of `out` from the given light slots.
pub fn encode_lights(lights: &[Option<PbrLight>; MAX_LIGHTS], out: &mut LightParams) {
    for (i, light) in lights.iter().enumerate() {
        let Some(light) = light else {
            out.param0[i] = Vec4::ZERO;
            out.param1[i] = Vec4::ZERO;
            out.param2[i] = Vec4::ZERO;
            out.param3[i] = Vec4::ZERO;
            continue;
        };

        out.param0[i] = light.position.extend(light.range);
        out.param1[i] = light
            .direction
            .normalize_or_zero()
            .extend(light.kind.code() as f32);
        out.param2[i] = light.color.extend(light.intensity);
        out.param3[i] = match light.kind {
            LightKind::Spot(cone) => {
                Vec4::new(cone.inner_cone.cos(), cone.outer_cone.cos(), 0.0, 0.0)
            }
            LightKind::Directional | LightKind::Point => Vec4::ZERO,
        };
    }
}
