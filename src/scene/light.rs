use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotCone {
    /// Half-angle of the full-intensity cone, in radians
    pub inner_cone: f32,
    /// Half-angle where the falloff reaches zero, in radians
    pub outer_cone: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    Directional,
    Point,
    Spot(SpotCone),
}

impl LightKind {
    /// Numeric kind code understood by the paired shader.
    #[inline]
    #[must_use]
    pub fn code(&self) -> u32 {
        match self {
            Self::Directional => 0,
            Self::Point => 1,
            Self::Spot(_) => 2,
        }
    }
}

/// A punctual light as handed to the PBR shader.
///
/// Colour is linear RGB. Suggested units follow `KHR_lights_punctual`:
/// lux for directional lights, candela for point and spot lights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PbrLight {
    pub kind: LightKind,
    pub color: Vec3,
    pub intensity: f32,

    // World space placement
    pub position: Vec3, // Point & Spot
    pub direction: Vec3, // Directional & Spot

    /// Attenuation cut-off distance, `0.0` means unlimited.
    pub range: f32,
}

impl PbrLight {
    #[must_use]
    pub fn new_directional(direction: Vec3, color: Vec3, intensity: f32) -> Self {
        Self {
            kind: LightKind::Directional,
            color,
            intensity,
            position: Vec3::ZERO,
            direction: direction.normalize_or_zero(),
            range: 0.0,
        }
    }

    #[must_use]
    pub fn new_point(position: Vec3, color: Vec3, intensity: f32, range: f32) -> Self {
        Self {
            kind: LightKind::Point,
            color,
            intensity,
            position,
            direction: Vec3::ZERO,
            range,
        }
    }

    #[must_use]
    pub fn new_spot(
        position: Vec3,
        direction: Vec3,
        color: Vec3,
        intensity: f32,
        range: f32,
        inner_cone: f32,
        outer_cone: f32,
    ) -> Self {
        Self {
            kind: LightKind::Spot(SpotCone {
                inner_cone,
                outer_cone,
            }),
            color,
            intensity,
            position,
            direction: direction.normalize_or_zero(),
            range,
        }
    }
}
