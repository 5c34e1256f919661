/// Metadata of one named animation clip.
///
/// Only the name and the playback length are kept; sampled keyframes live with
/// whatever animation system consumes the armature.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationTrackInfo {
    pub name: String,
    /// Length in seconds. Never negative.
    pub duration: f32,
}

impl AnimationTrackInfo {
    /// Negative durations are clamped to zero.
    #[must_use]
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration: duration.max(0.0),
        }
    }

    /// Builds the metadata from keyframe timestamps: the duration is the
    /// latest timestamp found in any of the given time arrays.
    #[must_use]
    pub fn from_keyframe_times<'a>(
        name: impl Into<String>,
        times: impl IntoIterator<Item = &'a [f32]>,
    ) -> Self {
        let duration = times
            .into_iter()
            .map(|t| t.last().copied().unwrap_or(0.0))
            .fold(0.0_f32, f32::max);

        Self::new(name, duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_duration_is_clamped() {
        let info = AnimationTrackInfo::new("broken", -2.0);
        assert!(info.duration.abs() < f32::EPSILON);
    }

    #[test]
    fn duration_from_keyframes_uses_latest_time() {
        let translation = [0.0, 0.5, 1.0];
        let rotation = [0.0, 2.5];
        let empty: [f32; 0] = [];

        let info = AnimationTrackInfo::from_keyframe_times(
            "walk",
            [&translation[..], &rotation[..], &empty[..]],
        );

        assert_eq!(info.name, "walk");
        assert!((info.duration - 2.5).abs() < f32::EPSILON);
    }
}
