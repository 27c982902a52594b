use bevy::prelude::*;
use constants::loader::{
    EXPLODE_XY_GAIN, LOAD_DURATION_SECS, PHASE_LAUNCHING_PROGRESS, PHASE_UNFOLDING_PERCENT,
    UNFOLD_XY_GAIN, UNFOLD_Z_SHRINK,
};

/// Normalised loading progress in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct LoadProgress(f32);

impl LoadProgress {
    pub const ZERO: Self = Self(0.0);
    pub const COMPLETE: Self = Self(1.0);

    pub fn from_elapsed(elapsed_secs: f32) -> Self {
        Self::from_elapsed_with(elapsed_secs, LOAD_DURATION_SECS)
    }

    pub fn from_elapsed_with(elapsed_secs: f32, duration_secs: f32) -> Self {
        if duration_secs <= 0.0 {
            return Self::COMPLETE;
        }
        Self((elapsed_secs / duration_secs).clamp(0.0, 1.0))
    }

    pub fn value(self) -> f32 {
        self.0
    }

    pub fn is_complete(self) -> bool {
        self.0 >= 1.0
    }

    /// Percentage shown on the overlay.
    pub fn percent(self) -> u32 {
        (self.0 * 100.0).floor() as u32
    }

    pub fn phase(self) -> LoadPhase {
        if self.0 >= PHASE_LAUNCHING_PROGRESS {
            LoadPhase::Launching
        } else if self.percent() < PHASE_UNFOLDING_PERCENT {
            LoadPhase::Initializing
        } else {
            LoadPhase::Unfolding
        }
    }

    /// Model scale multiplier: unfold towards (1.5, 1.5, 0.7) by 0.7, then
    /// explode towards (3.5, 3.5, 0.0) by 1.0.
    pub fn model_scale(self) -> Vec3 {
        if self.0 < PHASE_LAUNCHING_PROGRESS {
            let unfold = self.0 / PHASE_LAUNCHING_PROGRESS;
            Vec3::new(
                1.0 + unfold * UNFOLD_XY_GAIN,
                1.0 + unfold * UNFOLD_XY_GAIN,
                1.0 - unfold * UNFOLD_Z_SHRINK,
            )
        } else {
            let explosion = self.explosion();
            let xy = 1.0 + UNFOLD_XY_GAIN + explosion * EXPLODE_XY_GAIN;
            let z = (1.0 - UNFOLD_Z_SHRINK) * (1.0 - explosion);
            Vec3::new(xy, xy, z)
        }
    }

    /// Model material opacity, fading linearly to zero over the last phase.
    pub fn model_opacity(self) -> f32 {
        if self.0 < PHASE_LAUNCHING_PROGRESS {
            1.0
        } else {
            1.0 - self.explosion()
        }
    }

    fn explosion(self) -> f32 {
        ((self.0 - PHASE_LAUNCHING_PROGRESS) / (1.0 - PHASE_LAUNCHING_PROGRESS)).clamp(0.0, 1.0)
    }
}

/// Label shown under the percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Initializing,
    Unfolding,
    Launching,
}

impl LoadPhase {
    pub fn label(self) -> &'static str {
        match self {
            LoadPhase::Initializing => "INITIALIZING",
            LoadPhase::Unfolding => "UNFOLDING",
            LoadPhase::Launching => "LAUNCHING",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_labels_follow_percentage_below_launch() {
        for step in 0..700 {
            let p = LoadProgress(step as f32 / 1000.0);
            let expected = if p.percent() < 30 {
                LoadPhase::Initializing
            } else {
                LoadPhase::Unfolding
            };
            assert_eq!(p.phase(), expected, "progress {}", p.value());
        }
    }

    #[test]
    fn launch_phase_covers_the_tail() {
        for step in 700..=1000 {
            let p = LoadProgress(step as f32 / 1000.0);
            assert_eq!(p.phase(), LoadPhase::Launching, "progress {}", p.value());
        }
        assert_eq!(LoadProgress::COMPLETE.phase().label(), "LAUNCHING");
    }

    #[test]
    fn percentage_is_floored_and_clamped() {
        assert_eq!(LoadProgress::from_elapsed(0.0).percent(), 0);
        assert_eq!(LoadProgress::from_elapsed(1.75).percent(), 50);
        assert_eq!(LoadProgress::from_elapsed(3.49).percent(), 99);
        assert_eq!(LoadProgress::from_elapsed(10.0).percent(), 100);
        assert_eq!(LoadProgress::from_elapsed(-1.0), LoadProgress::ZERO);
    }

    #[test]
    fn scale_envelope_is_continuous_at_launch() {
        let before = LoadProgress(0.6999).model_scale();
        let at = LoadProgress(0.7).model_scale();
        assert!((before - at).abs().max_element() < 1e-3);
        assert!((at - Vec3::new(1.5, 1.5, 0.7)).abs().max_element() < 1e-5);

        let end = LoadProgress::COMPLETE.model_scale();
        assert!((end - Vec3::new(3.5, 3.5, 0.0)).abs().max_element() < 1e-5);
    }

    #[test]
    fn opacity_fades_only_after_launch() {
        assert_eq!(LoadProgress(0.5).model_opacity(), 1.0);
        assert!((LoadProgress(0.85).model_opacity() - 0.5).abs() < 1e-5);
        assert_eq!(LoadProgress::COMPLETE.model_opacity(), 0.0);
    }
}
