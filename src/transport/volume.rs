//! Volume and mute as one tagged value.
//!
//! The slider level and the audible output are kept apart: the slider can sit
//! at 0.4 while the output is muted, and unmuting from a zero slider plays at
//! full level without moving the slider.

/// Output level used when unmuting while the slider rests at zero.
pub const UNMUTE_FALLBACK: f64 = 1.0;

/// What the element actually outputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectiveVolume {
    Muted,
    Audible(f64),
}

impl EffectiveVolume {
    pub fn level(self) -> f64 {
        match self {
            EffectiveVolume::Muted => 0.0,
            EffectiveVolume::Audible(level) => level,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeState {
    volume: f64,
    output: EffectiveVolume,
}

impl Default for VolumeState {
    fn default() -> Self {
        Self {
            volume: 1.0,
            output: EffectiveVolume::Audible(1.0),
        }
    }
}

impl VolumeState {
    /// Slider level, independent of mute.
    pub fn volume(&self) -> f64 {
        self.volume
    }

    #[allow(dead_code)]
    pub fn output(&self) -> EffectiveVolume {
        self.output
    }

    pub fn effective(&self) -> f64 {
        self.output.level()
    }

    pub fn is_muted(&self) -> bool {
        matches!(self.output, EffectiveVolume::Muted)
    }

    /// Value shown by the volume slider.
    pub fn slider_value(&self) -> f64 {
        if self.is_muted() {
            0.0
        } else {
            self.volume
        }
    }

    /// Whether the muted glyph should be shown.
    pub fn shows_muted_icon(&self) -> bool {
        self.is_muted() || self.volume == 0.0
    }

    /// Slider input. Reaching zero mutes; leaving zero never unmutes.
    ///
    /// Returns the level to write to the element, or `None` when the input is
    /// not a number.
    pub fn set_volume(&mut self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        let value = value.clamp(0.0, 1.0);
        self.volume = value;
        self.output = match self.output {
            _ if value == 0.0 => EffectiveVolume::Muted,
            EffectiveVolume::Muted => EffectiveVolume::Muted,
            EffectiveVolume::Audible(_) => EffectiveVolume::Audible(value),
        };
        Some(self.effective())
    }

    /// Mute icon click. Returns the level to write to the element.
    pub fn toggle_mute(&mut self) -> f64 {
        self.output = match self.output {
            EffectiveVolume::Muted if self.volume == 0.0 => {
                EffectiveVolume::Audible(UNMUTE_FALLBACK)
            }
            EffectiveVolume::Muted => EffectiveVolume::Audible(self.volume),
            EffectiveVolume::Audible(_) => EffectiveVolume::Muted,
        };
        self.effective()
    }

    /// Adopt a level reported by the element.
    ///
    /// Echoes of our own writes are ignored. Anything else came from outside
    /// (browser chrome, devtools, scripts) and wins.
    pub fn reconcile(&mut self, level: f64) -> bool {
        if !level.is_finite() {
            return false;
        }
        let level = level.clamp(0.0, 1.0);
        if (level - self.effective()).abs() < f64::EPSILON {
            return false;
        }
        if level == 0.0 {
            self.output = EffectiveVolume::Muted;
        } else {
            self.volume = level;
            self.output = EffectiveVolume::Audible(level);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_audible_at_full_level() {
        let state = VolumeState::default();
        assert_eq!(state.volume(), 1.0);
        assert_eq!(state.output(), EffectiveVolume::Audible(1.0));
        assert!(!state.is_muted());
    }

    #[test]
    fn zero_from_slider_mutes() {
        let mut state = VolumeState::default();
        assert_eq!(state.set_volume(0.0), Some(0.0));
        assert!(state.is_muted());
        assert_eq!(state.volume(), 0.0);
        assert_eq!(state.slider_value(), 0.0);
    }

    #[test]
    fn slider_above_zero_keeps_an_existing_mute() {
        let mut state = VolumeState::default();
        state.set_volume(0.0);
        assert_eq!(state.set_volume(0.4), Some(0.0));
        assert!(state.is_muted());
        assert_eq!(state.volume(), 0.4);

        // unmuting afterwards plays at the new slider level
        assert_eq!(state.toggle_mute(), 0.4);
        assert!(!state.is_muted());
    }

    #[test]
    fn mute_preserves_slider_level() {
        let mut state = VolumeState::default();
        state.set_volume(0.6);

        assert_eq!(state.toggle_mute(), 0.0);
        assert!(state.is_muted());
        assert_eq!(state.volume(), 0.6);

        assert_eq!(state.toggle_mute(), 0.6);
        assert_eq!(state.effective(), 0.6);
        assert!(!state.is_muted());
    }

    #[test]
    fn unmute_from_zero_falls_back_to_full_level() {
        let mut state = VolumeState::default();
        state.set_volume(0.0);
        assert_eq!(state.toggle_mute(), UNMUTE_FALLBACK);
        assert_eq!(state.effective(), 1.0);
        assert_eq!(state.volume(), 0.0);
        assert!(state.shows_muted_icon());
    }

    #[test]
    fn out_of_range_input_is_clamped_and_nan_ignored() {
        let mut state = VolumeState::default();
        assert_eq!(state.set_volume(3.0), Some(1.0));
        assert_eq!(state.set_volume(-1.0), Some(0.0));
        assert_eq!(state.set_volume(f64::NAN), None);
        assert_eq!(state.volume(), 0.0);
    }

    #[test]
    fn reconcile_ignores_own_echo_and_adopts_external_levels() {
        let mut state = VolumeState::default();
        state.set_volume(0.5);
        assert!(!state.reconcile(0.5));

        assert!(state.reconcile(0.25));
        assert_eq!(state.output(), EffectiveVolume::Audible(0.25));
        assert_eq!(state.volume(), 0.25);

        assert!(state.reconcile(0.0));
        assert!(state.is_muted());
        assert_eq!(state.volume(), 0.25);
    }
}
