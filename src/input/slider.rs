//! Range input control for rate and pitch

/// A stepped numeric range, like an `<input type="range">`
///
/// The slider owns range and step enforcement; the settings it edits store
/// whatever value it produces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slider {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

/// Slider used for both rate and pitch
pub const MULTIPLIER_SLIDER: Slider = Slider {
    min: 0.5,
    max: 2.0,
    step: 0.1,
};

impl Slider {
    /// Move `value` by `steps` increments, snapped and clamped
    pub fn step(&self, value: f32, steps: i32) -> f32 {
        self.snap(value + steps as f32 * self.step)
    }

    /// Clamp to the range and round to the nearest step
    pub fn snap(&self, value: f32) -> f32 {
        let clamped = value.clamp(self.min, self.max);
        let steps = ((clamped - self.min) / self.step).round();
        let snapped = self.min + steps * self.step;
        // Strip float noise: 0.5 + 12 * 0.1 should read back as 1.7
        let scale = (1.0 / self.step).round();
        ((snapped * scale).round() / scale).clamp(self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_up_and_down() {
        assert_eq!(MULTIPLIER_SLIDER.step(1.0, 1), 1.1);
        assert_eq!(MULTIPLIER_SLIDER.step(1.0, -1), 0.9);
        assert_eq!(MULTIPLIER_SLIDER.step(1.6, 1), 1.7);
    }

    #[test]
    fn test_step_clamps() {
        assert_eq!(MULTIPLIER_SLIDER.step(2.0, 1), 2.0);
        assert_eq!(MULTIPLIER_SLIDER.step(0.5, -3), 0.5);
    }

    #[test]
    fn test_snap_off_grid() {
        assert_eq!(MULTIPLIER_SLIDER.snap(1.04), 1.0);
        assert_eq!(MULTIPLIER_SLIDER.snap(1.26), 1.3);
        assert_eq!(MULTIPLIER_SLIDER.snap(7.0), 2.0);
    }
}
