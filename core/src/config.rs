use core::time::Duration;
use serde::{Deserialize, Serialize};

/// Delays driving every scheduled effect of the engine.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Timings {
    /// Wait before the first reveal of a fresh game.
    pub first_lead_in: Duration,
    /// Wait before the reveal of any later attempt.
    pub lead_in: Duration,
    /// Length of a single flip-in or flip-out.
    pub flip: Duration,
    /// How long targets stay fully visible per pulse.
    pub hold: Duration,
    /// Gap between the two pulses.
    pub pause: Duration,
    /// Lifetime of the per-cell "selecting" flag.
    pub select_flash: Duration,
    /// Lifetime of the error flash after a lost attempt.
    pub error_flash: Duration,
    /// Delay between a lost attempt and its retry.
    pub retry_delay: Duration,
    /// Delay between a completed level and the next one.
    pub advance_delay: Duration,
}

impl Timings {
    const MIN_SCALE: f32 = 0.05;
    const MAX_SCALE: f32 = 20.0;

    /// Every delay multiplied by `factor`, clamped to a sane range.
    pub fn scaled(self, factor: f32) -> Self {
        if !factor.is_finite() {
            log::warn!("Ignoring non-finite timing scale {}", factor);
            return self;
        }
        let factor = factor.clamp(Self::MIN_SCALE, Self::MAX_SCALE);
        let scale = |d: Duration| d.mul_f32(factor);
        Self {
            first_lead_in: scale(self.first_lead_in),
            lead_in: scale(self.lead_in),
            flip: scale(self.flip),
            hold: scale(self.hold),
            pause: scale(self.pause),
            select_flash: scale(self.select_flash),
            error_flash: scale(self.error_flash),
            retry_delay: scale(self.retry_delay),
            advance_delay: scale(self.advance_delay),
        }
    }

    /// Total time from `start_level` until the board accepts input.
    pub fn reveal_duration(&self, first: bool) -> Duration {
        let lead_in = if first { self.first_lead_in } else { self.lead_in };
        lead_in + self.flip * 4 + self.hold * 2 + self.pause
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            first_lead_in: Duration::from_millis(1000),
            lead_in: Duration::from_millis(400),
            flip: Duration::from_millis(300),
            hold: Duration::from_millis(600),
            pause: Duration::from_millis(300),
            select_flash: Duration::from_millis(200),
            error_flash: Duration::from_millis(500),
            retry_delay: Duration::from_millis(600),
            advance_delay: Duration::from_millis(800),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub timings: Timings,
    /// Debug aid: keep targets visible in snapshots outside of `Showing`.
    pub reveal_targets: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_reveal_takes_longer_on_first_level() {
        let timings = Timings::default();
        assert_eq!(timings.reveal_duration(true), Duration::from_millis(3700));
        assert_eq!(timings.reveal_duration(false), Duration::from_millis(3100));
    }

    #[test]
    fn scaling_clamps_and_ignores_nan() {
        let timings = Timings::default();
        assert_eq!(timings.scaled(0.5).hold.as_millis(), 300);
        assert_eq!(timings.scaled(f32::NAN), timings);
        assert!(timings.scaled(0.0).hold > Duration::ZERO);
    }
}
