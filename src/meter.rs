use std::time::Instant;

pub const METER_MAX: u16 = 1000;
pub const METER_STEP: u16 = 10;
const TWEEN_SECS: f64 = 1.0;

/// Cosmetic progress gauge: +10 per completed word saturating at 1000, back
/// to zero on any wrong keystroke. The displayed value eases towards the
/// target over one second; game logic never reads it back.
#[derive(Debug, Clone)]
pub struct ProgressMeter {
    target: u16,
    tween_from: f64,
    tween_started: Instant,
}

impl ProgressMeter {
    pub fn new() -> Self {
        Self {
            target: 0,
            tween_from: 0.0,
            tween_started: Instant::now(),
        }
    }

    /// One completed word.
    pub fn advance(&mut self) {
        let next = self.target.saturating_add(METER_STEP).min(METER_MAX);
        self.retarget(next);
    }

    /// A wrong keystroke drops the meter back to the start.
    pub fn reset(&mut self) {
        self.retarget(0);
    }

    fn retarget(&mut self, target: u16) {
        // Start the new tween from wherever the old one currently is, so
        // back-to-back completions stay smooth.
        self.tween_from = self.value();
        self.tween_started = Instant::now();
        self.target = target;
    }

    pub fn target(&self) -> u16 {
        self.target
    }

    /// Displayed value: linear tween from the previous value to the target.
    pub fn value(&self) -> f64 {
        let t = (self.tween_started.elapsed().as_secs_f64() / TWEEN_SECS).min(1.0);
        self.tween_from + (f64::from(self.target) - self.tween_from) * t
    }

    /// Fill ratio in 0.0..=1.0 for the gauge widget.
    pub fn ratio(&self) -> f64 {
        (self.value() / f64::from(METER_MAX)).clamp(0.0, 1.0)
    }
}

impl Default for ProgressMeter {
    fn default() -> Self {
        Self::new()
    }
}
