//! L4 Atomic Layer: easing curves
//!
//! Every curve maps progress 0 to 0 and 1 to 1. `Elastic` overshoots in
//! between, so callers must not assume the output stays inside [0, 1].

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

/// Easing curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    Linear,
    /// f(t) = 1 - (1-t)³
    #[default]
    Cubic,
    /// Quadratic ease-in-out ("power1.inOut")
    PowerInOut,
    /// Damped oscillation ("elastic.out(0.6, 0.9)")
    Elastic,
}

impl EasingType {
    /// Apply the curve to a progress value; input is clamped to [0, 1]
    #[inline]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::Linear => t,
            EasingType::Cubic => cubic_ease_out(t),
            EasingType::PowerInOut => quad_ease_in_out(t),
            EasingType::Elastic => elastic_ease_out(t, 0.6, 0.9),
        }
    }
}

#[inline]
fn cubic_ease_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

#[inline]
fn quad_ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        let inv = -2.0 * t + 2.0;
        1.0 - inv * inv / 2.0
    }
}

/// Elastic ease-out with amplitude and period
///
/// An amplitude below 1 lengthens the effective period instead of lowering
/// the overshoot.
fn elastic_ease_out(t: f64, amplitude: f64, period: f64) -> f64 {
    if t >= 1.0 {
        return 1.0;
    }
    let amp = amplitude.max(1.0);
    let span = period / amplitude.min(1.0);
    let shift = span / TAU * (1.0 / amp).asin();
    let omega = TAU / span;
    amp * 2.0_f64.powf(-10.0 * t) * ((t - shift) * omega).sin() + 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const ALL: [EasingType; 4] = [
        EasingType::Linear,
        EasingType::Cubic,
        EasingType::PowerInOut,
        EasingType::Elastic,
    ];

    #[test]
    fn test_easing_boundaries() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-3, "{:?} at t=0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-3, "{:?} at t=1", easing);
        }
    }

    #[test]
    fn test_easing_monotonic() {
        for easing in [EasingType::Linear, EasingType::Cubic, EasingType::PowerInOut] {
            let mut prev = 0.0;
            for i in 0..=10 {
                let t = i as f64 / 10.0;
                let v = easing.apply(t);
                assert!(v >= prev, "{:?} not monotonic at t={}", easing, t);
                prev = v;
            }
        }
    }

    #[test]
    fn test_power_in_out_symmetric() {
        let e = EasingType::PowerInOut;
        assert!((e.apply(0.5) - 0.5).abs() < 1e-9);
        assert!((e.apply(0.25) + e.apply(0.75) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_elastic_overshoots() {
        let peak = (1..100)
            .map(|i| EasingType::Elastic.apply(i as f64 / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
        // Starting phase sits at a quarter wave
        assert!((elastic_ease_out(0.0, 0.6, 0.9) - (1.0 - (FRAC_PI_2).sin())).abs() < 1e-9);
    }

    #[test]
    fn test_clamps_input() {
        assert_eq!(EasingType::Linear.apply(-1.0), 0.0);
        assert_eq!(EasingType::Linear.apply(2.0), 1.0);
    }
}
