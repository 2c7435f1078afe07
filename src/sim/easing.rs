//! Interpolation and easing curves
//!
//! Shared by the particle fade, the brick destroy animation, and the
//! paddle's exponential target tracking. All functions map t in [0, 1]
//! to [0, 1]; inputs outside that range are clamped.

/// Linear interpolation between `a` and `b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

#[inline]
pub fn ease_in_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

#[inline]
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * (2.0 - t)
}

#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let u = 1.0 - t;
    1.0 - u * u * u
}

/// Blend factor for exponential (critically-damped) smoothing toward a
/// target at `rate` per second over a `dt` step.
///
/// Frame-rate independent: chaining two half-steps equals one full step.
#[inline]
pub fn smoothing_factor(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate * dt).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_endpoints() {
        for f in [ease_in_quad, ease_out_quad, ease_out_cubic] {
            assert!(f(0.0).abs() < 1e-6);
            assert!((f(1.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_curves_clamp_out_of_range() {
        assert_eq!(ease_out_quad(-1.0), 0.0);
        assert_eq!(ease_out_quad(2.0), 1.0);
        assert_eq!(lerp(10.0, 20.0, 1.5), 20.0);
    }

    #[test]
    fn test_smoothing_is_frame_rate_independent() {
        let rate = 14.0;
        let full = smoothing_factor(rate, 1.0 / 60.0);
        // Two half steps applied in sequence must land on the same blend
        let half = smoothing_factor(rate, 1.0 / 120.0);
        let chained = 1.0 - (1.0 - half) * (1.0 - half);
        assert!((full - chained).abs() < 1e-5);
    }

    #[test]
    fn test_smoothing_bounds() {
        assert!(smoothing_factor(14.0, 0.0).abs() < 1e-6);
        let f = smoothing_factor(14.0, 10.0);
        assert!(f > 0.999 && f <= 1.0);
    }
}
