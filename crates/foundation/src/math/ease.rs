//! Timing curves for animations. All curves map `[0, 1]` onto `[0, 1]` and
//! clamp inputs outside that range.

/// Quadratic ease-in/ease-out ("power2.inOut").
pub fn ease_in_out_quad(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * 0.5
    }
}
