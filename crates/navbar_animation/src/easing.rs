//! Easing curves for bar transitions

use serde::{Deserialize, Serialize};

/// Easing curve applied to transition progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    /// The platform default for short view animations
    EaseInOut,
    /// Control points `(x1, y1, x2, y2)` as in CSS `cubic-bezier()`
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Map linear progress (0.0 to 1.0) to eased progress
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::EaseIn => Self::CubicBezier(0.42, 0.0, 1.0, 1.0).apply(t),
            Easing::EaseOut => Self::CubicBezier(0.0, 0.0, 0.58, 1.0).apply(t),
            Easing::EaseInOut => Self::CubicBezier(0.42, 0.0, 0.58, 1.0).apply(t),
            Easing::CubicBezier(x1, y1, x2, y2) => solve_bezier(t, x1, y1, x2, y2),
        }
    }
}

/// Find the curve parameter whose x equals `x` and return its y.
///
/// Newton-Raphson first, bisection when the slope flattens out.
fn solve_bezier(x: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if x <= 0.0 || x >= 1.0 {
        return x;
    }

    let (x, x1, y1, x2, y2) = (x as f64, x1 as f64, y1 as f64, x2 as f64, y2 as f64);
    const EPSILON: f64 = 1e-7;

    let mut p = x;
    for _ in 0..8 {
        let err = curve(p, x1, x2) - x;
        if err.abs() < EPSILON {
            return curve(p, y1, y2) as f32;
        }
        let slope = curve_slope(p, x1, x2);
        if slope.abs() < EPSILON {
            break;
        }
        p = (p - err / slope).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    p = x;
    for _ in 0..24 {
        let sample = curve(p, x1, x2);
        if (sample - x).abs() < EPSILON {
            break;
        }
        if sample < x {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    curve(p, y1, y2) as f32
}

/// One axis of a cubic bezier anchored at (0,0) and (1,1)
#[inline]
fn curve(t: f64, c1: f64, c2: f64) -> f64 {
    let inv = 1.0 - t;
    3.0 * inv * inv * t * c1 + 3.0 * inv * t * t * c2 + t * t * t
}

#[inline]
fn curve_slope(t: f64, c1: f64, c2: f64) -> f64 {
    let inv = 1.0 - t;
    3.0 * inv * inv * c1 + 6.0 * inv * t * (c2 - c1) + 3.0 * t * t * (1.0 - c2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_exact() {
        for easing in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::CubicBezier(0.25, 0.1, 0.25, 1.0),
        ] {
            assert_eq!(easing.apply(0.0), 0.0, "{:?}", easing);
            assert_eq!(easing.apply(1.0), 1.0, "{:?}", easing);
        }
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        let easing = Easing::EaseInOut;
        assert!((easing.apply(0.5) - 0.5).abs() < 1e-3);
        let a = easing.apply(0.2);
        let b = easing.apply(0.8);
        assert!((a + b - 1.0).abs() < 1e-3);
        assert!(a < 0.2);
    }

    #[test]
    fn test_ease_out_leads_linear() {
        assert!(Easing::EaseOut.apply(0.3) > 0.3);
        assert!(Easing::EaseIn.apply(0.3) < 0.3);
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(Easing::Linear.apply(1.5), 1.0);
        assert_eq!(Easing::EaseInOut.apply(-0.5), 0.0);
    }

    #[test]
    fn test_deserialize_from_toml() {
        #[derive(Deserialize)]
        struct Holder {
            easing: Easing,
        }

        let named: Holder = toml::from_str(r#"easing = "ease_in_out""#).unwrap();
        assert_eq!(named.easing, Easing::EaseInOut);

        let bezier: Holder =
            toml::from_str("easing = { cubic_bezier = [0.25, 0.1, 0.25, 1.0] }").unwrap();
        assert_eq!(bezier.easing, Easing::CubicBezier(0.25, 0.1, 0.25, 1.0));
    }
}
