//! Easing curves
//!
//! Same curves as CSS transition timing functions.

/// Tween easing function
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    Linear,
    Ease,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
    /// cubic-bezier(x1, y1, x2, y2)
    CubicBezier(f64, f64, f64, f64),
}

impl Easing {
    /// Eased progress for linear progress `t` in 0.0..=1.0
    pub fn evaluate(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, t),
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

/// Solve the curve for `x = t` with Newton-Raphson, then sample y
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, t: f64) -> f64 {
    let mut guess = t;
    for _ in 0..8 {
        let x = bezier_component(x1, x2, guess) - t;
        if x.abs() < 1e-6 {
            break;
        }
        let dx = bezier_derivative(x1, x2, guess);
        if dx.abs() < 1e-6 {
            break;
        }
        guess = (guess - x / dx).clamp(0.0, 1.0);
    }
    bezier_component(y1, y2, guess)
}

fn bezier_component(p1: f64, p2: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t
}

fn bezier_derivative(p1: f64, p2: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::Ease,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
        ] {
            assert!(easing.evaluate(0.0).abs() < 1e-3, "{easing:?} at 0");
            assert!((easing.evaluate(1.0) - 1.0).abs() < 1e-3, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_ease_out_leads_linear() {
        assert!(Easing::EaseOut.evaluate(0.3) > 0.3);
        assert!(Easing::EaseIn.evaluate(0.3) < 0.3);
        assert_eq!(Easing::Linear.evaluate(1.5), 1.0);
    }
}
