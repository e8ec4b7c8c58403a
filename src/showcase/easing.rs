/// Quadratic easing curves applied to normalized time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Easing {
    /// Accelerating from zero velocity.
    In,
    /// Decelerating to zero velocity.
    Out,
    /// Accelerating until halfway, then decelerating.
    InOut,
    /// No easing; instant steps use this.
    Linear,
}

impl Easing {
    /// Map `t` in [0, 1] through the curve. Input outside the range is
    /// clamped first.
    pub(crate) fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::In => t * t,
            Self::Out => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 2.0 * (1.0 - t) * (1.0 - t)
                }
            }
            Self::Linear => t,
        }
    }
}

/// Linear interpolation between two values at eased position `t`.
pub(crate) fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Easing::In)]
    #[case(Easing::Out)]
    #[case(Easing::InOut)]
    #[case(Easing::Linear)]
    fn test_endpoints(#[case] easing: Easing) {
        assert_eq!(easing.apply(0.0), 0.0);
        assert_eq!(easing.apply(1.0), 1.0);
    }

    #[rstest]
    #[case(Easing::In)]
    #[case(Easing::Out)]
    #[case(Easing::InOut)]
    fn test_monotonic(#[case] easing: Easing) {
        let mut previous = 0.0;
        for step in 1..=100 {
            let value = easing.apply(step as f32 / 100.0);
            assert!(value >= previous, "{easing:?} not monotonic at step {step}");
            previous = value;
        }
    }

    #[test]
    fn test_out_of_range_input_is_clamped() {
        assert_eq!(Easing::In.apply(-1.0), 0.0);
        assert_eq!(Easing::In.apply(2.0), 1.0);
    }

    #[test]
    fn test_in_out_midpoint() {
        assert!((Easing::InOut.apply(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, -100.0, 0.5), -50.0);
        assert_eq!(lerp(100.0, 0.0, 1.0), 0.0);
    }
}
