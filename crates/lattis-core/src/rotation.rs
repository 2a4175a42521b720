//! Canonical Z-axis rotations.

use std::fmt;

/// One of the four canonical Z-axis (yaw) rotations.
///
/// Options compare and hash by value, so rotations need a single
/// stable representation: arbitrary angles are folded onto this set by
/// [`Yaw::from_degrees`]. Equivalent angles (-180 vs 180, 450 vs 90)
/// canonicalize to the same variant, which keeps option equality
/// stable across floating-point round trips.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Yaw {
    /// 0 degrees.
    #[default]
    Deg0,
    /// 90 degrees clockwise.
    Deg90,
    /// 180 degrees.
    Deg180,
    /// 270 degrees clockwise.
    Deg270,
}

impl Yaw {
    /// All four rotations in clockwise order.
    pub const ALL: [Yaw; 4] = [Yaw::Deg0, Yaw::Deg90, Yaw::Deg180, Yaw::Deg270];

    /// Sanitize an arbitrary yaw angle onto the canonical set.
    ///
    /// Rounds half-to-even to the nearest multiple of 90 degrees and
    /// reduces modulo 360. Non-finite input folds to [`Yaw::Deg0`].
    pub fn from_degrees(degrees: f64) -> Yaw {
        if !degrees.is_finite() {
            return Yaw::Deg0;
        }
        let quarter = (degrees / 90.0).round_ties_even().rem_euclid(4.0);
        match quarter as u8 % 4 {
            0 => Yaw::Deg0,
            1 => Yaw::Deg90,
            2 => Yaw::Deg180,
            _ => Yaw::Deg270,
        }
    }

    /// The angle in degrees, in `[0, 360)`.
    pub fn degrees(self) -> f64 {
        match self {
            Yaw::Deg0 => 0.0,
            Yaw::Deg90 => 90.0,
            Yaw::Deg180 => 180.0,
            Yaw::Deg270 => 270.0,
        }
    }

    /// Rotate a further 90 degrees clockwise.
    pub fn rotated_cw(self) -> Yaw {
        match self {
            Yaw::Deg0 => Yaw::Deg90,
            Yaw::Deg90 => Yaw::Deg180,
            Yaw::Deg180 => Yaw::Deg270,
            Yaw::Deg270 => Yaw::Deg0,
        }
    }
}

impl fmt::Display for Yaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn canonical_angles_round_trip() {
        for yaw in Yaw::ALL {
            assert_eq!(Yaw::from_degrees(yaw.degrees()), yaw);
        }
    }

    #[test]
    fn negative_half_turn_equals_positive() {
        assert_eq!(Yaw::from_degrees(-180.0), Yaw::from_degrees(180.0));
    }

    #[test]
    fn full_turns_are_folded() {
        assert_eq!(Yaw::from_degrees(450.0), Yaw::Deg90);
        assert_eq!(Yaw::from_degrees(-90.0), Yaw::Deg270);
        assert_eq!(Yaw::from_degrees(720.0), Yaw::Deg0);
    }

    #[test]
    fn midpoints_round_half_to_even() {
        // 45 / 90 = 0.5 rounds to 0; 135 / 90 = 1.5 rounds to 2.
        assert_eq!(Yaw::from_degrees(45.0), Yaw::Deg0);
        assert_eq!(Yaw::from_degrees(135.0), Yaw::Deg180);
    }

    #[test]
    fn non_finite_folds_to_zero() {
        assert_eq!(Yaw::from_degrees(f64::NAN), Yaw::Deg0);
        assert_eq!(Yaw::from_degrees(f64::INFINITY), Yaw::Deg0);
    }

    #[test]
    fn rotated_cw_four_times_is_identity() {
        for yaw in Yaw::ALL {
            assert_eq!(
                yaw.rotated_cw().rotated_cw().rotated_cw().rotated_cw(),
                yaw
            );
        }
    }

    proptest! {
        #[test]
        fn equivalent_angles_canonicalize_identically(deg in -7200.0f64..7200.0) {
            let a = Yaw::from_degrees(deg);
            let b = Yaw::from_degrees(deg + 360.0);
            let c = Yaw::from_degrees(deg - 360.0);
            prop_assert_eq!(a, b);
            prop_assert_eq!(a, c);
        }
    }
}
