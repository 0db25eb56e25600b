// deck-kit/src/units.rs
//
// Copyright © 2024 The deck-kit Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Length and angle value types denominated in the document coordinate units.
//!
//! Shape geometry is stored in English Metric Units (EMU), 914,400 to the inch. Rotation is
//! stored in 1/60,000ths of a degree.

use std::fmt::{self, Debug, Formatter};
use std::ops::{Add, Neg, Sub};

/// English Metric Units per inch.
pub const EMU_PER_INCH: i64 = 914_400;
/// English Metric Units per centimeter.
pub const EMU_PER_CM: i64 = 360_000;
/// English Metric Units per millimeter.
pub const EMU_PER_MM: i64 = 36_000;
/// English Metric Units per point (1/72 inch).
pub const EMU_PER_PT: i64 = 12_700;
/// English Metric Units per centipoint (1/100 point).
pub const EMU_PER_CENTIPOINT: i64 = 127;

/// 1/60,000ths of a degree per degree.
pub const ANGLE_UNITS_PER_DEGREE: i64 = 60_000;
/// One full turn in 1/60,000ths of a degree.
pub const ANGLE_UNITS_PER_TURN: i64 = 21_600_000;

/// A length in English Metric Units.
///
/// Construct one from whichever unit is convenient and read it back in any other:
///
///     # use deck_kit::units::{inches, Length};
///     assert_eq!(inches(1.0), Length::from_emu(914_400));
///     assert_eq!(inches(1.0).pt(), 72.0);
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Length(i64);

/// A length of the given number of inches.
#[inline]
pub fn inches(value: f64) -> Length {
    Length((value * EMU_PER_INCH as f64) as i64)
}

/// A length of the given number of points.
#[inline]
pub fn pt(value: f64) -> Length {
    Length((value * EMU_PER_PT as f64) as i64)
}

/// A length of the given number of centimeters.
#[inline]
pub fn cm(value: f64) -> Length {
    Length((value * EMU_PER_CM as f64) as i64)
}

/// A length of the given number of millimeters.
#[inline]
pub fn mm(value: f64) -> Length {
    Length((value * EMU_PER_MM as f64) as i64)
}

/// A length of the given number of centipoints.
#[inline]
pub fn centipoints(value: i64) -> Length {
    Length(value * EMU_PER_CENTIPOINT)
}

impl Length {
    /// A zero length.
    pub const ZERO: Length = Length(0);

    /// Creates a length from a raw EMU count.
    #[inline]
    pub fn from_emu(emu: i64) -> Length {
        Length(emu)
    }

    /// The raw EMU count.
    #[inline]
    pub fn emu(self) -> i64 {
        self.0
    }

    /// This length in inches.
    #[inline]
    pub fn inches(self) -> f64 {
        self.0 as f64 / EMU_PER_INCH as f64
    }

    /// This length in points.
    #[inline]
    pub fn pt(self) -> f64 {
        self.0 as f64 / EMU_PER_PT as f64
    }

    /// This length in centimeters.
    #[inline]
    pub fn cm(self) -> f64 {
        self.0 as f64 / EMU_PER_CM as f64
    }

    /// This length in millimeters.
    #[inline]
    pub fn mm(self) -> f64 {
        self.0 as f64 / EMU_PER_MM as f64
    }

    /// This length in whole centipoints, rounded toward negative infinity.
    #[inline]
    pub fn centipoints(self) -> i64 {
        self.0.div_euclid(EMU_PER_CENTIPOINT)
    }
}

impl Debug for Length {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}emu", self.0)
    }
}

impl Add for Length {
    type Output = Length;
    #[inline]
    fn add(self, other: Length) -> Length {
        Length(self.0 + other.0)
    }
}

impl Sub for Length {
    type Output = Length;
    #[inline]
    fn sub(self, other: Length) -> Length {
        Length(self.0 - other.0)
    }
}

impl Neg for Length {
    type Output = Length;
    #[inline]
    fn neg(self) -> Length {
        Length(-self.0)
    }
}

/// A clockwise rotation in 1/60,000ths of a degree, normalized to one turn.
///
/// Assigning a negative number of degrees wraps: −45° reads back as 315°.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Angle(i32);

impl Angle {
    /// No rotation.
    pub const ZERO: Angle = Angle(0);

    /// Creates an angle from degrees, wrapping into [0°, 360°).
    #[inline]
    pub fn from_degrees(degrees: f64) -> Angle {
        let raw = (degrees * ANGLE_UNITS_PER_DEGREE as f64).round() as i64;
        Angle(raw.rem_euclid(ANGLE_UNITS_PER_TURN) as i32)
    }

    /// Creates an angle from a raw 1/60,000ths-of-a-degree count, wrapping into one turn.
    #[inline]
    pub fn from_raw(raw: i64) -> Angle {
        Angle(raw.rem_euclid(ANGLE_UNITS_PER_TURN) as i32)
    }

    /// The raw 1/60,000ths-of-a-degree count, in [0, 21,600,000).
    #[inline]
    pub fn raw(self) -> i32 {
        self.0
    }

    /// This angle in degrees, in [0.0, 360.0).
    #[inline]
    pub fn degrees(self) -> f64 {
        self.0 as f64 / ANGLE_UNITS_PER_DEGREE as f64
    }
}

impl Debug for Angle {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_unit_conversions() {
        assert_eq!(inches(1.0).emu(), 914_400);
        assert_eq!(inches(0.5).emu(), 457_200);
        assert_eq!(pt(72.0), inches(1.0));
        assert_eq!(cm(2.54).emu(), 914_400);
        assert_eq!(mm(25.4).emu(), 914_400);
        assert_eq!(centipoints(100), pt(1.0));
    }

    #[test]
    fn length_readback() {
        let length = Length::from_emu(914_400);
        assert_eq!(length.inches(), 1.0);
        assert_eq!(length.pt(), 72.0);
        assert_eq!(length.cm(), 2.54);
        assert_eq!(length.centipoints(), 7_200);
    }

    #[test]
    fn length_truncates_toward_zero() {
        // 1/3 pt is not a whole EMU count.
        assert_eq!(pt(1.0 / 3.0).emu(), 4_233);
    }

    #[test]
    fn centipoints_rounds_down() {
        assert_eq!(Length::from_emu(130).centipoints(), 1);
        assert_eq!(Length::from_emu(-130).centipoints(), -2);
    }

    #[test]
    fn length_arithmetic() {
        assert_eq!(inches(1.0) + inches(1.0), inches(2.0));
        assert_eq!(inches(2.0) - inches(0.5), inches(1.5));
        assert_eq!(-inches(1.0), Length::from_emu(-914_400));
    }

    #[test]
    fn angle_from_degrees() {
        assert_eq!(Angle::from_degrees(90.0).raw(), 5_400_000);
        assert_eq!(Angle::from_degrees(90.0).degrees(), 90.0);
    }

    #[test]
    fn negative_angle_wraps() {
        assert_eq!(Angle::from_degrees(-45.0).degrees(), 315.0);
        assert_eq!(Angle::from_degrees(360.0), Angle::ZERO);
        assert_eq!(Angle::from_degrees(405.0).degrees(), 45.0);
    }

    #[test]
    fn raw_angle_wraps() {
        assert_eq!(Angle::from_raw(21_600_000).raw(), 0);
        assert_eq!(Angle::from_raw(-2_700_000).degrees(), 315.0);
    }
}
