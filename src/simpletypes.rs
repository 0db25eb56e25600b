// deck-kit/src/simpletypes.rs
//
// Copyright © 2024 The deck-kit Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Conversion and validation between XML attribute strings and typed values.
//!
//! Each simple type corresponds to an `<xsd:simpleType>` in the DrawingML schema. Reading goes
//! through [`SimpleType::from_xml`]; writing validates the value first and then serializes it.

use std::convert::TryFrom;

use crate::error::XmlValueError;
use crate::units::{Angle, Length};

/// An XML schema simple type: a typed value with a defined attribute string form.
pub trait SimpleType {
    /// The in-memory value type.
    type Value;

    /// Converts the attribute string form to the typed value.
    fn convert_from_xml(s: &str) -> Result<Self::Value, XmlValueError>;

    /// Converts a typed value to its attribute string form.
    fn convert_to_xml(value: &Self::Value) -> String;

    /// Rejects values the simple type cannot represent.
    fn validate(_value: &Self::Value) -> Result<(), XmlValueError> {
        Ok(())
    }

    /// Reads a typed value from an attribute string.
    fn from_xml(s: &str) -> Result<Self::Value, XmlValueError> {
        Self::convert_from_xml(s)
    }

    /// Validates and serializes a typed value to an attribute string.
    fn to_xml(value: &Self::Value) -> Result<String, XmlValueError> {
        Self::validate(value)?;
        Ok(Self::convert_to_xml(value))
    }
}

/// Strict decimal integer conversion.
///
/// Accepts an optional sign followed by decimal digits; leading zeros are fine. Everything
/// else, including the empty string, floats, and hex forms, is a conversion error.
pub(crate) fn parse_int(s: &str) -> Result<i64, XmlValueError> {
    s.parse::<i64>()
        .map_err(|_| XmlValueError::Conversion(s.to_string()))
}

/// `ST_Coordinate`: a signed EMU coordinate.
pub struct StCoordinate;

impl SimpleType for StCoordinate {
    type Value = Length;

    fn convert_from_xml(s: &str) -> Result<Length, XmlValueError> {
        parse_int(s).map(Length::from_emu)
    }

    fn convert_to_xml(value: &Length) -> String {
        value.emu().to_string()
    }
}

/// `ST_PositiveCoordinate`: a non-negative EMU extent.
pub struct StPositiveCoordinate;

impl SimpleType for StPositiveCoordinate {
    type Value = Length;

    fn convert_from_xml(s: &str) -> Result<Length, XmlValueError> {
        parse_int(s).map(Length::from_emu)
    }

    fn convert_to_xml(value: &Length) -> String {
        value.emu().to_string()
    }

    fn validate(value: &Length) -> Result<(), XmlValueError> {
        if value.emu() < 0 {
            return Err(XmlValueError::OutOfRange(format!(
                "{} is not a positive coordinate",
                value.emu()
            )));
        }
        Ok(())
    }
}

/// `ST_Angle`: a rotation in 1/60,000ths of a degree, wrapped to one turn on read and write.
pub struct StAngle;

impl SimpleType for StAngle {
    type Value = Angle;

    fn convert_from_xml(s: &str) -> Result<Angle, XmlValueError> {
        parse_int(s).map(Angle::from_raw)
    }

    fn convert_to_xml(value: &Angle) -> String {
        value.raw().to_string()
    }
}

/// `ST_DrawingElementId`: a 32-bit shape identifier.
pub struct StDrawingElementId;

impl SimpleType for StDrawingElementId {
    type Value = u32;

    fn convert_from_xml(s: &str) -> Result<u32, XmlValueError> {
        let value = parse_int(s)?;
        u32::try_from(value).map_err(|_| XmlValueError::OutOfRange(value.to_string()))
    }

    fn convert_to_xml(value: &u32) -> String {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_decimal_strings() {
        assert_eq!(parse_int("42"), Ok(42));
        assert_eq!(parse_int("-42"), Ok(-42));
        assert_eq!(parse_int("-0042"), Ok(-42));
    }

    #[test]
    fn rejects_non_decimal_strings() {
        for s in &["", "foo", "42.42", "0x0a3"] {
            assert_eq!(parse_int(s), Err(XmlValueError::Conversion(s.to_string())));
        }
    }

    #[test]
    fn coordinate_round_trip() {
        let value = StCoordinate::from_xml("914400").unwrap();
        assert_eq!(value, Length::from_emu(914_400));
        assert_eq!(StCoordinate::to_xml(&value).unwrap(), "914400");
        assert_eq!(
            StCoordinate::to_xml(&Length::from_emu(-42)).unwrap(),
            "-42"
        );
    }

    #[test]
    fn to_xml_is_plain_decimal() {
        assert_eq!(StCoordinate::to_xml(&Length::from_emu(0x2A)).unwrap(), "42");
    }

    #[test]
    fn positive_coordinate_rejects_negative_values() {
        assert!(StPositiveCoordinate::to_xml(&Length::from_emu(-1)).is_err());
        assert_eq!(
            StPositiveCoordinate::to_xml(&Length::from_emu(0)).unwrap(),
            "0"
        );
    }

    #[test]
    fn angle_wraps_on_read() {
        assert_eq!(StAngle::from_xml("5400000").unwrap().degrees(), 90.0);
        assert_eq!(StAngle::from_xml("-2700000").unwrap().degrees(), 315.0);
        assert_eq!(StAngle::from_xml("21600000").unwrap(), Angle::ZERO);
    }

    #[test]
    fn angle_serializes_normalized() {
        let angle = Angle::from_degrees(-45.0);
        assert_eq!(StAngle::to_xml(&angle).unwrap(), "18900000");
    }

    #[test]
    fn drawing_element_id_bounds() {
        assert_eq!(StDrawingElementId::from_xml("2").unwrap(), 2);
        assert!(StDrawingElementId::from_xml("-1").is_err());
        assert!(StDrawingElementId::from_xml("4294967296").is_err());
    }
}
