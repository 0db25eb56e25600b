// deck-kit/src/shape.rs
//
// Copyright © 2024 The deck-kit Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The base shape type: a property facade over the backing XML element.

use crate::error::{XmlError, XmlValueError};
use crate::oxml::{
    Placeholder, ShapeElement, ShapeType, GRAPHIC_DATA_URI_CHART, GRAPHIC_DATA_URI_TABLE,
};
use crate::units::{Angle, Length};

/// A shape on a slide: an autoshape, picture, graphic frame, group, or connector.
///
/// All state lives in the backing [`ShapeElement`]; the accessors here are the slide-facing
/// view of it. Geometry reads return `None` when the element carries no transform of its
/// own, which is how a placeholder inherits position and size from its layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shape {
    element: ShapeElement,
}

impl Shape {
    /// Wraps an existing element.
    #[inline]
    pub fn new(element: ShapeElement) -> Shape {
        Shape { element }
    }

    /// Parses a shape from its markup.
    pub fn from_xml(xml: &str) -> Result<Shape, XmlError> {
        Ok(Shape::new(ShapeElement::from_xml(xml)?))
    }

    /// Serializes the backing element.
    pub fn to_xml(&self) -> String {
        self.element.to_xml()
    }

    /// The backing XML element for this shape.
    #[inline]
    pub fn element(&self) -> &ShapeElement {
        &self.element
    }

    /// Mutable access to the backing XML element.
    #[inline]
    pub fn element_mut(&mut self) -> &mut ShapeElement {
        &mut self.element
    }

    /// Read-only positive integer identifying this shape, unique among the shapes on a
    /// slide.
    #[inline]
    pub fn id(&self) -> u32 {
        self.element.shape_id()
    }

    /// Name of this shape, e.g. "Picture 7".
    #[inline]
    pub fn name(&self) -> &str {
        self.element.name()
    }

    /// Renames this shape.
    pub fn set_name<S>(&mut self, name: S)
    where
        S: Into<String>,
    {
        self.element.set_name(name);
    }

    /// Distance of the left edge of this shape from the left edge of the slide.
    ///
    /// `None` when the element has no transform and the position is inherited.
    #[inline]
    pub fn left(&self) -> Option<Length> {
        self.element.x()
    }

    /// Moves the left edge of this shape.
    pub fn set_left(&mut self, value: Length) {
        self.element.set_x(value);
    }

    /// Distance of the top edge of this shape from the top edge of the slide.
    #[inline]
    pub fn top(&self) -> Option<Length> {
        self.element.y()
    }

    /// Moves the top edge of this shape.
    pub fn set_top(&mut self, value: Length) {
        self.element.set_y(value);
    }

    /// Distance between the left and right extents of this shape.
    #[inline]
    pub fn width(&self) -> Option<Length> {
        self.element.cx()
    }

    /// Resizes this shape horizontally. Widths cannot be negative.
    pub fn set_width(&mut self, value: Length) -> Result<(), XmlValueError> {
        self.element.set_cx(value)
    }

    /// Distance between the top and bottom extents of this shape.
    #[inline]
    pub fn height(&self) -> Option<Length> {
        self.element.cy()
    }

    /// Resizes this shape vertically. Heights cannot be negative.
    pub fn set_height(&mut self, value: Length) -> Result<(), XmlValueError> {
        self.element.set_cy(value)
    }

    /// Degrees of clockwise rotation, in [0.0, 360.0).
    #[inline]
    pub fn rotation(&self) -> f64 {
        self.element.rot().degrees()
    }

    /// Rotates this shape. Negative values indicate counter-clockwise rotation and wrap;
    /// assigning −45.0 changes the setting to 315.0.
    pub fn set_rotation(&mut self, degrees: f64) {
        self.element.set_rot(Angle::from_degrees(degrees));
    }

    /// True if this shape is a placeholder: it has a `<p:ph>` element and inherits from
    /// the slide layout.
    #[inline]
    pub fn is_placeholder(&self) -> bool {
        self.element.placeholder().is_some()
    }

    /// The placeholder role and index, when this shape is a placeholder.
    #[inline]
    pub fn placeholder(&self) -> Option<&Placeholder> {
        self.element.placeholder()
    }

    /// Which kind of shape this is.
    #[inline]
    pub fn shape_type(&self) -> ShapeType {
        self.element.shape_type()
    }

    /// True if this shape can contain text. Only a `p:sp` shape has a text frame.
    #[inline]
    pub fn has_text_frame(&self) -> bool {
        self.element.shape_type() == ShapeType::Shape
    }

    /// True if this shape is a graphic frame containing a chart.
    #[inline]
    pub fn has_chart(&self) -> bool {
        self.element.shape_type() == ShapeType::GraphicFrame
            && self.element.graphic_data_uri() == Some(GRAPHIC_DATA_URI_CHART)
    }

    /// True if this shape is a graphic frame containing a table.
    #[inline]
    pub fn has_table(&self) -> bool {
        self.element.shape_type() == ShapeType::GraphicFrame
            && self.element.graphic_data_uri() == Some(GRAPHIC_DATA_URI_TABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{inches, Length};

    fn picture_xml() -> &'static str {
        r#"<p:pic><p:nvPicPr><p:cNvPr id="7" name="Picture 6"/><p:cNvPicPr/><p:nvPr/></p:nvPicPr><p:spPr><a:xfrm rot="18900000"><a:off x="914400" y="457200"/><a:ext cx="1828800" cy="914400"/></a:xfrm></p:spPr></p:pic>"#
    }

    #[test]
    fn exposes_identity() {
        let shape = Shape::from_xml(picture_xml()).unwrap();
        assert_eq!(shape.id(), 7);
        assert_eq!(shape.name(), "Picture 6");
        assert_eq!(shape.shape_type(), ShapeType::Picture);
    }

    #[test]
    fn renames() {
        let mut shape = Shape::from_xml(picture_xml()).unwrap();
        shape.set_name("Logo");
        assert_eq!(shape.name(), "Logo");
        let reparsed = Shape::from_xml(&shape.to_xml()).unwrap();
        assert_eq!(reparsed.name(), "Logo");
    }

    #[test]
    fn reads_geometry_in_emu() {
        let shape = Shape::from_xml(picture_xml()).unwrap();
        assert_eq!(shape.left(), Some(inches(1.0)));
        assert_eq!(shape.top(), Some(inches(0.5)));
        assert_eq!(shape.width(), Some(inches(2.0)));
        assert_eq!(shape.height(), Some(inches(1.0)));
    }

    #[test]
    fn writes_geometry() {
        let mut shape = Shape::from_xml(picture_xml()).unwrap();
        shape.set_left(inches(3.0));
        shape.set_width(inches(4.0)).unwrap();
        assert_eq!(shape.left(), Some(inches(3.0)));
        assert_eq!(shape.width(), Some(inches(4.0)));
        assert!(shape.set_width(Length::from_emu(-1)).is_err());
    }

    #[test]
    fn inherited_geometry_reads_as_none() {
        let xml = r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr/><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:spPr/></p:sp>"#;
        let mut shape = Shape::from_xml(xml).unwrap();
        assert!(shape.is_placeholder());
        assert_eq!(shape.left(), None);
        assert_eq!(shape.height(), None);

        // Setting a position gives the placeholder a transform of its own.
        shape.set_left(inches(1.0));
        assert_eq!(shape.left(), Some(inches(1.0)));
        assert_eq!(shape.width(), None);
    }

    #[test]
    fn rotation_wraps() {
        let mut shape = Shape::from_xml(picture_xml()).unwrap();
        assert_eq!(shape.rotation(), 315.0);
        shape.set_rotation(-45.0);
        assert_eq!(shape.rotation(), 315.0);
        shape.set_rotation(90.0);
        assert_eq!(shape.rotation(), 90.0);
    }

    #[test]
    fn content_probes() {
        let sp = Shape::from_xml(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="1" name="Shape"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr/></p:sp>"#,
        )
        .unwrap();
        assert!(sp.has_text_frame());
        assert!(!sp.has_chart());
        assert!(!sp.has_table());

        let frame = Shape::from_xml(
            r#"<p:graphicFrame><p:nvGraphicFramePr><p:cNvPr id="2" name="Chart 1"/><p:cNvGraphicFramePr/><p:nvPr/></p:nvGraphicFramePr><p:xfrm/><a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/chart"/></a:graphic></p:graphicFrame>"#,
        )
        .unwrap();
        assert!(!frame.has_text_frame());
        assert!(frame.has_chart());
        assert!(!frame.has_table());
    }

    #[test]
    fn builds_a_new_shape() {
        let mut shape = Shape::new(ShapeElement::new(ShapeType::Shape, 14, "TextBox 13"));
        shape.set_left(inches(1.0));
        shape.set_top(inches(2.0));
        shape.set_width(inches(3.0)).unwrap();
        shape.set_height(inches(0.5)).unwrap();

        let reparsed = Shape::from_xml(&shape.to_xml()).unwrap();
        assert_eq!(reparsed, shape);
        assert_eq!(reparsed.rotation(), 0.0);
        assert!(reparsed.has_text_frame());
    }
}
