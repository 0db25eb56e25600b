// deck-kit/src/oxml.rs
//
// Copyright © 2024 The deck-kit Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The DrawingML element backing a shape.
//!
//! A [`ShapeElement`] is the typed form of one `<p:sp>`-family element: the non-visual
//! properties (`<p:cNvPr>` id and name, `<p:ph>`), the 2-D transform (`<a:xfrm>` with its
//! `<a:off>`/`<a:ext>` children and `rot` attribute), and enough of the graphic-frame
//! content to tell a table from a chart. Parsing walks the markup with `quick-xml`;
//! serialization emits prefixed DrawingML with the transform where the schema puts it.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{XmlError, XmlValueError};
use crate::simpletypes::{
    SimpleType, StAngle, StCoordinate, StDrawingElementId, StPositiveCoordinate,
};
use crate::units::{Angle, Length};

/// The DrawingML main namespace (`a:`).
pub const NS_DRAWINGML: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
/// The PresentationML main namespace (`p:`).
pub const NS_PRESENTATIONML: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";

/// `<a:graphicData>` URI identifying an embedded table.
pub const GRAPHIC_DATA_URI_TABLE: &str = "http://schemas.openxmlformats.org/drawingml/2006/table";
/// `<a:graphicData>` URI identifying an embedded chart.
pub const GRAPHIC_DATA_URI_CHART: &str = "http://schemas.openxmlformats.org/drawingml/2006/chart";

/// Which of the shape elements this is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeType {
    /// An autoshape or text shape (`p:sp`).
    Shape,
    /// A picture (`p:pic`).
    Picture,
    /// A graphic frame holding a table or chart (`p:graphicFrame`).
    GraphicFrame,
    /// A group of shapes (`p:grpSp`).
    GroupShape,
    /// A connector (`p:cxnSp`).
    Connector,
}

impl ShapeType {
    fn from_local_name(local: &[u8]) -> Option<ShapeType> {
        match local {
            b"sp" => Some(ShapeType::Shape),
            b"pic" => Some(ShapeType::Picture),
            b"graphicFrame" => Some(ShapeType::GraphicFrame),
            b"grpSp" => Some(ShapeType::GroupShape),
            b"cxnSp" => Some(ShapeType::Connector),
            _ => None,
        }
    }

    fn tag(self) -> &'static str {
        match self {
            ShapeType::Shape => "p:sp",
            ShapeType::Picture => "p:pic",
            ShapeType::GraphicFrame => "p:graphicFrame",
            ShapeType::GroupShape => "p:grpSp",
            ShapeType::Connector => "p:cxnSp",
        }
    }

    fn nv_group_tag(self) -> &'static str {
        match self {
            ShapeType::Shape => "p:nvSpPr",
            ShapeType::Picture => "p:nvPicPr",
            ShapeType::GraphicFrame => "p:nvGraphicFramePr",
            ShapeType::GroupShape => "p:nvGrpSpPr",
            ShapeType::Connector => "p:nvCxnSpPr",
        }
    }

    fn cnv_tag(self) -> &'static str {
        match self {
            ShapeType::Shape => "p:cNvSpPr",
            ShapeType::Picture => "p:cNvPicPr",
            ShapeType::GraphicFrame => "p:cNvGraphicFramePr",
            ShapeType::GroupShape => "p:cNvGrpSpPr",
            ShapeType::Connector => "p:cNvCxnSpPr",
        }
    }
}

/// `ST_PlaceholderType`: the role a placeholder inherits from the layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaceholderType {
    /// `title`
    Title,
    /// `ctrTitle`
    CenterTitle,
    /// `subTitle`
    Subtitle,
    /// `body`
    Body,
    /// `obj`, the schema default
    Object,
    /// `dt`
    Date,
    /// `ftr`
    Footer,
    /// `hdr`
    Header,
    /// `sldNum`
    SlideNumber,
    /// `sldImg`
    SlideImage,
    /// `pic`
    Picture,
    /// `clipArt`
    ClipArt,
    /// `chart`
    Chart,
    /// `tbl`
    Table,
    /// `dgm`
    Diagram,
    /// `media`
    Media,
}

impl Default for PlaceholderType {
    fn default() -> PlaceholderType {
        PlaceholderType::Object
    }
}

impl PlaceholderType {
    fn from_xml_value(s: &str) -> Result<PlaceholderType, XmlValueError> {
        match s {
            "title" => Ok(PlaceholderType::Title),
            "ctrTitle" => Ok(PlaceholderType::CenterTitle),
            "subTitle" => Ok(PlaceholderType::Subtitle),
            "body" => Ok(PlaceholderType::Body),
            "obj" => Ok(PlaceholderType::Object),
            "dt" => Ok(PlaceholderType::Date),
            "ftr" => Ok(PlaceholderType::Footer),
            "hdr" => Ok(PlaceholderType::Header),
            "sldNum" => Ok(PlaceholderType::SlideNumber),
            "sldImg" => Ok(PlaceholderType::SlideImage),
            "pic" => Ok(PlaceholderType::Picture),
            "clipArt" => Ok(PlaceholderType::ClipArt),
            "chart" => Ok(PlaceholderType::Chart),
            "tbl" => Ok(PlaceholderType::Table),
            "dgm" => Ok(PlaceholderType::Diagram),
            "media" => Ok(PlaceholderType::Media),
            _ => Err(XmlValueError::Conversion(s.to_string())),
        }
    }

    fn as_xml_value(self) -> &'static str {
        match self {
            PlaceholderType::Title => "title",
            PlaceholderType::CenterTitle => "ctrTitle",
            PlaceholderType::Subtitle => "subTitle",
            PlaceholderType::Body => "body",
            PlaceholderType::Object => "obj",
            PlaceholderType::Date => "dt",
            PlaceholderType::Footer => "ftr",
            PlaceholderType::Header => "hdr",
            PlaceholderType::SlideNumber => "sldNum",
            PlaceholderType::SlideImage => "sldImg",
            PlaceholderType::Picture => "pic",
            PlaceholderType::ClipArt => "clipArt",
            PlaceholderType::Chart => "chart",
            PlaceholderType::Table => "tbl",
            PlaceholderType::Diagram => "dgm",
            PlaceholderType::Media => "media",
        }
    }
}

/// A `<p:ph>` element: placeholder role and layout index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Placeholder {
    /// The placeholder role; `obj` when the attribute is absent.
    pub placeholder_type: PlaceholderType,
    /// The `idx` attribute; 0 when absent.
    pub index: u32,
}

/// The `<a:xfrm>` content: offset, extents, rotation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Transform {
    offset: Option<(Length, Length)>,
    extents: Option<(Length, Length)>,
    rotation: Angle,
}

/// One `<p:sp>`-family element in typed form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShapeElement {
    shape_type: ShapeType,
    shape_id: u32,
    name: String,
    placeholder: Option<Placeholder>,
    transform: Option<Transform>,
    has_text_body: bool,
    graphic_data_uri: Option<String>,
}

impl ShapeElement {
    /// Builds a minimal new element of the given type, as shape creation does.
    ///
    /// A `p:sp` element starts with an empty text body; every other type starts bare.
    pub fn new<S>(shape_type: ShapeType, shape_id: u32, name: S) -> ShapeElement
    where
        S: Into<String>,
    {
        ShapeElement {
            shape_type,
            shape_id,
            name: name.into(),
            placeholder: None,
            transform: None,
            has_text_body: shape_type == ShapeType::Shape,
            graphic_data_uri: None,
        }
    }

    /// Parses one shape element out of its markup.
    pub fn from_xml(xml: &str) -> Result<ShapeElement, XmlError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut parser = ElementParser::default();
        let mut depth = 0usize;
        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    parser.element(&e, depth, false)?;
                    depth += 1;
                }
                Ok(Event::Empty(e)) => parser.element(&e, depth, true)?,
                Ok(Event::End(e)) => {
                    depth = depth.saturating_sub(1);
                    if e.local_name().as_ref() == b"xfrm" {
                        parser.in_xfrm = false;
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(err) => return Err(XmlError::Malformed(err.to_string())),
            }
        }
        parser.finish()
    }

    /// Serializes this element back to markup, namespace declarations included.
    pub fn to_xml(&self) -> String {
        let tag = self.shape_type.tag();
        let mut xml = format!(
            "<{} xmlns:a=\"{}\" xmlns:p=\"{}\">",
            tag, NS_DRAWINGML, NS_PRESENTATIONML
        );

        let nv_tag = self.shape_type.nv_group_tag();
        xml.push_str(&format!("<{}>", nv_tag));
        xml.push_str(&format!(
            "<p:cNvPr id=\"{}\" name=\"{}\"/>",
            self.shape_id,
            escape_xml(&self.name)
        ));
        xml.push_str(&format!("<{}/>", self.shape_type.cnv_tag()));
        match self.placeholder {
            Some(ph) => {
                xml.push_str("<p:nvPr><p:ph");
                if ph.placeholder_type != PlaceholderType::Object {
                    xml.push_str(&format!(" type=\"{}\"", ph.placeholder_type.as_xml_value()));
                }
                if ph.index != 0 {
                    xml.push_str(&format!(" idx=\"{}\"", ph.index));
                }
                xml.push_str("/></p:nvPr>");
            }
            None => xml.push_str("<p:nvPr/>"),
        }
        xml.push_str(&format!("</{}>", nv_tag));

        match self.shape_type {
            // The schema hangs a graphic frame's transform directly off the frame.
            ShapeType::GraphicFrame => {
                self.write_xfrm(&mut xml, "p");
                xml.push_str("<a:graphic>");
                match self.graphic_data_uri {
                    Some(ref uri) => xml.push_str(&format!(
                        "<a:graphicData uri=\"{}\"/>",
                        escape_xml(uri)
                    )),
                    None => xml.push_str("<a:graphicData/>"),
                }
                xml.push_str("</a:graphic>");
            }
            ShapeType::GroupShape => {
                xml.push_str("<p:grpSpPr>");
                self.write_xfrm(&mut xml, "a");
                xml.push_str("</p:grpSpPr>");
            }
            _ => {
                xml.push_str("<p:spPr>");
                self.write_xfrm(&mut xml, "a");
                xml.push_str("</p:spPr>");
            }
        }

        if self.shape_type == ShapeType::Shape && self.has_text_body {
            xml.push_str("<p:txBody><a:bodyPr/><a:p/></p:txBody>");
        }

        xml.push_str(&format!("</{}>", tag));
        xml
    }

    fn write_xfrm(&self, xml: &mut String, prefix: &str) {
        let transform = match self.transform {
            Some(ref transform) => transform,
            None => return,
        };
        xml.push_str(&format!("<{}:xfrm", prefix));
        if transform.rotation != Angle::ZERO {
            xml.push_str(&format!(" rot=\"{}\"", transform.rotation.raw()));
        }
        if transform.offset.is_none() && transform.extents.is_none() {
            xml.push_str("/>");
            return;
        }
        xml.push('>');
        if let Some((x, y)) = transform.offset {
            xml.push_str(&format!("<a:off x=\"{}\" y=\"{}\"/>", x.emu(), y.emu()));
        }
        if let Some((cx, cy)) = transform.extents {
            xml.push_str(&format!("<a:ext cx=\"{}\" cy=\"{}\"/>", cx.emu(), cy.emu()));
        }
        xml.push_str(&format!("</{}:xfrm>", prefix));
    }

    /// Which shape element this is.
    #[inline]
    pub fn shape_type(&self) -> ShapeType {
        self.shape_type
    }

    /// The `<p:cNvPr>` id attribute.
    #[inline]
    pub fn shape_id(&self) -> u32 {
        self.shape_id
    }

    /// The `<p:cNvPr>` name attribute.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replaces the `<p:cNvPr>` name attribute.
    pub fn set_name<S>(&mut self, name: S)
    where
        S: Into<String>,
    {
        self.name = name.into();
    }

    /// The `<p:ph>` element, if present.
    #[inline]
    pub fn placeholder(&self) -> Option<&Placeholder> {
        self.placeholder.as_ref()
    }

    /// Installs or removes the `<p:ph>` element.
    pub fn set_placeholder(&mut self, placeholder: Option<Placeholder>) {
        self.placeholder = placeholder;
    }

    /// The `<a:off>` x coordinate, when the element carries a transform.
    pub fn x(&self) -> Option<Length> {
        self.transform?.offset.map(|(x, _)| x)
    }

    /// The `<a:off>` y coordinate, when the element carries a transform.
    pub fn y(&self) -> Option<Length> {
        self.transform?.offset.map(|(_, y)| y)
    }

    /// The `<a:ext>` cx extent, when the element carries a transform.
    pub fn cx(&self) -> Option<Length> {
        self.transform?.extents.map(|(cx, _)| cx)
    }

    /// The `<a:ext>` cy extent, when the element carries a transform.
    pub fn cy(&self) -> Option<Length> {
        self.transform?.extents.map(|(_, cy)| cy)
    }

    /// The `rot` attribute of the transform; zero when absent.
    pub fn rot(&self) -> Angle {
        self.transform.map_or(Angle::ZERO, |transform| transform.rotation)
    }

    /// Sets the offset x coordinate, adding the transform and offset as needed.
    pub fn set_x(&mut self, value: Length) {
        let transform = self.transform.get_or_insert_with(Transform::default);
        let offset = transform.offset.get_or_insert((Length::ZERO, Length::ZERO));
        offset.0 = value;
    }

    /// Sets the offset y coordinate, adding the transform and offset as needed.
    pub fn set_y(&mut self, value: Length) {
        let transform = self.transform.get_or_insert_with(Transform::default);
        let offset = transform.offset.get_or_insert((Length::ZERO, Length::ZERO));
        offset.1 = value;
    }

    /// Sets the cx extent, adding the transform and extents as needed.
    ///
    /// Extents are positive coordinates; a negative value is rejected.
    pub fn set_cx(&mut self, value: Length) -> Result<(), XmlValueError> {
        StPositiveCoordinate::to_xml(&value)?;
        let transform = self.transform.get_or_insert_with(Transform::default);
        let extents = transform.extents.get_or_insert((Length::ZERO, Length::ZERO));
        extents.0 = value;
        Ok(())
    }

    /// Sets the cy extent, adding the transform and extents as needed.
    ///
    /// Extents are positive coordinates; a negative value is rejected.
    pub fn set_cy(&mut self, value: Length) -> Result<(), XmlValueError> {
        StPositiveCoordinate::to_xml(&value)?;
        let transform = self.transform.get_or_insert_with(Transform::default);
        let extents = transform.extents.get_or_insert((Length::ZERO, Length::ZERO));
        extents.1 = value;
        Ok(())
    }

    /// Sets the transform rotation, adding the transform as needed.
    pub fn set_rot(&mut self, value: Angle) {
        let transform = self.transform.get_or_insert_with(Transform::default);
        transform.rotation = value;
    }

    /// True if the element carries a `<p:txBody>` child of its own.
    #[inline]
    pub fn has_text_body(&self) -> bool {
        self.has_text_body
    }

    /// The `<a:graphicData>` uri of a graphic frame, when present.
    pub fn graphic_data_uri(&self) -> Option<&str> {
        self.graphic_data_uri.as_deref()
    }

    /// Sets the `<a:graphicData>` uri. Only meaningful on a graphic frame.
    pub fn set_graphic_data_uri<S>(&mut self, uri: S)
    where
        S: Into<String>,
    {
        self.graphic_data_uri = Some(uri.into());
    }
}

#[derive(Default)]
struct ElementParser {
    shape_type: Option<ShapeType>,
    shape_id: Option<u32>,
    name: Option<String>,
    placeholder: Option<Placeholder>,
    transform: Option<Transform>,
    has_text_body: bool,
    graphic_data_uri: Option<String>,
    in_xfrm: bool,
    saw_cnvpr: bool,
    saw_xfrm: bool,
}

impl ElementParser {
    fn element(&mut self, e: &BytesStart, depth: usize, is_empty: bool) -> Result<(), XmlError> {
        let local = e.local_name();
        let local = local.as_ref();

        if self.shape_type.is_none() {
            self.shape_type = Some(ShapeType::from_local_name(local).ok_or_else(|| {
                XmlError::UnexpectedElement(String::from_utf8_lossy(local).into_owned())
            })?);
            return Ok(());
        }

        match local {
            // The element's own non-visual properties; children of a group carry their
            // own cNvPr deeper down, which must not clobber the group's.
            b"cNvPr" if depth == 2 && !self.saw_cnvpr => {
                self.saw_cnvpr = true;
                for attr in e.attributes().flatten() {
                    let value = attr_str(&attr.value)?;
                    match attr.key.as_ref() {
                        b"id" => {
                            self.shape_id = Some(StDrawingElementId::from_xml(value).map_err(
                                |source| XmlError::InvalidAttributeValue {
                                    attribute: "id",
                                    source,
                                },
                            )?)
                        }
                        b"name" => self.name = Some(unescape_xml(value)),
                        _ => {}
                    }
                }
            }
            b"ph" if depth == 3 && self.placeholder.is_none() => {
                let mut placeholder = Placeholder::default();
                for attr in e.attributes().flatten() {
                    let value = attr_str(&attr.value)?;
                    match attr.key.as_ref() {
                        b"type" => {
                            placeholder.placeholder_type = PlaceholderType::from_xml_value(value)
                                .map_err(|source| XmlError::InvalidAttributeValue {
                                    attribute: "type",
                                    source,
                                })?
                        }
                        b"idx" => {
                            placeholder.index = StDrawingElementId::from_xml(value).map_err(
                                |source| XmlError::InvalidAttributeValue {
                                    attribute: "idx",
                                    source,
                                },
                            )?
                        }
                        _ => {}
                    }
                }
                self.placeholder = Some(placeholder);
            }
            b"xfrm" if depth <= 2 && !self.saw_xfrm => {
                self.saw_xfrm = true;
                // An empty xfrm never sees a matching end event, so don't latch.
                self.in_xfrm = !is_empty;
                let mut transform = Transform::default();
                for attr in e.attributes().flatten() {
                    if attr.key.as_ref() == b"rot" {
                        transform.rotation = StAngle::from_xml(attr_str(&attr.value)?).map_err(
                            |source| XmlError::InvalidAttributeValue {
                                attribute: "rot",
                                source,
                            },
                        )?;
                    }
                }
                self.transform = Some(transform);
            }
            b"off" if self.in_xfrm => {
                let (x, y) = point_attrs(e, (b"x", "x"), (b"y", "y"))?;
                if let Some(transform) = self.transform.as_mut() {
                    transform.offset = Some((x, y));
                }
            }
            b"ext" if self.in_xfrm => {
                let (cx, cy) = point_attrs(e, (b"cx", "cx"), (b"cy", "cy"))?;
                if let Some(transform) = self.transform.as_mut() {
                    transform.extents = Some((cx, cy));
                }
            }
            b"txBody" if depth == 1 => self.has_text_body = true,
            b"graphicData" if depth == 2 => {
                for attr in e.attributes().flatten() {
                    if attr.key.as_ref() == b"uri" {
                        self.graphic_data_uri = Some(unescape_xml(attr_str(&attr.value)?));
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn finish(self) -> Result<ShapeElement, XmlError> {
        let shape_type = self
            .shape_type
            .ok_or_else(|| XmlError::Malformed("no shape element".to_string()))?;
        if !self.saw_cnvpr {
            return Err(XmlError::MissingElement("p:cNvPr"));
        }
        let shape_id = self.shape_id.ok_or(XmlError::MissingAttribute("id"))?;
        let name = self.name.ok_or(XmlError::MissingAttribute("name"))?;
        Ok(ShapeElement {
            shape_type,
            shape_id,
            name,
            placeholder: self.placeholder,
            transform: self.transform,
            has_text_body: self.has_text_body,
            graphic_data_uri: self.graphic_data_uri,
        })
    }
}

fn attr_str<'a>(value: &'a [u8]) -> Result<&'a str, XmlError> {
    std::str::from_utf8(value)
        .map_err(|_| XmlError::Malformed("attribute value is not UTF-8".to_string()))
}

fn point_attrs(
    e: &BytesStart,
    first: (&[u8], &'static str),
    second: (&[u8], &'static str),
) -> Result<(Length, Length), XmlError> {
    let mut values = (None, None);
    for attr in e.attributes().flatten() {
        let key = attr.key.as_ref();
        let slot = if key == first.0 {
            (&mut values.0, first.1)
        } else if key == second.0 {
            (&mut values.1, second.1)
        } else {
            continue;
        };
        let value = StCoordinate::from_xml(attr_str(&attr.value)?).map_err(|source| {
            XmlError::InvalidAttributeValue {
                attribute: slot.1,
                source,
            }
        })?;
        *slot.0 = Some(value);
    }
    match values {
        (Some(first), Some(second)) => Ok((first, second)),
        _ => Err(XmlError::Malformed(
            "point element is missing a coordinate attribute".to_string(),
        )),
    }
}

/// Escapes the five XML special characters for attribute and text content.
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Reverses [`escape_xml`]. The ampersand goes last so `&amp;lt;` survives.
pub(crate) fn unescape_xml(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
