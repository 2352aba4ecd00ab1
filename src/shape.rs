// src/shape.rs
//
// The capability set every shape kind implements, plus the closed set of
// kinds used when a record has to be dispatched by its tag.

use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::circle::Circle;
use crate::config::ShapeConfig;
use crate::error::{ShapeError, ShapeResult};
use crate::geom::{Point, Rect};
use crate::text::TextCursor;

/// Common contract of every geometric shape.
///
/// The binary and text forms carry no kind tag; framing is left to the
/// caller (see [`ShapeCodec`](crate::ShapeCodec)). Decoders only touch
/// `self` once every field of the record has been read.
pub trait Shape: fmt::Debug {
    fn kind(&self) -> ShapeKind;

    /// Append the untagged binary payload.
    fn write(&self, out: &mut dyn Write) -> ShapeResult<()>;

    /// Replace `self` with the next binary payload from `input`.
    fn read_fields(&mut self, input: &mut dyn Read) -> ShapeResult<()>;

    /// Append the text form, ending in the record terminator.
    fn to_text(&self, text: &mut Vec<u8>);

    fn from_text(&mut self, text: &mut TextCursor<'_>) -> ShapeResult<()>;

    /// Minimum bounding rectangle.
    fn mbr(&self) -> Rect;

    fn distance_to(&self, x: f64, y: f64) -> f64;

    /// Conservative test: may report true for shapes that only share
    /// bounding-box area.
    fn is_intersected(&self, other: &dyn Shape) -> bool;

    fn clone_shape(&self) -> Box<dyn Shape>;

    fn validate(&self, _config: &ShapeConfig) -> ShapeResult<()> {
        Ok(())
    }
}

impl Clone for Box<dyn Shape> {
    fn clone(&self) -> Self {
        self.clone_shape()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ShapeKind {
    Point = 0,
    Rect = 1,
    Circle = 2,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Point, ShapeKind::Rect, ShapeKind::Circle];

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Point => "point",
            ShapeKind::Rect => "rect",
            ShapeKind::Circle => "circle",
        }
    }

    /// Size in bytes of the untagged binary payload.
    pub fn payload_len(self) -> usize {
        match self {
            ShapeKind::Point => 16,
            ShapeKind::Rect => 32,
            ShapeKind::Circle => 24,
        }
    }
}

impl TryFrom<u8> for ShapeKind {
    type Error = ShapeError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(ShapeKind::Point),
            1 => Ok(ShapeKind::Rect),
            2 => Ok(ShapeKind::Circle),
            other => Err(ShapeError::UnknownKind(other)),
        }
    }
}

impl FromStr for ShapeKind {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "point" => Ok(ShapeKind::Point),
            "rect" | "rectangle" => Ok(ShapeKind::Rect),
            "circle" => Ok(ShapeKind::Circle),
            _ => Err(ShapeError::UnknownKindName(s.to_string())),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One shape of any known kind.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AnyShape {
    Point(Point),
    Rect(Rect),
    Circle(Circle),
}

impl AnyShape {
    /// Default-valued shape of `kind`, ready to be decoded into.
    pub fn empty(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Point => AnyShape::Point(Point::default()),
            ShapeKind::Rect => AnyShape::Rect(Rect::default()),
            ShapeKind::Circle => AnyShape::Circle(Circle::default()),
        }
    }

    pub fn as_circle(&self) -> Option<&Circle> {
        match self {
            AnyShape::Circle(c) => Some(c),
            _ => None,
        }
    }

    fn inner(&self) -> &dyn Shape {
        match self {
            AnyShape::Point(p) => p,
            AnyShape::Rect(r) => r,
            AnyShape::Circle(c) => c,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Shape {
        match self {
            AnyShape::Point(p) => p,
            AnyShape::Rect(r) => r,
            AnyShape::Circle(c) => c,
        }
    }
}

impl From<Point> for AnyShape {
    fn from(p: Point) -> Self {
        AnyShape::Point(p)
    }
}

impl From<Rect> for AnyShape {
    fn from(r: Rect) -> Self {
        AnyShape::Rect(r)
    }
}

impl From<Circle> for AnyShape {
    fn from(c: Circle) -> Self {
        AnyShape::Circle(c)
    }
}

impl fmt::Display for AnyShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyShape::Point(p) => fmt::Display::fmt(p, f),
            AnyShape::Rect(r) => fmt::Display::fmt(r, f),
            AnyShape::Circle(c) => fmt::Display::fmt(c, f),
        }
    }
}

impl Shape for AnyShape {
    fn kind(&self) -> ShapeKind {
        self.inner().kind()
    }

    fn write(&self, out: &mut dyn Write) -> ShapeResult<()> {
        self.inner().write(out)
    }

    fn read_fields(&mut self, input: &mut dyn Read) -> ShapeResult<()> {
        self.inner_mut().read_fields(input)
    }

    fn to_text(&self, text: &mut Vec<u8>) {
        self.inner().to_text(text)
    }

    fn from_text(&mut self, text: &mut TextCursor<'_>) -> ShapeResult<()> {
        self.inner_mut().from_text(text)
    }

    fn mbr(&self) -> Rect {
        self.inner().mbr()
    }

    fn distance_to(&self, x: f64, y: f64) -> f64 {
        self.inner().distance_to(x, y)
    }

    fn is_intersected(&self, other: &dyn Shape) -> bool {
        self.inner().is_intersected(other)
    }

    fn clone_shape(&self) -> Box<dyn Shape> {
        Box::new(*self)
    }

    fn validate(&self, config: &ShapeConfig) -> ShapeResult<()> {
        self.inner().validate(config)
    }
}
