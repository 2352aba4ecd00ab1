use std::fmt;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::config::ShapeConfig;
use crate::error::ShapeResult;
use crate::geom::{Point, Rect};
use crate::shape::{Shape, ShapeKind};
use crate::text::{self, TextCursor, FIELD_SEP, RECORD_END};

/// A circle given by its center and radius.
///
/// The bounding box is derived from these three values on demand and is
/// always the square of side `2r` centered at `(x, y)`. The radius is not
/// validated here; see [`RadiusPolicy`](crate::RadiusPolicy) for opting into
/// checks at decode time.
///
/// `Circle::default()` is the degenerate circle at the origin with radius 0,
/// meant to be filled in by one of the decoders.
#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Circle {
    x: f64,
    y: f64,
    r: f64,
}

impl Circle {
    pub fn new(x: f64, y: f64, r: f64) -> Self {
        let mut c = Circle::default();
        c.set(x, y, r);
        c
    }

    /// Zero-radius circle centered at (x, y).
    pub fn at(x: f64, y: f64) -> Self {
        Circle::new(x, y, 0.0)
    }

    /// Replace center and radius together.
    ///
    /// Every mutation, including both decoders, goes through here.
    pub fn set(&mut self, x: f64, y: f64, r: f64) {
        self.x = x;
        self.y = y;
        self.r = r;
    }

    #[inline]
    pub fn center_x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn center_y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point { x: self.x, y: self.y }
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.r
    }
}

impl fmt::Display for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Circle: @({:?},{:?})- radius {:?}", self.x, self.y, self.r)
    }
}

impl Shape for Circle {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Circle
    }

    fn write(&self, out: &mut dyn Write) -> ShapeResult<()> {
        codec::write_fields([self.x, self.y, self.r], out)
    }

    fn read_fields(&mut self, input: &mut dyn Read) -> ShapeResult<()> {
        let [x, y, r]: [f64; 3] = codec::read_fields(input)?;
        self.set(x, y, r);
        Ok(())
    }

    fn to_text(&self, text: &mut Vec<u8>) {
        text::append_f64(text, self.x, FIELD_SEP);
        text::append_f64(text, self.y, FIELD_SEP);
        text::append_f64(text, self.r, RECORD_END);
    }

    fn from_text(&mut self, text: &mut TextCursor<'_>) -> ShapeResult<()> {
        let [x, y, r] = text.consume_record::<3>()?;
        self.set(x, y, r);
        Ok(())
    }

    fn mbr(&self) -> Rect {
        Rect::new(self.x - self.r, self.y - self.r, self.x + self.r, self.y + self.r)
    }

    // Measured from the center; the radius is not subtracted.
    fn distance_to(&self, x: f64, y: f64) -> f64 {
        let dx = self.x - x;
        let dy = self.y - y;
        (dx * dx + dy * dy).sqrt()
    }

    // Bounding boxes only, so disks that merely share box area still count.
    fn is_intersected(&self, other: &dyn Shape) -> bool {
        self.mbr().intersects(&other.mbr())
    }

    fn clone_shape(&self) -> Box<dyn Shape> {
        Box::new(*self)
    }

    fn validate(&self, config: &ShapeConfig) -> ShapeResult<()> {
        config.radius_policy.check(self.r)
    }
}
