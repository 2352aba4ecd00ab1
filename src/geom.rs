use std::fmt;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::ShapeResult;
use crate::shape::{Shape, ShapeKind};
use crate::text::{self, TextCursor, FIELD_SEP, RECORD_END};

#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

impl Rect {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Rect { min_x, min_y, max_x, max_y }
    }

    // Closed on every edge
    pub fn contains(&self, point: &Point) -> bool {
        return point.x >= self.min_x && point.x <= self.max_x && point.y >= self.min_y && point.y <= self.max_y;
    }

    // Check if two Rect overlap at all, touching edges included
    pub fn intersects(&self, other: &Rect) -> bool {
        return self.min_x <= other.max_x && self.max_x >= other.min_x && self.min_y <= other.max_y && self.max_y >= other.min_y
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point {
            x: 0.5 * (self.min_x + self.max_x),
            y: 0.5 * (self.min_y + self.max_y),
        }
    }

    /// Smallest box covering both `self` and `other`.
    pub fn expand(&self, other: &Rect) -> Rect {
        Rect {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Distance from (x, y) to the nearest point of the box; 0 inside.
    pub fn min_distance_to(&self, x: f64, y: f64) -> f64 {
        let dx = (self.min_x - x).max(0.0).max(x - self.max_x);
        let dy = (self.min_y - y).max(0.0).max(y - self.max_y);
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point: ({:?},{:?})", self.x, self.y)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rectangle: ({:?},{:?})-({:?},{:?})",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}

impl Shape for Point {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Point
    }

    fn write(&self, out: &mut dyn Write) -> ShapeResult<()> {
        codec::write_fields([self.x, self.y], out)
    }

    fn read_fields(&mut self, input: &mut dyn Read) -> ShapeResult<()> {
        let [x, y]: [f64; 2] = codec::read_fields(input)?;
        *self = Point { x, y };
        Ok(())
    }

    fn to_text(&self, text: &mut Vec<u8>) {
        text::append_f64(text, self.x, FIELD_SEP);
        text::append_f64(text, self.y, RECORD_END);
    }

    fn from_text(&mut self, text: &mut TextCursor<'_>) -> ShapeResult<()> {
        let [x, y] = text.consume_record::<2>()?;
        *self = Point { x, y };
        Ok(())
    }

    fn mbr(&self) -> Rect {
        Rect::new(self.x, self.y, self.x, self.y)
    }

    fn distance_to(&self, x: f64, y: f64) -> f64 {
        let dx = self.x - x;
        let dy = self.y - y;
        (dx * dx + dy * dy).sqrt()
    }

    fn is_intersected(&self, other: &dyn Shape) -> bool {
        other.mbr().contains(self)
    }

    fn clone_shape(&self) -> Box<dyn Shape> {
        Box::new(*self)
    }
}

impl Shape for Rect {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Rect
    }

    fn write(&self, out: &mut dyn Write) -> ShapeResult<()> {
        codec::write_fields([self.min_x, self.min_y, self.max_x, self.max_y], out)
    }

    fn read_fields(&mut self, input: &mut dyn Read) -> ShapeResult<()> {
        let [x1, y1, x2, y2]: [f64; 4] = codec::read_fields(input)?;
        *self = Rect::new(x1, y1, x2, y2);
        Ok(())
    }

    fn to_text(&self, text: &mut Vec<u8>) {
        text::append_f64(text, self.min_x, FIELD_SEP);
        text::append_f64(text, self.min_y, FIELD_SEP);
        text::append_f64(text, self.max_x, FIELD_SEP);
        text::append_f64(text, self.max_y, RECORD_END);
    }

    fn from_text(&mut self, text: &mut TextCursor<'_>) -> ShapeResult<()> {
        let [x1, y1, x2, y2] = text.consume_record::<4>()?;
        *self = Rect::new(x1, y1, x2, y2);
        Ok(())
    }

    fn mbr(&self) -> Rect {
        *self
    }

    fn distance_to(&self, x: f64, y: f64) -> f64 {
        self.min_distance_to(x, y)
    }

    fn is_intersected(&self, other: &dyn Shape) -> bool {
        self.intersects(&other.mbr())
    }

    fn clone_shape(&self) -> Box<dyn Shape> {
        Box::new(*self)
    }
}
