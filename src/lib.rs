
mod circle;
pub mod codec;
mod config;
mod error;
mod geom;
pub mod scan;
mod shape;
pub mod text;

pub use circle::Circle;
pub use codec::ShapeCodec;
pub use config::{RadiusPolicy, ShapeConfig};
pub use error::{ShapeError, ShapeResult};
pub use geom::{Point, Rect};
pub use shape::{AnyShape, Shape, ShapeKind};
pub use text::TextCursor;
