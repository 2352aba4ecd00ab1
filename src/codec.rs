// src/codec.rs
//
// Binary wire layout and the tagged record codec.
//
// Untagged payloads are consecutive big-endian IEEE-754 doubles in field
// order. A framed record is one kind tag byte followed by that payload.

use std::io::{Read, Write};

use bincode::config::{self, BigEndian, Configuration, Fixint};
use serde::{de::DeserializeOwned, Serialize};

use crate::config::ShapeConfig;
use crate::error::ShapeResult;
use crate::shape::{AnyShape, Shape, ShapeKind};
use crate::text::TextCursor;

/// bincode settings matching the record layout: big-endian, fixed width.
#[inline]
pub fn wire_config() -> Configuration<BigEndian, Fixint> {
    config::standard().with_big_endian().with_fixed_int_encoding()
}

pub(crate) fn write_fields<T: Serialize>(fields: T, mut out: &mut dyn Write) -> ShapeResult<()> {
    bincode::serde::encode_into_std_write(fields, &mut out, wire_config())?;
    Ok(())
}

pub(crate) fn read_fields<T: DeserializeOwned>(mut input: &mut dyn Read) -> ShapeResult<T> {
    Ok(bincode::serde::decode_from_std_read(&mut input, wire_config())?)
}

/// Reads and writes framed shape records under a [`ShapeConfig`].
#[derive(Copy, Clone, Debug, Default)]
pub struct ShapeCodec {
    config: ShapeConfig,
}

impl ShapeCodec {
    pub fn new(config: ShapeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ShapeConfig {
        &self.config
    }

    pub fn write_record(&self, shape: &AnyShape, out: &mut dyn Write) -> ShapeResult<()> {
        write_fields(shape.kind() as u8, out)?;
        shape.write(out)?;
        log::trace!("encoded {} record", shape.kind());
        Ok(())
    }

    pub fn read_record(&self, input: &mut dyn Read) -> ShapeResult<AnyShape> {
        let tag = read_fields::<u8>(input).map_err(|err| {
            log::debug!("failed to read shape tag: {}", err);
            err
        })?;
        let kind = ShapeKind::try_from(tag).map_err(|err| {
            log::debug!("failed to dispatch shape record: {}", err);
            err
        })?;
        let mut shape = AnyShape::empty(kind);
        if let Err(err) = shape.read_fields(input) {
            log::debug!("failed to decode {} record: {}", kind, err);
            return Err(err);
        }
        self.check(&shape)?;
        log::trace!("decoded {}", shape);
        Ok(shape)
    }

    pub fn encode(&self, shape: &AnyShape) -> ShapeResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(1 + shape.kind().payload_len());
        self.write_record(shape, &mut buf)?;
        Ok(buf)
    }

    pub fn decode(&self, mut bytes: &[u8]) -> ShapeResult<AnyShape> {
        self.read_record(&mut bytes)
    }

    /// Text form of a single shape; the kind is not written.
    pub fn format_text(&self, shape: &AnyShape) -> Vec<u8> {
        let mut text = Vec::new();
        shape.to_text(&mut text);
        text
    }

    pub fn parse_text(&self, kind: ShapeKind, text: &[u8]) -> ShapeResult<AnyShape> {
        let mut cursor = TextCursor::new(text);
        self.parse_text_from(kind, &mut cursor)
    }

    /// Parse one record at the cursor, leaving it past the record end.
    pub fn parse_text_from(&self, kind: ShapeKind, cursor: &mut TextCursor<'_>) -> ShapeResult<AnyShape> {
        let mut shape = AnyShape::empty(kind);
        if let Err(err) = shape.from_text(cursor) {
            log::debug!("failed to parse {} text record: {}", kind, err);
            return Err(err);
        }
        self.check(&shape)?;
        Ok(shape)
    }

    fn check(&self, shape: &AnyShape) -> ShapeResult<()> {
        shape.validate(&self.config).map_err(|err| {
            log::warn!("rejected {}: {}", shape, err);
            err
        })
    }
}
