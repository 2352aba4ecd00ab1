use std::io::{self, Write};

use serde::de::value::{Error as ValueError, MapDeserializer, StrDeserializer};
use serde::Deserialize;
use spatial_shapes::codec::wire_config;
use spatial_shapes::scan::{nearest, range_filter};
use spatial_shapes::{
    AnyShape, Circle, Point, RadiusPolicy, Rect, Shape, ShapeCodec, ShapeConfig, ShapeError, ShapeKind, TextCursor,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sample_shapes() -> Vec<AnyShape> {
    vec![
        Point::new(1.0, 2.0).into(),
        Rect::new(-1.0, -1.0, 4.0, 0.5).into(),
        Circle::new(10.0, 10.0, 2.0).into(),
    ]
}

#[test]
fn test_tagged_record_round_trip() {
    init_logger();
    let codec = ShapeCodec::default();
    for shape in sample_shapes() {
        let bytes = codec.encode(&shape).unwrap();
        assert_eq!(bytes[0], shape.kind() as u8);
        assert_eq!(bytes.len(), 1 + shape.kind().payload_len());
        assert_eq!(codec.decode(&bytes).unwrap(), shape);
    }
}

#[test]
fn test_stream_of_records() {
    init_logger();
    let codec = ShapeCodec::default();
    let shapes = sample_shapes();
    let mut buf = Vec::new();
    for shape in &shapes {
        codec.write_record(shape, &mut buf).unwrap();
    }

    let mut input = buf.as_slice();
    let mut decoded = Vec::new();
    for _ in 0..shapes.len() {
        decoded.push(codec.read_record(&mut input).unwrap());
    }
    assert!(input.is_empty());
    assert_eq!(decoded, shapes);
    assert!(matches!(codec.read_record(&mut input), Err(ShapeError::Truncated)));
}

#[test]
fn test_circle_record_is_tag_plus_24_bytes() {
    let codec = ShapeCodec::default();
    let bytes = codec.encode(&Circle::new(1.0, 2.0, 3.0).into()).unwrap();
    assert_eq!(bytes[0], 2);
    assert_eq!(&bytes[1..9], &1.0f64.to_be_bytes());
    assert_eq!(&bytes[17..], &3.0f64.to_be_bytes());
}

#[test]
fn test_unknown_tag_rejected() {
    init_logger();
    let mut bytes = vec![9u8];
    bytes.extend_from_slice(&[0u8; 24]);
    let err = ShapeCodec::default().decode(&bytes).unwrap_err();
    assert!(matches!(err, ShapeError::UnknownKind(9)));
}

#[test]
fn test_truncated_record() {
    init_logger();
    let codec = ShapeCodec::default();
    let bytes = codec.encode(&Circle::new(1.0, 2.0, 3.0).into()).unwrap();
    let err = codec.decode(&bytes[..20]).unwrap_err();
    assert!(matches!(err, ShapeError::Truncated));
}

#[test]
fn test_radius_policy() {
    init_logger();
    let negative: AnyShape = Circle::new(0.0, 0.0, -1.0).into();
    let nan: AnyShape = Circle::new(0.0, 0.0, f64::NAN).into();

    let permissive = ShapeCodec::default();
    let bytes = permissive.encode(&negative).unwrap();
    assert_eq!(permissive.decode(&bytes).unwrap(), negative);

    let strict = ShapeCodec::new(ShapeConfig::default().with_radius_policy(RadiusPolicy::RejectNegative));
    assert!(matches!(strict.decode(&bytes), Err(ShapeError::InvalidRadius(r)) if r == -1.0));
    let nan_bytes = strict.encode(&nan).unwrap();
    assert!(strict.decode(&nan_bytes).is_ok());

    let finite = ShapeCodec::new(ShapeConfig::default().with_radius_policy(RadiusPolicy::RequireFinite));
    assert!(matches!(finite.decode(&nan_bytes), Err(ShapeError::InvalidRadius(_))));
    assert!(matches!(
        finite.parse_text(ShapeKind::Circle, b"0.0,0.0,-2.5\0"),
        Err(ShapeError::InvalidRadius(_))
    ));
    assert!(finite.parse_text(ShapeKind::Circle, b"0.0,0.0,2.5\0").is_ok());
}

#[test]
fn test_config_defaults_to_permissive() {
    assert_eq!(ShapeConfig::default().radius_policy, RadiusPolicy::Permissive);
    assert_eq!(ShapeCodec::default().config(), &ShapeConfig::default());
}

#[test]
fn test_text_records_per_kind() {
    let codec = ShapeCodec::default();
    let expected: [&[u8]; 3] = [b"1.0,2.0\0", b"-1.0,-1.0,4.0,0.5\0", b"10.0,10.0,2.0\0"];
    for (shape, text) in sample_shapes().iter().zip(expected) {
        assert_eq!(codec.format_text(shape), text);
        assert_eq!(&codec.parse_text(shape.kind(), text).unwrap(), shape);
    }
}

#[test]
fn test_parse_text_from_shared_cursor() {
    let codec = ShapeCodec::default();
    let text = b"3.0,4.0\05.0,6.0,7.0\0";
    let mut cursor = TextCursor::new(text);
    let p = codec.parse_text_from(ShapeKind::Point, &mut cursor).unwrap();
    let c = codec.parse_text_from(ShapeKind::Circle, &mut cursor).unwrap();
    assert_eq!(p, AnyShape::Point(Point::new(3.0, 4.0)));
    assert_eq!(c.as_circle(), Some(&Circle::new(5.0, 6.0, 7.0)));
    assert!(cursor.is_empty());
}

#[test]
fn test_kind_names() {
    for kind in ShapeKind::ALL {
        assert_eq!(kind.to_string().parse::<ShapeKind>().unwrap(), kind);
        assert_eq!(ShapeKind::try_from(kind as u8).unwrap(), kind);
    }
    assert_eq!("Rectangle".parse::<ShapeKind>().unwrap(), ShapeKind::Rect);
    assert!(matches!("polygon".parse::<ShapeKind>(), Err(ShapeError::UnknownKindName(_))));
}

#[test]
fn test_point_and_rect_contract() {
    let r = Rect::new(0.0, 0.0, 2.0, 2.0);
    assert_eq!(r.distance_to(1.0, 1.0), 0.0);
    assert_eq!(r.distance_to(5.0, 6.0), 5.0);
    assert!(r.is_intersected(&Point::new(2.0, 2.0)));
    assert!(!r.is_intersected(&Point::new(2.1, 2.0)));

    let p = Point::new(0.0, 0.0);
    assert_eq!(p.mbr(), Rect::new(0.0, 0.0, 0.0, 0.0));
    assert_eq!(p.distance_to(3.0, 4.0), 5.0);
    assert!(p.is_intersected(&Circle::new(1.0, 1.0, 1.0)));

    assert_eq!(r.expand(&Rect::new(-1.0, 1.0, 1.0, 5.0)), Rect::new(-1.0, 0.0, 2.0, 5.0));
    assert_eq!(r.center(), Point::new(1.0, 1.0));
    assert_eq!((r.width(), r.height()), (2.0, 2.0));
}

#[test]
fn test_boxed_shapes_clone() {
    let shapes: Vec<Box<dyn Shape>> = vec![Box::new(Circle::new(0.0, 0.0, 1.0)), Box::new(Point::new(3.0, 3.0))];
    let copies = shapes.clone();
    for (a, b) in shapes.iter().zip(&copies) {
        assert_eq!(a.kind(), b.kind());
        assert_eq!(a.mbr(), b.mbr());
    }
}

#[test]
fn test_range_filter() {
    let shapes = sample_shapes();
    let hits = range_filter(&shapes, &Rect::new(0.0, 0.0, 2.0, 2.0));
    assert_eq!(hits.as_slice(), &[0, 1]);

    // box [8,12]^2 reaches the query even though the disk does not
    let hits = range_filter(&shapes, &Rect::new(11.5, 11.5, 20.0, 20.0));
    assert_eq!(hits.as_slice(), &[2]);

    assert!(range_filter(&shapes, &Rect::new(50.0, 50.0, 60.0, 60.0)).is_empty());
}

#[test]
fn test_nearest_uses_center_distance() {
    let shapes: Vec<AnyShape> = vec![
        Circle::new(0.0, 0.0, 100.0).into(),
        Circle::new(6.0, 8.0, 0.0).into(),
        Circle::new(f64::NAN, 0.0, 1.0).into(),
    ];
    assert_eq!(nearest(&shapes, 6.0, 7.0), Some((1, 1.0)));
    assert_eq!(nearest(&shapes, 3.0, 4.0), Some((0, 5.0)));
    assert_eq!(nearest(&[], 0.0, 0.0), None);
}

struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_write_failure_surfaces_as_io() {
    init_logger();
    let err = Circle::new(1.0, 2.0, 3.0).write(&mut ClosedPipe).unwrap_err();
    assert!(matches!(&err, ShapeError::Io(e) if e.kind() == io::ErrorKind::BrokenPipe), "{:?}", err);

    let err = ShapeCodec::default()
        .write_record(&Point::new(0.0, 0.0).into(), &mut ClosedPipe)
        .unwrap_err();
    assert!(matches!(err, ShapeError::Io(_)), "{:?}", err);
}

#[test]
fn test_config_serde_round_trip() {
    for policy in [RadiusPolicy::Permissive, RadiusPolicy::RejectNegative, RadiusPolicy::RequireFinite] {
        let config = ShapeConfig::default().with_radius_policy(policy);
        let bytes = bincode::serde::encode_to_vec(config, wire_config()).unwrap();
        let (decoded, read): (ShapeConfig, usize) = bincode::serde::decode_from_slice(&bytes, wire_config()).unwrap();
        assert_eq!(decoded, config);
        assert_eq!(read, bytes.len());
    }
}

#[test]
fn test_config_names_and_defaults() {
    let policy = RadiusPolicy::deserialize(StrDeserializer::<ValueError>::new("reject_negative")).unwrap();
    assert_eq!(policy, RadiusPolicy::RejectNegative);
    let policy = RadiusPolicy::deserialize(StrDeserializer::<ValueError>::new("require_finite")).unwrap();
    assert_eq!(policy, RadiusPolicy::RequireFinite);
    assert!(RadiusPolicy::deserialize(StrDeserializer::<ValueError>::new("RejectNegative")).is_err());

    // missing fields fall back to the defaults
    let empty = MapDeserializer::<_, ValueError>::new(std::iter::empty::<(&str, &str)>());
    assert_eq!(ShapeConfig::deserialize(empty).unwrap(), ShapeConfig::default());

    let fields = MapDeserializer::<_, ValueError>::new(vec![("radius_policy", "require_finite")].into_iter());
    assert_eq!(
        ShapeConfig::deserialize(fields).unwrap().radius_policy,
        RadiusPolicy::RequireFinite
    );
}

#[test]
fn test_kind_serde_names() {
    for kind in ShapeKind::ALL {
        let parsed = ShapeKind::deserialize(StrDeserializer::<ValueError>::new(kind.name())).unwrap();
        assert_eq!(parsed, kind);
    }
}

#[test]
fn test_struct_serde_matches_wire_payload() {
    let circle = Circle::new(1.5, -2.0, 0.25);
    let mut payload = Vec::new();
    circle.write(&mut payload).unwrap();
    let bytes = bincode::serde::encode_to_vec(circle, wire_config()).unwrap();
    assert_eq!(bytes, payload);
    let (decoded, _): (Circle, usize) = bincode::serde::decode_from_slice(&payload, wire_config()).unwrap();
    assert_eq!(decoded, circle);

    let rect = Rect::new(-1.0, -2.0, 3.0, 4.0);
    let mut payload = Vec::new();
    rect.write(&mut payload).unwrap();
    assert_eq!(bincode::serde::encode_to_vec(rect, wire_config()).unwrap(), payload);

    let point = Point::new(7.0, 8.0);
    let mut payload = Vec::new();
    point.write(&mut payload).unwrap();
    assert_eq!(bincode::serde::encode_to_vec(point, wire_config()).unwrap(), payload);
}
