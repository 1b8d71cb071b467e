//! Concrete type round-trips and wire formats.

use binfield::types::*;
use binfield::{FieldError, FieldType, Value};
use std::io::Cursor;

fn round_trip(ty: &dyn FieldType, v: Value) {
    let mut out = Vec::new();
    ty.encode(&v, &mut out).expect("encode");
    assert_eq!(out.len(), ty.num_bytes(&v).unwrap());
    let decoded = ty.decode(&mut Cursor::new(&out)).expect("decode");
    assert_eq!(decoded, v);
}

#[test]
fn unsigned_round_trips() {
    round_trip(&Uint8, Value::U8(0xAB));
    round_trip(&Uint16Le, Value::U16(0xBEEF));
    round_trip(&Uint16Be, Value::U16(0xBEEF));
    round_trip(&Uint32Le, Value::U32(0xDEAD_BEEF));
    round_trip(&Uint32Be, Value::U32(0xDEAD_BEEF));
    round_trip(&Uint64Le, Value::U64(u64::MAX));
    round_trip(&Uint64Be, Value::U64(1));
}

#[test]
fn signed_round_trips() {
    round_trip(&Int8, Value::I8(-5));
    round_trip(&Int16Le, Value::I16(-300));
    round_trip(&Int16Be, Value::I16(i16::MIN));
    round_trip(&Int32Le, Value::I32(-1));
    round_trip(&Int32Be, Value::I32(i32::MIN));
    round_trip(&Int64Le, Value::I64(-1));
    round_trip(&Int64Be, Value::I64(i64::MAX));
}

#[test]
fn float_round_trips() {
    round_trip(&FloatLe, Value::Float(1.5));
    round_trip(&FloatBe, Value::Float(-0.25));
    round_trip(&DoubleLe, Value::Double(std::f64::consts::PI));
    round_trip(&DoubleBe, Value::Double(1e300));
}

#[test]
fn wire_byte_order() {
    let mut out = Vec::new();
    Uint16Be.encode(&Value::U16(0x1234), &mut out).unwrap();
    assert_eq!(out, [0x12, 0x34]);

    out.clear();
    Uint16Le.encode(&Value::U16(0x1234), &mut out).unwrap();
    assert_eq!(out, [0x34, 0x12]);
}

#[test]
fn stringz_round_trip_and_length() {
    round_trip(&Stringz, Value::Str("hello".to_string()));
    round_trip(&Stringz, Value::Str(String::new()));
    assert_eq!(Stringz.num_bytes(&Value::Str("hello".into())).unwrap(), 6);
}

#[test]
fn stringz_stops_at_the_terminator() {
    let mut cursor = Cursor::new(b"abc\0def".to_vec());
    assert_eq!(
        Stringz.decode(&mut cursor).unwrap(),
        Value::Str("abc".to_string())
    );
    assert_eq!(cursor.position(), 4);
}

#[test]
fn stringz_unterminated_input_fails() {
    let err = Stringz.decode(&mut Cursor::new(b"abc".to_vec())).unwrap_err();
    assert!(matches!(err, FieldError::Io(_)));
}

#[test]
fn stringz_invalid_utf8_is_a_format_error() {
    let err = Stringz
        .decode(&mut Cursor::new(vec![0xFF, 0xFE, 0]))
        .unwrap_err();
    assert!(matches!(err, FieldError::Format(_)));
}

#[test]
fn stringz_rejects_embedded_nul_on_encode() {
    let mut out = Vec::new();
    let err = Stringz
        .encode(&Value::Str("a\0b".to_string()), &mut out)
        .unwrap_err();
    assert!(matches!(err, FieldError::Format(_)));
}

#[test]
fn value_type_mismatch_is_a_configuration_error() {
    let mut out = Vec::new();
    let err = Uint32Le.encode(&Value::U16(1), &mut out).unwrap_err();
    assert!(matches!(err, FieldError::Configuration(_)));
    assert!(Uint32Le.num_bytes(&Value::Str("x".into())).is_err());
}

#[test]
fn sensible_defaults() {
    assert_eq!(Uint32Le.sensible_default(), Value::U32(0));
    assert_eq!(Int8.sensible_default(), Value::I8(0));
    assert_eq!(DoubleLe.sensible_default(), Value::Double(0.0));
    assert_eq!(Stringz.sensible_default(), Value::Str(String::new()));
}
