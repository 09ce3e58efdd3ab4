use super::*;
use crate::util::testing::model_for;

fn field<'a>(value: &'a Value, name: &str) -> &'a Value {
    let Value::Struct(fields) = value else {
        panic!("expected struct value");
    };
    &fields
        .iter()
        .find(|(n, _)| n == name)
        .unwrap_or_else(|| panic!("no field '{}'", name))
        .1
}

#[test]
fn test_unpack_scalars_little_endian() {
    let model = model_for("typedef struct { int16_t a; uint16_t b; int32_t c; } S;");

    let mut data = Vec::new();
    data.extend_from_slice(&(-2i16).to_le_bytes());
    data.extend_from_slice(&40000u16.to_le_bytes());
    data.extend_from_slice(&(-100000i32).to_le_bytes());

    let value = unpack(&model, "S", &data, Endian::Little).unwrap();
    assert_eq!(*field(&value, "a"), Value::Int(-2));
    assert_eq!(*field(&value, "b"), Value::UInt(40000));
    assert_eq!(*field(&value, "c"), Value::Int(-100000));
}

#[test]
fn test_unpack_big_endian() {
    let model = model_for("typedef struct { uint32_t a; } S;");

    let value = unpack(&model, "S", &0xDEADBEEFu32.to_be_bytes(), Endian::Big).unwrap();
    assert_eq!(*field(&value, "a"), Value::UInt(0xDEADBEEF));
}

#[test]
fn test_unpack_floats() {
    let model = model_for("typedef struct { float f; double d; } S;");

    let mut data = Vec::new();
    data.extend_from_slice(&1.5f32.to_le_bytes());
    data.extend_from_slice(&[0, 0, 0, 0]); // padding before double
    data.extend_from_slice(&(-2.25f64).to_le_bytes());

    let value = unpack(&model, "S", &data, Endian::Little).unwrap();
    assert_eq!(*field(&value, "f"), Value::Float(1.5));
    assert_eq!(*field(&value, "d"), Value::Float(-2.25));
}

#[test]
fn test_unpack_skips_padding() {
    // 'b' sits at offset 4, after 3 bytes of padding
    let model = model_for("typedef struct { int8_t a; int32_t b; } S;");

    let data = [1u8, 0xFF, 0xFF, 0xFF, 42, 0, 0, 0];
    let value = unpack(&model, "S", &data, Endian::Little).unwrap();

    assert_eq!(*field(&value, "a"), Value::Int(1));
    assert_eq!(*field(&value, "b"), Value::Int(42));
}

#[test]
fn test_unpack_array_row_major() {
    let model = model_for("typedef struct { uint8_t m[2][3]; } S;");

    let data = [1u8, 2, 3, 4, 5, 6];
    let value = unpack(&model, "S", &data, Endian::Little).unwrap();

    let expected = Value::Array(vec![
        Value::Array(vec![Value::UInt(1), Value::UInt(2), Value::UInt(3)]),
        Value::Array(vec![Value::UInt(4), Value::UInt(5), Value::UInt(6)]),
    ]);
    assert_eq!(*field(&value, "m"), expected);
}

#[test]
fn test_unpack_nested_struct() {
    let model = model_for(
        r#"
        typedef struct { int8_t x; int8_t y; int8_t z; } Vector3D;
        typedef struct { Vector3D position; Vector3D velocity; } Pair;
    "#,
    );

    let data = [1u8, 2, 3, 4, 5, 6];
    let value = unpack(&model, "Pair", &data, Endian::Little).unwrap();

    let velocity = field(&value, "velocity");
    assert_eq!(*field(velocity, "z"), Value::Int(6));
}

#[test]
fn test_unpack_char_signedness_follows_profile() {
    use crate::{config::AbiProfile, util::testing::parse_header_with};

    let src = "typedef struct { char c; } S;";
    let data = [0xFFu8];

    let signed = parse_header_with(src, &AbiProfile::lp64()).unwrap();
    let value = unpack(&signed, "S", &data, Endian::Little).unwrap();
    assert_eq!(*field(&value, "c"), Value::Int(-1));

    let unsigned_profile = AbiProfile {
        char_signed: false,
        ..AbiProfile::lp64()
    };
    let unsigned = parse_header_with(src, &unsigned_profile).unwrap();
    let value = unpack(&unsigned, "S", &data, Endian::Little).unwrap();
    assert_eq!(*field(&value, "c"), Value::UInt(255));
}

#[test]
fn test_unpack_errors() {
    let model = model_for("typedef struct { int32_t x; } S;");

    let err = unpack(&model, "Missing", &[0; 4], Endian::Little).unwrap_err();
    assert!(err.contains("unknown struct type"));

    let err = unpack(&model, "S", &[0; 2], Endian::Little).unwrap_err();
    assert!(err.contains("buffer too small"));
}

#[test]
fn test_value_json_serialization() {
    let model = model_for("typedef struct { int8_t a; uint8_t b[2]; } S;");
    let value = unpack(&model, "S", &[5u8, 10, 20], Endian::Little).unwrap();

    let json = serde_json::to_string(&value).unwrap();
    assert_eq!(json, r#"{"a":5,"b":[10,20]}"#);
}
