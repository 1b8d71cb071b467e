//! Concrete leaf field types: fixed-width integers and floats in both byte
//! orders, plus NUL-terminated strings.
//!
//! Each type is a stateless descriptor auto-registered under the snake_case
//! form of its identifier (`Uint32Le` is looked up as `"uint32_le"`).

use crate::error::FieldError;
use crate::field::FieldType;
use crate::value::Value;
use byteorder::{BigEndian, LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

fn type_mismatch(ty: &str, value: &Value) -> FieldError {
    FieldError::Configuration(format!("{} cannot carry {:?}", ty, value))
}

macro_rules! fixed_numeric {
    ($name:ident, $variant:ident, $width:expr, $zero:expr,
     |$r:ident| $read:expr, |$w:ident, $x:ident| $write:expr) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl FieldType for $name {
            fn sensible_default(&self) -> Value {
                Value::$variant($zero)
            }

            fn num_bytes(&self, value: &Value) -> Result<usize, FieldError> {
                match value {
                    Value::$variant(_) => Ok($width),
                    other => Err(type_mismatch(stringify!($name), other)),
                }
            }

            fn encode(&self, value: &Value, w: &mut dyn Write) -> Result<(), FieldError> {
                match value {
                    Value::$variant(v) => {
                        let $x = *v;
                        let $w = w;
                        $write?;
                        Ok(())
                    }
                    other => Err(type_mismatch(stringify!($name), other)),
                }
            }

            fn decode(&self, r: &mut dyn Read) -> Result<Value, FieldError> {
                let $r = r;
                Ok(Value::$variant($read?))
            }
        }

        crate::register_field_type!($name);
    };
}

fixed_numeric!(Uint8, U8, 1, 0, |r| r.read_u8(), |w, x| w.write_u8(x));
fixed_numeric!(Uint16Le, U16, 2, 0,
    |r| r.read_u16::<LittleEndian>(), |w, x| w.write_u16::<LittleEndian>(x));
fixed_numeric!(Uint16Be, U16, 2, 0,
    |r| r.read_u16::<BigEndian>(), |w, x| w.write_u16::<BigEndian>(x));
fixed_numeric!(Uint32Le, U32, 4, 0,
    |r| r.read_u32::<LittleEndian>(), |w, x| w.write_u32::<LittleEndian>(x));
fixed_numeric!(Uint32Be, U32, 4, 0,
    |r| r.read_u32::<BigEndian>(), |w, x| w.write_u32::<BigEndian>(x));
fixed_numeric!(Uint64Le, U64, 8, 0,
    |r| r.read_u64::<LittleEndian>(), |w, x| w.write_u64::<LittleEndian>(x));
fixed_numeric!(Uint64Be, U64, 8, 0,
    |r| r.read_u64::<BigEndian>(), |w, x| w.write_u64::<BigEndian>(x));

fixed_numeric!(Int8, I8, 1, 0, |r| r.read_i8(), |w, x| w.write_i8(x));
fixed_numeric!(Int16Le, I16, 2, 0,
    |r| r.read_i16::<LittleEndian>(), |w, x| w.write_i16::<LittleEndian>(x));
fixed_numeric!(Int16Be, I16, 2, 0,
    |r| r.read_i16::<BigEndian>(), |w, x| w.write_i16::<BigEndian>(x));
fixed_numeric!(Int32Le, I32, 4, 0,
    |r| r.read_i32::<LittleEndian>(), |w, x| w.write_i32::<LittleEndian>(x));
fixed_numeric!(Int32Be, I32, 4, 0,
    |r| r.read_i32::<BigEndian>(), |w, x| w.write_i32::<BigEndian>(x));
fixed_numeric!(Int64Le, I64, 8, 0,
    |r| r.read_i64::<LittleEndian>(), |w, x| w.write_i64::<LittleEndian>(x));
fixed_numeric!(Int64Be, I64, 8, 0,
    |r| r.read_i64::<BigEndian>(), |w, x| w.write_i64::<BigEndian>(x));

fixed_numeric!(FloatLe, Float, 4, 0.0,
    |r| r.read_f32::<LittleEndian>(), |w, x| w.write_f32::<LittleEndian>(x));
fixed_numeric!(FloatBe, Float, 4, 0.0,
    |r| r.read_f32::<BigEndian>(), |w, x| w.write_f32::<BigEndian>(x));
fixed_numeric!(DoubleLe, Double, 8, 0.0,
    |r| r.read_f64::<LittleEndian>(), |w, x| w.write_f64::<LittleEndian>(x));
fixed_numeric!(DoubleBe, Double, 8, 0.0,
    |r| r.read_f64::<BigEndian>(), |w, x| w.write_f64::<BigEndian>(x));

/// NUL-terminated string. Wire form is the UTF-8 bytes followed by a zero
/// byte; decode consumes bytes up to and including the terminator, so the
/// byte length varies with the value.
#[derive(Debug, Clone, Copy)]
pub struct Stringz;

impl FieldType for Stringz {
    fn sensible_default(&self) -> Value {
        Value::Str(String::new())
    }

    fn num_bytes(&self, value: &Value) -> Result<usize, FieldError> {
        match value {
            Value::Str(s) => Ok(s.len() + 1),
            other => Err(type_mismatch("Stringz", other)),
        }
    }

    fn encode(&self, value: &Value, w: &mut dyn Write) -> Result<(), FieldError> {
        match value {
            Value::Str(s) => {
                if s.as_bytes().contains(&0) {
                    return Err(FieldError::Format(
                        "string contains an embedded NUL".to_string(),
                    ));
                }
                w.write_all(s.as_bytes())?;
                w.write_all(&[0])?;
                Ok(())
            }
            other => Err(type_mismatch("Stringz", other)),
        }
    }

    fn decode(&self, r: &mut dyn Read) -> Result<Value, FieldError> {
        let mut bytes = Vec::new();
        loop {
            let mut b = [0u8; 1];
            r.read_exact(&mut b)?;
            if b[0] == 0 {
                break;
            }
            bytes.push(b[0]);
        }
        let s = String::from_utf8(bytes)
            .map_err(|e| FieldError::Format(format!("invalid UTF-8 in stringz: {}", e)))?;
        Ok(Value::Str(s))
    }
}

crate::register_field_type!(Stringz);
