//! Type registry: canonical names, lookup, and static registration of
//! extension types defined outside the crate.

use binfield::register_field_type;
use binfield::{canonical_name, lookup, Field, FieldError, FieldType, Value};
use std::io::{Cursor, Read, Write};

#[test]
fn canonical_names_are_snake_case() {
    assert_eq!(canonical_name("Uint16Le"), "uint16_le");
    assert_eq!(canonical_name("Stringz"), "stringz");
    assert_eq!(canonical_name("ConcreteSingle"), "concrete_single");
}

#[test]
fn builtin_types_are_registered() {
    let ty = lookup("uint32_le").expect("lookup");
    let mut field = Field::new(ty);
    assert_eq!(field.value().unwrap(), Value::U32(0));
    assert_eq!(field.num_bytes().unwrap(), 4);

    assert!(lookup("uint16_be").is_ok());
    assert!(lookup("int64_le").is_ok());
    assert!(lookup("double_be").is_ok());
    assert!(lookup("stringz").is_ok());
}

#[test]
fn unknown_name_is_a_lookup_error() {
    let err = lookup("no_such_type").unwrap_err();
    assert!(matches!(err, FieldError::UnknownType(_)));
}

// An extension type defined outside the crate registers itself the same way
// the built-ins do.
#[derive(Debug)]
struct ByteFlag;

impl FieldType for ByteFlag {
    fn sensible_default(&self) -> Value {
        Value::Bool(false)
    }

    fn num_bytes(&self, _value: &Value) -> Result<usize, FieldError> {
        Ok(1)
    }

    fn encode(&self, value: &Value, w: &mut dyn Write) -> Result<(), FieldError> {
        let b = matches!(value, Value::Bool(true)) as u8;
        w.write_all(&[b])?;
        Ok(())
    }

    fn decode(&self, r: &mut dyn Read) -> Result<Value, FieldError> {
        let mut b = [0u8; 1];
        r.read_exact(&mut b)?;
        Ok(Value::Bool(b[0] != 0))
    }
}

register_field_type!(ByteFlag);

#[test]
fn extension_types_register_under_their_own_name() {
    let ty = lookup("byte_flag").expect("lookup");
    let v = Field::read_from(ty, &mut Cursor::new(vec![1u8])).expect("read");
    assert_eq!(v, Value::Bool(true));
}

#[test]
fn lookup_is_usable_from_multiple_threads() {
    // Population is complete before first use; lookups are read-only.
    let handles: Vec<_> = (0..4)
        .map(|_| {
            std::thread::spawn(|| {
                for _ in 0..100 {
                    assert!(lookup("uint32_le").is_ok());
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
}
