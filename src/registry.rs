//! Process-wide field type registry.
//!
//! Concrete types register themselves at static initialization via
//! [`register_field_type!`](crate::register_field_type); the lookup map is
//! built once, on first access, from the collected entries and is immutable
//! afterwards. There is no unregistration. Keys are the snake_case mangling of
//! the declared type identifier, so independently compiled extension types
//! resolve predictably: `Uint16Le` is looked up as `"uint16_le"`.

use crate::error::FieldError;
use crate::field::FieldType;
use heck::ToSnakeCase;
use std::collections::HashMap;
use std::sync::OnceLock;

/// One registration: the declared identifier and a constructor for the
/// (stateless) type descriptor.
pub struct TypeEntry {
    pub ident: &'static str,
    pub build: fn() -> &'static dyn FieldType,
}

inventory::collect!(TypeEntry);

/// Register a concrete [`FieldType`] under its own identifier, from its
/// definition site. Expands to a static registration consumed when the
/// registry is first built.
#[macro_export]
macro_rules! register_field_type {
    ($ty:ident) => {
        $crate::inventory::submit! {
            $crate::registry::TypeEntry {
                ident: stringify!($ty),
                build: || &$ty,
            }
        }
    };
}

/// Deterministic mangling from a declared identifier to its registry key.
pub fn canonical_name(ident: &str) -> String {
    ident.to_snake_case()
}

fn registry() -> &'static HashMap<String, &'static dyn FieldType> {
    static REGISTRY: OnceLock<HashMap<String, &'static dyn FieldType>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        inventory::iter::<TypeEntry>()
            .map(|e| (canonical_name(e.ident), (e.build)()))
            .collect()
    })
}

/// Look up a registered type descriptor by canonical name.
pub fn lookup(name: &str) -> Result<&'static dyn FieldType, FieldError> {
    registry()
        .get(name)
        .copied()
        .ok_or_else(|| FieldError::UnknownType(name.to_string()))
}
