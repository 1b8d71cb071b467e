//! # binfield — declarative binary field framework
//!
//! Maps binary byte streams to structured in-memory values and back, for
//! defining file formats and wire protocols without hand-written byte
//! packing. Fields have exact, symmetric read/write behavior, including
//! fields whose value or validity depends on sibling fields.
//!
//! ## Model
//!
//! - **Lifecycle**: every [`Field`] is in exactly one of four stages —
//!   clear (resolves to its initial value or the type's default), assigned,
//!   mid-read, or read. Reads are two-phase: `begin_read` exposes the decoded
//!   value, `end_read` settles it. A `value` constant override ignores
//!   assignment and is restored when a read completes, so the decoded bytes
//!   are visible only in between (sibling computations such as checksums may
//!   need them).
//! - **Parameters**: `initial_value`, `value`, and `check_value` are each a
//!   constant or a deferred expression evaluated on demand against a
//!   [`ParamContext`] of sibling values supplied by the enclosing composite.
//! - **Checking**: a check value resolving to a boolean is a pass/fail
//!   predicate; any other value must equal the decoded one.
//! - **Registry**: concrete types register at static initialization under
//!   the snake_case form of their identifier and are looked up with
//!   [`lookup`].
//!
//! ## Example
//!
//! ```ignore
//! use binfield::types::Uint32Le;
//! use binfield::{Field, Value};
//!
//! let mut field = Field::builder(&Uint32Le)
//!     .initial_value(Value::U32(5))
//!     .build()?;
//! assert_eq!(field.value()?, Value::U32(5));   // clear: initial value
//! field.set_value(Value::U32(17));
//! field.clear();
//! assert_eq!(field.value()?, Value::U32(5));   // clear again
//!
//! let v = Field::read_from(&Uint32Le, &mut stream)?;
//! ```
//!
//! Composite containers (structs, arrays, choices) build on this core by
//! owning multiple fields, supplying their sibling context, and forwarding to
//! the same lifecycle and registry contract.

pub mod check;
pub mod error;
pub mod field;
pub mod param;
pub mod registry;
pub mod state;
pub mod types;
pub mod value;

pub use check::{CheckOutcome, ValidityGate};
pub use error::FieldError;
pub use field::{Field, FieldBuilder, FieldType};
pub use param::{Param, ParamContext};
pub use registry::{canonical_name, lookup, TypeEntry};
pub use state::ValueState;
pub use value::Value;

// Re-exported for `register_field_type!` expansions in downstream crates.
pub use inventory;
