//! Field instances and the read/write contract concrete types implement.
//!
//! A [`Field`] is one stateful occurrence of a declared binary field. It
//! composes a type descriptor with the lifecycle machine and the validity
//! gate behind the public operations an enclosing composite drives: get/set
//! value, the two-phase (or one-shot) read, write, clear, and byte length.
//!
//! Composites are expected to, for each contained field, supply a
//! [`ParamContext`] exposing sibling values when deferred parameters resolve,
//! call `begin_read`/`end_read` (or `read`) in declaration order while
//! aggregating `num_bytes`, and propagate any validity or format failure as
//! their own.

use crate::check::ValidityGate;
use crate::error::FieldError;
use crate::param::{Param, ParamContext};
use crate::state::ValueState;
use crate::value::Value;
use std::fmt;
use std::io::{Read, Write};

/// The contract every concrete field type implements. Descriptors are
/// stateless and registered once; all per-occurrence state lives in [`Field`].
pub trait FieldType: std::fmt::Debug + Send + Sync {
    /// The zero/empty value used when the field is clear and no initial value
    /// is configured. Pure, no I/O.
    fn sensible_default(&self) -> Value;

    /// Byte length of `value` on the wire: fixed for most types, computed
    /// from the value for variable-length types. A value of the wrong type is
    /// a configuration error.
    fn num_bytes(&self, value: &Value) -> Result<usize, FieldError>;

    /// Encode `value` to the stream. Deterministic; round-trips with
    /// [`FieldType::decode`].
    fn encode(&self, value: &Value, w: &mut dyn Write) -> Result<(), FieldError>;

    /// Decode one value, consuming exactly its byte length from the stream.
    /// Short or malformed input is an I/O or format error, never a validity
    /// failure.
    fn decode(&self, r: &mut dyn Read) -> Result<Value, FieldError>;
}

/// One stateful occurrence of a declared binary field.
pub struct Field {
    ty: &'static dyn FieldType,
    name: String,
    state: ValueState,
    gate: ValidityGate,
}

/// Construction options for a [`Field`].
pub struct FieldBuilder {
    ty: &'static dyn FieldType,
    name: Option<String>,
    value: Option<Param>,
    initial_value: Option<Param>,
    check_value: Option<Param>,
}

impl FieldBuilder {
    /// Field identity used in validity failures.
    pub fn name(mut self, name: impl Into<String>) -> FieldBuilder {
        self.name = Some(name.into());
        self
    }

    /// Constant override: the field value is fixed, assignment is ignored,
    /// and a completed read reverts to this value.
    pub fn value(mut self, p: impl Into<Param>) -> FieldBuilder {
        self.value = Some(p.into());
        self
    }

    /// Default shown while the field is clear.
    pub fn initial_value(mut self, p: impl Into<Param>) -> FieldBuilder {
        self.initial_value = Some(p.into());
        self
    }

    /// Evaluated once per completed read: a boolean result is a predicate,
    /// anything else is the expected decoded value.
    pub fn check_value(mut self, p: impl Into<Param>) -> FieldBuilder {
        self.check_value = Some(p.into());
        self
    }

    /// Build the field. Supplying both `value` and `initial_value` is a
    /// configuration error.
    pub fn build(self) -> Result<Field, FieldError> {
        Ok(Field {
            ty: self.ty,
            name: self.name.unwrap_or_else(|| "<anonymous>".to_string()),
            state: ValueState::new(self.initial_value, self.value)?,
            gate: ValidityGate::new(self.check_value),
        })
    }
}

impl Field {
    /// Start building a field over the given type descriptor.
    pub fn builder(ty: &'static dyn FieldType) -> FieldBuilder {
        FieldBuilder {
            ty,
            name: None,
            value: None,
            initial_value: None,
            check_value: None,
        }
    }

    /// A field with no options configured.
    pub fn new(ty: &'static dyn FieldType) -> Field {
        Field {
            ty,
            name: "<anonymous>".to_string(),
            state: ValueState::unconfigured(),
            gate: ValidityGate::new(None),
        }
    }

    /// Construct a field with no options and read one value from the stream.
    pub fn read_from<R: Read>(
        ty: &'static dyn FieldType,
        r: &mut R,
    ) -> Result<Value, FieldError> {
        let mut field = Field::new(ty);
        field.read(r)?;
        field.value()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> &'static dyn FieldType {
        self.ty
    }

    /// True only while no value has been assigned or read.
    pub fn is_clear(&self) -> bool {
        self.state.is_clear()
    }

    /// True only between `begin_read` and `end_read`.
    pub fn in_read(&self) -> bool {
        self.state.in_read()
    }

    /// Current value, resolving (and memoizing) the configured default while
    /// clear. Standalone form; deferred parameters that reference siblings
    /// need [`Field::value_in`].
    pub fn value(&mut self) -> Result<Value, FieldError> {
        self.value_in(&ParamContext::empty())
    }

    pub fn value_in(&mut self, ctx: &ParamContext) -> Result<Value, FieldError> {
        let ty = self.ty;
        self.state.value(ctx, || ty.sensible_default())
    }

    /// Assign a value. Ignored when a constant override is configured.
    pub fn set_value(&mut self, v: Value) {
        self.state.assign(v);
    }

    /// Current resolved value with no side effects.
    pub fn snapshot(&self) -> Result<Value, FieldError> {
        self.snapshot_in(&ParamContext::empty())
    }

    pub fn snapshot_in(&self, ctx: &ParamContext) -> Result<Value, FieldError> {
        self.state.peek(ctx, || self.ty.sensible_default())
    }

    /// Byte length of the current value on the wire.
    pub fn num_bytes(&self) -> Result<usize, FieldError> {
        self.num_bytes_in(&ParamContext::empty())
    }

    pub fn num_bytes_in(&self, ctx: &ParamContext) -> Result<usize, FieldError> {
        let v = self.snapshot_in(ctx)?;
        self.ty.num_bytes(&v)
    }

    /// Names of contained fields: always empty for leaf fields. Composite
    /// containers aggregate their members' names.
    pub fn field_names(&self) -> Vec<String> {
        Vec::new()
    }

    /// First read phase: decode from the stream and expose the decoded value,
    /// even when a constant override is configured.
    pub fn begin_read<R: Read>(&mut self, r: &mut R) -> Result<(), FieldError> {
        let decoded = self.ty.decode(r)?;
        self.state.start_read(decoded);
        Ok(())
    }

    /// Second read phase: settle the final value (the constant override when
    /// one is configured) and run the validity check against the value that
    /// was actually decoded.
    pub fn end_read(&mut self) -> Result<(), FieldError> {
        self.end_read_in(&ParamContext::empty())
    }

    pub fn end_read_in(&mut self, ctx: &ParamContext) -> Result<(), FieldError> {
        let decoded = self.state.finish_read(ctx)?;
        self.gate.check(&self.name, &decoded, ctx)
    }

    /// One-shot read: both phases, with no observable `Reading` state in
    /// between.
    pub fn read<R: Read>(&mut self, r: &mut R) -> Result<(), FieldError> {
        self.read_in(r, &ParamContext::empty())
    }

    pub fn read_in<R: Read>(&mut self, r: &mut R, ctx: &ParamContext) -> Result<(), FieldError> {
        self.begin_read(r)?;
        self.end_read_in(ctx)
    }

    /// Encode the current value to the stream.
    pub fn write<W: Write>(&mut self, w: &mut W) -> Result<(), FieldError> {
        self.write_in(w, &ParamContext::empty())
    }

    pub fn write_in<W: Write>(&mut self, w: &mut W, ctx: &ParamContext) -> Result<(), FieldError> {
        let v = self.value_in(ctx)?;
        self.ty.encode(&v, w)
    }

    /// Return to clear: discard any assigned, in-progress, or read value.
    /// Idempotent, and the only operation specified to be safe after a failed
    /// read.
    pub fn clear(&mut self) {
        self.state.clear();
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
