//! Per-instance lifecycle state machine.
//!
//! A field occupies exactly one stage at any instant: `Clear` (no assigned or
//! read value; resolves to its configured default), `Assigned`, `Reading`
//! (mid two-phase read), or `Read`. Reads are two-phase: `start_read` stores
//! the decoded value unconditionally, `finish_read` settles the final value.
//! A configured constant override suppresses assignment and replaces the
//! decoded value when the read finishes, so the decoded bytes are visible only
//! between the two phases.

use crate::error::FieldError;
use crate::param::{Param, ParamContext};
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Clear,
    Assigned,
    Reading,
    Read,
}

/// Lifecycle container for one field occurrence: current value, stage flag,
/// configured initial/constant parameters, and the memoized default.
#[derive(Debug)]
pub struct ValueState {
    initial: Option<Param>,
    constant: Option<Param>,
    // Some only in Assigned/Reading/Read.
    current: Option<Value>,
    cached_default: Option<Value>,
    stage: Stage,
}

impl ValueState {
    /// A state with no configured parameters.
    pub fn unconfigured() -> ValueState {
        ValueState {
            initial: None,
            constant: None,
            current: None,
            cached_default: None,
            stage: Stage::Clear,
        }
    }

    /// Configured construction. `initial` and `constant` are mutually
    /// exclusive; supplying both is a configuration error.
    pub fn new(initial: Option<Param>, constant: Option<Param>) -> Result<ValueState, FieldError> {
        if initial.is_some() && constant.is_some() {
            return Err(FieldError::Configuration(
                "value and initial_value are mutually exclusive".to_string(),
            ));
        }
        let mut state = ValueState::unconfigured();
        state.initial = initial;
        state.constant = constant;
        Ok(state)
    }

    pub fn is_clear(&self) -> bool {
        self.stage == Stage::Clear
    }

    pub fn in_read(&self) -> bool {
        self.stage == Stage::Reading
    }

    pub fn has_constant(&self) -> bool {
        self.constant.is_some()
    }

    /// Assign a value. Silently discarded when a constant override is
    /// configured; the stage does not change in that case.
    pub fn assign(&mut self, v: Value) {
        if self.constant.is_some() {
            return;
        }
        self.current = Some(v);
        self.stage = Stage::Assigned;
    }

    /// First read phase: store the decoded value unconditionally, even when a
    /// constant override is configured.
    pub fn start_read(&mut self, decoded: Value) {
        self.current = Some(decoded);
        self.stage = Stage::Reading;
    }

    /// Second read phase: keep the decoded value, or replace it with the
    /// resolved constant override. Returns the decoded value so the caller can
    /// run its validity check against the bytes actually read.
    pub fn finish_read(&mut self, ctx: &ParamContext) -> Result<Value, FieldError> {
        if self.stage != Stage::Reading {
            return Err(FieldError::Configuration(
                "end_read without a matching begin_read".to_string(),
            ));
        }
        let decoded = match self.current.take() {
            Some(v) => v,
            None => {
                return Err(FieldError::Configuration(
                    "end_read without a matching begin_read".to_string(),
                ))
            }
        };
        let kept = match &self.constant {
            Some(p) => p.resolve(ctx)?,
            None => decoded.clone(),
        };
        self.current = Some(kept);
        self.stage = Stage::Read;
        Ok(decoded)
    }

    /// Current value. In `Clear` the configured default (constant override,
    /// initial value, or `fallback`) is resolved lazily and memoized; no stage
    /// transition happens.
    pub fn value<F>(&mut self, ctx: &ParamContext, fallback: F) -> Result<Value, FieldError>
    where
        F: FnOnce() -> Value,
    {
        if let Some(v) = &self.current {
            return Ok(v.clone());
        }
        if let Some(v) = &self.cached_default {
            return Ok(v.clone());
        }
        let v = self.resolve_default(ctx, fallback)?;
        self.cached_default = Some(v.clone());
        Ok(v)
    }

    /// Same resolution as [`ValueState::value`], with no memoization side
    /// effect.
    pub fn peek<F>(&self, ctx: &ParamContext, fallback: F) -> Result<Value, FieldError>
    where
        F: FnOnce() -> Value,
    {
        if let Some(v) = &self.current {
            return Ok(v.clone());
        }
        if let Some(v) = &self.cached_default {
            return Ok(v.clone());
        }
        self.resolve_default(ctx, fallback)
    }

    fn resolve_default<F>(&self, ctx: &ParamContext, fallback: F) -> Result<Value, FieldError>
    where
        F: FnOnce() -> Value,
    {
        if let Some(p) = &self.constant {
            return p.resolve(ctx);
        }
        if let Some(p) = &self.initial {
            return p.resolve(ctx);
        }
        Ok(fallback())
    }

    /// Return to `Clear`, discarding any assigned, in-progress, or read value
    /// and the memoized default. Idempotent; safe in any stage, including
    /// after a failed read.
    pub fn clear(&mut self) {
        self.current = None;
        self.cached_default = None;
        self.stage = Stage::Clear;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> ParamContext<'static> {
        ParamContext::empty()
    }

    #[test]
    fn stages_are_exclusive() {
        let mut s = ValueState::unconfigured();
        assert!(s.is_clear() && !s.in_read());
        s.assign(Value::U8(1));
        assert!(!s.is_clear() && !s.in_read());
        s.start_read(Value::U8(2));
        assert!(!s.is_clear() && s.in_read());
        s.finish_read(&ctx()).unwrap();
        assert!(!s.is_clear() && !s.in_read());
        s.clear();
        assert!(s.is_clear());
    }

    #[test]
    fn both_params_rejected() {
        let err = ValueState::new(
            Some(Param::Constant(Value::U8(1))),
            Some(Param::Constant(Value::U8(2))),
        )
        .unwrap_err();
        assert!(matches!(err, FieldError::Configuration(_)));
    }

    #[test]
    fn finish_read_requires_reading() {
        let mut s = ValueState::unconfigured();
        assert!(s.finish_read(&ctx()).is_err());
        s.assign(Value::U8(1));
        assert!(s.finish_read(&ctx()).is_err());
    }

    #[test]
    fn constant_revert_returns_decoded() {
        let mut s = ValueState::new(None, Some(Param::Constant(Value::U8(5)))).unwrap();
        s.start_read(Value::U8(56));
        assert_eq!(s.peek(&ctx(), || Value::U8(0)).unwrap(), Value::U8(56));
        let decoded = s.finish_read(&ctx()).unwrap();
        assert_eq!(decoded, Value::U8(56));
        assert_eq!(s.peek(&ctx(), || Value::U8(0)).unwrap(), Value::U8(5));
    }

    #[test]
    fn default_memo_survives_until_clear() {
        let mut s = ValueState::new(Some(Param::Constant(Value::U8(7))), None).unwrap();
        assert_eq!(s.value(&ctx(), || Value::U8(0)).unwrap(), Value::U8(7));
        s.assign(Value::U8(9));
        assert_eq!(s.value(&ctx(), || Value::U8(0)).unwrap(), Value::U8(9));
        s.clear();
        assert_eq!(s.value(&ctx(), || Value::U8(0)).unwrap(), Value::U8(7));
    }
}
