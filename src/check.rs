//! Post-read validity checking.
//!
//! The gate runs exactly once per completed read, never on direct assignment.
//! A check value that resolves to a boolean is a pass/fail predicate; any
//! other resolved value is treated as the value the decoded bytes are
//! expected to equal.

use crate::error::FieldError;
use crate::param::{Param, ParamContext};
use crate::value::Value;

/// Interpretation of a resolved check value, chosen by its type at evaluation
/// time.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    Predicate(bool),
    Expected(Value),
}

impl From<Value> for CheckOutcome {
    fn from(v: Value) -> CheckOutcome {
        match v {
            Value::Bool(b) => CheckOutcome::Predicate(b),
            other => CheckOutcome::Expected(other),
        }
    }
}

/// Evaluates the configured check value against the value just read.
#[derive(Debug, Default)]
pub struct ValidityGate {
    check: Option<Param>,
}

impl ValidityGate {
    pub fn new(check: Option<Param>) -> ValidityGate {
        ValidityGate { check }
    }

    /// Run the check. The context is rebound so a deferred expression can
    /// observe the decoded value via [`ParamContext::just_read`]. Absent check
    /// values always pass.
    pub fn check(
        &self,
        field: &str,
        decoded: &Value,
        ctx: &ParamContext,
    ) -> Result<(), FieldError> {
        let param = match &self.check {
            Some(p) => p,
            None => return Ok(()),
        };
        let ctx = ctx.bind_just_read(decoded);
        match CheckOutcome::from(param.resolve(&ctx)?) {
            CheckOutcome::Predicate(true) => Ok(()),
            CheckOutcome::Predicate(false) => Err(FieldError::Validity {
                field: field.to_string(),
                expected: None,
                actual: Some(decoded.clone()),
            }),
            CheckOutcome::Expected(want) if want == *decoded => Ok(()),
            CheckOutcome::Expected(want) => Err(FieldError::Validity {
                field: field.to_string(),
                expected: Some(want),
                actual: Some(decoded.clone()),
            }),
        }
    }
}
