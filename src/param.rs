//! Lazily evaluated field parameters.
//!
//! Every configurable parameter (`initial_value`, `value`, `check_value`) is
//! either a constant of the field's value type or a deferred expression: a
//! zero-argument computation evaluated against a [`ParamContext`] at the moment
//! of use, not at configuration time. Deferred expressions must be pure over
//! the context; referencing a sibling the context does not expose is a
//! resolution error, never a silent default.

use crate::error::FieldError;
use crate::value::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A configured parameter: fixed at construction or computed on demand.
#[derive(Clone)]
pub enum Param {
    Constant(Value),
    Deferred(Arc<dyn Fn(&ParamContext) -> Result<Value, FieldError> + Send + Sync>),
}

impl Param {
    pub fn constant(v: Value) -> Param {
        Param::Constant(v)
    }

    pub fn deferred<F>(f: F) -> Param
    where
        F: Fn(&ParamContext) -> Result<Value, FieldError> + Send + Sync + 'static,
    {
        Param::Deferred(Arc::new(f))
    }

    /// Resolve against `ctx`. Constants ignore the context.
    pub fn resolve(&self, ctx: &ParamContext) -> Result<Value, FieldError> {
        match self {
            Param::Constant(v) => Ok(v.clone()),
            Param::Deferred(f) => f(ctx),
        }
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Constant(v) => f.debug_tuple("Constant").field(v).finish(),
            Param::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

impl From<Value> for Param {
    fn from(v: Value) -> Param {
        Param::Constant(v)
    }
}

/// Ephemeral read-only view supplied at evaluation time: sibling field values
/// by name and, during check evaluation only, the value just read. Not
/// persisted; an enclosing composite reconstructs it per evaluation.
#[derive(Debug, Default)]
pub struct ParamContext<'a> {
    siblings: Option<&'a HashMap<String, Value>>,
    just_read: Option<Value>,
}

impl<'a> ParamContext<'a> {
    /// A context exposing nothing (standalone leaf usage).
    pub fn empty() -> ParamContext<'a> {
        ParamContext::default()
    }

    /// A context exposing the sibling values of an enclosing composite.
    pub fn with_siblings(siblings: &'a HashMap<String, Value>) -> ParamContext<'a> {
        ParamContext {
            siblings: Some(siblings),
            just_read: None,
        }
    }

    /// Same sibling view, with the freshly decoded value bound for check
    /// evaluation.
    pub(crate) fn bind_just_read(&self, v: &Value) -> ParamContext<'a> {
        ParamContext {
            siblings: self.siblings,
            just_read: Some(v.clone()),
        }
    }

    /// Look up a sibling field value by name.
    pub fn get(&self, name: &str) -> Result<Value, FieldError> {
        self.siblings
            .and_then(|m| m.get(name))
            .cloned()
            .ok_or_else(|| FieldError::UnresolvedReference(name.to_string()))
    }

    /// The value just read. Bound only while a check value is being evaluated.
    pub fn just_read(&self) -> Result<Value, FieldError> {
        self.just_read
            .clone()
            .ok_or_else(|| FieldError::UnresolvedReference("<just-read value>".to_string()))
    }
}
