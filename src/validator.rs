//! Argument validation against a tool's parameter schema.
//!
//! This is the trust boundary for model output: every proposal passes
//! through [`validate`] before it reaches a caller. Values are checked,
//! never coerced.

use crate::catalog::{ParamKind, ToolSpec};
use crate::error::RouterError;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// A typed argument value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArgValue {
    Integer(i64),
    Number(f64),
    String(String),
    Boolean(bool),
}

/// Validated arguments in parameter declaration order.
///
/// Serializes as a JSON object with keys in that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments(Vec<(String, ArgValue)>);

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, name: String, value: ArgValue) {
        self.0.push((name, value));
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl Serialize for Arguments {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Check `payload` against `spec` and return the typed arguments.
///
/// Checks run in a fixed order: missing required parameters (declaration
/// order), then undeclared keys (payload order), then value kinds.
pub fn validate(spec: &ToolSpec, payload: &Map<String, Value>) -> Result<Arguments, RouterError> {
    if let Some(missing) = spec.required().find(|p| !payload.contains_key(&p.name)) {
        return Err(RouterError::MissingArgument(missing.name.clone()));
    }

    if let Some(unknown) = payload.keys().find(|k| spec.parameter(k).is_none()) {
        return Err(RouterError::UnknownArgument(unknown.clone()));
    }

    let mut arguments = Arguments::new();
    for param in &spec.parameters {
        let Some(value) = payload.get(&param.name) else {
            continue;
        };
        let typed = check_kind(param.kind, value).ok_or_else(|| RouterError::TypeMismatch {
            parameter: param.name.clone(),
            expected: param.kind,
            actual: value.clone(),
        })?;
        arguments.push(param.name.clone(), typed);
    }

    Ok(arguments)
}

fn check_kind(kind: ParamKind, value: &Value) -> Option<ArgValue> {
    match (kind, value) {
        (ParamKind::Integer, Value::Number(n)) => whole_number(n).map(ArgValue::Integer),
        (ParamKind::Number, Value::Number(n)) => n.as_f64().map(ArgValue::Number),
        (ParamKind::String, Value::String(s)) => Some(ArgValue::String(s.clone())),
        (ParamKind::Boolean, Value::Bool(b)) => Some(ArgValue::Boolean(*b)),
        _ => None,
    }
}

/// Accepts `7` and `7.0`, rejects `7.5` and anything outside `i64`.
fn whole_number(n: &serde_json::Number) -> Option<i64> {
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    let f = n.as_f64()?;
    // 2^63 is exactly representable; i64::MAX is not.
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < 9_223_372_036_854_775_808.0 {
        Some(f as i64)
    } else {
        None
    }
}
