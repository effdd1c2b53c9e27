//! Read access to a node's loosely typed parameter object.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::schema::{NodeSchema, ParamDefault};

/// Largest integer an `f64` holds exactly.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// The `data.params` object of a node, as sent by the editor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(Map<String, Value>);

impl Params {
    pub fn new() -> Self {
        Params(Map::new())
    }

    /// Builder-style insert, mostly for tests and fixtures.
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.0.insert(name.to_string(), value.into());
        self
    }

    /// The value of `name`, treating an explicit `null` as absent.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name).filter(|v| !v.is_null())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    /// Integral numbers only; `3.0` counts, `2.5` does not.
    pub fn integer(&self, name: &str) -> Option<i64> {
        let value = self.get(name)?;
        value.as_i64().or_else(|| {
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() <= MAX_EXACT_FLOAT)
                .map(|f| f as i64)
        })
    }

    /// Like `integer`, falling back to the schema default when unset.
    pub fn integer_or_default(&self, schema: &NodeSchema, name: &str) -> Option<i64> {
        if self.is_set(name) {
            return self.integer(name);
        }
        match schema.default_for(name)? {
            ParamDefault::Int(n) => Some(n),
            _ => None,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
