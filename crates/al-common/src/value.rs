//! Structural value model.
//!
//! `Value` is the common currency between the walker and the JSON emitter:
//! a small tagged union covering exactly the shapes the collectors produce.
//! Equality is structural throughout.
//!
//! Records keep first-insertion key order and never hold duplicate keys;
//! inserting under an existing key replaces the value in place. Sequences
//! preserve input order exactly. Both invariants carry straight through to
//! the emitted document, which is what makes runs byte-reproducible.

/// A numeric value, integer or floating, without lossy coercion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

/// A serializable value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    String(String),
    Number(Number),
    Bool(bool),
    Sequence(Vec<Value>),
    Record(Record),
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Number::Int(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(Number::Float(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Value::Record(r)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

/// An ordered name→value mapping with unique keys.
///
/// Backed by a plain vector: record trees here are small and bounded, and
/// a vector is the cheapest structure that preserves insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    entries: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Record {
            entries: Vec::new(),
        }
    }

    /// Insert a value under `name`.
    ///
    /// If the key already exists, the value is replaced in place and the
    /// key keeps its original position (last write wins on content, first
    /// write wins on order). Returns `true` if the key was new.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> bool {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == name) {
            entry.1 = value;
            false
        } else {
            self.entries.push((name, value));
            true
        }
    }

    /// Look up a value by key.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
