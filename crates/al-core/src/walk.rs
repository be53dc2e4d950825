//! Tagged-variant value walker.
//!
//! Converts an opaque runtime value into the structural `Value` model by
//! dispatch over an explicit description, recursing into sequences, named
//! constant groups, and generic records.
//!
//! Collaborators do not get walked by ambient reflection; they describe
//! themselves through `Raw`, `ConstantGroup`, and `FieldSet`. That makes
//! the walker a pure function over the description, and makes declaration
//! order whatever order the provider reports — stable for a fixed binary,
//! not a cross-platform contract.
//!
//! # Field-access policy
//!
//! Every individual field read is a `Result`. A failed read never aborts
//! the walk: the field is still inserted, with value `Null`. One unreadable
//! constant must not cost the whole document.

use al_common::{Number, Record, Value};
use thiserror::Error;
use tracing::debug;

/// Default nesting depth past which a subtree is pruned to `Null`.
///
/// The constant trees walked here are bounded and acyclic by construction
/// of the providers; the cap exists to fail safe on malformed input rather
/// than recurse forever.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Failure to read one field or constant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("field is inaccessible: {0}")]
    Inaccessible(String),

    #[error("field read failed: {0}")]
    ReadFailed(String),

    #[error("unexpected value shape: {0}")]
    Malformed(String),
}

/// Result of reading a single field.
pub type FieldResult = Result<Raw, FieldError>;

/// Description of an opaque runtime value, as reported by a collaborator.
pub enum Raw {
    /// Absent or unset.
    Absent,
    /// Textual.
    Text(String),
    /// Integral numeric.
    Int(i64),
    /// Floating numeric.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// Ordered, indexable collection.
    Items(Vec<Raw>),
    /// A named constant group (compile-time-nested constant holder).
    Group(Box<dyn ConstantGroup>),
    /// A generic record-shaped value with named fields.
    Record(Box<dyn FieldSet>),
}

/// A named holder of related constants, possibly with nested groups.
///
/// `constants()` and `nested()` report entries in declaration order; the
/// walker preserves that order exactly.
pub trait ConstantGroup {
    /// Qualified name, e.g. `"Build.VERSION"`. The walker keys nested
    /// groups on the last segment only.
    fn name(&self) -> String;

    /// Declared constants in declaration order. Each read may fail
    /// independently.
    fn constants(&self) -> Vec<(String, FieldResult)>;

    /// Nested groups in declaration order.
    fn nested(&self) -> Vec<Box<dyn ConstantGroup>>;
}

/// A record-shaped value enumerating its named fields in declaration order.
pub trait FieldSet {
    fn fields(&self) -> Vec<(String, FieldResult)>;
}

/// Strip enclosing-type qualification, keeping the innermost segment.
pub fn short_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

/// The recursive walker.
#[derive(Debug, Clone)]
pub struct Walker {
    max_depth: usize,
}

impl Default for Walker {
    fn default() -> Self {
        Walker {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Walker {
    pub fn new() -> Self {
        Walker::default()
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Walker { max_depth }
    }

    /// Walk a described value into the structural model.
    pub fn walk(&self, raw: &Raw) -> Value {
        self.walk_at(raw, 0)
    }

    fn walk_at(&self, raw: &Raw, depth: usize) -> Value {
        if depth > self.max_depth {
            debug!(depth, "nesting exceeds depth cap, pruning subtree to null");
            return Value::Null;
        }
        match raw {
            Raw::Absent => Value::Null,
            Raw::Text(s) => Value::String(s.clone()),
            Raw::Int(n) => Value::Number(Number::Int(*n)),
            Raw::Float(n) => Value::Number(Number::Float(*n)),
            Raw::Bool(b) => Value::Bool(*b),
            Raw::Items(items) => Value::Sequence(
                items
                    .iter()
                    .map(|item| self.walk_at(item, depth + 1))
                    .collect(),
            ),
            Raw::Group(group) => Value::Record(self.walk_group(group.as_ref(), depth)),
            Raw::Record(fields) => {
                let mut rec = Record::new();
                for (name, read) in fields.fields() {
                    let value = self.read_or_null(&name, read, depth + 1);
                    rec.insert(name, value);
                }
                Value::Record(rec)
            }
        }
    }

    fn walk_group(&self, group: &dyn ConstantGroup, depth: usize) -> Record {
        let mut rec = Record::new();
        for (name, read) in group.constants() {
            let value = self.read_or_null(&name, read, depth + 1);
            rec.insert(name, value);
        }
        for sub in group.nested() {
            let qualified = sub.name();
            let key = short_name(&qualified).to_string();
            let value = if depth + 1 > self.max_depth {
                debug!(group = %qualified, "nested group exceeds depth cap, pruning to null");
                Value::Null
            } else {
                Value::Record(self.walk_group(sub.as_ref(), depth + 1))
            };
            rec.insert(key, value);
        }
        rec
    }

    /// The single read-or-null combinator: a failed field read becomes
    /// `Null` and the walk continues.
    fn read_or_null(&self, name: &str, read: FieldResult, depth: usize) -> Value {
        match read {
            Ok(raw) => self.walk_at(&raw, depth),
            Err(err) => {
                debug!(field = name, error = %err, "unreadable field recorded as null");
                Value::Null
            }
        }
    }
}

/// A leaf constant value held by a [`StaticGroup`].
#[derive(Debug, Clone, PartialEq)]
pub enum Leaf {
    Absent,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl From<&str> for Leaf {
    fn from(s: &str) -> Self {
        Leaf::Text(s.to_string())
    }
}

impl From<String> for Leaf {
    fn from(s: String) -> Self {
        Leaf::Text(s)
    }
}

impl From<i64> for Leaf {
    fn from(n: i64) -> Self {
        Leaf::Int(n)
    }
}

impl From<bool> for Leaf {
    fn from(b: bool) -> Self {
        Leaf::Bool(b)
    }
}

impl From<Leaf> for Raw {
    fn from(leaf: Leaf) -> Self {
        match leaf {
            Leaf::Absent => Raw::Absent,
            Leaf::Text(s) => Raw::Text(s),
            Leaf::Int(n) => Raw::Int(n),
            Leaf::Float(n) => Raw::Float(n),
            Leaf::Bool(b) => Raw::Bool(b),
        }
    }
}

/// A `ConstantGroup` backed by fixed data.
///
/// Used by the built-in platform provider (and by tests) to declare a
/// constants tree whose order is fixed in source.
#[derive(Debug, Clone, Default)]
pub struct StaticGroup {
    name: String,
    constants: Vec<(String, Result<Leaf, FieldError>)>,
    nested: Vec<StaticGroup>,
}

impl StaticGroup {
    pub fn new(name: impl Into<String>) -> Self {
        StaticGroup {
            name: name.into(),
            constants: Vec::new(),
            nested: Vec::new(),
        }
    }

    /// Declare a readable constant.
    pub fn constant(mut self, name: impl Into<String>, value: impl Into<Leaf>) -> Self {
        self.constants.push((name.into(), Ok(value.into())));
        self
    }

    /// Declare a constant whose read fails.
    pub fn failing_constant(mut self, name: impl Into<String>, err: FieldError) -> Self {
        self.constants.push((name.into(), Err(err)));
        self
    }

    /// Declare a nested group.
    pub fn group(mut self, sub: StaticGroup) -> Self {
        self.nested.push(sub);
        self
    }
}

impl ConstantGroup for StaticGroup {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn constants(&self) -> Vec<(String, FieldResult)> {
        self.constants
            .iter()
            .map(|(name, read)| {
                let read = match read {
                    Ok(leaf) => Ok(Raw::from(leaf.clone())),
                    Err(err) => Err(err.clone()),
                };
                (name.clone(), read)
            })
            .collect()
    }

    fn nested(&self) -> Vec<Box<dyn ConstantGroup>> {
        self.nested
            .iter()
            .map(|sub| Box::new(sub.clone()) as Box<dyn ConstantGroup>)
            .collect()
    }
}
