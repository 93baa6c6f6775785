//! Merge nodes and record identity

use serde_json::{Map, Number, Value};

/// Shape of one side of a merge at the current recursion step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MergeNode<'a> {
    /// Missing or `null`
    Absent,
    /// String, number or boolean
    Scalar(&'a Value),
    /// Array
    Sequence(&'a [Value]),
    /// Object
    Mapping(&'a Map<String, Value>),
}

impl<'a> MergeNode<'a> {
    /// Classify a value
    pub fn of(value: &'a Value) -> Self {
        match value {
            Value::Null => MergeNode::Absent,
            Value::Array(items) => MergeNode::Sequence(items),
            Value::Object(map) => MergeNode::Mapping(map),
            scalar => MergeNode::Scalar(scalar),
        }
    }

    /// Classify a value that may be missing
    pub fn of_opt(value: Option<&'a Value>) -> Self {
        value.map_or(MergeNode::Absent, MergeNode::of)
    }

    /// Neither a mapping nor a sequence
    #[inline]
    pub fn is_leaf(self) -> bool {
        matches!(self, MergeNode::Absent | MergeNode::Scalar(_))
    }
}

/// Comparable form of a record's identity value
///
/// Strings, numbers and booleans compare through their canonical text, so
/// `1`, `1.0` and `"1"` all name the same record. Whole floats print without
/// a fraction. Null, arrays and objects carry no identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    /// Identity of a scalar value
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Identity(s.clone())),
            Value::Number(n) => Some(Identity(canonical_number(n))),
            Value::Bool(b) => Some(Identity(b.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Identity of an array element under `key`; only mappings have one
    pub fn of_record(record: &Value, key: &str) -> Option<Self> {
        record.as_object()?.get(key).and_then(Identity::from_value)
    }

    /// Like [`Identity::of_record`], but `0`, `""` and `false` count as missing
    pub fn of_truthy_record(record: &Value, key: &str) -> Option<Self> {
        let value = record.as_object()?.get(key)?;
        let falsy = match value {
            Value::Bool(b) => !b,
            Value::String(s) => s.is_empty(),
            Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
            _ => false,
        };
        if falsy { None } else { Identity::from_value(value) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Largest integer an `f64` holds exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

fn canonical_number(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        // -0 names the same record as 0
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER => format!("{f:.0}"),
        _ => n.to_string(),
    }
}
