//! Attribute values exchanged with storage drivers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The generic key-value dictionary exchanged with storage and query layers.
///
/// Keys are resolved field names; insertion order carries no meaning.
pub type AttributeMap = HashMap<String, Value>;

/// A driver-facing attribute value.
///
/// `Null` stands in for an absent optional reference; reading a field through
/// an absent intermediate reference also yields `Null` rather than failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    Text(String),
    Bytes(Vec<u8>),
}

impl Value {
    /// Runtime type name, compared verbatim against a field's declared type
    /// name when deciding whether an assignment is allowed.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Double(_) => "Double",
            Value::Text(_) => "Text",
            Value::Bytes(_) => "Bytes",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}
