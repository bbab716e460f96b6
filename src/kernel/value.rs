use serde::{Serialize, Deserialize};
use tracing::debug;

/// Names which representation of a [`TypedValue`] is populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    String,
    Number,
    Struct,
    Null,
}

/// One kind-tagged value from the oracle's parameter tree.
///
/// Every read site branches on the populated variant; there is no silent
/// coercion between kinds. Reading the wrong kind is an extraction error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypedValue {
    String(String),
    Number(f64),
    Struct(Fields),
    Null,
}

impl TypedValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            TypedValue::String(_) => ValueKind::String,
            TypedValue::Number(_) => ValueKind::Number,
            TypedValue::Struct(_) => ValueKind::Struct,
            TypedValue::Null => ValueKind::Null,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            TypedValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&Fields> {
        match self {
            TypedValue::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    /// Wire boundary: collapse one JSON node into the four modeled kinds.
    /// Bools and lists carry no transport meaning and flatten to Null, so
    /// extraction always sees a well-formed tree.
    pub fn from_wire(value: &serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::String(s) => TypedValue::String(s.clone()),
            Value::Number(n) => match n.as_f64() {
                Some(n) => TypedValue::Number(n),
                None => TypedValue::Null,
            },
            Value::Object(map) => {
                let mut fields = Fields::new();
                for (name, nested) in map {
                    fields.insert(name, TypedValue::from_wire(nested));
                }
                TypedValue::Struct(fields)
            }
            Value::Null => TypedValue::Null,
            other => {
                debug!("Unmodeled parameter kind in wire tree: {}", other);
                TypedValue::Null
            }
        }
    }
}

/// Ordered parameter map. Order is whatever the oracle sent; lookups are
/// by field name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Fields(Vec<(String, TypedValue)>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: TypedValue) {
        self.0.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&TypedValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypedValue)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl FromIterator<(String, TypedValue)> for Fields {
    fn from_iter<I: IntoIterator<Item = (String, TypedValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
