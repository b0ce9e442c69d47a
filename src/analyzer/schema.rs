//! Shallow input-schema inference
//!
//! Recovers a `field -> primitive type` map from a tool's
//! `inputSchema: { field: z.string(), ... }` shape. Only top-level fields
//! whose value starts with `<namespace>.<kind>(` are recognized; anything
//! else (enums, unions, references to variables) is skipped.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::scanner::{matching_close, object_entries};

/// Field validator: `<namespace>.<kind>(`
static FIELD_KIND_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_$][\w$]*\s*\.\s*(string|number|boolean|array|object)\s*\(").unwrap()
});

/// Shape wrapped in a validator call: `<namespace>.object({`
static OBJECT_WRAPPER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][\w$]*\s*\.\s*object\s*\(\s*\{").unwrap());

/// Primitive type tag of an input field
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Array,
    Object,
}

impl FieldType {
    /// Map a validator method name to its type tag
    pub fn from_validator(kind: &str) -> Option<Self> {
        match kind {
            "string" => Some(FieldType::String),
            "number" => Some(FieldType::Number),
            "boolean" => Some(FieldType::Boolean),
            "array" => Some(FieldType::Array),
            "object" => Some(FieldType::Object),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Array => "array",
            FieldType::Object => "object",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered field map; the first occurrence of a name wins
///
/// Serializes as a JSON object in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSchema {
    fields: Vec<(String, FieldType)>,
}

impl InputSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field unless one with the same name is already present
    pub fn insert(&mut self, name: impl Into<String>, kind: FieldType) -> bool {
        let name = name.into();
        if self.get(&name).is_some() {
            return false;
        }
        self.fields.push((name, kind));
        true
    }

    pub fn get(&self, name: &str) -> Option<FieldType> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, kind)| *kind)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, FieldType)> {
        self.fields.iter().map(|(name, kind)| (name.as_str(), *kind))
    }
}

impl<S: Into<String>> FromIterator<(S, FieldType)> for InputSchema {
    fn from_iter<I: IntoIterator<Item = (S, FieldType)>>(iter: I) -> Self {
        let mut schema = InputSchema::new();
        for (name, kind) in iter {
            schema.insert(name, kind);
        }
        schema
    }
}

impl Serialize for InputSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, kind) in &self.fields {
            map.serialize_entry(name, kind)?;
        }
        map.end()
    }
}

/// Infer the input schema declared in a tool's config block
///
/// `config_body` is the text between the config block's braces. Only the
/// first `limit` bytes of it are inside the lookahead window: an
/// `inputSchema` entry starting past the window is ignored and a shape
/// running past it is cut at the window edge. `limit` must be a char
/// boundary of `config_body` (or at least its length).
pub fn infer_input_schema(config_body: &str, limit: usize) -> InputSchema {
    let limit = limit.min(config_body.len());

    let Some(entry) = object_entries(config_body)
        .into_iter()
        .find(|e| e.key == "inputSchema")
    else {
        return InputSchema::new();
    };

    let open = if entry.value.starts_with('{') {
        entry.value_offset
    } else if let Some(m) = OBJECT_WRAPPER_RE.find(entry.value) {
        entry.value_offset + m.end() - 1
    } else {
        tracing::debug!("inputSchema is not an object literal; skipping inference");
        return InputSchema::new();
    };

    if open >= limit {
        return InputSchema::new();
    }

    let close = matching_close(config_body, open).unwrap_or(config_body.len());
    let shape = &config_body[open + 1..close.min(limit)];

    object_entries(shape)
        .into_iter()
        .filter_map(|field| {
            let kind = FIELD_KIND_RE.captures(field.value)?;
            Some((field.key, FieldType::from_validator(&kind[1])?))
        })
        .collect()
}
