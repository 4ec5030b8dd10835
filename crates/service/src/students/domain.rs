use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Primitive value of a caller-supplied field.
///
/// Untagged so the wire form is plain JSON: `true`, `42`, `3.5`, `"text"`.
/// Variant order matters: integers above `i64::MAX` land in `Unsigned`
/// before anything falls through to `Float`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Text(String),
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self { Self::Text(v.to_string()) }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self { Self::Text(v) }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self { Self::Integer(v) }
}

impl From<u64> for FieldValue {
    fn from(v: u64) -> Self { Self::Unsigned(v) }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self { Self::Float(v) }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self { Self::Bool(v) }
}

/// Ordered field mapping of a student, excluding the id.
pub type StudentFields = BTreeMap<String, FieldValue>;

/// Key reserved for the record id; never kept inside `fields`.
pub const ID_KEY: &str = "id";

/// A stored student: the id plus its fields, flattened into one JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: u64,
    #[serde(flatten)]
    pub fields: StudentFields,
}

impl StudentRecord {
    /// Combine an id with fields. A payload `id` key is dropped so the
    /// record id always matches its storage key.
    pub fn new(id: u64, mut fields: StudentFields) -> Self {
        fields.remove(ID_KEY);
        Self { id, fields }
    }

    /// Shallow merge: supplied keys overwrite, other keys are kept.
    pub fn merge(&mut self, mut fields: StudentFields) {
        fields.remove(ID_KEY);
        self.fields.extend(fields);
    }
}
