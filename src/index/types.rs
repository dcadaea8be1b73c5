use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Positional identifier of a record inside one built index.
///
/// Ordinals are only meaningful for the index that assigned them and never
/// leave the engine.
pub type RecordId = u32;

/// Fields whose text is tokenized into the inverted index, in build order.
pub const SEARCHABLE_FIELDS: [&str; 5] = [
    "common_name",
    "scientific_name",
    "family",
    "plant_type",
    "sun_exposure",
];

/// Fields eligible for exact-match indexed filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IndexedField {
    PlantId,
    Family,
    PlantType,
    ScientificName,
}

impl IndexedField {
    pub const COUNT: usize = 4;

    pub const ALL: [IndexedField; Self::COUNT] = [
        IndexedField::PlantId,
        IndexedField::Family,
        IndexedField::PlantType,
        IndexedField::ScientificName,
    ];

    /// Resolve a record field name to an indexed field, if it is whitelisted.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "plant_id" => Some(IndexedField::PlantId),
            "family" => Some(IndexedField::Family),
            "plant_type" => Some(IndexedField::PlantType),
            "scientific_name" => Some(IndexedField::ScientificName),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IndexedField::PlantId => "plant_id",
            IndexedField::Family => "family",
            IndexedField::PlantType => "plant_type",
            IndexedField::ScientificName => "scientific_name",
        }
    }

    /// Slot of this field in per-field tables
    #[inline]
    pub fn slot(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for IndexedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single record value as it appears in the source JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Empty strings carry no information and are treated like absent values
    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Text(text) if text.is_empty())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value.into())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

/// One catalog entry: a mapping from field name to value.
///
/// JSON `null` values are dropped on load so that "absent" has exactly one
/// representation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PlantRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl PlantRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, mostly for tests and fixtures
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Textual value of a field, if present and a string
    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_text)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, FieldValue)> for PlantRecord {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl<'de> Deserialize<'de> for PlantRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, Option<FieldValue>>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .filter_map(|(field, value)| value.map(|v| (field, v)))
            .collect())
    }
}
