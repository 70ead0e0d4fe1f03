//! Schema-less property tree decoded from JSON.
//!
//! Every node carries a name and a tagged value. The decoder knows nothing
//! about maps or tilesets; shape checks happen in [`crate::document`].

use std::fmt;

use serde_json::Value;

use crate::error::{LoadError, PropertyError, Result};

/// Discriminant of a [`PropertyValue`], used in error reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Number,
    String,
    List,
    Map,
    Bool,
    Null,
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PropertyKind::Number => "number",
            PropertyKind::String => "string",
            PropertyKind::List => "list",
            PropertyKind::Map => "map",
            PropertyKind::Bool => "bool",
            PropertyKind::Null => "null",
        };
        f.write_str(name)
    }
}

/// Members of a JSON object, kept in document order.
///
/// Names are unique. Order matters to callers that treat the first member
/// as special, so this is a list rather than a hash map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyMap {
    entries: Vec<Property>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a member. An existing member with the same name keeps its
    /// position and takes the new value.
    pub fn insert(&mut self, property: Property) {
        match self.entries.iter_mut().find(|p| p.name == property.name) {
            Some(existing) => existing.value = property.value,
            None => self.entries.push(property),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Property> {
        self.entries.iter().find(|p| p.name == key)
    }

    /// First member in document order.
    pub fn first(&self) -> Option<&Property> {
        self.entries.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Property> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<Property> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a PropertyMap {
    type Item = &'a Property;
    type IntoIter = std::slice::Iter<'a, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Tagged value of a decoded JSON node.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    /// All JSON numbers, integers included.
    Number(f64),
    String(String),
    List(Vec<Property>),
    Map(PropertyMap),
    Bool(bool),
    Null,
}

impl PropertyValue {
    pub fn kind(&self) -> PropertyKind {
        match self {
            PropertyValue::Number(_) => PropertyKind::Number,
            PropertyValue::String(_) => PropertyKind::String,
            PropertyValue::List(_) => PropertyKind::List,
            PropertyValue::Map(_) => PropertyKind::Map,
            PropertyValue::Bool(_) => PropertyKind::Bool,
            PropertyValue::Null => PropertyKind::Null,
        }
    }
}

/// A named node in a decoded document.
#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    pub name: String,
    pub value: PropertyValue,
}

impl Property {
    pub fn new(name: impl Into<String>, value: PropertyValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Decode raw JSON bytes into a property tree rooted at `name`.
    ///
    /// Fails only when the input is not JSON; any shape is accepted.
    pub fn from_slice(name: &str, bytes: &[u8]) -> Result<Self> {
        let json: Value =
            serde_json::from_slice(bytes).map_err(|source| LoadError::MalformedDocument {
                document: name.to_string(),
                source,
            })?;
        Ok(Self::from_json(name, json))
    }

    /// Convert an already parsed JSON value.
    ///
    /// Object members are named by key, list elements by position.
    pub fn from_json(name: impl Into<String>, json: Value) -> Self {
        let value = match json {
            Value::Null => PropertyValue::Null,
            Value::Bool(b) => PropertyValue::Bool(b),
            // as_f64 only fails with serde_json's arbitrary_precision feature
            Value::Number(n) => PropertyValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => PropertyValue::String(s),
            Value::Array(items) => PropertyValue::List(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| Property::from_json(i.to_string(), item))
                    .collect(),
            ),
            Value::Object(members) => {
                let mut map = PropertyMap::new();
                for (key, member) in members {
                    map.insert(Property::from_json(key, member));
                }
                PropertyValue::Map(map)
            }
        };
        Self::new(name, value)
    }

    /// Re-encode as JSON. Whole numbers that fit an `f64` mantissa are
    /// written as integers so authored assets keep their textual form.
    pub fn to_json(&self) -> Value {
        match &self.value {
            PropertyValue::Null => Value::Null,
            PropertyValue::Bool(b) => Value::Bool(*b),
            PropertyValue::Number(n) => number_to_json(*n),
            PropertyValue::String(s) => Value::String(s.clone()),
            PropertyValue::List(items) => Value::Array(items.iter().map(Property::to_json).collect()),
            PropertyValue::Map(map) => Value::Object(
                map.iter()
                    .map(|p| (p.name.clone(), p.to_json()))
                    .collect(),
            ),
        }
    }

    pub fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }

    pub fn kind(&self) -> PropertyKind {
        self.value.kind()
    }

    fn mismatch(&self, expected: PropertyKind) -> PropertyError {
        PropertyError::KindMismatch {
            name: self.name.clone(),
            expected,
            found: self.kind(),
        }
    }

    pub fn as_number(&self) -> std::result::Result<f64, PropertyError> {
        match &self.value {
            PropertyValue::Number(n) => Ok(*n),
            _ => Err(self.mismatch(PropertyKind::Number)),
        }
    }

    pub fn as_str(&self) -> std::result::Result<&str, PropertyError> {
        match &self.value {
            PropertyValue::String(s) => Ok(s.as_str()),
            _ => Err(self.mismatch(PropertyKind::String)),
        }
    }

    pub fn as_bool(&self) -> std::result::Result<bool, PropertyError> {
        match &self.value {
            PropertyValue::Bool(b) => Ok(*b),
            _ => Err(self.mismatch(PropertyKind::Bool)),
        }
    }

    pub fn as_list(&self) -> std::result::Result<&[Property], PropertyError> {
        match &self.value {
            PropertyValue::List(items) => Ok(items.as_slice()),
            _ => Err(self.mismatch(PropertyKind::List)),
        }
    }

    pub fn as_map(&self) -> std::result::Result<&PropertyMap, PropertyError> {
        match &self.value {
            PropertyValue::Map(map) => Ok(map),
            _ => Err(self.mismatch(PropertyKind::Map)),
        }
    }

    /// Look up a member of a map property.
    pub fn get(&self, key: &str) -> std::result::Result<&Property, PropertyError> {
        self.as_map()?
            .get(key)
            .ok_or_else(|| PropertyError::MissingKey {
                name: self.name.clone(),
                key: key.to_string(),
            })
    }

    /// Like [`Property::get`], but a missing key is `Ok(None)`.
    pub fn get_opt(&self, key: &str) -> std::result::Result<Option<&Property>, PropertyError> {
        Ok(self.as_map()?.get(key))
    }
}

fn number_to_json(n: f64) -> Value {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0; // 2^53
    if n.fract() == 0.0 && n.abs() <= MAX_EXACT {
        Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> Property {
        Property::from_slice("doc", json.as_bytes()).unwrap()
    }

    #[test]
    fn test_numbers_are_floats() {
        let doc = decode(r#"{"a": 3, "b": -2.5}"#);
        assert_eq!(doc.get("a").unwrap().as_number(), Ok(3.0));
        assert_eq!(doc.get("b").unwrap().as_number(), Ok(-2.5));
    }

    #[test]
    fn test_map_keeps_document_order() {
        let doc = decode(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#);
        let names: Vec<_> = doc.as_map().unwrap().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
        assert_eq!(doc.as_map().unwrap().first().unwrap().name, "zeta");
    }

    #[test]
    fn test_list_elements_named_by_position() {
        let doc = decode(r#"[10, "x", [true]]"#);
        let items = doc.as_list().unwrap();
        assert_eq!(items[0].name, "0");
        assert_eq!(items[1].as_str(), Ok("x"));
        assert_eq!(items[2].as_list().unwrap()[0].as_bool(), Ok(true));
    }

    #[test]
    fn test_kind_mismatch_is_an_error() {
        let doc = decode(r#"{"layers": "nope"}"#);
        let err = doc.get("layers").unwrap().as_list().unwrap_err();
        assert_eq!(
            err,
            PropertyError::KindMismatch {
                name: "layers".into(),
                expected: PropertyKind::List,
                found: PropertyKind::String,
            }
        );
    }

    #[test]
    fn test_missing_key() {
        let doc = decode(r#"{"a": null}"#);
        assert!(matches!(
            doc.get("b"),
            Err(PropertyError::MissingKey { ref key, .. }) if key == "b"
        ));
        assert_eq!(doc.get_opt("b"), Ok(None));
        assert_eq!(doc.get("a").unwrap().kind(), PropertyKind::Null);
    }

    #[test]
    fn test_malformed_document() {
        let err = Property::from_slice("map", b"{\"layers\": [").unwrap_err();
        assert!(matches!(err, LoadError::MalformedDocument { ref document, .. } if document == "map"));
    }

    #[test]
    fn test_round_trip_preserves_shape() {
        let text = r#"{"layers":[[0,1,2]],"name":"level","scale":0.5,"flags":{"solid":true,"note":null}}"#;
        let doc = decode(text);
        let original: Value = serde_json::from_str(text).unwrap();
        assert_eq!(doc.to_json(), original);
        assert_eq!(decode(&doc.to_json_string()), doc);
    }

    #[test]
    fn test_duplicate_insert_replaces_in_place() {
        let mut map = PropertyMap::new();
        map.insert(Property::new("a", PropertyValue::Number(1.0)));
        map.insert(Property::new("b", PropertyValue::Number(2.0)));
        map.insert(Property::new("a", PropertyValue::Number(3.0)));
        assert_eq!(map.len(), 2);
        assert_eq!(map.first().unwrap().as_number(), Ok(3.0));
    }
}
