use serde::Serialize;
use serde_json::{Map, Number, Value};

/// A property value, classified once when the graph is loaded
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// An object carrying an `@id`. Non-string ids keep their JSON text.
    #[serde(serialize_with = "serialize_reference")]
    Reference(String),
    /// An inline object without an `@id`
    Embedded(Map<String, Value>),
    Sequence(Vec<PropertyValue>),
}

fn serialize_reference<S: serde::Serializer>(id: &str, serializer: S) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeMap;

    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry("@id", id)?;
    map.end()
}

impl PropertyValue {
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => PropertyValue::Null,
            Value::Bool(b) => PropertyValue::Bool(*b),
            Value::Number(n) => PropertyValue::Number(n.clone()),
            Value::String(s) => PropertyValue::String(s.clone()),
            Value::Object(map) => match map.get("@id") {
                Some(Value::String(id)) => PropertyValue::Reference(id.clone()),
                Some(other) => PropertyValue::Reference(other.to_string()),
                None => PropertyValue::Embedded(map.clone()),
            },
            Value::Array(items) => {
                let mut flat = Vec::with_capacity(items.len());
                for item in items {
                    match PropertyValue::from_json(item) {
                        PropertyValue::Sequence(nested) => flat.extend(nested),
                        single => flat.push(single),
                    }
                }
                PropertyValue::Sequence(flat)
            }
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&str> {
        match self {
            PropertyValue::Reference(id) => Some(id),
            _ => None,
        }
    }

    /// View a value as a list: sequences yield their items, anything else yields itself
    pub fn items(&self) -> &[PropertyValue] {
        match self {
            PropertyValue::Sequence(items) => items,
            single => std::slice::from_ref(single),
        }
    }

    /// True for null, blank strings and empty sequences
    pub fn is_blank(&self) -> bool {
        match self {
            PropertyValue::Null => true,
            PropertyValue::String(s) => s.trim().is_empty(),
            PropertyValue::Sequence(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Human readable rendering used in finding messages
    pub fn display(&self) -> String {
        match self {
            PropertyValue::Null => "null".to_string(),
            PropertyValue::Bool(b) => b.to_string(),
            PropertyValue::Number(n) => n.to_string(),
            PropertyValue::String(s) => s.clone(),
            PropertyValue::Reference(id) => id.clone(),
            PropertyValue::Embedded(map) => Value::Object(map.clone()).to_string(),
            PropertyValue::Sequence(items) => items
                .iter()
                .map(PropertyValue::display)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// One node of the metadata graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    pub id: String,
    pub types: Vec<String>,
    /// Properties in document order, `@`-prefixed keys excluded
    #[serde(serialize_with = "serialize_properties")]
    pub properties: Vec<(String, PropertyValue)>,
}

fn serialize_properties<S: serde::Serializer>(
    properties: &[(String, PropertyValue)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(properties.iter().map(|(key, value)| (key, value)))
}

impl Entity {
    pub fn from_json(id: String, object: &Map<String, Value>) -> Self {
        let types = match object.get("@type") {
            Some(Value::String(t)) => vec![t.clone()],
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|t| t.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        };

        let properties = object
            .iter()
            .filter(|(key, _)| !key.starts_with('@'))
            .map(|(key, value)| (key.clone(), PropertyValue::from_json(value)))
            .collect();

        Self {
            id,
            types,
            properties,
        }
    }

    pub fn get(&self, property: &str) -> Option<&PropertyValue> {
        self.properties
            .iter()
            .find(|(key, _)| key == property)
            .map(|(_, value)| value)
    }

    /// String value of a property, or None when absent or not a string
    pub fn get_str(&self, property: &str) -> Option<&str> {
        self.get(property).and_then(PropertyValue::as_str)
    }

    pub fn has_type(&self, type_name: &str) -> bool {
        self.types.iter().any(|t| t == type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reference_and_sequence_classification() {
        let value = PropertyValue::from_json(&json!([{"@id": "#a"}, "#b", [{"@id": "#c"}]]));
        assert_eq!(
            value,
            PropertyValue::Sequence(vec![
                PropertyValue::Reference("#a".to_string()),
                PropertyValue::String("#b".to_string()),
                PropertyValue::Reference("#c".to_string()),
            ])
        );
    }

    #[test]
    fn test_non_string_id_is_kept_as_reference() {
        let value = PropertyValue::from_json(&json!({"@id": 42}));
        assert_eq!(value, PropertyValue::Reference("42".to_string()));
    }

    #[test]
    fn test_object_without_id_is_embedded() {
        let value = PropertyValue::from_json(&json!({"@value": "x", "@language": "en"}));
        assert!(matches!(value, PropertyValue::Embedded(_)));
    }

    #[test]
    fn test_entity_skips_keyword_properties() {
        let object = json!({
            "@id": "./",
            "@type": ["Dataset", "RepositoryObject"],
            "name": "Example",
        });
        let entity = Entity::from_json("./".to_string(), object.as_object().unwrap());
        assert_eq!(entity.types, vec!["Dataset", "RepositoryObject"]);
        assert_eq!(entity.properties.len(), 1);
        assert_eq!(entity.get_str("name"), Some("Example"));
        assert!(entity.has_type("Dataset"));
    }
}
