//! Access to JSON:API resource objects.
//!
//! Every entity is decoded through [`Resource`], which checks the declared `type` before anything
//! else is read, so a resource of the wrong kind is always reported as such rather than as a
//! missing attribute.
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

/// A resource object that doesn't have the shape we need
#[derive(Error, Debug)]
pub enum SchemaViolation {
    #[error("expected a resource of type {expected:?}, got {found:?}")]
    WrongType {
        expected: &'static str,
        found: Option<String>,
    },

    #[error("missing key {}", .0)]
    MissingKey(String),

    #[error("expected {} to be a string", .0)]
    NotAString(String),

    #[error("expected data to be a list of resources")]
    NotACollection,

    #[error("bad attributes for {kind}: {source}")]
    BadAttributes {
        kind: &'static str,
        source: serde_json::Error,
    },

    #[error("couldn't parse timestamp {key}: {source}")]
    BadTimestamp {
        key: String,
        source: chrono::ParseError,
    },

    #[error("relationship {relationship} should point to {expected:?}, got {found:?}")]
    WrongRelationshipType {
        relationship: String,
        expected: &'static str,
        found: String,
    },
}

/// An entity that can be read from a resource object.
pub trait Decode: Sized {
    /// The wire `type` tag of this kind of resource
    const TYPE: &'static str;

    fn decode(resource: &Value) -> Result<Self, SchemaViolation>;
}

/// A request that can be written as a resource object, ready to go under `data`.
pub trait Encode {
    fn encode(&self) -> Value;
}

/// A borrowed view of a resource object whose `type` has been checked
#[derive(Debug, Clone, Copy)]
pub struct Resource<'a> {
    id: &'a str,
    kind: &'static str,
    attributes: &'a Map<String, Value>,
    relationships: Option<&'a Map<String, Value>>,
}

impl<'a> Resource<'a> {
    /// Check that `value` is a resource of type `expected`, with an id and attributes.
    pub fn parse(value: &'a Value, expected: &'static str) -> Result<Self, SchemaViolation> {
        let found = value.get("type");
        if found.and_then(Value::as_str) != Some(expected) {
            return Err(SchemaViolation::WrongType {
                expected,
                found: found.map(|t| t.as_str().map_or_else(|| t.to_string(), str::to_string)),
            });
        }

        let id = str_at(value, "id", "id")?;
        let attributes = value
            .get("attributes")
            .and_then(Value::as_object)
            .ok_or_else(|| SchemaViolation::MissingKey("attributes".to_string()))?;
        let relationships = value.get("relationships").and_then(Value::as_object);

        Ok(Resource {
            id,
            kind: expected,
            attributes,
            relationships,
        })
    }

    pub fn id(&self) -> String {
        self.id.to_string()
    }

    /// Deserialize all attributes at once, into a struct naming the ones we need.
    pub fn attributes<A: DeserializeOwned>(&self) -> Result<A, SchemaViolation> {
        serde_json::from_value(Value::Object(self.attributes.clone())).map_err(|source| {
            SchemaViolation::BadAttributes {
                kind: self.kind,
                source,
            }
        })
    }

    /// Read a timestamp attribute as an instant
    pub fn timestamp(&self, key: &str) -> Result<DateTime<Utc>, SchemaViolation> {
        let raw = self
            .attributes
            .get(key)
            .ok_or_else(|| SchemaViolation::MissingKey(format!("attributes/{}", key)))?
            .as_str()
            .ok_or_else(|| SchemaViolation::NotAString(format!("attributes/{}", key)))?;

        DateTime::parse_from_rfc3339(raw)
            .map(|d| d.with_timezone(&Utc))
            .map_err(|source| SchemaViolation::BadTimestamp {
                key: format!("attributes/{}", key),
                source,
            })
    }

    /// Id of the single resource linked by relationship `name`, which must be of type `target`.
    pub fn relationship(&self, name: &str, target: &'static str) -> Result<String, SchemaViolation> {
        self.optional_relationship(name, target)?
            .ok_or_else(|| SchemaViolation::MissingKey(format!("relationships/{}", name)))
    }

    /// Like [`Self::relationship`], but an absent relationship is `None`.
    /// A relationship that is present must still be well formed.
    pub fn optional_relationship(
        &self,
        name: &str,
        target: &'static str,
    ) -> Result<Option<String>, SchemaViolation> {
        let Some(rel) = self.relationships.and_then(|r| r.get(name)) else {
            return Ok(None);
        };

        let path = format!("relationships/{}/data", name);
        let data = rel
            .get("data")
            .ok_or_else(|| SchemaViolation::MissingKey(path.clone()))?;

        let kind = str_at(data, "type", &format!("{}/type", path))?;
        if kind != target {
            return Err(SchemaViolation::WrongRelationshipType {
                relationship: name.to_string(),
                expected: target,
                found: kind.to_string(),
            });
        }

        Ok(Some(str_at(data, "id", &format!("{}/id", path))?.to_string()))
    }
}

fn str_at<'a>(value: &'a Value, key: &str, path: &str) -> Result<&'a str, SchemaViolation> {
    value
        .get(key)
        .ok_or_else(|| SchemaViolation::MissingKey(path.to_string()))?
        .as_str()
        .ok_or_else(|| SchemaViolation::NotAString(path.to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_missing_type() {
        let v = json!({ "id": "1", "attributes": {} });
        assert!(matches!(
            Resource::parse(&v, "users"),
            Err(SchemaViolation::WrongType { found: None, .. })
        ));
    }

    #[test]
    fn test_missing_id() {
        let v = json!({ "type": "users", "attributes": {} });
        assert!(matches!(
            Resource::parse(&v, "users"),
            Err(SchemaViolation::MissingKey(k)) if k == "id"
        ));
    }

    #[test]
    fn test_relationship_without_data() {
        let v = json!({
            "type": "file-refs",
            "id": "1",
            "attributes": {},
            "relationships": { "parent": { "links": {} } }
        });
        let res = Resource::parse(&v, "file-refs").unwrap();
        assert!(matches!(
            res.optional_relationship("parent", "folders"),
            Err(SchemaViolation::MissingKey(k)) if k == "relationships/parent/data"
        ));
    }

    #[test]
    fn test_null_linkage_is_malformed() {
        let v = json!({
            "type": "folders",
            "id": "1",
            "attributes": {},
            "relationships": { "parent": { "data": null } }
        });
        let res = Resource::parse(&v, "folders").unwrap();
        assert!(res.optional_relationship("parent", "folders").is_err());
    }

    #[test]
    fn test_timestamp_keeps_instant() {
        let v = json!({
            "type": "semesters",
            "id": "1",
            "attributes": { "start": "2024-04-01T00:00:00+02:00" }
        });
        let res = Resource::parse(&v, "semesters").unwrap();
        assert_eq!(
            res.timestamp("start").unwrap().to_rfc3339(),
            "2024-03-31T22:00:00+00:00"
        );
    }
}
