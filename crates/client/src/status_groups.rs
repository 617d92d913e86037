//! Status groups ("Teilnehmergruppen").
//!
//! These aren't documented upstream; the shape here was worked out from the server's source and
//! may change. Keep all knowledge of it in this module.
use serde::Deserialize;
use serde_json::Value;

use crate::resource::{Decode, Resource, SchemaViolation};

/// A named group of participants within a course
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusGroup {
    id: String,
    name: String,
}

#[derive(Deserialize)]
struct Attributes {
    name: String,
}

impl StatusGroup {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Decode for StatusGroup {
    const TYPE: &'static str = "status-groups";

    fn decode(resource: &Value) -> Result<Self, SchemaViolation> {
        let res = Resource::parse(resource, Self::TYPE)?;
        let attrs: Attributes = res.attributes()?;

        Ok(StatusGroup {
            id: res.id(),
            name: attrs.name,
        })
    }
}
