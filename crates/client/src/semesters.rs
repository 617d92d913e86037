use chrono::{DateTime, Utc};
use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    resource::{Decode, Resource, SchemaViolation},
    Client, Result, Transport,
};

/// A semester, running from `start` (inclusive) to `end` (exclusive)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Semester {
    id: String,
    title: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct Attributes {
    title: String,
}

impl Semester {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whether `instant` falls within `[start, end)`
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

impl Decode for Semester {
    const TYPE: &'static str = "semesters";

    fn decode(resource: &Value) -> Result<Self, SchemaViolation> {
        let res = Resource::parse(resource, Self::TYPE)?;
        let attrs: Attributes = res.attributes()?;

        Ok(Semester {
            id: res.id(),
            title: attrs.title,
            start: res.timestamp("start")?,
            end: res.timestamp("end")?,
        })
    }
}

impl<T: Transport> Client<T> {
    /// Get all semesters we can see
    pub fn semesters(&self) -> Result<Vec<Semester>> {
        self.get_collection("semesters", self.query())
    }

    pub fn semester(&self, semester_id: &str) -> Result<Semester> {
        self.get_single(&format!("semesters/{}", semester_id))
    }

    /// The semester we're currently in, if any
    pub fn current_semester(&self) -> Result<Option<Semester>> {
        self.current_semester_at(Utc::now())
    }

    /// The first semester, in the order the server lists them, that contains `now`.
    /// Semesters may overlap, so the server's order decides.
    pub fn current_semester_at(&self, now: DateTime<Utc>) -> Result<Option<Semester>> {
        let found = self.semesters()?.into_iter().find(|s| s.contains(now));
        if found.is_none() {
            debug!("no semester contains {}", now);
        }

        Ok(found)
    }
}
