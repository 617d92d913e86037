use std::{convert::Infallible, fmt, str::FromStr};

use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    course::Course,
    resource::{Decode, Resource, SchemaViolation},
    users::User,
    Client, Result, Transport,
};

/// A user's role in a course
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Permission {
    User,
    Autor,
    Tutor,
    Dozent,
    /// Anything we don't know about yet
    Other(String),
}

impl Permission {
    pub fn as_str(&self) -> &str {
        match self {
            Permission::User => "user",
            Permission::Autor => "autor",
            Permission::Tutor => "tutor",
            Permission::Dozent => "dozent",
            Permission::Other(s) => s,
        }
    }
}

impl From<&str> for Permission {
    fn from(value: &str) -> Self {
        match value {
            "user" => Permission::User,
            "autor" => Permission::Autor,
            "tutor" => Permission::Tutor,
            "dozent" => Permission::Dozent,
            other => Permission::Other(other.to_string()),
        }
    }
}

impl FromStr for Permission {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.into())
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ties a user to a course
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseMembership {
    id: String,
    course_id: String,
    user_id: String,
    permission: Permission,
}

#[derive(Deserialize)]
struct Attributes {
    permission: String,
}

impl CourseMembership {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn course_id(&self) -> &str {
        &self.course_id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn permission(&self) -> &Permission {
        &self.permission
    }
}

impl Decode for CourseMembership {
    const TYPE: &'static str = "course-memberships";

    fn decode(resource: &Value) -> Result<Self, SchemaViolation> {
        let res = Resource::parse(resource, Self::TYPE)?;
        let attrs: Attributes = res.attributes()?;

        Ok(CourseMembership {
            id: res.id(),
            course_id: res.relationship("course", Course::TYPE)?,
            user_id: res.relationship("user", User::TYPE)?,
            permission: attrs.permission.as_str().into(),
        })
    }
}

impl<T: Transport> Client<T> {
    /// Memberships of a course, optionally only those with the given permission
    pub fn course_memberships(
        &self,
        course_id: &str,
        permission: Option<&Permission>,
    ) -> Result<Vec<CourseMembership>> {
        self.get_collection(
            &format!("courses/{}/memberships", course_id),
            self.query()
                .filter("permission", permission.map(Permission::as_str)),
        )
    }

    /// Whether the given user has the given permission in the given course
    pub fn has_permission(
        &self,
        user_id: &str,
        course_id: &str,
        permission: &Permission,
    ) -> Result<bool> {
        let found = self
            .course_memberships(course_id, Some(permission))?
            .iter()
            .any(|m| m.user_id() == user_id);
        if !found {
            debug!("{} is not {} in {}", user_id, permission, course_id);
        }

        Ok(found)
    }
}
