use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    course::Course,
    files::FileRef,
    resource::{Decode, Resource, SchemaViolation},
    semesters::Semester,
    Client, Result, Transport,
};

/// Id the server resolves to the authenticated user
pub const ME: &str = "me";

/// A Stud.IP user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: String,
    username: String,
    formatted_name: String,
    family_name: String,
    given_name: String,
    email: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct Attributes {
    username: String,
    formatted_name: String,
    family_name: String,
    given_name: String,
    email: String,
}

impl User {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Full name, formatted the way the server displays it
    pub fn formatted_name(&self) -> &str {
        &self.formatted_name
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub fn given_name(&self) -> &str {
        &self.given_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl Decode for User {
    const TYPE: &'static str = "users";

    fn decode(resource: &Value) -> Result<Self, SchemaViolation> {
        let res = Resource::parse(resource, Self::TYPE)?;
        let attrs: Attributes = res.attributes()?;

        Ok(User {
            id: res.id(),
            username: attrs.username,
            formatted_name: attrs.formatted_name,
            family_name: attrs.family_name,
            given_name: attrs.given_name,
            email: attrs.email,
        })
    }
}

impl<T: Transport> Client<T> {
    /// All users visible to us. This may be a lot of them.
    pub fn users(&self) -> Result<Vec<User>> {
        self.get_collection("users", self.query())
    }

    pub fn user(&self, user_id: &str) -> Result<User> {
        self.get_single(&format!("users/{}", user_id))
    }

    /// Courses of the given user, optionally only those in the given semester
    pub fn user_courses(&self, user_id: &str, semester_id: Option<&str>) -> Result<Vec<Course>> {
        self.get_collection(
            &format!("users/{}/courses", user_id),
            self.query().filter("semester", semester_id),
        )
    }

    /// All file refs belonging to the given user
    pub fn user_files(&self, user_id: &str) -> Result<Vec<FileRef>> {
        self.get_collection(&format!("users/{}/file-refs", user_id), self.query())
    }

    pub fn me(&self) -> Result<User> {
        self.user(ME)
    }

    /// Check whether the session is authenticated, by asking who we are.
    pub fn test_authentication(&self) -> bool {
        match self.me() {
            Ok(_) => true,
            Err(e) => {
                debug!("authentication check failed: {}", e);
                false
            }
        }
    }

    // The `me` sentinel isn't accepted below /users/, so these resolve our real id first.

    pub fn my_courses(&self) -> Result<Vec<Course>> {
        self.user_courses(self.me()?.id(), None)
    }

    pub fn my_courses_in_semester(&self, semester: &Semester) -> Result<Vec<Course>> {
        self.user_courses(self.me()?.id(), Some(semester.id()))
    }

    /// Find one of our courses by its exact title, optionally only looking in one semester.
    pub fn my_course_by_title(
        &self,
        title: &str,
        semester: Option<&Semester>,
    ) -> Result<Option<Course>> {
        let courses = match semester {
            Some(s) => self.my_courses_in_semester(s)?,
            None => self.my_courses()?,
        };

        let found = courses.into_iter().find(|c| c.title() == title);
        if found.is_none() {
            debug!("no course titled {:?}", title);
        }

        Ok(found)
    }

    pub fn my_files(&self) -> Result<Vec<FileRef>> {
        self.user_files(self.me()?.id())
    }
}
