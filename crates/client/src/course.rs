use serde::Deserialize;
use serde_json::Value;

use crate::{
    files::{FileRef, Folder},
    resource::{Decode, Resource, SchemaViolation},
    semesters::Semester,
    status_groups::StatusGroup,
    Client, Result, Transport,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Course {
    id: String,
    title: String,
    subtitle: String,
    description: String,
    start_semester: String,
}

#[derive(Deserialize)]
struct Attributes {
    title: String,
    subtitle: String,
    description: String,
}

impl Course {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// May be empty
    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    /// May be empty
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Id of the semester the course starts in
    pub fn start_semester(&self) -> &str {
        &self.start_semester
    }
}

impl Decode for Course {
    const TYPE: &'static str = "courses";

    fn decode(resource: &Value) -> Result<Self, SchemaViolation> {
        let res = Resource::parse(resource, Self::TYPE)?;
        let attrs: Attributes = res.attributes()?;

        Ok(Course {
            id: res.id(),
            title: attrs.title,
            subtitle: attrs.subtitle,
            description: attrs.description,
            start_semester: res.relationship("start-semester", Semester::TYPE)?,
        })
    }
}

impl<T: Transport> Client<T> {
    /// All courses we can see
    pub fn courses(&self) -> Result<Vec<Course>> {
        self.get_collection("courses", self.query())
    }

    pub fn course(&self, course_id: &str) -> Result<Course> {
        self.get_single(&format!("courses/{}", course_id))
    }

    /// Groups of participants in a course
    pub fn course_status_groups(&self, course_id: &str) -> Result<Vec<StatusGroup>> {
        self.get_collection(
            &format!("courses/{}/status-groups", course_id),
            self.query(),
        )
    }

    /// Every file ref in a course, regardless of which folder it's in
    pub fn course_files(&self, course_id: &str) -> Result<Vec<FileRef>> {
        self.get_collection(&format!("courses/{}/file-refs", course_id), self.query())
    }

    pub fn course_folders(&self, course_id: &str) -> Result<Vec<Folder>> {
        self.get_collection(&format!("courses/{}/folders", course_id), self.query())
    }
}
