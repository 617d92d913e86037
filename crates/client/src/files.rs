//! Files, folders, and uploading.
use log::{debug, info};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    resource::{Decode, Encode, Resource, SchemaViolation},
    Client, Result, Transport,
};

/// Folder type of the top folder of a course
pub const ROOT_FOLDER: &str = "RootFolder";

/// Terms of use applied to new files unless told otherwise
pub const FREE_LICENSE: &str = "FREE_LICENSE";

/// A reference to a file's content, living in a folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    id: String,
    name: String,
    parent: String,
}

#[derive(Deserialize)]
struct FileRefAttributes {
    name: String,
}

impl FileRef {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Id of the folder containing this file
    pub fn parent(&self) -> &str {
        &self.parent
    }
}

impl Decode for FileRef {
    const TYPE: &'static str = "file-refs";

    fn decode(resource: &Value) -> Result<Self, SchemaViolation> {
        let res = Resource::parse(resource, Self::TYPE)?;
        let attrs: FileRefAttributes = res.attributes()?;

        Ok(FileRef {
            id: res.id(),
            name: attrs.name,
            parent: res.relationship("parent", Folder::TYPE)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    id: String,
    name: String,
    folder_type: String,
    parent: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct FolderAttributes {
    name: String,
    folder_type: String,
}

impl Folder {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// e.g. `RootFolder`, `StandardFolder`, `HomeworkFolder`
    pub fn folder_type(&self) -> &str {
        &self.folder_type
    }

    /// Id of the containing folder. `None` for a course's root folder.
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn is_root(&self) -> bool {
        self.folder_type == ROOT_FOLDER
    }
}

impl Decode for Folder {
    const TYPE: &'static str = "folders";

    fn decode(resource: &Value) -> Result<Self, SchemaViolation> {
        let res = Resource::parse(resource, Self::TYPE)?;
        let attrs: FolderAttributes = res.attributes()?;

        Ok(Folder {
            id: res.id(),
            name: attrs.name,
            folder_type: attrs.folder_type,
            // the root folder comes without a parent
            parent: res.optional_relationship("parent", Self::TYPE)?,
        })
    }
}

/// Request for a new, empty file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateFile {
    name: String,
    description: String,
    license: String,
}

impl CreateFile {
    /// A file with no description, under [`FREE_LICENSE`]
    pub fn new(name: &str) -> Self {
        CreateFile {
            name: name.to_string(),
            description: String::new(),
            license: FREE_LICENSE.to_string(),
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Set the terms of use, by id
    pub fn license(mut self, license: &str) -> Self {
        self.license = license.to_string();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Encode for CreateFile {
    fn encode(&self) -> Value {
        json!({
            "type": FileRef::TYPE,
            "attributes": {
                "name": self.name,
                "description": self.description,
            },
            "relationships": {
                "terms-of-use": {
                    "data": {
                        "type": "terms-of-use",
                        "id": self.license,
                    }
                }
            }
        })
    }
}

impl<T: Transport> Client<T> {
    /// File refs directly inside a folder. Doesn't look in subfolders.
    pub fn folder_files(&self, folder_id: &str) -> Result<Vec<FileRef>> {
        self.get_collection(&format!("folders/{}/file-refs", folder_id), self.query())
    }

    /// The first folder of the course with type `RootFolder`
    pub fn course_root_folder(&self, course_id: &str) -> Result<Option<Folder>> {
        self.find_folder(course_id, |f| f.is_root())
    }

    /// Find a folder in a course by exact name. The first match in the server's listing wins.
    pub fn find_folder_in_course_by_name(
        &self,
        name: &str,
        course_id: &str,
    ) -> Result<Option<Folder>> {
        self.find_folder(course_id, |f| f.name() == name)
    }

    pub fn find_folder_in_course_by_id(
        &self,
        folder_id: &str,
        course_id: &str,
    ) -> Result<Option<Folder>> {
        self.find_folder(course_id, |f| f.id() == folder_id)
    }

    fn find_folder(
        &self,
        course_id: &str,
        pred: impl Fn(&Folder) -> bool,
    ) -> Result<Option<Folder>> {
        let found = self.course_folders(course_id)?.into_iter().find(pred);
        if found.is_none() {
            debug!("no matching folder in course {}", course_id);
        }

        Ok(found)
    }

    /// Find a file anywhere in a course by exact name
    pub fn find_file_in_course(&self, name: &str, course_id: &str) -> Result<Option<FileRef>> {
        Ok(first_named(self.course_files(course_id)?, name))
    }

    /// Find a file directly inside a folder by exact name
    pub fn find_file_in_folder(&self, name: &str, folder_id: &str) -> Result<Option<FileRef>> {
        Ok(first_named(self.folder_files(folder_id)?, name))
    }

    /// Create an empty file in a folder.
    ///
    /// If the name is already taken, the server may pick a new one with a numeric suffix, so
    /// check the name of the returned ref.
    pub fn create_file_in_folder(&self, folder_id: &str, file: &CreateFile) -> Result<FileRef> {
        self.create_returning(&format!("folders/{}/file-refs", folder_id), file)
    }

    /// Replace the content of a file
    pub fn update_file_content(&self, file: &FileRef, content: Vec<u8>) -> Result<()> {
        self.post_file(&format!("file-refs/{}/content", file.id()), file.name(), content)
    }

    /// Write `content` to the file named by `file` in `parent`, creating it first if needed.
    ///
    /// This is three separate requests and isn't atomic. If someone else creates a file with the
    /// same name in between, the server may rename ours, and the content may end up in a
    /// different file than expected.
    pub fn upload_file(&self, parent: &Folder, file: CreateFile, content: Vec<u8>) -> Result<FileRef> {
        let file_ref = match self.find_file_in_folder(file.name(), parent.id())? {
            Some(existing) => existing,
            None => {
                info!("creating {:?} in folder {}", file.name(), parent.id());
                self.create_file_in_folder(parent.id(), &file)?
            }
        };

        self.update_file_content(&file_ref, content)?;

        Ok(file_ref)
    }
}

fn first_named(files: Vec<FileRef>, name: &str) -> Option<FileRef> {
    let found = files.into_iter().find(|f| f.name() == name);
    if found.is_none() {
        debug!("no file named {:?}", name);
    }

    found
}
