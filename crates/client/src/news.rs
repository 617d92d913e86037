//! Announcements
use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};

use crate::{resource::Encode, Client, Result, Transport};

/// How long an announcement stays up if no end is given
pub const DEFAULT_PUBLICATION_DAYS: i64 = 7;

/// Request for a new announcement. All defaults are filled in when it's built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAnnouncement {
    title: String,
    content: String,
    publication_start: DateTime<Utc>,
    publication_end: DateTime<Utc>,
    comments_allowed: bool,
}

impl CreateAnnouncement {
    /// An announcement published from now, for a week, without comments
    pub fn new(title: &str, content: &str) -> Self {
        Self::builder(title, content).build()
    }

    pub fn builder(title: &str, content: &str) -> AnnouncementBuilder {
        AnnouncementBuilder {
            title: title.to_string(),
            content: content.to_string(),
            publication_start: None,
            publication_end: None,
            comments_allowed: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn publication_start(&self) -> DateTime<Utc> {
        self.publication_start
    }

    pub fn publication_end(&self) -> DateTime<Utc> {
        self.publication_end
    }

    pub fn comments_allowed(&self) -> bool {
        self.comments_allowed
    }
}

#[derive(Debug, Clone)]
pub struct AnnouncementBuilder {
    title: String,
    content: String,
    publication_start: Option<DateTime<Utc>>,
    publication_end: Option<DateTime<Utc>>,
    comments_allowed: bool,
}

impl AnnouncementBuilder {
    pub fn publication_start(mut self, start: DateTime<Utc>) -> Self {
        self.publication_start = Some(start);
        self
    }

    pub fn publication_end(mut self, end: DateTime<Utc>) -> Self {
        self.publication_end = Some(end);
        self
    }

    pub fn comments_allowed(mut self, allowed: bool) -> Self {
        self.comments_allowed = allowed;
        self
    }

    pub fn build(self) -> CreateAnnouncement {
        self.build_at(Utc::now())
    }

    /// Build, treating `now` as the current time.
    /// A missing start becomes `now`, a missing end a week after the start.
    pub fn build_at(self, now: DateTime<Utc>) -> CreateAnnouncement {
        let publication_start = self.publication_start.unwrap_or(now);
        let publication_end = self
            .publication_end
            .unwrap_or(publication_start + Duration::days(DEFAULT_PUBLICATION_DAYS));

        CreateAnnouncement {
            title: self.title,
            content: self.content,
            publication_start,
            publication_end,
            comments_allowed: self.comments_allowed,
        }
    }
}

impl Encode for CreateAnnouncement {
    fn encode(&self) -> Value {
        json!({
            "type": "news",
            "attributes": {
                "title": self.title,
                "content": self.content,
                "publication-start": self.publication_start.to_rfc3339(),
                "publication-end": self.publication_end.to_rfc3339(),
                "comments-allowed": self.comments_allowed,
            }
        })
    }
}

impl<T: Transport> Client<T> {
    /// Post an announcement in a course
    pub fn post_course_announcement(
        &self,
        course_id: &str,
        announcement: &CreateAnnouncement,
    ) -> Result<()> {
        self.create(&format!("courses/{}/news", course_id), announcement)
    }
}
