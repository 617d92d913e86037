#![allow(dead_code)]

use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
};

use serde_json::{json, Value};
use studip_client::{Client, Error, Result, Transport};

pub const BASE: &str = "https://studip.example.com/jsonapi.php/v1";

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Json(Value),
    Status(u16),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: &'static str,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
    pub filename: Option<String>,
    pub content: Option<Vec<u8>>,
}

/// Answers requests from canned replies, and records every request it sees.
///
/// Replies are keyed by method and path (without the query string). Each request takes the next
/// reply in line, except the last one, which is repeated.
/// An unknown GET is a 404; an unknown POST succeeds with an empty body.
#[derive(Default)]
pub struct FakeTransport {
    replies: RefCell<HashMap<String, VecDeque<Reply>>>,
    calls: RefCell<Vec<Call>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        let _ = simplelog::TestLogger::init(
            simplelog::LevelFilter::Debug,
            simplelog::Config::default(),
        );
        Self::default()
    }

    pub fn on(&self, method: &str, path: &str, reply: Reply) -> &Self {
        self.replies
            .borrow_mut()
            .entry(format!("{} {}/{}", method, BASE, path))
            .or_default()
            .push_back(reply);
        self
    }

    pub fn on_get(&self, path: &str, body: Value) -> &Self {
        self.on("GET", path, Reply::Json(body))
    }

    pub fn on_post(&self, path: &str, body: Value) -> &Self {
        self.on("POST", path, Reply::Json(body))
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn calls_to(&self, method: &str, url_prefix: &str) -> Vec<Call> {
        let prefix = format!("{}/{}", BASE, url_prefix);
        self.calls()
            .into_iter()
            .filter(|c| c.method == method && c.url.starts_with(&prefix))
            .collect()
    }

    fn reply(&self, method: &str, url: &str) -> Option<Reply> {
        let path = url.split('?').next().unwrap_or(url);
        let mut replies = self.replies.borrow_mut();
        let queue = replies.get_mut(&format!("{} {}", method, path))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

fn into_result(url: &str, reply: Reply) -> Result<Value> {
    match reply {
        Reply::Json(v) => Ok(v),
        Reply::Status(status) => Err(Error::Status {
            url: url.to_string(),
            status,
            body: String::new(),
        }),
    }
}

impl Transport for FakeTransport {
    fn get_json(&self, url: &str) -> Result<Value> {
        self.record(Call {
            method: "GET",
            url: url.to_string(),
            headers: vec![],
            body: None,
            filename: None,
            content: None,
        });

        into_result(url, self.reply("GET", url).unwrap_or(Reply::Status(404)))
    }

    fn post_json(&self, url: &str, headers: &[(&str, &str)], body: &Value) -> Result<Value> {
        self.record(Call {
            method: "POST",
            url: url.to_string(),
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: Some(body.clone()),
            filename: None,
            content: None,
        });

        into_result(url, self.reply("POST", url).unwrap_or(Reply::Json(Value::Null)))
    }

    fn post_file(&self, url: &str, filename: &str, content: Vec<u8>) -> Result<()> {
        self.record(Call {
            method: "POST",
            url: url.to_string(),
            headers: vec![("Slug".to_string(), filename.to_string())],
            body: None,
            filename: Some(filename.to_string()),
            content: Some(content),
        });

        into_result(url, self.reply("POST", url).unwrap_or(Reply::Json(Value::Null))).map(|_| ())
    }
}

pub fn client(transport: &FakeTransport) -> Client<&FakeTransport> {
    Client::new(transport, BASE)
}

pub fn user(id: &str, username: &str) -> Value {
    json!({
        "type": "users",
        "id": id,
        "attributes": {
            "username": username,
            "formatted-name": "Ada Lovelace",
            "family-name": "Lovelace",
            "given-name": "Ada",
            "email": format!("{}@example.com", username),
            "phone": null
        },
        "links": { "self": format!("/jsonapi.php/v1/users/{}", id) }
    })
}

pub fn semester(id: &str, start: &str, end: &str) -> Value {
    json!({
        "type": "semesters",
        "id": id,
        "attributes": {
            "title": format!("Semester {}", id),
            "description": "",
            "start": start,
            "end": end
        }
    })
}

pub fn course(id: &str, title: &str, semester_id: &str) -> Value {
    json!({
        "type": "courses",
        "id": id,
        "attributes": {
            "course-number": "42",
            "title": title,
            "subtitle": "",
            "description": ""
        },
        "relationships": {
            "start-semester": { "data": { "type": "semesters", "id": semester_id } },
            "end-semester": { "data": { "type": "semesters", "id": semester_id } }
        }
    })
}

pub fn membership(id: &str, course_id: &str, user_id: &str, permission: &str) -> Value {
    json!({
        "type": "course-memberships",
        "id": id,
        "attributes": { "permission": permission, "position": 0 },
        "relationships": {
            "course": { "data": { "type": "courses", "id": course_id } },
            "user": { "data": { "type": "users", "id": user_id } }
        }
    })
}

pub fn folder(id: &str, name: &str, folder_type: &str, parent: Option<&str>) -> Value {
    let mut v = json!({
        "type": "folders",
        "id": id,
        "attributes": { "folder-type": folder_type, "name": name, "description": null },
        "relationships": {
            "owner": { "data": { "type": "users", "id": "u1" } }
        }
    });
    if let Some(parent) = parent {
        v["relationships"]["parent"] = json!({ "data": { "type": "folders", "id": parent } });
    }
    v
}

pub fn file_ref(id: &str, name: &str, parent: &str) -> Value {
    json!({
        "type": "file-refs",
        "id": id,
        "attributes": { "name": name, "description": "", "filesize": 0 },
        "relationships": {
            "parent": { "data": { "type": "folders", "id": parent } },
            "terms-of-use": { "data": { "type": "terms-of-use", "id": "FREE_LICENSE" } }
        }
    })
}

pub fn status_group(id: &str, name: &str) -> Value {
    json!({
        "type": "status-groups",
        "id": id,
        "attributes": { "name": name }
    })
}

pub fn data(v: Value) -> Value {
    json!({ "data": v })
}

pub fn list(items: Vec<Value>) -> Value {
    json!({ "data": items })
}
