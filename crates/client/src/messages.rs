use serde_json::{json, Value};

use crate::{
    resource::{Decode, Encode},
    users::User,
    Client, Result, Transport,
};

/// Request for a new message to one or more users
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMessage {
    subject: String,
    body: String,
    recipients: Vec<String>,
}

impl CreateMessage {
    /// `recipients` are user ids. They're sent in the order given.
    pub fn new(subject: &str, body: &str, recipients: Vec<String>) -> Self {
        CreateMessage {
            subject: subject.to_string(),
            body: body.to_string(),
            recipients,
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn recipients(&self) -> &[String] {
        &self.recipients
    }
}

impl Encode for CreateMessage {
    fn encode(&self) -> Value {
        let recipients: Vec<Value> = self
            .recipients
            .iter()
            .map(|id| json!({ "type": User::TYPE, "id": id }))
            .collect();

        json!({
            "type": "messages",
            "attributes": {
                "subject": self.subject,
                "message": self.body,
                "priority": "normal",
            },
            "relationships": {
                "recipients": {
                    "data": recipients,
                }
            }
        })
    }
}

impl<T: Transport> Client<T> {
    pub fn post_message(&self, message: &CreateMessage) -> Result<()> {
        self.create("messages", message)
    }
}
