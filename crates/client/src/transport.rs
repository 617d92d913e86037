//! The HTTP session the client talks through.
//!
//! Authentication is the caller's business: build a [`reqwest::blocking::Client`] that already
//! carries the session (default headers, cookies, ...) and hand it to [`crate::Client::new`].
use log::debug;
use reqwest::blocking::{multipart, Response};
use serde_json::Value;

use crate::{Error, Result};

/// Performs HTTP requests, failing on non-2xx statuses.
///
/// Methods are suffixed so they don't get shadowed by reqwest's own `get`/`post`.
pub trait Transport {
    /// GET `url`, returning the decoded JSON body
    fn get_json(&self, url: &str) -> Result<Value>;

    /// POST a JSON body to `url`, returning the decoded JSON response (`null` if empty)
    fn post_json(&self, url: &str, headers: &[(&str, &str)], body: &Value) -> Result<Value>;

    /// POST `content` as the multipart field `file`, with `filename` in the `Slug` header
    fn post_file(&self, url: &str, filename: &str, content: Vec<u8>) -> Result<()>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get_json(&self, url: &str) -> Result<Value> {
        (**self).get_json(url)
    }

    fn post_json(&self, url: &str, headers: &[(&str, &str)], body: &Value) -> Result<Value> {
        (**self).post_json(url, headers, body)
    }

    fn post_file(&self, url: &str, filename: &str, content: Vec<u8>) -> Result<()> {
        (**self).post_file(url, filename, content)
    }
}

impl Transport for reqwest::blocking::Client {
    fn get_json(&self, url: &str) -> Result<Value> {
        debug!("GET {}", url);
        let resp = self.get(url).send()?;
        json_body(check_status(url, resp)?)
    }

    fn post_json(&self, url: &str, headers: &[(&str, &str)], body: &Value) -> Result<Value> {
        debug!("POST {}", url);
        let mut req = self.post(url).body(serde_json::to_vec(body)?);
        for (k, v) in headers {
            req = req.header(*k, *v);
        }

        json_body(check_status(url, req.send()?)?)
    }

    fn post_file(&self, url: &str, filename: &str, content: Vec<u8>) -> Result<()> {
        debug!("POST {} (file {:?})", url, filename);
        // the part gets a generic name, the server takes the real one from Slug
        let form = multipart::Form::new()
            .part("file", multipart::Part::bytes(content).file_name("file"));
        let resp = self
            .post(url)
            .header("Slug", filename)
            .multipart(form)
            .send()?;
        check_status(url, resp)?;

        Ok(())
    }
}

fn check_status(url: &str, resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    Err(Error::Status {
        url: url.to_string(),
        status: status.as_u16(),
        body: resp.text().unwrap_or_default(),
    })
}

fn json_body(resp: Response) -> Result<Value> {
    let s = resp.text()?;
    if log::log_enabled!(log::Level::Debug) {
        debug!("response: {}", s);
    }
    if s.trim().is_empty() {
        return Ok(Value::Null);
    }

    Ok(serde_json::from_str(&s)?)
}
