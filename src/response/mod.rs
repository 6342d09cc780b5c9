use std::collections::HashMap;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{ErrorKind, Result};


/// The outcome of one exchange. Any status, including 4xx and 5xx, lands here.
#[derive(Debug, Clone)]
pub struct Response {
    pub status_code: u16,
    pub status: String,
    pub headers: Vec<(String, String)>,
    /// Text view of `raw_body`; invalid UTF-8 is replaced, not rejected.
    pub body: String,
    pub raw_body: Vec<u8>,
    pub elapsed: Duration,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Decodes the body into `T` without looking at the status code.
    pub fn as_model<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.raw_body).map_err(|e| ErrorKind::Decode(e).into())
    }

    pub fn json(&self) -> Result<Value> {
        self.as_model()
    }

    /// Decodes a free-form JSON object, e.g. the store inventory.
    pub fn as_map<V: DeserializeOwned>(&self) -> Result<HashMap<String, V>> {
        self.as_model()
    }

    /// Looks up `path` in the JSON body: `$` is the whole document, `a.b` walks
    /// object keys and `[n]` indexes arrays (`[0].name`, `$.tags[1].id`). A path that
    /// does not exist yields `None`.
    pub fn json_path(&self, path: &str) -> Result<Option<Value>> {
        let document = self.json()?;
        let segments = parse_json_path(path)?;
        let mut current = &document;
        for segment in &segments {
            let next = match segment {
                Segment::Key(key) => current.get(key.as_str()),
                Segment::Index(index) => current.get(*index),
            };
            match next {
                Some(value) => current = value,
                None => return Ok(None),
            }
        }
        Ok(Some(current.clone()))
    }
}

#[derive(Debug, PartialEq)]
enum Segment {
    Key(String),
    Index(usize),
}

fn parse_json_path(path: &str) -> Result<Vec<Segment>> {
    let invalid = || ErrorKind::InvalidJsonPath(path.to_string());
    let trimmed = path.trim();
    let rest = trimmed.strip_prefix('$').unwrap_or(trimmed);

    let mut segments = Vec::new();
    for part in rest.split('.') {
        if part.is_empty() {
            continue;
        }
        let (key, mut indexes) = match part.find('[') {
            Some(start) => part.split_at(start),
            None => (part, ""),
        };
        if !key.is_empty() {
            segments.push(Segment::Key(key.to_string()));
        }
        while !indexes.is_empty() {
            let end = indexes.find(']').ok_or_else(invalid)?;
            if !indexes.starts_with('[') {
                return Err(invalid().into());
            }
            let index = indexes[1..end].trim().parse().map_err(|_| invalid())?;
            segments.push(Segment::Index(index));
            indexes = &indexes[end + 1..];
        }
    }
    Ok(segments)
}
