use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;
use url::{form_urlencoded, Url};

use crate::{ErrorKind, Response, Result};


pub mod reqwest;

/// Written to the log in place of a secret value.
pub const REDACTED: &str = "[REDACTED]";

const SECRET_NAMES: [&str; 2] = ["api_key", "password"];

/// Header, query, form and JSON field names whose values never reach the log.
pub fn is_secret(name: &str) -> bool {
    SECRET_NAMES
        .iter()
        .any(|secret| secret.eq_ignore_ascii_case(name))
}

pub struct ClientConfig {
    pub ssl_check: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { ssl_check: true }
    }
}

impl ClientConfig {
    pub fn new(ssl_check: bool) -> Self {
        Self { ssl_check }
    }
}

/// Performs one blocking HTTP exchange. Non-2xx statuses are returned as responses,
/// only transport failures are errors.
pub trait HttpClient: Send + Sync {
    fn create(config: ClientConfig) -> Result<Self>
    where
        Self: Sized;

    fn execute(&self, request: &Request) -> Result<Response>;
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let method = match *self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(method)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<Body>,
}

impl Request {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The request URL with secret query values replaced, for logging.
    pub fn redacted_url(&self) -> Url {
        let mut url = self.url.clone();
        if let Some(query) = self.url.query() {
            url.set_query(Some(&redact_pairs(query)));
        }
        url
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(String),
    /// Already `application/x-www-form-urlencoded` encoded.
    Form(String),
    Multipart(Vec<Part>),
}

impl Body {
    pub fn json<B: Serialize + ?Sized>(body: &B) -> Result<Body> {
        serde_json::to_string(body)
            .map(Body::Json)
            .map_err(|e| ErrorKind::Encode(e).into())
    }

    /// Encodes the pairs whose value is present; absent fields are left out entirely.
    pub fn form(fields: &[(&str, Option<&str>)]) -> Body {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (name, value) in fields {
            if let Some(value) = value {
                serializer.append_pair(name, value);
            }
        }
        Body::Form(serializer.finish())
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Json(json) => match serde_json::from_str::<Value>(json) {
                Ok(mut value) => {
                    redact_value(&mut value);
                    write!(f, "{}", value)
                }
                Err(_) => f.write_str(json),
            },
            Body::Form(form) => f.write_str(&redact_pairs(form)),
            Body::Multipart(parts) => {
                let names: Vec<&str> = parts.iter().map(Part::name).collect();
                write!(f, "multipart [{}]", names.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text { name: String, value: String },
    File { name: String, path: PathBuf },
}

impl Part {
    pub fn name(&self) -> &str {
        match self {
            Part::Text { name, .. } | Part::File { name, .. } => name,
        }
    }
}

fn redact_value(value: &mut Value) {
    match value {
        Value::Object(fields) => {
            for (name, field) in fields.iter_mut() {
                if is_secret(name) {
                    *field = Value::String(REDACTED.to_string());
                } else {
                    redact_value(field);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(redact_value),
        _ => {}
    }
}

fn redact_pairs(encoded: &str) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (name, value) in form_urlencoded::parse(encoded.as_bytes()) {
        let value = if is_secret(&name) { REDACTED } else { &*value };
        serializer.append_pair(&name, value);
    }
    serializer.finish()
}
