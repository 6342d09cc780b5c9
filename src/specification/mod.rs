//! Reusable request templates and response expectations derived from a
//! [`Configuration`].
//!
//! Templates never hold per-request state: paths, parameters and bodies are supplied
//! at dispatch time by the [`crate::executor::RequestExecutor`].

use std::time::Duration;

use tracing::debug;

use crate::config::Configuration;
use crate::{ErrorKind, Response, Result};

#[cfg(test)]
mod tests;

pub const API_KEY_HEADER: &str = "api_key";
pub const APPLICATION_JSON: &str = "application/json";
pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// How much of each exchange is written to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDetail {
    None,
    Uri,
    All,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTemplate {
    base_uri: String,
    headers: Vec<(String, String)>,
    content_type: String,
    log_detail: LogDetail,
}

impl RequestTemplate {
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn log_detail(&self) -> LogDetail {
        self.log_detail
    }

    /// A copy of this template sending `content_type` instead.
    pub fn with_content_type(&self, content_type: &str) -> RequestTemplate {
        RequestTemplate {
            content_type: content_type.to_string(),
            ..self.clone()
        }
    }

    pub fn with_log_detail(&self, log_detail: LogDetail) -> RequestTemplate {
        RequestTemplate {
            log_detail,
            ..self.clone()
        }
    }
}

pub fn json_default(config: &Configuration) -> RequestTemplate {
    RequestTemplate {
        base_uri: config.base_url.clone(),
        headers: vec![
            (API_KEY_HEADER.to_string(), config.api_key.clone()),
            ("Accept".to_string(), APPLICATION_JSON.to_string()),
        ],
        content_type: APPLICATION_JSON.to_string(),
        log_detail: LogDetail::All,
    }
}

pub fn multipart_default(config: &Configuration) -> RequestTemplate {
    RequestTemplate {
        base_uri: config.base_url.clone(),
        headers: vec![
            (API_KEY_HEADER.to_string(), config.api_key.clone()),
            ("Accept".to_string(), APPLICATION_JSON.to_string()),
        ],
        content_type: MULTIPART_FORM_DATA.to_string(),
        log_detail: LogDetail::All,
    }
}

/// What a successful exchange looks like: `200 OK` within the configured timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseExpectation {
    pub status_code: u16,
    pub max_response_time: Duration,
    pub log_detail: LogDetail,
}

pub fn success(config: &Configuration) -> ResponseExpectation {
    ResponseExpectation {
        status_code: 200,
        max_response_time: config.timeout(),
        log_detail: LogDetail::All,
    }
}

impl ResponseExpectation {
    pub fn verify(&self, response: &Response) -> Result<()> {
        if self.log_detail != LogDetail::None {
            debug!(
                status = response.status_code,
                elapsed_ms = response.elapsed.as_millis() as u64,
                "Verifying response"
            );
        }
        if response.status_code != self.status_code {
            return Err(ErrorKind::Expectation(format!(
                "expected status {} but was {}: {}",
                self.status_code, response.status_code, response.body
            ))
            .into());
        }
        if response.elapsed >= self.max_response_time {
            return Err(ErrorKind::Expectation(format!(
                "expected a response in less than {:?} but it took {:?}",
                self.max_response_time, response.elapsed
            ))
            .into());
        }
        Ok(())
    }
}
