//! The base client every resource client delegates to.
//!
//! A [`RequestExecutor`] pairs one [`RequestTemplate`] with a shared transport and
//! turns a path template, parameters and an optional body into a single blocking
//! exchange. Nothing is retried and non-2xx statuses come back as ordinary
//! [`Response`]s.

use std::fmt::Display;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, trace};
use url::Url;

use crate::http_client::{is_secret, Body, HttpClient, Method, Request, REDACTED};
use crate::specification::{LogDetail, RequestTemplate};
use crate::{ErrorKind, Response, Result};

#[cfg(test)]
mod tests;

/// The placeholder bound by the single-parameter conveniences.
pub const ID_PLACEHOLDER: &str = "id";

/// Path and query parameters for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    path: Vec<(String, String)>,
    query: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Params::default()
    }

    /// Binds `{name}` in the path template.
    pub fn path(mut self, name: &str, value: impl Display) -> Self {
        self.path.push((name.to_string(), value.to_string()));
        self
    }

    pub fn query(mut self, name: &str, value: impl Display) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    fn path_value(&self, name: &str) -> Option<&str> {
        self.path
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Clone)]
pub struct RequestExecutor {
    template: RequestTemplate,
    client: Arc<dyn HttpClient>,
}

impl RequestExecutor {
    pub fn new(template: RequestTemplate, client: Arc<dyn HttpClient>) -> Self {
        RequestExecutor { template, client }
    }

    pub fn template(&self) -> &RequestTemplate {
        &self.template
    }

    pub fn get(&self, path: &str) -> Result<Response> {
        debug!("GET request to: {}", path);
        self.execute(Method::Get, path, &Params::new(), None)
    }

    pub fn get_with_query(&self, path: &str, query: &[(&str, &str)]) -> Result<Response> {
        let logged: Vec<(&str, &str)> = query
            .iter()
            .map(|&(name, value)| (name, if is_secret(name) { REDACTED } else { value }))
            .collect();
        debug!("GET request to: {} with params: {:?}", path, logged);
        let params = query
            .iter()
            .fold(Params::new(), |params, (name, value)| params.query(name, value));
        self.execute(Method::Get, path, &params, None)
    }

    /// Binds `value` to a placeholder literally named `id`; any other placeholder in
    /// `path` is left unresolved and the request is rejected.
    pub fn get_with_id(&self, path: &str, value: impl Display) -> Result<Response> {
        debug!("GET request to: {} with path param: {}", path, value);
        let params = Params::new().path(ID_PLACEHOLDER, value);
        self.execute(Method::Get, path, &params, None)
    }

    pub fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let body = Body::json(body)?;
        debug!("POST request to: {} with body: {}", path, body);
        self.execute(Method::Post, path, &Params::new(), Some(body))
    }

    pub fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let body = Body::json(body)?;
        debug!("PUT request to: {} with body: {}", path, body);
        self.execute(Method::Put, path, &Params::new(), Some(body))
    }

    pub fn delete(&self, path: &str) -> Result<Response> {
        debug!("DELETE request to: {}", path);
        self.execute(Method::Delete, path, &Params::new(), None)
    }

    pub fn delete_with_id(&self, path: &str, value: impl Display) -> Result<Response> {
        debug!("DELETE request to: {} with path param: {}", path, value);
        let params = Params::new().path(ID_PLACEHOLDER, value);
        self.execute(Method::Delete, path, &params, None)
    }

    pub fn execute(
        &self,
        method: Method,
        path: &str,
        params: &Params,
        body: Option<Body>,
    ) -> Result<Response> {
        self.execute_with(&self.template, method, path, params, body)
    }

    /// Like [`RequestExecutor::execute`] but against another template, for requests
    /// whose content type differs from the executor's own.
    pub fn execute_with(
        &self,
        template: &RequestTemplate,
        method: Method,
        path: &str,
        params: &Params,
        body: Option<Body>,
    ) -> Result<Response> {
        let request = build_request(template, method, path, params, body)?;
        log_request(template.log_detail(), &request);
        let response = self.client.execute(&request)?;
        log_response(template.log_detail(), &response);
        Ok(response)
    }
}

/// Assembles the request without sending it: base URI, path with placeholders
/// substituted and percent-encoded, query string, template headers and body.
pub fn build_request(
    template: &RequestTemplate,
    method: Method,
    path: &str,
    params: &Params,
    body: Option<Body>,
) -> Result<Request> {
    let mut url = Url::parse(template.base_uri())
        .map_err(|e| ErrorKind::InvalidUrl(format!("{}: {}", template.base_uri(), e)))?;

    let mut used = Vec::new();
    {
        let mut segments = url.path_segments_mut().map_err(|_| {
            ErrorKind::InvalidUrl(format!("{} cannot be a base", template.base_uri()))
        })?;
        segments.pop_if_empty();
        for segment in path.split('/').filter(|segment| !segment.is_empty()) {
            segments.push(&resolve_segment(path, segment, params, &mut used)?);
        }
    }

    if let Some((name, _)) = params.path.iter().find(|(name, _)| !used.contains(name)) {
        return Err(ErrorKind::UnresolvedPath(format!(
            "no placeholder {{{}}} in {}",
            name, path
        ))
        .into());
    }

    if !params.query.is_empty() {
        url.query_pairs_mut().extend_pairs(params.query.iter());
    }

    let mut headers = template.headers().to_vec();
    if let Some(body) = &body {
        if !matches!(body, Body::Multipart(_)) {
            headers.push(("Content-Type".to_string(), template.content_type().to_string()));
        }
    }

    Ok(Request {
        method,
        url,
        headers,
        body,
    })
}

fn resolve_segment(
    path: &str,
    segment: &str,
    params: &Params,
    used: &mut Vec<String>,
) -> Result<String> {
    let mut resolved = String::new();
    let mut rest = segment;
    while let Some(start) = rest.find('{') {
        let end = rest[start..]
            .find('}')
            .map(|offset| start + offset)
            .ok_or_else(|| ErrorKind::UnresolvedPath(format!("unclosed placeholder in {}", path)))?;
        let name = &rest[start + 1..end];
        let value = params.path_value(name).ok_or_else(|| {
            ErrorKind::UnresolvedPath(format!("no value for {{{}}} in {}", name, path))
        })?;
        resolved.push_str(&rest[..start]);
        resolved.push_str(value);
        used.push(name.to_string());
        rest = &rest[end + 1..];
    }
    resolved.push_str(rest);
    Ok(resolved)
}

fn log_request(detail: LogDetail, request: &Request) {
    match detail {
        LogDetail::None => {}
        LogDetail::Uri => trace!("Request {} {}", request.method, request.redacted_url()),
        LogDetail::All => {
            let headers: Vec<String> = request
                .headers
                .iter()
                .map(|(name, value)| {
                    if is_secret(name) {
                        format!("{}: {}", name, REDACTED)
                    } else {
                        format!("{}: {}", name, value)
                    }
                })
                .collect();
            trace!(
                headers = ?headers,
                body = %request.body.as_ref().map(ToString::to_string).unwrap_or_default(),
                "Request {} {}",
                request.method,
                request.redacted_url()
            );
        }
    }
}

fn log_response(detail: LogDetail, response: &Response) {
    match detail {
        LogDetail::None => {}
        LogDetail::Uri => trace!("Response {}", response.status),
        LogDetail::All => trace!(
            elapsed_ms = response.elapsed.as_millis() as u64,
            body = %response.body,
            "Response {}",
            response.status
        ),
    }
}
