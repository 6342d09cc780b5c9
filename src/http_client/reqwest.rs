use std::time::Instant;

use reqwest::blocking::multipart::Form;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::HeaderMap;

use crate::http_client::{Body, ClientConfig, HttpClient, Method, Part, Request};
use crate::{Error, ErrorKind, Response, Result};

pub struct ReqwestHttpClient {
    client: Client,
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        ReqwestHttpClient {
            client: Client::new(),
        }
    }
}

impl HttpClient for ReqwestHttpClient {
    fn create(config: ClientConfig) -> Result<ReqwestHttpClient>
    where
        Self: Sized,
    {
        let client = reqwest::blocking::Client::builder()
            .danger_accept_invalid_certs(!config.ssl_check)
            .build()
            .map_err(ErrorKind::Transport)?;

        Ok(ReqwestHttpClient { client })
    }

    fn execute(&self, request: &Request) -> Result<Response> {
        let Request {
            method,
            url,
            headers,
            body,
        } = request;
        let started = Instant::now();
        let mut request_builder = self.client.request(method.into(), url.clone());
        request_builder = set_headers(headers, request_builder);
        if let Some(body) = body {
            request_builder = set_body(body, request_builder)?;
        }
        let response = request_builder.send().map_err(ErrorKind::Transport)?;

        read_response(response, started)
    }
}

fn set_headers(
    headers: &[(String, String)],
    mut request_builder: RequestBuilder,
) -> RequestBuilder {
    for (key, value) in headers {
        request_builder = request_builder.header(key, value);
    }
    request_builder
}

fn set_body(body: &Body, request_builder: RequestBuilder) -> Result<RequestBuilder> {
    Ok(match body {
        Body::Json(json) => request_builder.body(json.clone()),
        Body::Form(form) => request_builder.body(form.clone()),
        // reqwest writes the content type itself so the boundary is included
        Body::Multipart(parts) => request_builder.multipart(multipart_form(parts)?),
    })
}

fn multipart_form(parts: &[Part]) -> Result<Form> {
    let mut form = Form::new();
    for part in parts {
        form = match part {
            Part::Text { name, value } => form.text(name.clone(), value.clone()),
            Part::File { name, path } => form
                .file(name.clone(), path)
                .map_err(|e| Error::from(ErrorKind::Io(path.clone(), e)))?,
        };
    }
    Ok(form)
}

impl From<&Method> for reqwest::Method {
    fn from(method: &Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

fn read_response(response: reqwest::blocking::Response, started: Instant) -> Result<Response> {
    let Headers(headers) = response.headers().into();
    let status_code = response.status().as_u16();
    let status = response.status().to_string();
    let raw_body = response.bytes().map_err(ErrorKind::Transport)?.to_vec();
    Ok(Response {
        status_code,
        status,
        headers,
        body: String::from_utf8_lossy(&raw_body).into_owned(),
        raw_body,
        elapsed: started.elapsed(),
    })
}

struct Headers(Vec<(String, String)>);

impl From<&HeaderMap> for Headers {
    fn from(value: &HeaderMap) -> Self {
        Headers(
            value
                .iter()
                .map(|(header_name, header_value)| {
                    (
                        header_name.to_string(),
                        String::from_utf8_lossy(header_value.as_bytes()).into_owned(),
                    )
                })
                .collect(),
        )
    }
}
