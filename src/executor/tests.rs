use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::config::Configuration;
use crate::executor::{build_request, Params, RequestExecutor};
use crate::http_client::{Body, ClientConfig, HttpClient, Method, Request};
use crate::specification::{json_default, LogDetail, RequestTemplate};
use crate::{ErrorKind, Response, Result};

#[derive(Default)]
struct RecordingClient {
    requests: Mutex<Vec<Request>>,
}

impl HttpClient for RecordingClient {
    fn create(_config: ClientConfig) -> Result<Self> {
        Ok(RecordingClient::default())
    }

    fn execute(&self, request: &Request) -> Result<Response> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(Response {
            status_code: 200,
            status: "200 OK".to_string(),
            headers: vec![],
            body: String::new(),
            raw_body: vec![],
            elapsed: Duration::from_millis(1),
        })
    }
}

fn template() -> RequestTemplate {
    json_default(&Configuration {
        base_url: "http://localhost:8080/v2".to_string(),
        api_key: "test-key".to_string(),
        ..Configuration::default()
    })
}

fn executor() -> (RequestExecutor, Arc<RecordingClient>) {
    let client = Arc::new(RecordingClient::default());
    (RequestExecutor::new(template(), client.clone()), client)
}

fn last_request(client: &RecordingClient) -> Request {
    client.requests.lock().unwrap().last().cloned().unwrap()
}

#[test]
fn id_placeholder_is_substituted_once() {
    let request = build_request(
        &template(),
        Method::Get,
        "/pet/{id}/uploadImage",
        &Params::new().path("id", 42),
        None,
    )
    .unwrap();
    assert_eq!(
        request.url.as_str(),
        "http://localhost:8080/v2/pet/42/uploadImage"
    );
    assert!(!request.url.path().contains('{'));
}

#[test]
fn path_values_are_percent_encoded() {
    let request = build_request(
        &template(),
        Method::Get,
        "/user/{username}",
        &Params::new().path("username", "John Doe/?#"),
        None,
    )
    .unwrap();
    assert_eq!(request.url.path(), "/v2/user/John%20Doe%2F%3F%23");
}

#[test]
fn unresolved_placeholders_are_rejected() {
    let error = build_request(
        &template(),
        Method::Get,
        "/user/{username}",
        &Params::new().path("id", "jdoe"),
        None,
    )
    .unwrap_err();
    assert!(matches!(error.kind, ErrorKind::UnresolvedPath(_)));

    let error = build_request(
        &template(),
        Method::Get,
        "/pet",
        &Params::new().path("id", 1),
        None,
    )
    .unwrap_err();
    assert_eq!(error.to_string(), "Unresolved path: no placeholder {id} in /pet");
}

#[test]
fn trailing_slash_in_base_uri_is_ignored() {
    let template = json_default(&Configuration {
        base_url: "http://localhost:8080/v2/".to_string(),
        ..Configuration::default()
    });
    let request = build_request(&template, Method::Get, "/store/inventory", &Params::new(), None)
        .unwrap();
    assert_eq!(request.url.as_str(), "http://localhost:8080/v2/store/inventory");
}

#[test]
fn invalid_base_uri_is_an_error() {
    let template = json_default(&Configuration {
        base_url: "not a url".to_string(),
        ..Configuration::default()
    });
    let error = build_request(&template, Method::Get, "/pet", &Params::new(), None).unwrap_err();
    assert!(matches!(error.kind, ErrorKind::InvalidUrl(_)));
}

#[test]
fn query_values_keep_their_commas() {
    let (executor, client) = executor();
    executor
        .get_with_query("/pet/findByStatus", &[("status", "AVAILABLE,PENDING")])
        .unwrap();

    let request = last_request(&client);
    let pairs: Vec<(String, String)> = request.url.query_pairs().into_owned().collect();
    assert_eq!(
        pairs,
        vec![("status".to_string(), "AVAILABLE,PENDING".to_string())]
    );
}

#[test]
fn primitives_use_the_template_headers() {
    let (executor, client) = executor();

    executor.get_with_id("/pet/{id}", 7).unwrap();
    let request = last_request(&client);
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.header("api_key"), Some("test-key"));
    assert_eq!(request.header("Content-Type"), None);
    assert_eq!(request.body, None);

    executor.post("/pet", &serde_json::json!({"name": "Rex"})).unwrap();
    let request = last_request(&client);
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.header("content-type"), Some("application/json"));
    assert_eq!(request.body, Some(Body::Json(r#"{"name":"Rex"}"#.to_string())));

    executor.put("/pet", &serde_json::json!({"id": 1})).unwrap();
    assert_eq!(last_request(&client).method, Method::Put);

    executor.delete_with_id("/store/order/{id}", 3).unwrap();
    let request = last_request(&client);
    assert_eq!(request.method, Method::Delete);
    assert_eq!(request.url.path(), "/v2/store/order/3");

    executor.delete("/pet").unwrap();
    executor.get("/user/logout").unwrap();
    assert_eq!(client.requests.lock().unwrap().len(), 6);
}

#[test]
fn id_convenience_does_not_bind_other_names() {
    let (executor, client) = executor();
    let error = executor.get_with_id("/user/{username}", "jdoe").unwrap_err();
    assert!(matches!(error.kind, ErrorKind::UnresolvedPath(_)));
    assert!(client.requests.lock().unwrap().is_empty());
}

#[test]
fn execute_with_overrides_the_content_type_only_for_that_call() {
    let (executor, client) = executor();
    let form = executor
        .template()
        .with_content_type("application/x-www-form-urlencoded");
    executor
        .execute_with(
            &form,
            Method::Post,
            "/pet/{id}",
            &Params::new().path("id", 5),
            Some(Body::form(&[("name", Some("New Name")), ("status", None)])),
        )
        .unwrap();
    let request = last_request(&client);
    assert_eq!(
        request.header("Content-Type"),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(request.body, Some(Body::Form("name=New+Name".to_string())));
    assert_eq!(executor.template().content_type(), "application/json");
}

#[test]
fn every_log_detail_dispatches_the_same_request() {
    for detail in [LogDetail::None, LogDetail::Uri, LogDetail::All] {
        let client = Arc::new(RecordingClient::default());
        let executor = RequestExecutor::new(template().with_log_detail(detail), client.clone());
        executor
            .get_with_query("/user/login", &[("username", "jdoe"), ("password", "secret")])
            .unwrap();

        let request = last_request(&client);
        assert_eq!(
            request.url.as_str(),
            "http://localhost:8080/v2/user/login?username=jdoe&password=secret"
        );
        assert_eq!(request.header("api_key"), Some("test-key"));
    }
}

#[test]
fn concurrent_calls_do_not_share_request_state() {
    let (executor, client) = executor();
    std::thread::scope(|scope| {
        for worker in 0..4 {
            let executor = executor.clone();
            scope.spawn(move || {
                for i in 0..25 {
                    let body = serde_json::json!({ "worker": worker, "i": i });
                    executor.post("/user", &body).unwrap();
                }
            });
        }
    });

    let requests = client.requests.lock().unwrap();
    assert_eq!(requests.len(), 100);
    for request in requests.iter() {
        let json_headers = request
            .headers
            .iter()
            .filter(|(name, _)| name == "Content-Type")
            .count();
        assert_eq!(json_headers, 1);
        assert_eq!(request.header("api_key"), Some("test-key"));
    }
    assert_eq!(executor.template(), &template());
}
