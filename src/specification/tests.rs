use std::time::Duration;

use crate::config::Configuration;
use crate::specification::*;
use crate::Response;

fn config() -> Configuration {
    Configuration {
        base_url: "http://localhost:8080/v2".to_string(),
        api_key: "test-key".to_string(),
        timeout_seconds: 2,
        ..Configuration::default()
    }
}

fn response(status_code: u16, elapsed: Duration) -> Response {
    Response {
        status_code,
        status: status_code.to_string(),
        headers: vec![],
        body: String::from("{}"),
        raw_body: b"{}".to_vec(),
        elapsed,
    }
}

#[test]
fn json_template_carries_base_uri_and_key() {
    let template = json_default(&config());
    assert_eq!(template.base_uri(), "http://localhost:8080/v2");
    assert_eq!(template.content_type(), "application/json");
    assert!(template
        .headers()
        .contains(&("api_key".to_string(), "test-key".to_string())));
    assert_eq!(template.log_detail(), LogDetail::All);
}

#[test]
fn multipart_template_differs_only_in_content_type() {
    let json = json_default(&config());
    let multipart = multipart_default(&config());
    assert_eq!(multipart.content_type(), "multipart/form-data");
    assert_eq!(multipart.with_content_type(APPLICATION_JSON), json);
}

#[test]
fn with_content_type_leaves_the_original_untouched() {
    let template = json_default(&config());
    let form = template.with_content_type(FORM_URLENCODED);
    assert_eq!(form.content_type(), FORM_URLENCODED);
    assert_eq!(template.content_type(), APPLICATION_JSON);
}

#[test]
fn with_log_detail_changes_only_the_log_detail() {
    let template = json_default(&config());
    assert_eq!(template.log_detail(), LogDetail::All);

    let quiet = template.with_log_detail(LogDetail::None);
    assert_eq!(quiet.log_detail(), LogDetail::None);
    assert_eq!(quiet.with_log_detail(LogDetail::All), template);
    assert_eq!(template.with_log_detail(LogDetail::Uri).headers(), template.headers());
}

#[test]
fn success_uses_the_configured_timeout() {
    let expectation = success(&config());
    assert_eq!(expectation.status_code, 200);
    assert_eq!(expectation.max_response_time, Duration::from_secs(2));
}

#[test]
fn verify_accepts_a_fast_ok() {
    let expectation = success(&config());
    assert!(expectation
        .verify(&response(200, Duration::from_millis(120)))
        .is_ok());
}

#[test]
fn verify_rejects_other_statuses() {
    let error = success(&config())
        .verify(&response(404, Duration::from_millis(5)))
        .unwrap_err();
    assert_eq!(
        error.to_string(),
        "Unexpected response: expected status 200 but was 404: {}"
    );
}

#[test]
fn verify_rejects_slow_responses() {
    let result = success(&config()).verify(&response(200, Duration::from_secs(3)));
    assert!(result.is_err());
}
