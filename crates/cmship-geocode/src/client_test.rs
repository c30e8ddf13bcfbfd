use super::*;

fn test_client(base_url: &str) -> OpenCageClient {
    OpenCageClient::with_base_url("test-key", 30, "cmship-test", base_url)
        .expect("client construction should not fail")
}

fn request(query: &str) -> GeocodeRequest {
    GeocodeRequest {
        query: query.to_owned(),
        country_code: Some("cm".to_owned()),
        limit: 5,
    }
}

#[test]
fn build_url_constructs_correct_query_string() {
    let client = test_client(DEFAULT_BASE_URL);
    let url = client.build_url(&request("Buea"));
    assert_eq!(
        url.as_str(),
        "https://api.opencagedata.com/geocode/v1/json?q=Buea&key=test-key&countrycode=cm&limit=5&no_annotations=1"
    );
}

#[test]
fn build_url_omits_country_when_unset() {
    let client = test_client(DEFAULT_BASE_URL);
    let mut req = request("Buea");
    req.country_code = None;
    let url = client.build_url(&req);
    assert!(!url.as_str().contains("countrycode"), "{url}");
}

#[test]
fn build_url_encodes_special_characters() {
    let client = test_client(DEFAULT_BASE_URL);
    let url = client.build_url(&request("Yaoundé, Cameroon"));
    assert!(
        url.as_str().contains("q=Yaound%C3%A9%2C+Cameroon"),
        "query param should be percent-encoded: {url}"
    );
}

#[test]
fn rejects_unparseable_base_url() {
    let result = OpenCageClient::with_base_url("k", 5, "ua", "not a url");
    assert!(matches!(result, Err(GeocodeError::InvalidBaseUrl { .. })));
}

#[test]
fn rejects_non_http_scheme() {
    let result = OpenCageClient::with_base_url("k", 5, "ua", "ftp://example.com/geocode");
    assert!(matches!(result, Err(GeocodeError::InvalidBaseUrl { .. })));
}

#[test]
fn api_error_prefers_provider_message() {
    let body = r#"{"status":{"code":402,"message":"quota exceeded"},"results":[]}"#;
    let err = OpenCageClient::api_error(reqwest::StatusCode::PAYMENT_REQUIRED, body);
    assert!(
        matches!(err, GeocodeError::Api { status: 402, ref message } if message == "quota exceeded"),
        "got: {err:?}"
    );
}

#[test]
fn api_error_falls_back_to_canonical_reason() {
    let err = OpenCageClient::api_error(reqwest::StatusCode::BAD_GATEWAY, "<html>oops</html>");
    assert!(
        matches!(err, GeocodeError::Api { status: 502, ref message } if message == "Bad Gateway"),
        "got: {err:?}"
    );
}
