use super::*;
use crate::core::check::{CheckError, GrammarService};
use crate::utils::test_utils::MockApiServer;

#[test]
fn parse_maps_matches_in_order() {
    let body = r#"{
        "software": {"name": "LanguageTool"},
        "matches": [
            {"message": "Grammatical error", "shortMessage": "Agreement",
             "replacements": [{"value": "doesn't"}, {"value": "does not"}],
             "offset": 4, "length": 4, "rule": {"id": "AGREEMENT", "description": "x"}},
            {"message": "Possible typo", "replacements": []}
        ]
    }"#;

    let suggestions = parse_check_response(body).expect("parse");
    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].message, "Grammatical error");
    assert_eq!(suggestions[0].replacements, vec!["doesn't", "does not"]);
    assert_eq!(suggestions[0].short_message.as_deref(), Some("Agreement"));
    assert_eq!(suggestions[0].offset, Some(4));
    assert_eq!(suggestions[0].rule_id.as_deref(), Some("AGREEMENT"));
    assert_eq!(suggestions[1].message, "Possible typo");
    assert!(suggestions[1].replacements.is_empty());
}

#[test]
fn parse_without_matches_is_empty() {
    assert!(parse_check_response("{}").expect("parse").is_empty());
    assert!(parse_check_response(r#"{"matches": null}"#)
        .expect("parse")
        .is_empty());
    assert!(parse_check_response("[1, 2, 3]").expect("parse").is_empty());
}

#[test]
fn parse_tolerates_missing_replacements() {
    let suggestions =
        parse_check_response(r#"{"matches": [{"message": "Style"}]}"#).expect("parse");
    assert_eq!(suggestions, vec![Suggestion::new("Style", Vec::new())]);
}

#[test]
fn parse_treats_null_fields_as_empty() {
    let body = r#"{"matches": [
        {"message": "Style", "replacements": null},
        {"message": null, "replacements": [{"value": null}, {"value": "its"}]},
        {"message": "Typo", "replacements": [{"value": "the"}]}
    ]}"#;

    let suggestions = parse_check_response(body).expect("parse");
    assert_eq!(
        suggestions,
        vec![
            Suggestion::new("Style", Vec::new()),
            Suggestion::new("", vec!["its".to_string()]),
            Suggestion::new("Typo", vec!["the".to_string()]),
        ]
    );
    assert_eq!(suggestions[0].replacement_summary(), None);
}

#[test]
fn parse_rejects_invalid_json() {
    assert!(parse_check_response("<html>oops</html>").is_err());
    assert!(parse_check_response(r#"{"matches": "nope"}"#).is_err());
}

#[test]
fn parse_rejects_null_body() {
    assert!(parse_check_response("null").is_err());
    assert!(parse_check_response("  null\n").is_err());
}

#[tokio::test]
async fn null_body_fails_the_check() {
    let server = MockApiServer::respond_with(200, "null").await;
    let result = server.client().check("She dont like it.").await;
    assert!(matches!(result, Err(CheckError::Parse(_))));
}

#[tokio::test]
async fn sends_form_encoded_text_and_language() {
    let server = MockApiServer::respond_with(200, r#"{"matches": []}"#).await;
    let client = server.client();

    let suggestions = client.check("She dont like it & more").await.expect("check");
    assert!(suggestions.is_empty());

    let requests = server.captured().await;
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.request_line, "POST /v2/check HTTP/1.1");
    assert_eq!(
        request.header("content-type"),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(
        request.body_text(),
        "text=She+dont+like+it+%26+more&language=en-US"
    );
}

#[tokio::test]
async fn success_returns_suggestions() {
    let server = MockApiServer::respond_with(
        200,
        r#"{"matches":[{"message":"Grammatical error","replacements":[{"value":"doesn't"}]}]}"#,
    )
    .await;

    let suggestions = server.client().check("She dont like it.").await.expect("check");
    assert_eq!(
        suggestions,
        vec![Suggestion::new("Grammatical error", vec!["doesn't".into()])]
    );
}

#[tokio::test]
async fn server_error_status_is_a_failure_even_with_matches() {
    let server = MockApiServer::respond_with(500, r#"{"matches": []}"#).await;

    let err = server.client().check("text").await.expect_err("should fail");
    match err {
        CheckError::Status { status, .. } => assert_eq!(status.as_u16(), 500),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn unparseable_body_is_a_parse_failure() {
    let server = MockApiServer::respond_with(200, "not json").await;

    let err = server.client().check("text").await.expect_err("should fail");
    assert!(matches!(err, CheckError::Parse(_)));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = LanguageToolClient::with_client(
        reqwest::Client::new(),
        format!("http://{addr}/v2/check"),
        "en-US",
    );
    let err = client.check("text").await.expect_err("should fail");
    assert!(matches!(err, CheckError::Transport(_)));
}
