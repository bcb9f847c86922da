extern crate eventbrite_cetd;
#[macro_use]
extern crate matches;
extern crate serde_json;
extern crate tempfile;
extern crate wiremock;

use std::fs;
use std::time::Duration;
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use eventbrite_cetd::config::Config;
use eventbrite_cetd::eventbrite::attendees::load_attendees;
use eventbrite_cetd::eventbrite::client::EventbriteClient;
use eventbrite_cetd::eventbrite::errors::EventbriteError;
use eventbrite_cetd::export::read_attendees_csv;
use eventbrite_cetd::run::{run, OrganizationSummary};

const TOKEN: &'static str = "5O5ICDI5I4LUFCAZRSTX";

fn config(server: &MockServer) -> Config {
    Config::new(TOKEN).with_base_url(&format!("{}/v3", server.uri()))
}

fn page(key: &str, items: Vec<Value>, continuation: Option<&str>) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        key: items,
        "pagination": {"continuation": continuation, "has_more_items": continuation.is_some()}
    }))
}

fn attendee(event_id: &str, name: &str) -> Value {
    json!({
        "event_id": event_id,
        "checked_in": false,
        "event": {"organization_id": "1", "name": {"text": "Gala"}, "start": {"utc": "2024-05-01T00:00:00Z"}},
        "profile": {"name": name, "email": format!("{}@x.com", name.to_lowercase())}
    })
}

async fn mount_organizations(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v3/users/me/organizations/"))
        .and(header("Authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(page("organizations", vec![json!({"id": 1, "name": "Acme"}), json!({"id": "2", "name": "Beta"})], None))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_run_exports_every_organization() {
    let server = MockServer::start().await;
    mount_organizations(&server).await;
    Mock::given(method("GET"))
        .and(path("/v3/organizations/1/attendees/"))
        .and(query_param("expand", "event"))
        .and(query_param_is_missing("continuation"))
        .respond_with(page("attendees", vec![attendee("E1", "Jane")], Some("page2")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/organizations/1/attendees/"))
        .and(query_param("expand", "event"))
        .and(query_param("continuation", "page2"))
        .respond_with(page("attendees", vec![attendee("E1", "John")], None))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/organizations/2/attendees/"))
        .respond_with(page("attendees", vec![], None))
        .expect(1)
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let output_file = temp_dir.path().join("data").join("attendees.csv");
    let summary = run(&config(&server), &output_file).await.unwrap();

    assert_eq!(summary.organizations, vec![
        OrganizationSummary { id: "1".to_string(), name: "Acme".to_string(), attendees: 2 },
        OrganizationSummary { id: "2".to_string(), name: "Beta".to_string(), attendees: 0 },
    ]);
    assert_eq!(summary.total_attendees, 2);
    assert_eq!(summary.output_file, output_file);

    let rows = read_attendees_csv(&output_file).unwrap();
    let names: Vec<String> = rows.into_iter().filter_map(|row| row.attendee_name).collect();
    assert_eq!(names, vec!["Jane", "John"]);
}

#[tokio::test]
async fn test_run_fails_without_writing_partial_export() {
    let server = MockServer::start().await;
    mount_organizations(&server).await;
    Mock::given(method("GET"))
        .and(path("/v3/organizations/1/attendees/"))
        .respond_with(page("attendees", vec![attendee("E1", "Jane")], None))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/organizations/2/attendees/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let output_file = temp_dir.path().join("attendees.csv");
    let result = run(&config(&server), &output_file).await;

    let err = result.unwrap_err();
    match err.downcast_ref::<EventbriteError>() {
        Some(EventbriteError::AttendeesLoadError { organization_id, .. }) => assert_eq!(organization_id, "2"),
        other => panic!("unexpected error {:?}", other)
    }
    assert_matches!(err.iter_chain().filter_map(|cause| cause.downcast_ref::<EventbriteError>()).last(), Some(EventbriteError::HttpStatus { status: 500, .. }));
    assert!(!output_file.exists());
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_run_keeps_previous_export_on_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/users/me/organizations/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let output_file = temp_dir.path().join("attendees.csv");
    fs::write(&output_file, "previous export").unwrap();

    let result = run(&config(&server), &output_file).await;
    assert_matches!(result.unwrap_err().downcast::<EventbriteError>(), Ok(EventbriteError::HttpStatus { status: 401, .. }));
    assert_eq!(fs::read_to_string(&output_file).unwrap(), "previous export");
}

#[tokio::test]
async fn test_malformed_page_is_a_data_shape_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/organizations/1/attendees/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/organizations/2/attendees/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"attendees": []})))
        .mount(&server)
        .await;

    let client = EventbriteClient::new(&config(&server)).unwrap();
    for organization_id in vec!["1", "2"] {
        let err = load_attendees(&client, organization_id).await.unwrap_err();
        let cause = err.iter_chain().filter_map(|cause| cause.downcast_ref::<EventbriteError>()).last();
        assert_matches!(cause, Some(EventbriteError::DataShape { .. }));
    }
}

#[tokio::test]
async fn test_unreachable_server_is_a_transport_error() {
    // nothing listens on port 1
    let config = Config::new(TOKEN).with_base_url("http://127.0.0.1:1/v3");

    let client = EventbriteClient::new(&config).unwrap();
    let err = client.get_json(format!("{}/users/me/organizations/", config.base_url)).await.unwrap_err();
    assert_matches!(err.downcast::<EventbriteError>(), Ok(EventbriteError::Transport { .. }));
}

#[tokio::test]
async fn test_slow_server_is_a_transport_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/users/me/organizations/"))
        .respond_with(page("organizations", vec![], None).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;
    let config = Config { timeout: Duration::from_millis(200), ..config(&server) };

    let client = EventbriteClient::new(&config).unwrap();
    let err = client.get_json(format!("{}/users/me/organizations/", config.base_url)).await.unwrap_err();
    match err.downcast::<EventbriteError>() {
        Ok(EventbriteError::Transport { cause, .. }) => assert!(cause.is_timeout()),
        other => panic!("unexpected error {:?}", other)
    }
}
