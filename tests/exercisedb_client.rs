//! ExerciseDB client tests against a mock HTTP server

use serde_json::json;
use wiremock::matchers::{header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use exercise_mapper::error::CatalogError;
use exercise_mapper::{Config, ExerciseCatalog, ExerciseDbClient};

fn client_for(server: &MockServer) -> ExerciseDbClient {
    let config = Config::resolve(
        Some("test-key".to_string()),
        Some("exercisedb.test".to_string()),
        Some(server.uri()),
    )
    .unwrap();
    ExerciseDbClient::new(config).unwrap()
}

fn record(id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "bodyPart": "upper legs",
        "target": "glutes",
        "equipment": "kettlebell",
        "secondaryMuscles": ["quadriceps"],
        "instructions": ["Stand tall."]
    })
}

#[tokio::test]
async fn test_search_sends_headers_and_paging() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/exercises/name/goblet%20squat"))
        .and(query_param("limit", "10"))
        .and(query_param("offset", "0"))
        .and(header("X-RapidAPI-Key", "test-key"))
        .and(header("X-RapidAPI-Host", "exercisedb.test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            record("0534", "kettlebell goblet squat"),
            record("1760", "dumbbell goblet squat"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let results = client.search_by_name("goblet squat", 10, 0).await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].id, "0534");
    assert_eq!(results[0].body_part, "upper legs");
    assert_eq!(results[1].name, "dumbbell goblet squat");
}

#[tokio::test]
async fn test_search_error_status_carries_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/exercises/name/.+$"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too many requests"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.search_by_name("face pull", 10, 0).await.unwrap_err();

    match &err {
        CatalogError::Status { status, body } => {
            assert_eq!(*status, 429);
            assert_eq!(body, "Too many requests");
        }
        other => panic!("expected status error, got {:?}", other),
    }
    assert_eq!(err.to_string(), "ExerciseDB request failed (429): Too many requests");
}

#[tokio::test]
async fn test_search_bad_json_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/exercises/name/.+$"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.search_by_name("dead bug", 10, 0).await.unwrap_err();
    assert!(matches!(err, CatalogError::Decode(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_get_by_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/exercises/exercise/0811"))
        .respond_with(ResponseTemplate::new(200).set_body_json(record("0811", "trap bar deadlift")))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let found = client.get_by_id("0811").await.unwrap().unwrap();
    assert_eq!(found.name, "trap bar deadlift");
}

#[tokio::test]
async fn test_get_by_id_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/exercises/exercise/9999"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.get_by_id("9999").await.unwrap().is_none());
}

#[tokio::test]
async fn test_get_by_id_server_error_propagates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/exercises/exercise/0001"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.get_by_id("0001").await.unwrap_err();
    assert!(matches!(err, CatalogError::Status { status: 503, .. }));
}

#[tokio::test]
async fn test_list_all_stops_on_short_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/exercises"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([record("1", "a"), record("2", "b")])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/exercises"))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([record("3", "c")])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let all = client.list_all(2, None).await.unwrap();
    let ids: Vec<&str> = all.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

#[tokio::test]
async fn test_list_all_respects_max_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/exercises"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([record("1", "a"), record("2", "b")])))
        .expect(3)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let all = client.list_all(2, Some(3)).await.unwrap();
    assert_eq!(all.len(), 6);
}

#[tokio::test]
async fn test_list_all_empty_first_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/exercises"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.list_all(50, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_all_zero_page_size_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/exercises"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.list_all(0, None).await.unwrap().is_empty());
    assert!(client.list_all(0, Some(5)).await.unwrap().is_empty());
}
