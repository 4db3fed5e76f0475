//! Integration tests for listing and detail retrieval.

mod common;

use animal_etl_client::{BornAt, FriendsField};
use common::*;
use wiremock::matchers::{header, method, path, query_param};

#[tokio::test]
async fn test_fetch_list_page_sends_pagination_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/animals/v1/animals"))
        .and(query_param("page", "3"))
        .and(query_param("per_page", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_page_body(3, 4, &[41, 42])))
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_client(&server, 3);
    let page = client.fetch_list_page(3, 25).await.unwrap();

    assert_eq!(page.page, 3);
    assert_eq!(page.total_pages, 4);
    assert_eq!(page.items.len(), 2);
    assert!(!page.is_last());
}

#[tokio::test]
async fn test_fetch_all_summaries_walks_every_page_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/animals/v1/animals"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("animals/list_page_1.json")),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/animals/v1/animals"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("animals/list_page_2.json")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_client(&server, 3);
    let summaries = client.fetch_all_summaries().await.unwrap();

    let ids: Vec<i64> = summaries.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(summaries[0].extra.get("species").unwrap(), "dog");

    let requests = server.received_requests().await.unwrap();
    let pages: Vec<String> = requests
        .iter()
        .filter_map(|r| {
            r.url
                .query_pairs()
                .find(|(k, _)| k == "page")
                .map(|(_, v)| v.into_owned())
        })
        .collect();
    assert_eq!(pages, vec!["1", "2"]);
}

#[tokio::test]
async fn test_fetch_all_summaries_single_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/animals/v1/animals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_page_body(1, 1, &[])))
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_client(&server, 3);
    let summaries = client.fetch_all_summaries().await.unwrap();
    assert!(summaries.is_empty());
}

#[tokio::test]
async fn test_fetch_all_summaries_walks_by_requested_page_when_echo_is_wrong() {
    let server = MockServer::start().await;

    // Every response claims to be page 1 of 3.
    for (page, ids) in [("1", [1, 2]), ("2", [3, 4]), ("3", [5, 6])] {
        Mock::given(method("GET"))
            .and(path("/animals/v1/animals"))
            .and(query_param("page", page))
            .respond_with(ResponseTemplate::new(200).set_body_json(list_page_body(1, 3, &ids)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = fast_client(&server, 3);
    let summaries = client.fetch_all_summaries().await.unwrap();

    let ids: Vec<i64> = summaries.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
}

#[tokio::test]
async fn test_fetch_all_summaries_aborts_on_page_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/animals/v1/animals"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_page_body(1, 3, &[1, 2])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/animals/v1/animals"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad page"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/animals/v1/animals"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_page_body(3, 3, &[5])))
        .expect(0)
        .mount(&server)
        .await;

    let client = fast_client(&server, 3);
    let err = client.fetch_all_summaries().await.unwrap_err();
    assert_eq!(err.status_code(), Some(400));
}

#[tokio::test]
async fn test_invalid_page_counters_are_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/animals/v1/animals"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"page": 0, "total_pages": 1, "items": []})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_client(&server, 3);
    let err = client.fetch_list_page(1, 20).await.unwrap_err();

    assert!(matches!(err, ClientError::InvalidResponse { .. }), "got {err:?}");
    assert!(err.to_string().contains("page must be >= 1"));
}

#[tokio::test]
async fn test_malformed_list_body_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/animals/v1/animals"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_client(&server, 3);
    let err = client.fetch_list_page(1, 20).await.unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn test_fetch_detail_decodes_loose_record() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/animals/v1/animals/7"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("animals/detail_loose.json")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_client(&server, 3);
    let detail = client.fetch_detail(7).await.unwrap();

    assert_eq!(detail.id, 7);
    assert_eq!(detail.name, "Felix");
    assert_eq!(
        detail.friends,
        FriendsField::Delimited("Garfield, , Tom,".to_string())
    );
    assert_eq!(
        detail.born_at,
        Some(BornAt::Text("2019-06-15 08:30:00+02:00".to_string()))
    );
    assert_eq!(detail.extra.get("color").unwrap(), "black");
    assert!(detail.extra.contains_key("tags"));
}

#[tokio::test]
async fn test_fetch_detail_with_list_friends_and_epoch_born_at() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/animals/v1/animals/8"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(load_fixture("animals/detail_list_friends.json")),
        )
        .mount(&server)
        .await;

    let client = fast_client(&server, 3);
    let detail = client.fetch_detail(8).await.unwrap();

    assert_eq!(
        detail.friends,
        FriendsField::List(vec!["Shaggy".to_string(), "Velma".to_string()])
    );
    assert!(matches!(detail.born_at, Some(BornAt::Zoned(_))));
}

#[tokio::test]
async fn test_fetch_detail_missing_name_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/animals/v1/animals/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 9})))
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_client(&server, 3);
    let err = client.fetch_detail(9).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse { .. }));
}

#[tokio::test]
async fn test_requests_carry_default_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/animals/v1/animals/1"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_body(1)))
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_client(&server, 1);
    client.fetch_detail(1).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let user_agent = requests[0]
        .headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(user_agent.starts_with("animal-etl/"), "got {user_agent}");
}
