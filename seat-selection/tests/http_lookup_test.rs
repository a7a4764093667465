//! `HttpSeatLookup` against a mock bus service.
//!
//! Run with: `cargo test -p seat-selection --test http_lookup_test`

#![allow(clippy::expect_used, clippy::unwrap_used)] // Test code can use unwrap/expect

use seat_selection::config::ApiConfig;
use seat_selection::{BusId, FetchError, HttpSeatLookup, Money, Seat, SeatLookup, SeatStatus, TripId};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn lookup(server: &MockServer, token: Option<&str>) -> HttpSeatLookup {
    HttpSeatLookup::new(&ApiConfig {
        base_url: server.uri(),
        bearer_token: token.map(str::to_string),
        request_timeout_secs: 5,
    })
    .expect("client builds")
}

async fn respond_with(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customer/trip/42"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn decodes_seat_list_and_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customer/trip/42"))
        .and(header("Authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "seatNumber": "A101",
                "status": "AVAILABLE",
                "trip": { "price": 499.5, "departure": "08:00" },
                "bus": { "busId": 7, "plate": "KA-01" }
            },
            {
                "seatNumber": 102,
                "status": "BOOKED",
                "trip": { "price": 499.5 },
                "bus": { "busId": 7 }
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let seats = lookup(&server, Some("secret"))
        .load(&TripId::new("42"))
        .await
        .unwrap();

    assert_eq!(
        seats,
        vec![
            Seat::new("A101", SeatStatus::Available, Money::from_minor(49_950), BusId::Number(7)),
            Seat::new("102", SeatStatus::Booked, Money::from_minor(49_950), BusId::Number(7)),
        ]
    );
}

#[tokio::test]
async fn omits_authorization_without_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customer/trip/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let seats = lookup(&server, None).load(&TripId::new("42")).await.unwrap();
    assert!(seats.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn unauthorized_and_forbidden_map_to_unauthorized() {
    for status in [401, 403] {
        let server = respond_with(status).await;
        let result = lookup(&server, Some("expired")).load(&TripId::new("42")).await;
        assert_eq!(result, Err(FetchError::Unauthorized { status }));
    }
}

#[tokio::test]
async fn other_failures_keep_their_status() {
    for status in [404, 500, 503] {
        let server = respond_with(status).await;
        let result = lookup(&server, Some("secret")).load(&TripId::new("42")).await;
        assert_eq!(result, Err(FetchError::Status { status }));
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customer/trip/42"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"message":"not a seat list"}"#),
        )
        .mount(&server)
        .await;

    let result = lookup(&server, Some("secret")).load(&TripId::new("42")).await;
    assert!(matches!(result, Err(FetchError::Decode(_))));
}

#[tokio::test]
async fn negative_price_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customer/trip/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "seatNumber": "A1",
                "status": "AVAILABLE",
                "trip": { "price": -1 },
                "bus": { "busId": 1 }
            }
        ])))
        .mount(&server)
        .await;

    let result = lookup(&server, None).load(&TripId::new("42")).await;
    assert!(matches!(result, Err(FetchError::Decode(_))));
}
