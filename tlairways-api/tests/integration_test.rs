use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tlairways_api::{app, AppState};
use tlairways_order::{MemorySink, PurchaseAssembler, PurchaseEvent, PurchaseEventSink, SinkError};
use tower::ServiceExt;

/// Holds every event for longer than any request should take.
struct StalledSink;

#[async_trait]
impl PurchaseEventSink for StalledSink {
    async fn emit(&self, _event: &PurchaseEvent) -> Result<(), SinkError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(())
    }
}

fn booking() -> Value {
    json!({
        "bookingId": "665f1c2e9b1e8a0012ab3456",
        "pnr": "TLX7Q2",
        "onwardFlight": {
            "flightNumber": "TL101",
            "origin": {"iata_code": "BOM"},
            "destination": {"iata_code": "DXB"},
            "currentPrice": 5000
        },
        "returnFlight": {
            "flightNumber": "TL102",
            "origin": {"iata_code": "DXB"},
            "destination": {"iata_code": "BOM"},
            "currentPrice": 4800
        },
        "travellers": [{"firstName": "Asha", "lastName": "Rao", "email": "asha@example.com"}],
        "ancillaryServices": {
            "onward": {"0": {"seatNumber": "12A", "seatPrice": 500, "priorityBoarding": true, "priorityBoardingPrice": 500}}
        },
        "query": {"cabinClass": "economy", "departureDate": "2025-03-14", "returnDate": "2025-03-21"},
        "payment": {"paymentId": "pay_Nx81", "method": "card", "amount": 10800}
    })
}

fn state_with_sink() -> (AppState, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    (AppState::new(PurchaseAssembler::default(), sink.clone()), sink)
}

async fn post_json(state: AppState, uri: &str, body: String) -> (StatusCode, Value) {
    let response = app(state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// Emission is detached from the request, so poll until it lands.
async fn wait_for_events(sink: &MemorySink, expected: usize) -> Vec<PurchaseEvent> {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let events = sink.events();
            if events.len() >= expected {
                return events;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("sink received events")
}

#[tokio::test]
async fn test_products_endpoint_returns_ordered_list() {
    let (state, _) = state_with_sink();
    let (status, body) = post_json(state, "/v1/tracking/products", booking().to_string()).await;

    assert_eq!(status, StatusCode::OK);
    let products = body["products"].as_array().unwrap();
    let sub_categories: Vec<&str> = products.iter().map(|p| p["subCategory"].as_str().unwrap()).collect();
    assert_eq!(sub_categories, vec!["onward", "return", "seat", "priorityBoarding"]);
    assert_eq!(products[0]["price"], 5000);
    assert_eq!(products[1]["price"], 4800);
    assert_eq!(products[2]["journeyType"], "onward");
    assert!(products.iter().all(|p| p["currency"] == "INR"));
}

#[tokio::test]
async fn test_purchase_endpoint_emits_event() {
    let (state, sink) = state_with_sink();
    let (status, body) = post_json(state, "/v1/tracking/purchase", booking().to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["eventType"], "commerce.purchases");
    assert_eq!(body["commerce"]["order"]["purchaseID"], "TLX7Q2");
    assert_eq!(body["commerce"]["order"]["priceTotal"], 10800);
    assert_eq!(body["productListItems"].as_array().unwrap().len(), 4);
    assert!(!body.to_string().contains("asha@example.com"));

    let events = wait_for_events(&sink, 1).await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_id.to_string(), body["eventId"].as_str().unwrap());
}

#[tokio::test]
async fn test_sink_disabled_by_state() {
    let (mut state, sink) = state_with_sink();
    state.emit_events = false;
    let (status, _) = post_json(state, "/v1/tracking/purchase", booking().to_string()).await;

    assert_eq!(status, StatusCode::OK);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(sink.events().is_empty());
}

#[tokio::test]
async fn test_stalled_sink_does_not_delay_response() {
    let state = AppState::new(PurchaseAssembler::default(), Arc::new(StalledSink));

    let (status, body) = tokio::time::timeout(
        Duration::from_secs(2),
        post_json(state, "/v1/tracking/purchase", booking().to_string()),
    )
    .await
    .expect("response returned before the sink finished");

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["commerce"]["order"]["purchaseID"], "TLX7Q2");
}

#[tokio::test]
async fn test_zero_traveller_booking_rejected() {
    let (state, sink) = state_with_sink();
    let mut record = booking();
    record["travellers"] = json!([]);

    let (status, body) = post_json(state, "/v1/tracking/purchase", record.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Booking has no travellers");
    assert!(sink.events().is_empty());
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    let (state, _) = state_with_sink();
    let (status, _) = post_json(state, "/v1/tracking/products", "{not json".to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_content_type_rejected() {
    let (state, sink) = state_with_sink();
    let response = app(state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/tracking/purchase")
                .body(Body::from(booking().to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(sink.events().is_empty());
}

#[tokio::test]
async fn test_fractional_prices_survive_the_wire() {
    let (state, _) = state_with_sink();
    let mut record = booking();
    record["returnFlight"] = Value::Null;
    record["onwardFlight"]["currentPrice"] = json!(4999.4);
    record["travellers"] = json!([{"firstName": "Asha"}, {"firstName": "Ravi"}, {"firstName": "Meera"}]);
    record["ancillaryServices"]["onward"]["0"]["seatPrice"] = json!(499.5);
    record["ancillaryServices"]["onward"]["0"]["priorityBoardingPrice"] = json!(0.4);

    let (status, body) = post_json(state, "/v1/tracking/products", record.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    let prices: Vec<&Value> = body["products"].as_array().unwrap().iter().map(|p| &p["price"]).collect();
    assert_eq!(prices, vec![&json!(14998.2), &json!(499.5), &json!(0.4)]);
}

#[tokio::test]
async fn test_health_and_price_table() {
    let (state, _) = state_with_sink();

    let response = app(state.clone())
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app(state)
        .oneshot(Request::builder().uri("/v1/pricing/ancillaries").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["currency"], "INR");
    assert_eq!(body["table"]["seats"]["window"], 500);
    assert_eq!(body["table"]["loungeAccess"], 2000);
    assert_eq!(body["table"]["priorityBoarding"], 500);
    assert_eq!(body["table"]["seats"]["extraLegroom"], 1200);
    assert_eq!(body["table"]["baggage"][1], json!({"weightKg": 10, "price": 2800}));
}
