use std::time::Duration;

use serde_json::{json, Value};
use travel_booking_client::bookings::BookingStatus;
use travel_booking_client::store::LoadState;
use travel_booking_client::TravelClient;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn booking(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "booking_reference": format!("BK-{:04}", id),
        "booking_type": "hotel",
        "status": status,
        "payment_status": "paid",
        "customer_name": "Ada Obi",
        "check_in_date": "2024-08-01",
        "check_out_date": "2024-08-03",
        "total_amount": 240.0,
        "currency": "USD"
    })
}

fn page(bookings: Vec<Value>) -> Value {
    let total = bookings.len();
    json!({
        "bookings": bookings,
        "total": total,
        "page": 1,
        "perPage": 10,
        "totalPages": 1
    })
}

#[tokio::test]
async fn test_bulk_delete_sends_one_call_and_refetches() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![
            booking(11, "pending"),
            booking(12, "confirmed"),
            booking(13, "cancelled"),
        ])))
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/admin/bookings/bulk-delete"))
        .and(body_json(json!({"ids": [11, 12, 13]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deleted": 3, "failed": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = TravelClient::new(&mock_server.uri()).unwrap();
    let controller = client.bookings_controller();
    controller.refresh().await.unwrap();

    for id in [11, 12, 13] {
        assert!(controller.toggle_checked(id));
    }

    let result = controller.bulk_delete().await.unwrap();

    assert_eq!(result.deleted, 3);
    assert!(result.is_complete());
    assert!(controller.store().checked_ids().is_empty());
}

#[tokio::test]
async fn test_bulk_delete_with_nothing_checked_is_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/admin/bookings/bulk-delete"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = TravelClient::new(&mock_server.uri()).unwrap();
    let err = client.bookings_controller().bulk_delete().await.unwrap_err();
    assert_eq!(err.to_string(), "No bookings selected");
}

#[tokio::test]
async fn test_same_filters_give_same_rows() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![
            booking(3, "confirmed"),
            booking(1, "pending"),
            booking(2, "completed"),
        ])))
        .mount(&mock_server)
        .await;

    let client = TravelClient::new(&mock_server.uri()).unwrap();
    let controller = client.bookings_controller();

    controller.refresh().await.unwrap();
    let first = controller.store().snapshot().bookings;
    controller.refresh().await.unwrap();
    let second = controller.store().snapshot().bookings;

    assert_eq!(first, second);
    assert_eq!(second.iter().map(|b| b.id).collect::<Vec<_>>(), vec![3, 1, 2]);
}

#[tokio::test]
async fn test_filter_change_resets_page_and_refetches() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/bookings"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bookings": [booking(21, "pending")],
            "total": 25,
            "page": 3,
            "perPage": 10
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/admin/bookings"))
        .and(query_param("status", "confirmed"))
        .and(query_param("search", "BK-0012"))
        .and(query_param("page", "1"))
        .and(query_param("perPage", "10"))
        .and(query_param("sort_by", "newest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![booking(12, "confirmed")])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = TravelClient::new(&mock_server.uri()).unwrap();
    let controller = client.bookings_controller();

    controller.go_to_page(3).await.unwrap();
    let pagination = controller.store().snapshot().pagination;
    assert_eq!(pagination.page, 3);
    assert_eq!(pagination.total_pages, 3);

    controller
        .set_filters(|filters| {
            filters.status = Some(BookingStatus::Confirmed);
            filters.search = Some("BK-0012".to_string());
        })
        .await
        .unwrap();

    let state = controller.store().snapshot();
    assert_eq!(state.pagination.page, 1);
    assert_eq!(state.bookings.len(), 1);
    assert_eq!(state.bookings[0].booking_reference, "BK-0012");
}

#[tokio::test]
async fn test_slow_stale_response_does_not_overwrite_newer_one() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/bookings"))
        .and(query_param("status", "pending"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page(vec![booking(1, "pending")]))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/admin/bookings"))
        .and(query_param("status", "confirmed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![booking(2, "confirmed")])))
        .mount(&mock_server)
        .await;

    let client = TravelClient::new(&mock_server.uri()).unwrap();
    let controller = client.bookings_controller();

    let (slow, fast) = tokio::join!(
        controller.set_filters(|f| f.status = Some(BookingStatus::Pending)),
        controller.set_filters(|f| f.status = Some(BookingStatus::Confirmed)),
    );
    slow.unwrap();
    fast.unwrap();

    let state = controller.store().snapshot();
    assert_eq!(state.load, LoadState::Ready);
    assert_eq!(state.bookings.len(), 1);
    assert_eq!(state.bookings[0].id, 2);
    assert_eq!(state.filters.status, Some(BookingStatus::Confirmed));
}

#[tokio::test]
async fn test_status_change_refetches_instead_of_patching() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![booking(5, "pending")])))
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/admin/bookings/5/status"))
        .and(body_json(json!({"status": "cancelled"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(booking(5, "cancelled")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = TravelClient::new(&mock_server.uri()).unwrap();
    let controller = client.bookings_controller();
    controller.refresh().await.unwrap();

    let cancelled = controller.cancel(5).await.unwrap();
    assert_eq!(cancelled.status, BookingStatus::Cancelled);

    // The list shows what the server returned on refetch, not the mutation response
    let state = controller.store().snapshot();
    assert_eq!(state.bookings[0].status, BookingStatus::Pending);
}

#[tokio::test]
async fn test_failed_fetch_is_recorded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/bookings"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = TravelClient::new(&mock_server.uri()).unwrap();
    let controller = client.bookings_controller();

    assert!(controller.refresh().await.is_err());
    let state = controller.store().snapshot();
    assert_eq!(state.load.error(), Some("Server error. Please try again later."));
    assert!(state.bookings.is_empty());
}
