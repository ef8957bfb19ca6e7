use serde_json::json;
use travel_booking_client::drivers::TripStatus;
use travel_booking_client::settings::SettingsMap;
use travel_booking_client::support::{NewTicket, TicketStatus};
use travel_booking_client::uploads::FileUpload;
use travel_booking_client::TravelClient;
use wiremock::matchers::{body_json, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_trip_status_follows_the_state_machine() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/drivers/4/trips"))
        .and(query_param("trip_status", "en_route"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 31,
            "booking_reference": "BK-0031",
            "status": "confirmed",
            "trip_status": "en_route",
            "pickup_location": "Murtala Muhammed Airport",
            "total_amount": 45000.0,
            "currency": "NGN"
        }])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/drivers/trips/31/status"))
        .and(body_json(json!({"trip_status": "in_progress"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "booking_id": 31,
            "booking_reference": "BK-0031",
            "status": "confirmed",
            "trip_status": "in_progress"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = TravelClient::new(&mock_server.uri()).unwrap();
    let drivers = client.drivers();

    let trips = drivers.trips(4, Some(TripStatus::EnRoute)).await.unwrap();
    let trip = &trips[0];
    assert_eq!(trip.booking_id, 31);
    assert_eq!(trip.fare().unwrap().to_string(), "₦45,000.00");

    // Jumping straight to completed is refused locally
    assert!(drivers.update_trip_status(trip, TripStatus::Completed).await.is_err());

    let moved = drivers.update_trip_status(trip, TripStatus::InProgress).await.unwrap();
    assert_eq!(moved.trip_status, TripStatus::InProgress);
}

#[tokio::test]
async fn test_hotel_images() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/admin/hotels/8/images"))
        .and(body_string_contains("name=\"is_cover\""))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 100,
            "image_url": "/static/hotels/8/lobby.jpg",
            "is_cover": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/admin/hotels/8/images/101/cover"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 8,
            "name": "Harbour View",
            "price_per_night": 120.0,
            "currency": "USD",
            "images": [
                {"id": 100, "url": "/static/hotels/8/lobby.jpg", "is_cover": false, "sort_order": 0},
                {"id": 101, "url": "/static/hotels/8/pool.jpg", "is_cover": true, "sort_order": 1}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = TravelClient::new(&mock_server.uri()).unwrap();
    let hotels = client.hotels();

    let image = hotels
        .upload_image(8, FileUpload::new("lobby.jpg", b"jpeg bytes".to_vec()), true)
        .await
        .unwrap();
    assert_eq!(image.url, "/static/hotels/8/lobby.jpg");

    let hotel = hotels.set_cover_image(8, 101).await.unwrap();
    assert_eq!(hotel.cover_image().map(|i| i.id), Some(101));
    assert_eq!(hotel.price().to_string(), "$120.00");
}

#[tokio::test]
async fn test_settings_category_update() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/settings/payment"))
        .and(body_json(json!({"default_currency": "NGN", "bank_transfer_enabled": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "default_currency": "NGN",
            "bank_transfer_enabled": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = TravelClient::new(&mock_server.uri()).unwrap();
    let mut values = SettingsMap::new();
    values.insert("default_currency".to_string(), json!("NGN"));
    values.insert("bank_transfer_enabled".to_string(), json!(true));

    let stored = client.settings().update("payment", &values).await.unwrap();
    assert_eq!(stored, values);
}

#[tokio::test]
async fn test_notification_template_toggle_and_inbox() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/notifications/templates/3/toggle"))
        .and(body_json(json!({"is_active": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "name": "Booking confirmed",
            "type": "email",
            "event": "booking_confirmed",
            "subject": "Your booking is confirmed",
            "content": "Hello {{name}}",
            "is_active": false
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/notifications/read-all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = TravelClient::new(&mock_server.uri()).unwrap();
    let notifications = client.notifications();

    let template = notifications.toggle_template(3, false).await.unwrap();
    assert!(!template.is_active);
    notifications.mark_all_read().await.unwrap();
}

#[tokio::test]
async fn test_support_ticket_flow() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/support/tickets/12/messages"))
        .and(body_json(json!({"message": "Any update on my refund?"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 90,
            "message": "Any update on my refund?",
            "is_admin": false
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/admin/support/tickets/12"))
        .and(body_json(json!({"status": "resolved"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 12,
            "subject": "Refund",
            "status": "resolved",
            "priority": "high",
            "messages": [
                {"message": "Any update on my refund?", "is_admin": false},
                {"message": "Refund issued", "is_admin": true}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/support/tickets"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = TravelClient::new(&mock_server.uri()).unwrap();
    let support = client.support();

    let reply = support.reply(12, "Any update on my refund?").await.unwrap();
    assert!(!reply.is_admin);

    let ticket = support.update_status(12, TicketStatus::Resolved).await.unwrap();
    assert_eq!(ticket.status, TicketStatus::Resolved);
    assert_eq!(ticket.last_staff_reply().map(|m| m.message.as_str()), Some("Refund issued"));

    // Blank tickets never leave the client
    let blank = NewTicket {
        subject: "  ".to_string(),
        ..Default::default()
    };
    assert!(support.create_ticket(&blank).await.is_err());
}

#[tokio::test]
async fn test_currency_rate_administration() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/admin/currency-rates/NGN"))
        .and(body_json(json!({"rate": 1550.5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "NGN",
            "rate": 1550.5,
            "base_currency": "USD"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = TravelClient::new(&mock_server.uri()).unwrap();
    let rate = client.localization().update_rate("NGN", 1550.5).await.unwrap();
    assert_eq!(rate.currency_code, "NGN");
    assert_eq!(rate.base_currency.as_deref(), Some("USD"));
}

#[tokio::test]
async fn test_assign_roles() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/rbac/users/5/roles"))
        .and(body_json(json!({"role_ids": [2, 3]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5,
            "email": "agent@example.com",
            "roles": [
                {"id": 2, "name": "Agent", "permissions": ["bookings.view"]},
                {"id": 3, "name": "Dispatcher", "permissions": ["drivers.*"]}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = TravelClient::new(&mock_server.uri()).unwrap();
    let user = client.users().assign_roles(5, &[2, 3]).await.unwrap();

    let permissions = user.permission_set();
    assert!(permissions.has("drivers.edit"));
    assert!(!permissions.has("bookings.delete"));
    assert!(user.has_role("dispatcher"));
}
