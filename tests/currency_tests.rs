use serde_json::json;
use travel_booking_client::money::{format_price, CurrencyEvent, Money};
use travel_booking_client::TravelClient;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn supported() -> Vec<String> {
    ["NGN", "USD", "GBP", "EUR"].iter().map(|c| c.to_string()).collect()
}

#[tokio::test]
async fn test_selecting_a_currency_notifies_listeners() {
    let client = TravelClient::new("http://localhost:9").unwrap();
    let currency = client.currency_context(supported(), "USD");
    let mut events = currency.events();
    let mut current = currency.subscribe();

    assert!(currency.set_currency("EUR").unwrap());

    assert_eq!(currency.current(), "EUR");
    assert!(current.has_changed().unwrap());
    assert_eq!(*current.borrow_and_update(), "EUR");
    assert_eq!(
        events.recv().await.unwrap(),
        CurrencyEvent::CurrencyChanged {
            currency: "EUR".to_string()
        }
    );

    // Selecting it again is a no-op
    assert!(!currency.set_currency("eur").unwrap());
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_unsupported_currency_is_rejected() {
    let client = TravelClient::new("http://localhost:9").unwrap();
    let currency = client.currency_context(supported(), "USD");

    assert!(currency.set_currency("JPY").is_err());
    assert_eq!(currency.current(), "USD");
}

#[tokio::test]
async fn test_conversion_always_asks_the_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/localization/convert"))
        .and(body_json(json!({
            "amount": 100.0,
            "from_currency": "USD",
            "to_currency": "NGN"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "converted_amount": 155000.0,
            "to_currency": "NGN",
            "rate": 1550.0
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = TravelClient::new(&mock_server.uri()).unwrap();
    let currency = client.currency_context(supported(), "NGN");
    let price = Money::new(100.0, "USD");

    let first = currency.convert_to_current(&price).await.unwrap();
    let second = currency.convert(&price, "ngn").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.to_string(), "₦155,000.00");

    // Same currency needs no round trip
    let same = currency.convert(&price, "USD").await.unwrap();
    assert_eq!(same, price);
}

#[tokio::test]
async fn test_detected_currency_is_cached_for_the_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/localization/detect-location"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "country": "United Kingdom",
            "country_code": "GB",
            "currency": "gbp"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = TravelClient::new(&mock_server.uri()).unwrap();
    let currency = client.currency_context(supported(), "USD");

    assert_eq!(currency.detect_default().await.unwrap(), "GBP");
    assert_eq!(currency.apply_detected_default().await.unwrap(), "GBP");
    assert_eq!(currency.current(), "GBP");
}

#[tokio::test]
async fn test_supported_list_comes_from_the_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/localization/currencies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"code": "NGN", "name": "Nigerian Naira", "symbol": "₦"},
            {"code": "kes", "name": "Kenyan Shilling"}
        ])))
        .mount(&mock_server)
        .await;

    let client = TravelClient::new(&mock_server.uri()).unwrap();
    let currency = client.currency_context(Vec::new(), "NGN");

    assert_eq!(currency.load_supported().await.unwrap(), vec!["NGN", "KES"]);
    assert!(currency.set_currency("KES").unwrap());
    assert_eq!(format_price(1500.0, &currency.current()), "KSh1,500.00");
}
