use std::time::Duration;

use heron_tariff::{
    ErrorKind, FetchError, PriceConfig, PriceFetcher, PriceSensor, Surcharges, poll_prices,
};
use httpmock::prelude::*;

fn price_page(cell: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><head><title>Prices</title></head><body>
<table class="prices">
  <thead><tr><th>Μήνας</th><th>Πρόγραμμα</th><th>Πάγιο</th><th>Τιμή</th></tr></thead>
  <tbody>
    <tr><td>Οκτώβριος</td><td>Generous Guarantee</td><td>5,00</td><td>{cell}</td></tr>
  </tbody>
</table>
</body></html>"#
    )
}

async fn serve(server: &MockServer, status: u16, body: String) -> httpmock::Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/prices-generous-guarantee/");
            then.status(status)
                .header("content-type", "text/html; charset=utf-8")
                .body(body);
        })
        .await
}

fn fetcher_for(server: &MockServer) -> PriceFetcher {
    let config = PriceConfig::for_url(server.url("/prices-generous-guarantee/"));
    PriceFetcher::new(config).unwrap()
}

#[tokio::test]
async fn adds_surcharges_to_comma_decimal_price() {
    let server = MockServer::start_async().await;
    let mock = serve(&server, 200, price_page("0,1234")).await;

    let total = fetcher_for(&server).fetch().await.unwrap();

    assert!((total - 0.17123).abs() < 1e-9);
    mock.assert_async().await;
}

#[tokio::test]
async fn repeated_fetches_agree() {
    let server = MockServer::start_async().await;
    let mock = serve(&server, 200, price_page("0,1401")).await;
    let fetcher = fetcher_for(&server);

    let first = fetcher.fetch().await;
    let second = fetcher.fetch().await;

    assert!(first.is_some());
    assert_eq!(first, second);
    mock.assert_hits_async(2).await;
}

#[tokio::test]
async fn page_without_table_yields_nothing() {
    let server = MockServer::start_async().await;
    serve(&server, 200, "<html><body><p>Under maintenance</p></body></html>".to_string()).await;
    let fetcher = fetcher_for(&server);

    assert_eq!(fetcher.fetch().await, None);
    let err = fetcher.fetch_price().await.unwrap_err();
    assert!(matches!(err, FetchError::TableNotFound));
}

#[tokio::test]
async fn single_row_table_yields_nothing() {
    let server = MockServer::start_async().await;
    let body = "<table><tr><td>a</td><td>b</td><td>c</td><td>0,1</td></tr></table>";
    serve(&server, 200, body.to_string()).await;
    let fetcher = fetcher_for(&server);

    assert_eq!(fetcher.fetch().await, None);
    let err = fetcher.fetch_price().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Structure);
}

#[tokio::test]
async fn non_numeric_cell_yields_nothing() {
    let server = MockServer::start_async().await;
    serve(&server, 200, price_page("abc")).await;
    let fetcher = fetcher_for(&server);

    assert_eq!(fetcher.fetch().await, None);
    let err = fetcher.fetch_price().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[tokio::test]
async fn server_error_is_a_network_failure() {
    let server = MockServer::start_async().await;
    serve(&server, 500, price_page("0,1234")).await;
    let fetcher = fetcher_for(&server);

    assert_eq!(fetcher.fetch().await, None);
    let err = fetcher.fetch_price().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
}

#[tokio::test]
async fn refused_connection_yields_nothing() {
    // Grab a free port, then close the listener so nothing is accepting on it.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let config = PriceConfig::for_url(format!("http://{addr}/prices-generous-guarantee/"));
    let fetcher = PriceFetcher::new(config).unwrap();

    assert_eq!(fetcher.fetch().await, None);
    let err = fetcher.fetch_price().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/prices-generous-guarantee/");
            then.status(200)
                .delay(Duration::from_secs(3))
                .body(price_page("0,1234"));
        })
        .await;
    let mut config = PriceConfig::for_url(server.url("/prices-generous-guarantee/"));
    config.request_timeout = Duration::from_millis(200);
    let fetcher = PriceFetcher::new(config).unwrap();

    let err = fetcher.fetch_price().await.unwrap_err();
    assert!(matches!(err, FetchError::Network(ref e) if e.is_timeout()));
}

#[tokio::test]
async fn injected_surcharges_replace_defaults() {
    let server = MockServer::start_async().await;
    serve(&server, 200, price_page("0,1000")).await;
    let mut config = PriceConfig::for_url(server.url("/prices-generous-guarantee/"));
    config.surcharges = Surcharges {
        transport_system: 0.01,
        distribution_network: 0.02,
        etemeap: 0.0,
        yko: 0.0,
    };
    let fetcher = PriceFetcher::new(config).unwrap();

    let total = fetcher.fetch().await.unwrap();
    assert!((total - 0.13).abs() < 1e-9);
}

#[tokio::test]
async fn negative_total_is_rejected() {
    let server = MockServer::start_async().await;
    serve(&server, 200, price_page("-1,5")).await;
    let fetcher = fetcher_for(&server);

    let err = fetcher.fetch_price().await.unwrap_err();
    assert!(matches!(err, FetchError::InvalidPrice { .. }));
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[tokio::test]
async fn failed_cycle_keeps_previous_reading() {
    let server = MockServer::start_async().await;
    let mut good = serve(&server, 200, price_page("0,1234")).await;
    let fetcher = fetcher_for(&server);
    let mut sensor = PriceSensor::default();

    sensor.apply(fetcher.fetch().await);
    good.delete_async().await;
    serve(&server, 200, price_page("n/a")).await;
    sensor.apply(fetcher.fetch().await);

    let value = sensor.native_value().unwrap();
    assert!((value - 0.17123).abs() < 1e-9);
}

#[tokio::test]
async fn shutdown_cancels_in_flight_fetch() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/prices-generous-guarantee/");
            then.status(200)
                .delay(Duration::from_secs(5))
                .body(price_page("0,1234"));
        })
        .await;
    let fetcher = fetcher_for(&server);
    let mut sensor = PriceSensor::default();

    let polling = poll_prices(
        &fetcher,
        &mut sensor,
        tokio::time::sleep(Duration::from_millis(200)),
    );
    let stopped = tokio::time::timeout(Duration::from_secs(2), polling).await;

    assert!(stopped.is_ok());
    assert_eq!(sensor.native_value(), None);
}

#[tokio::test]
async fn polling_stores_fetched_price() {
    let server = MockServer::start_async().await;
    serve(&server, 200, price_page("0,1234")).await;
    let fetcher = fetcher_for(&server);
    let mut sensor = PriceSensor::default();

    poll_prices(
        &fetcher,
        &mut sensor,
        tokio::time::sleep(Duration::from_millis(500)),
    )
    .await;

    let value = sensor.native_value().unwrap();
    assert!((value - 0.17123).abs() < 1e-9);
}
