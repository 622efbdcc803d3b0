//! HTTP-level tests for the fare and maps clients against WireMock servers.

use std::sync::{Arc, Mutex};

use farecast::api::{FarePredictor, MapsAPI, View};
use farecast::config::Config;
use farecast::entities::{
    Coordinates, EstimateRequest, Map, ResultPanel, TravelMode, TripForm, VehicleType,
};
use farecast::external::{fare_api::FareClient, google_maps::GoogleMaps};
use farecast::Widget;
use serde_json::json;
use wiremock::{
    matchers::{body_json, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn bandra_to_andheri() -> EstimateRequest {
    EstimateRequest {
        origin: "Bandra".into(),
        destination: "Andheri".into(),
        vehicle_type: VehicleType::Economy,
        riders: 60,
        drivers: 25,
    }
}

fn predict_body() -> serde_json::Value {
    json!({
        "origin": "Bandra",
        "destination": "Andheri",
        "vehicle_type": "Economy",
        "number_of_riders": 60,
        "number_of_drivers": 25
    })
}

fn predict_success() -> serde_json::Value {
    json!({
        "predicted_dynamic_price": 245.5,
        "vehicle_type": "Sedan",
        "distance_km": 12.3,
        "duration_min": 22
    })
}

fn directions_success() -> serde_json::Value {
    json!({
        "geocoded_waypoints": [],
        "status": "OK",
        "routes": [{
            "summary": "Western Express Hwy",
            "bounds": {
                "northeast": { "lat": 19.1197, "lng": 72.8464 },
                "southwest": { "lat": 19.0544, "lng": 72.8258 }
            },
            "legs": [{
                "distance": { "text": "12.3 km", "value": 12300 },
                "duration": { "text": "22 mins", "value": 1320 },
                "start_address": "Bandra West, Mumbai",
                "end_address": "Andheri West, Mumbai"
            }],
            "overview_polyline": { "points": "a~l~Fjk~uOwHJy@P" }
        }]
    })
}

#[derive(Default)]
struct CapturingView {
    alerts: Mutex<Vec<String>>,
    results: Mutex<Vec<ResultPanel>>,
    maps: Mutex<Vec<Map>>,
}

impl View for CapturingView {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.into());
    }

    fn present_result(&self, panel: &ResultPanel) {
        self.results.lock().unwrap().push(panel.clone());
    }

    fn present_map(&self, map: &Map) {
        self.maps.lock().unwrap().push(map.clone());
    }
}

fn config_for(fare_server: &MockServer, maps_server: &MockServer) -> Config {
    Config {
        api_base: fare_server.uri(),
        google_maps_api_base: maps_server.uri(),
        google_maps_api_key: Some("test-key".into()),
        ..Config::default()
    }
}

fn form(origin: &str, destination: &str) -> TripForm {
    TripForm {
        origin: origin.into(),
        destination: destination.into(),
        vehicle: "Economy".into(),
        riders: "60".into(),
        drivers: "25".into(),
    }
}

// =============================================================================
// Fare Client Tests
// =============================================================================

mod fare_client_tests {
    use super::*;

    #[tokio::test]
    async fn predict_posts_json_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/predict"))
            .and(header("content-type", "application/json"))
            .and(body_json(predict_body()))
            .respond_with(ResponseTemplate::new(200).set_body_json(predict_success()))
            .expect(1)
            .mount(&server)
            .await;

        let client = FareClient::new(&server.uri(), None).unwrap();
        let response = client.predict(&bandra_to_andheri()).await.unwrap();

        assert_eq!(response.predicted_dynamic_price, 245.5);
        assert_eq!(response.vehicle_type.as_deref(), Some("Sedan"));
        assert_eq!(response.distance_km, 12.3);
        assert_eq!(response.duration_min, 22.0);
    }

    #[tokio::test]
    async fn non_success_status_keeps_body_for_diagnostics() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string("{\"detail\":\"unknown category\"}"),
            )
            .mount(&server)
            .await;

        let client = FareClient::new(&server.uri(), None).unwrap();
        let err = client.predict(&bandra_to_andheri()).await.unwrap_err();

        assert_eq!(err.code, 4);
        assert!(err.message.contains("400"));
        assert!(err.message.contains("unknown category"));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>sleeping</html>"))
            .mount(&server)
            .await;

        let client = FareClient::new(&server.uri(), None).unwrap();
        let err = client.predict(&bandra_to_andheri()).await.unwrap_err();

        assert_eq!(err.code, 5);
    }

    #[tokio::test]
    async fn health_reads_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "status": "ok", "google_api_key": true })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = FareClient::new(&format!("{}/", server.uri()), None).unwrap();
        let health = client.health().await.unwrap();

        assert!(health.is_ok());
        assert!(health.google_api_key);
    }
}

// =============================================================================
// Google Maps Tests
// =============================================================================

mod google_maps_tests {
    use super::*;

    #[tokio::test]
    async fn directions_request_driving_route() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/maps/api/directions/json"))
            .and(query_param("origin", "Bandra"))
            .and(query_param("destination", "Andheri"))
            .and(query_param("mode", "driving"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(directions_success()))
            .expect(1)
            .mount(&server)
            .await;

        let maps = GoogleMaps::new(&server.uri(), Some("test-key".into()));
        let directions = maps
            .find_directions("Bandra".into(), "Andheri".into(), TravelMode::Driving)
            .await
            .unwrap();

        let route = directions.primary().unwrap();
        assert_eq!(route.summary, "Western Express Hwy");
        assert_eq!(route.distance_m(), 12300);
    }

    #[tokio::test]
    async fn directions_status_is_reported() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/maps/api/directions/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "status": "ZERO_RESULTS", "routes": [] })),
            )
            .mount(&server)
            .await;

        let maps = GoogleMaps::new(&server.uri(), Some("test-key".into()));
        let err = maps
            .find_directions("Bandra".into(), "Atlantis".into(), TravelMode::Driving)
            .await
            .unwrap_err();

        assert_eq!(err.code, 6);
        assert!(err.message.contains("ZERO_RESULTS"));
    }

    #[tokio::test]
    async fn rejected_key_is_invalid_input() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/maps/api/directions/json"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let maps = GoogleMaps::new(&server.uri(), Some("bad-key".into()));
        let err = maps
            .find_directions("Bandra".into(), "Andheri".into(), TravelMode::Driving)
            .await
            .unwrap_err();

        assert_eq!(err.code, 101);
    }

    #[tokio::test]
    async fn autocomplete_sends_bias_and_session() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/maps/api/place/autocomplete/json"))
            .and(query_param("input", "Band"))
            .and(query_param("location", "19.076,72.8777"))
            .and(query_param("radius", "50000"))
            .and(query_param("sessiontoken", "session-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "predictions": [
                    { "place_id": "ChIJgT_rKAB_PzsRBttnRY6jpz8", "description": "Bandra West, Mumbai" }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let maps = GoogleMaps::new(&server.uri(), Some("test-key".into()));
        let suggestions = maps
            .find_place_suggestions(
                "Band".into(),
                Coordinates {
                    lat: 19.076,
                    lng: 72.8777,
                },
                50000.0,
                "session-1".into(),
            )
            .await
            .unwrap();

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].description, "Bandra West, Mumbai");
    }

    #[tokio::test]
    async fn autocomplete_zero_results_is_empty() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/maps/api/place/autocomplete/json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "status": "ZERO_RESULTS" })),
            )
            .mount(&server)
            .await;

        let maps = GoogleMaps::new(&server.uri(), Some("test-key".into()));
        let suggestions = maps
            .find_place_suggestions(
                "zzzz".into(),
                Coordinates { lat: 0.0, lng: 0.0 },
                1000.0,
                "session-1".into(),
            )
            .await
            .unwrap();

        assert!(suggestions.is_empty());
    }
}

// =============================================================================
// Widget Tests
// =============================================================================

mod widget_tests {
    use super::*;

    #[tokio::test]
    async fn estimate_then_route() {
        let fare_server = MockServer::start().await;
        let maps_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/predict"))
            .and(body_json(predict_body()))
            .respond_with(ResponseTemplate::new(200).set_body_json(predict_success()))
            .expect(1)
            .mount(&fare_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/maps/api/directions/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(directions_success()))
            .expect(1)
            .mount(&maps_server)
            .await;

        let view = Arc::new(CapturingView::default());
        let widget =
            Widget::from_config(config_for(&fare_server, &maps_server), view.clone()).unwrap();

        let estimate = widget
            .submit_estimate(form("Bandra", "Andheri"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(estimate.vehicle_label(), "Sedan");

        let panel = widget.panel().await;
        assert_eq!(panel.fare, "₹ 245.5");
        assert_eq!(panel.meta, "Sedan • 12.3 km • 22 min");

        assert!(widget.map().await.directions.is_some());
        assert!(view.alerts.lock().unwrap().is_empty());
        assert_eq!(view.results.lock().unwrap().len(), 1);
        assert_eq!(view.maps.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn server_error_skips_route() {
        let fare_server = MockServer::start().await;
        let maps_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .expect(1)
            .mount(&fare_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/maps/api/directions/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(directions_success()))
            .expect(0)
            .mount(&maps_server)
            .await;

        let view = Arc::new(CapturingView::default());
        let widget =
            Widget::from_config(config_for(&fare_server, &maps_server), view.clone()).unwrap();

        assert!(widget
            .submit_estimate(form("Bandra", "Andheri"))
            .await
            .is_err());

        assert!(widget.panel().await.hidden);
        assert_eq!(
            *view.alerts.lock().unwrap(),
            vec!["Something went wrong. Make sure the backend is running."]
        );
    }

    #[tokio::test]
    async fn validation_failure_sends_nothing() {
        let fare_server = MockServer::start().await;
        let maps_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(200).set_body_json(predict_success()))
            .expect(0)
            .mount(&fare_server)
            .await;

        let view = Arc::new(CapturingView::default());
        let widget =
            Widget::from_config(config_for(&fare_server, &maps_server), view.clone()).unwrap();

        let err = widget
            .submit_estimate(form("Bandra", "  "))
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(
            *view.alerts.lock().unwrap(),
            vec!["Please enter both pickup and destination."]
        );
    }

    #[tokio::test]
    async fn repeated_estimates_hit_the_service_each_time() {
        let fare_server = MockServer::start().await;
        let maps_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(200).set_body_json(predict_success()))
            .expect(3)
            .mount(&fare_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/maps/api/directions/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(directions_success()))
            .expect(3)
            .mount(&maps_server)
            .await;

        let widget = Widget::from_config(
            config_for(&fare_server, &maps_server),
            Arc::new(CapturingView::default()),
        )
        .unwrap();

        for _ in 0..3 {
            widget
                .submit_estimate(form("Bandra", "Andheri"))
                .await
                .unwrap();
        }
    }
}
