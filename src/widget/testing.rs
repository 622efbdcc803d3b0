//! In-memory collaborators for exercising the widget without a network.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::{
    api::{FarePredictor, MapsAPI, View},
    entities::{
        Bounds, Coordinates, Directions, DirectionsRoute, EstimateRequest, EstimateResponse,
        HealthStatus, Leg, Map, PlaceSuggestion, ResultPanel, TextValue, TravelMode,
    },
    error::{decode_error, directions_status_error, reqwest_error, upstream_status_error, Error},
};

/// Ordered record of what every collaborator saw.
#[derive(Clone, Debug, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn record(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

pub enum Reply {
    Fare(EstimateResponse),
    Delayed(Duration, EstimateResponse),
    Status(u16, &'static str),
    DelayedStatus(Duration, u16, &'static str),
    Malformed,
    Unreachable,
}

pub fn sedan_fare() -> EstimateResponse {
    EstimateResponse {
        predicted_dynamic_price: 245.5,
        vehicle_type: Some("Sedan".into()),
        distance_km: 12.3,
        duration_min: 22.0,
        base_cost: None,
        origin: None,
        destination: None,
    }
}

pub fn fare(price: f64) -> EstimateResponse {
    EstimateResponse {
        predicted_dynamic_price: price,
        ..sedan_fare()
    }
}

pub struct FakePredictor {
    journal: Journal,
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<EstimateRequest>>,
}

impl FakePredictor {
    pub fn new(journal: Journal, replies: Vec<Reply>) -> Self {
        Self {
            journal,
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(vec![]),
        }
    }

    pub fn requests(&self) -> Vec<EstimateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl FarePredictor for FakePredictor {
    async fn predict(&self, request: &EstimateRequest) -> Result<EstimateResponse, Error> {
        self.journal.record("predict");
        self.requests.lock().unwrap().push(request.clone());

        let reply = self.replies.lock().unwrap().pop_front();

        match reply {
            Some(Reply::Fare(response)) => Ok(response),
            Some(Reply::Delayed(delay, response)) => {
                tokio::time::sleep(delay).await;
                Ok(response)
            }
            Some(Reply::Status(status, body)) => Err(upstream_status_error(status, body)),
            Some(Reply::DelayedStatus(delay, status, body)) => {
                tokio::time::sleep(delay).await;
                Err(upstream_status_error(status, body))
            }
            Some(Reply::Malformed) => {
                let err = serde_json::from_str::<EstimateResponse>("<html>").unwrap_err();
                Err(decode_error(err))
            }
            Some(Reply::Unreachable) | None => {
                let err = reqwest::Client::new()
                    .get("not a url")
                    .build()
                    .unwrap_err();
                Err(reqwest_error(err))
            }
        }
    }

    async fn health(&self) -> Result<HealthStatus, Error> {
        Ok(HealthStatus {
            status: "ok".into(),
            google_api_key: false,
        })
    }
}

pub fn route_directions(destination: &str) -> Directions {
    Directions {
        routes: vec![DirectionsRoute {
            summary: format!("Western Express Hwy to {}", destination),
            bounds: Bounds {
                northeast: Coordinates {
                    lat: 19.1197,
                    lng: 72.8464,
                },
                southwest: Coordinates {
                    lat: 19.0544,
                    lng: 72.8258,
                },
            },
            legs: vec![Leg {
                distance: TextValue {
                    text: "12.3 km".into(),
                    value: 12300,
                },
                duration: TextValue {
                    text: "22 mins".into(),
                    value: 1320,
                },
                start_address: "Bandra West, Mumbai".into(),
                end_address: "Andheri West, Mumbai".into(),
            }],
            overview_polyline: None,
        }],
    }
}

pub struct FakeMaps {
    journal: Journal,
    route_status: &'static str,
    suggestions: Vec<PlaceSuggestion>,
    route_delays: Vec<(&'static str, Duration)>,
    calls: Mutex<Vec<String>>,
}

impl FakeMaps {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            route_status: "OK",
            suggestions: vec![],
            route_delays: vec![],
            calls: Mutex::new(vec![]),
        }
    }

    pub fn with_route_status(mut self, status: &'static str) -> Self {
        self.route_status = status;
        self
    }

    /// Holds back directions to `destination` for `delay`.
    pub fn with_route_delay(mut self, destination: &'static str, delay: Duration) -> Self {
        self.route_delays.push((destination, delay));
        self
    }

    pub fn with_suggestions(mut self, suggestions: Vec<PlaceSuggestion>) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MapsAPI for FakeMaps {
    async fn find_place_suggestions(
        &self,
        input: String,
        location: Coordinates,
        radius: f64,
        session_token: String,
    ) -> Result<Vec<PlaceSuggestion>, Error> {
        let location: String = location.into();
        self.journal.record("suggestions");
        self.calls.lock().unwrap().push(format!(
            "{} near {} within {} ({})",
            input, location, radius, session_token
        ));

        Ok(self.suggestions.clone())
    }

    async fn find_directions(
        &self,
        origin: String,
        destination: String,
        mode: TravelMode,
    ) -> Result<Directions, Error> {
        self.journal.record("directions");
        self.calls
            .lock()
            .unwrap()
            .push(format!("{} -> {} by {}", origin, destination, mode.name()));

        let delay = self
            .route_delays
            .iter()
            .find(|(to, _)| *to == destination)
            .map(|(_, delay)| *delay);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.route_status != "OK" {
            return Err(directions_status_error(self.route_status));
        }

        Ok(route_directions(&destination))
    }
}

pub struct RecordingView {
    journal: Journal,
    alerts: Mutex<Vec<String>>,
    results: Mutex<Vec<ResultPanel>>,
    maps: Mutex<Vec<Map>>,
}

impl RecordingView {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            alerts: Mutex::new(vec![]),
            results: Mutex::new(vec![]),
            maps: Mutex::new(vec![]),
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn results(&self) -> Vec<ResultPanel> {
        self.results.lock().unwrap().clone()
    }

    pub fn maps(&self) -> Vec<Map> {
        self.maps.lock().unwrap().clone()
    }
}

impl View for RecordingView {
    fn alert(&self, message: &str) {
        self.journal.record("alert");
        self.alerts.lock().unwrap().push(message.into());
    }

    fn present_result(&self, panel: &ResultPanel) {
        self.journal.record("present_result");
        self.results.lock().unwrap().push(panel.clone());
    }

    fn present_map(&self, map: &Map) {
        self.journal.record("present_map");
        self.maps.lock().unwrap().push(map.clone());
    }
}
