use super::Widget;

use crate::{
    entities::{Estimate, TripForm},
    error::Error,
};

pub const REQUEST_FAILURE_NOTICE: &str = "Something went wrong. Make sure the backend is running.";

impl Widget {
    /// One press of the estimate button.
    ///
    /// Returns `Ok(None)` when a newer submission started while this one was in flight; its
    /// response is dropped so the panel and the map always reflect the latest click.
    #[tracing::instrument(skip(self))]
    pub async fn submit_estimate(&self, form: TripForm) -> Result<Option<Estimate>, Error> {
        let request = match form.into_request() {
            Ok(request) => request,
            Err(err) => {
                tracing::info!("estimate rejected: {}", err.message);
                self.view.alert(&err.message);
                return Err(err);
            }
        };

        let token = self.next_request_token();
        tracing::info!(
            token,
            "requesting estimate {} -> {} ({})",
            request.origin,
            request.destination,
            request.vehicle_type
        );

        let response = match self.predictor.predict(&request).await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(token, "Error: {}", err);
                self.view.alert(REQUEST_FAILURE_NOTICE);
                return Err(err);
            }
        };

        let estimate = Estimate::new(request, response);

        {
            let mut panel = self.panel.lock().await;

            if self.is_superseded(token) {
                tracing::info!(token, "discarding superseded estimate");
                return Ok(None);
            }

            panel.render(&estimate);
            self.view.present_result(&panel);
        }

        tracing::info!(token, "estimate {}", estimate.response.predicted_dynamic_price);

        let _ = self
            .overlay_route(
                Some(token),
                &estimate.request.origin,
                &estimate.request.destination,
            )
            .await;

        Ok(Some(estimate))
    }
}

#[cfg(test)]
use super::testing::{
    fare, route_directions, sedan_fare, FakeMaps, FakePredictor, Journal, RecordingView, Reply,
};
#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
fn form(origin: &str, destination: &str) -> TripForm {
    TripForm {
        origin: origin.into(),
        destination: destination.into(),
        vehicle: "Economy".into(),
        riders: "60".into(),
        drivers: "25".into(),
    }
}

#[cfg(test)]
struct Harness {
    journal: Journal,
    predictor: Arc<FakePredictor>,
    maps: Arc<FakeMaps>,
    view: Arc<RecordingView>,
    widget: Widget,
}

#[cfg(test)]
fn harness(replies: Vec<Reply>) -> Harness {
    harness_with_maps(replies, |maps| maps)
}

#[cfg(test)]
fn harness_with_maps(replies: Vec<Reply>, maps: impl FnOnce(FakeMaps) -> FakeMaps) -> Harness {
    use crate::config::Config;

    let journal = Journal::default();
    let predictor = Arc::new(FakePredictor::new(journal.clone(), replies));
    let maps = Arc::new(maps(FakeMaps::new(journal.clone())));
    let view = Arc::new(RecordingView::new(journal.clone()));

    let widget = Widget::new(
        Config::default(),
        predictor.clone(),
        maps.clone(),
        view.clone(),
    );

    Harness {
        journal,
        predictor,
        maps,
        view,
        widget,
    }
}

#[test]
fn blank_locations_never_reach_the_network() {
    use crate::entities::VALIDATION_NOTICE;
    use tokio_test::block_on;

    let h = harness(vec![Reply::Fare(sedan_fare())]);

    for (origin, destination) in [("", "Andheri"), ("Bandra", "   "), ("\t", "")] {
        let err = block_on(h.widget.submit_estimate(form(origin, destination))).unwrap_err();
        assert!(err.is_validation());
    }

    assert!(h.predictor.requests().is_empty());
    assert!(h.maps.calls().is_empty());
    assert_eq!(h.view.alerts(), vec![VALIDATION_NOTICE; 3]);
    assert!(block_on(h.widget.panel()).hidden);
}

#[test]
fn successful_estimate_renders_panel_then_route() {
    use tokio_test::block_on;

    let h = harness(vec![Reply::Fare(sedan_fare())]);

    let estimate = block_on(h.widget.submit_estimate(form("Bandra", "Andheri")))
        .unwrap()
        .unwrap();

    assert_eq!(estimate.request.origin, "Bandra");
    assert_eq!(estimate.response.predicted_dynamic_price, 245.5);

    let panel = block_on(h.widget.panel());
    assert!(!panel.hidden);
    assert_eq!(panel.fare, "₹ 245.5");
    assert!(panel.meta.contains("12.3 km"));
    assert!(panel.meta.contains("22 min"));
    assert!(panel.meta.starts_with("Sedan"));

    assert_eq!(h.maps.calls(), vec!["Bandra -> Andheri by driving"]);
    assert!(block_on(h.widget.map()).directions.is_some());
    assert!(h.view.alerts().is_empty());

    assert_eq!(
        h.journal.entries(),
        vec![
            "present_map",
            "predict",
            "present_result",
            "directions",
            "present_map"
        ]
    );
}

#[test]
fn request_uses_trimmed_form_values() {
    use crate::entities::VehicleType;
    use tokio_test::block_on;

    let h = harness(vec![Reply::Fare(sedan_fare())]);

    let mut trip = form("  Bandra ", " Andheri  ");
    trip.vehicle = "premium".into();
    trip.riders = " 3 ".into();
    trip.drivers = "7".into();

    block_on(h.widget.submit_estimate(trip)).unwrap();

    let requests = h.predictor.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].origin, "Bandra");
    assert_eq!(requests[0].destination, "Andheri");
    assert_eq!(requests[0].vehicle_type, VehicleType::Premium);
    assert_eq!(requests[0].riders, 3);
    assert_eq!(requests[0].drivers, 7);
}

#[test]
fn failed_requests_show_one_generic_notice() {
    use tokio_test::block_on;

    for reply in [
        Reply::Status(500, "Internal Server Error"),
        Reply::Status(400, "{\"detail\":\"bad vehicle\"}"),
        Reply::Malformed,
        Reply::Unreachable,
    ] {
        let h = harness(vec![reply]);

        let err = block_on(h.widget.submit_estimate(form("Bandra", "Andheri"))).unwrap_err();
        assert!(!err.is_validation());

        assert_eq!(h.view.alerts(), vec![REQUEST_FAILURE_NOTICE]);
        assert!(h.view.results().is_empty());
        assert!(block_on(h.widget.panel()).hidden);
        assert!(h.maps.calls().is_empty());
    }
}

#[test]
fn failure_keeps_previous_result() {
    use tokio_test::block_on;

    let h = harness(vec![
        Reply::Fare(sedan_fare()),
        Reply::Status(503, "Service Unavailable"),
    ]);

    block_on(h.widget.submit_estimate(form("Bandra", "Andheri"))).unwrap();
    let before = block_on(h.widget.panel());

    block_on(h.widget.submit_estimate(form("Bandra", "Colaba"))).unwrap_err();

    assert_eq!(block_on(h.widget.panel()), before);
    assert_eq!(h.view.results().len(), 1);
    assert_eq!(h.maps.calls().len(), 1);
}

#[test]
fn route_failure_is_not_surfaced() {
    use tokio_test::block_on;

    let h = harness_with_maps(vec![Reply::Fare(sedan_fare())], |maps| {
        maps.with_route_status("ZERO_RESULTS")
    });

    let estimate = block_on(h.widget.submit_estimate(form("Bandra", "Atlantis"))).unwrap();

    assert!(estimate.is_some());
    assert!(h.view.alerts().is_empty());
    assert_eq!(block_on(h.widget.panel()).fare, "₹ 245.5");
    assert!(block_on(h.widget.map()).directions.is_none());
}

#[test]
fn identical_submissions_are_independent_requests() {
    use tokio_test::block_on;

    let h = harness(vec![Reply::Fare(fare(100.0)), Reply::Fare(fare(120.0))]);

    block_on(h.widget.submit_estimate(form("Bandra", "Andheri"))).unwrap();
    assert_eq!(block_on(h.widget.panel()).fare, "₹ 100");

    block_on(h.widget.submit_estimate(form("Bandra", "Andheri"))).unwrap();
    assert_eq!(block_on(h.widget.panel()).fare, "₹ 120");

    assert_eq!(h.predictor.requests().len(), 2);
    assert_eq!(h.maps.calls().len(), 2);
}

#[test]
fn slow_stale_response_does_not_overwrite_newer_one() {
    use std::time::Duration;
    use tokio_test::block_on;

    let h = harness(vec![
        Reply::Delayed(Duration::from_millis(50), fare(100.0)),
        Reply::Fare(fare(120.0)),
    ]);

    let (first, second) = block_on(async {
        futures::join!(
            h.widget.submit_estimate(form("Bandra", "Andheri")),
            h.widget.submit_estimate(form("Bandra", "Colaba")),
        )
    });

    assert!(first.unwrap().is_none());
    assert_eq!(second.unwrap().unwrap().request.destination, "Colaba");

    assert_eq!(block_on(h.widget.panel()).fare, "₹ 120");
    assert_eq!(h.view.results().len(), 1);
    assert_eq!(h.maps.calls(), vec!["Bandra -> Colaba by driving"]);
}

#[test]
fn slow_stale_route_does_not_replace_newer_route() {
    use std::time::Duration;
    use tokio_test::block_on;

    let h = harness_with_maps(
        vec![
            Reply::Fare(fare(100.0)),
            Reply::Delayed(Duration::from_millis(10), fare(120.0)),
        ],
        |maps| maps.with_route_delay("Andheri", Duration::from_millis(80)),
    );

    let (first, second) = block_on(async {
        futures::join!(
            h.widget.submit_estimate(form("Bandra", "Andheri")),
            h.widget.submit_estimate(form("Bandra", "Colaba")),
        )
    });

    // the first fare was current when it arrived, only its route came too late
    assert!(first.unwrap().is_some());
    assert!(second.unwrap().is_some());

    assert_eq!(block_on(h.widget.panel()).fare, "₹ 120");
    assert_eq!(
        block_on(h.widget.map()).directions,
        Some(route_directions("Colaba"))
    );
    assert_eq!(
        h.view.maps().last().and_then(|map| map.directions.clone()),
        Some(route_directions("Colaba"))
    );
    assert_eq!(h.maps.calls().len(), 2);
}

#[test]
fn superseded_failure_still_shows_notice() {
    use std::time::Duration;
    use tokio_test::block_on;

    let h = harness(vec![
        Reply::DelayedStatus(Duration::from_millis(50), 500, "Internal Server Error"),
        Reply::Fare(fare(120.0)),
    ]);

    let (first, second) = block_on(async {
        futures::join!(
            h.widget.submit_estimate(form("Bandra", "Andheri")),
            h.widget.submit_estimate(form("Bandra", "Colaba")),
        )
    });

    assert!(first.is_err());
    assert!(second.unwrap().is_some());

    assert_eq!(h.view.alerts(), vec![REQUEST_FAILURE_NOTICE]);
    assert_eq!(block_on(h.widget.panel()).fare, "₹ 120");
    assert_eq!(h.maps.calls(), vec!["Bandra -> Colaba by driving"]);
}
