use super::Widget;

use crate::{
    entities::{Directions, TravelMode},
    error::Error,
};

impl Widget {
    /// Requests a driving route and overlays it on the map. Failures are logged and returned,
    /// never shown to the user.
    #[tracing::instrument(skip(self))]
    pub async fn draw_route(&self, origin: &str, destination: &str) -> Result<Directions, Error> {
        self.overlay_route(None, origin, destination).await
    }

    /// Like `draw_route`, but leaves the map alone when `token` has been superseded by the time
    /// the directions arrive.
    pub(super) async fn overlay_route(
        &self,
        token: Option<u64>,
        origin: &str,
        destination: &str,
    ) -> Result<Directions, Error> {
        let directions = match self
            .maps
            .find_directions(origin.into(), destination.into(), TravelMode::Driving)
            .await
        {
            Ok(directions) => directions,
            Err(err) => {
                tracing::warn!("could not draw route: {}", err);
                return Err(err);
            }
        };

        let mut map = self.map.lock().await;

        if let Some(token) = token.filter(|token| self.is_superseded(*token)) {
            tracing::info!(token, "discarding superseded route");
            return Ok(directions);
        }

        map.set_directions(directions.clone());
        self.view.present_map(&map);

        Ok(directions)
    }
}

#[test]
fn draws_driving_route_on_map() {
    use super::testing::{route_directions, FakeMaps, FakePredictor, Journal, RecordingView};
    use crate::config::Config;
    use std::sync::Arc;
    use tokio_test::block_on;

    let journal = Journal::default();
    let maps = Arc::new(FakeMaps::new(journal.clone()));
    let view = Arc::new(RecordingView::new(journal.clone()));
    let widget = Widget::new(
        Config::default(),
        Arc::new(FakePredictor::new(journal.clone(), vec![])),
        maps.clone(),
        view.clone(),
    );

    let directions = block_on(widget.draw_route("Bandra", "Andheri")).unwrap();
    assert_eq!(directions, route_directions("Andheri"));

    assert_eq!(maps.calls(), vec!["Bandra -> Andheri by driving"]);

    let map = block_on(widget.map());
    assert_eq!(map.directions, Some(route_directions("Andheri")));
    assert!(map.viewport.center.lat > 19.05 && map.viewport.center.lat < 19.12);
    assert_eq!(view.maps().last(), Some(&map));
}

#[test]
fn failed_route_leaves_map_untouched() {
    use super::testing::{FakeMaps, FakePredictor, Journal, RecordingView};
    use crate::config::Config;
    use crate::entities::Viewport;
    use std::sync::Arc;
    use tokio_test::block_on;

    let journal = Journal::default();
    let view = Arc::new(RecordingView::new(journal.clone()));
    let widget = Widget::new(
        Config::default(),
        Arc::new(FakePredictor::new(journal.clone(), vec![])),
        Arc::new(FakeMaps::new(journal.clone()).with_route_status("NOT_FOUND")),
        view.clone(),
    );

    let err = block_on(widget.draw_route("Bandra", "Nowhere")).unwrap_err();
    assert!(err.message.contains("NOT_FOUND"));

    let map = block_on(widget.map());
    assert!(map.directions.is_none());
    assert_eq!(map.viewport, Viewport::default());
    assert_eq!(view.maps().len(), 1);
    assert!(view.alerts().is_empty());
}
