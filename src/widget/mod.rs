mod estimate;
mod places;
mod route;

#[cfg(test)]
pub(crate) mod testing;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    api::{DynFarePredictor, DynMapsAPI, DynView},
    config::Config,
    entities::{HealthStatus, Map, ResultPanel},
    error::Error,
    external::{fare_api::FareClient, google_maps::GoogleMaps},
};

/// Everything the estimate form needs between clicks: service handles, the map surface and the
/// result panel.
pub struct Widget {
    config: Config,
    predictor: DynFarePredictor,
    maps: DynMapsAPI,
    view: DynView,
    map: Mutex<Map>,
    panel: Mutex<ResultPanel>,
    latest_request: AtomicU64,
    session_token: Uuid,
}

impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Widget")
            .field("api_base", &self.config.api_base)
            .field("session_token", &self.session_token)
            .finish()
    }
}

impl Widget {
    #[tracing::instrument(name = "Widget::new", skip_all)]
    pub fn new(
        config: Config,
        predictor: DynFarePredictor,
        maps: DynMapsAPI,
        view: DynView,
    ) -> Self {
        let map = Map::new(config.viewport);
        view.present_map(&map);

        let session_token = Uuid::new_v4();

        tracing::info!(
            "widget ready at {},{} zoom {}",
            map.viewport.center.lat,
            map.viewport.center.lng,
            map.viewport.zoom
        );

        Self {
            config,
            predictor,
            maps,
            view,
            map: Mutex::new(map),
            panel: Mutex::new(ResultPanel::default()),
            latest_request: AtomicU64::new(0),
            session_token,
        }
    }

    /// Wires the HTTP-backed collaborators described by `config`.
    pub fn from_config(config: Config, view: DynView) -> Result<Self, Error> {
        let predictor = FareClient::new(&config.api_base, config.request_timeout)?;
        let maps = GoogleMaps::new(
            &config.google_maps_api_base,
            config.google_maps_api_key.clone(),
        );

        if config.google_maps_api_key.is_none() {
            tracing::warn!("GOOGLE_MAPS_API_KEY is not set, routes and suggestions are disabled");
        }

        Ok(Self::new(config, Arc::new(predictor), Arc::new(maps), view))
    }

    pub async fn panel(&self) -> ResultPanel {
        self.panel.lock().await.clone()
    }

    pub async fn map(&self) -> Map {
        self.map.lock().await.clone()
    }

    #[tracing::instrument(skip(self))]
    pub async fn check_backend(&self) -> Result<HealthStatus, Error> {
        let health = self.predictor.health().await?;

        if !health.is_ok() {
            tracing::warn!("backend reported status {}", health.status);
        }

        Ok(health)
    }

    fn next_request_token(&self) -> u64 {
        self.latest_request.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_superseded(&self, token: u64) -> bool {
        self.latest_request.load(Ordering::SeqCst) != token
    }
}

#[test]
fn new_widget_presents_default_map() {
    use crate::entities::Viewport;
    use testing::{FakeMaps, FakePredictor, Journal, RecordingView};
    use tokio_test::block_on;

    let journal = Journal::default();
    let view = Arc::new(RecordingView::new(journal.clone()));

    let widget = Widget::new(
        Config::default(),
        Arc::new(FakePredictor::new(journal.clone(), vec![])),
        Arc::new(FakeMaps::new(journal.clone())),
        view.clone(),
    );

    assert_eq!(view.maps().len(), 1);
    assert_eq!(view.maps()[0].viewport, Viewport::default());

    let panel = block_on(widget.panel());
    assert!(panel.hidden);
    assert!(block_on(widget.map()).directions.is_none());
}

#[test]
fn check_backend_reports_health() {
    use testing::{FakeMaps, FakePredictor, Journal, RecordingView};
    use tokio_test::block_on;

    let journal = Journal::default();
    let widget = Widget::new(
        Config::default(),
        Arc::new(FakePredictor::new(journal.clone(), vec![])),
        Arc::new(FakeMaps::new(journal.clone())),
        Arc::new(RecordingView::new(journal.clone())),
    );

    let health = block_on(widget.check_backend()).unwrap();
    assert!(health.is_ok());
    assert!(!health.google_api_key);
}
