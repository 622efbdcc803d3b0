use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::{
    Coordinates, Directions, EstimateRequest, EstimateResponse, HealthStatus, Map,
    PlaceSuggestion, ResultPanel, TravelMode,
};
use crate::error::Error;

#[async_trait]
pub trait FarePredictor {
    async fn predict(&self, request: &EstimateRequest) -> Result<EstimateResponse, Error>;
    async fn health(&self) -> Result<HealthStatus, Error>;
}

#[async_trait]
pub trait MapsAPI {
    async fn find_place_suggestions(
        &self,
        input: String,
        location: Coordinates,
        radius: f64,
        session_token: String,
    ) -> Result<Vec<PlaceSuggestion>, Error>;

    async fn find_directions(
        &self,
        origin: String,
        destination: String,
        mode: TravelMode,
    ) -> Result<Directions, Error>;
}

/// Whatever hosts the widget on screen.
pub trait View {
    fn alert(&self, message: &str);
    fn present_result(&self, panel: &ResultPanel);
    fn present_map(&self, map: &Map);
}

pub type DynFarePredictor = Arc<dyn FarePredictor + Send + Sync>;
pub type DynMapsAPI = Arc<dyn MapsAPI + Send + Sync>;
pub type DynView = Arc<dyn View + Send + Sync>;
