mod estimate;
mod form;
mod location;
mod map;
mod panel;
mod place;
mod route;

pub use estimate::{Estimate, EstimateRequest, EstimateResponse, HealthStatus, VehicleType};
pub use form::{TripForm, COUNT_NOTICE, VALIDATION_NOTICE, VEHICLE_NOTICE};
pub use location::{Coordinates, Viewport};
pub use map::Map;
pub use panel::{format_fare, format_meta, ResultPanel};
pub use place::PlaceSuggestion;
pub use route::{Bounds, Directions, DirectionsRoute, Leg, Polyline, TextValue, TravelMode};
