use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Driving,
}

impl TravelMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Driving => "driving",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Directions {
    pub routes: Vec<DirectionsRoute>,
}

impl Directions {
    pub fn primary(&self) -> Option<&DirectionsRoute> {
        self.routes.first()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectionsRoute {
    #[serde(default)]
    pub summary: String,
    pub bounds: Bounds,
    #[serde(default)]
    pub legs: Vec<Leg>,
    #[serde(default)]
    pub overview_polyline: Option<Polyline>,
}

impl DirectionsRoute {
    /// Total driving distance in metres.
    pub fn distance_m(&self) -> u64 {
        self.legs.iter().map(|leg| leg.distance.value).sum()
    }

    /// Total driving time in seconds.
    pub fn duration_s(&self) -> u64 {
        self.legs.iter().map(|leg| leg.duration.value).sum()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub northeast: Coordinates,
    pub southwest: Coordinates,
}

impl From<Bounds> for geo_types::Rect<f64> {
    fn from(bounds: Bounds) -> Self {
        geo_types::Rect::new(bounds.southwest, bounds.northeast)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub distance: TextValue,
    pub duration: TextValue,
    #[serde(default)]
    pub start_address: String,
    #[serde(default)]
    pub end_address: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextValue {
    pub text: String,
    pub value: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub points: String,
}

#[test]
fn decodes_directions_route() {
    let route: DirectionsRoute = serde_json::from_value(serde_json::json!({
        "summary": "Western Express Hwy",
        "bounds": {
            "northeast": { "lat": 19.1197, "lng": 72.8464 },
            "southwest": { "lat": 19.0544, "lng": 72.8258 }
        },
        "legs": [
            {
                "distance": { "text": "8.1 km", "value": 8100 },
                "duration": { "text": "24 mins", "value": 1440 },
                "start_address": "Bandra West, Mumbai",
                "end_address": "Andheri West, Mumbai",
                "steps": []
            },
            {
                "distance": { "text": "1.2 km", "value": 1200 },
                "duration": { "text": "5 mins", "value": 300 }
            }
        ],
        "overview_polyline": { "points": "a~l~Fjk~uOwHJy@P" },
        "warnings": []
    }))
    .unwrap();

    assert_eq!(route.distance_m(), 9300);
    assert_eq!(route.duration_s(), 1740);
    assert_eq!(route.legs[1].start_address, "");
}

#[test]
fn travel_mode_wire_names() {
    assert_eq!(
        serde_json::to_value(TravelMode::Driving).unwrap(),
        serde_json::json!("driving")
    );
    assert_eq!(TravelMode::Driving.name(), "driving");
}
