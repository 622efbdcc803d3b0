use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl From<Coordinates> for String {
    fn from(coordinates: Coordinates) -> Self {
        format!("{},{}", coordinates.lat, coordinates.lng)
    }
}

impl From<Coordinates> for geo_types::Coord<f64> {
    fn from(coordinates: Coordinates) -> Self {
        geo_types::Coord {
            x: coordinates.lng,
            y: coordinates.lat,
        }
    }
}

impl From<geo_types::Coord<f64>> for Coordinates {
    fn from(coord: geo_types::Coord<f64>) -> Self {
        Self {
            lat: coord.y,
            lng: coord.x,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: Coordinates,
    pub zoom: u8,
}

impl Default for Viewport {
    /// Mumbai city center.
    fn default() -> Self {
        Self {
            center: Coordinates {
                lat: 19.076,
                lng: 72.8777,
            },
            zoom: 11,
        }
    }
}

#[test]
fn coordinates_query_string() {
    let location: String = Viewport::default().center.into();

    assert_eq!(location, "19.076,72.8777");
}

#[test]
fn coordinates_round_trip_through_geo_types() {
    let coordinates = Coordinates {
        lat: 19.0544,
        lng: 72.8406,
    };
    let coord: geo_types::Coord<f64> = coordinates.into();

    assert_eq!(coord.x, 72.8406);
    assert_eq!(coord.y, 19.0544);
    assert_eq!(Coordinates::from(coord), coordinates);
}
