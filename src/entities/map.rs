use geo_types::Rect;
use serde::{Deserialize, Serialize};

use crate::entities::{Directions, Viewport};

const MAX_ZOOM: u8 = 21;

/// The map surface and its route overlay.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Map {
    pub viewport: Viewport,
    pub directions: Option<Directions>,
}

impl Map {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            directions: None,
        }
    }

    /// Replaces the overlay and frames the primary route.
    pub fn set_directions(&mut self, directions: Directions) {
        if let Some(route) = directions.primary() {
            let rect: Rect<f64> = route.bounds.into();

            self.viewport.center = rect.center().into();
            if let Some(zoom) = fit_zoom(&rect) {
                self.viewport.zoom = zoom;
            }
        }

        self.directions = Some(directions);
    }
}

fn fit_zoom(rect: &Rect<f64>) -> Option<u8> {
    let span = rect.width().max(rect.height());
    if span.is_nan() || span <= 0.0 {
        return None;
    }

    let zoom = (360.0 / span).log2().floor().clamp(0.0, MAX_ZOOM as f64);
    Some(zoom as u8)
}

#[cfg(test)]
fn directions_with_bounds(sw: (f64, f64), ne: (f64, f64)) -> Directions {
    use crate::entities::{Bounds, Coordinates, DirectionsRoute};

    Directions {
        routes: vec![DirectionsRoute {
            summary: "Western Express Hwy".into(),
            bounds: Bounds {
                southwest: Coordinates {
                    lat: sw.0,
                    lng: sw.1,
                },
                northeast: Coordinates {
                    lat: ne.0,
                    lng: ne.1,
                },
            },
            legs: vec![],
            overview_polyline: None,
        }],
    }
}

#[test]
fn set_directions_frames_route() {
    let mut map = Map::new(Viewport::default());

    map.set_directions(directions_with_bounds((19.0, 72.8), (19.2, 72.9)));

    assert!(map.directions.is_some());
    assert!((map.viewport.center.lat - 19.1).abs() < 1e-9);
    assert!((map.viewport.center.lng - 72.85).abs() < 1e-9);
    // 360 / 0.2 = 1800 -> log2 ~ 10.8
    assert_eq!(map.viewport.zoom, 10);
}

#[test]
fn degenerate_bounds_keep_zoom() {
    let mut map = Map::new(Viewport::default());

    map.set_directions(directions_with_bounds((19.0, 72.8), (19.0, 72.8)));

    assert_eq!(map.viewport.zoom, 11);
    assert_eq!(map.viewport.center.lat, 19.0);
}

#[test]
fn empty_directions_keep_viewport() {
    let mut map = Map::new(Viewport::default());

    map.set_directions(Directions::default());

    assert_eq!(map.viewport, Viewport::default());
    assert_eq!(map.directions, Some(Directions::default()));
}
