use std::io::{self, Write};
use std::sync::Mutex;

use crate::{
    api::View,
    entities::{Map, ResultPanel},
};

/// Draws the widget on a text stream, stdout by default.
pub struct TerminalView<W: Write + Send = io::Stdout> {
    out: Mutex<W>,
}

impl TerminalView {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_lines(&self, lines: &[String]) {
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };

        for line in lines {
            if let Err(err) = writeln!(out, "{}", line) {
                tracing::warn!("failed to write to terminal: {}", err);
                return;
            }
        }
        let _ = out.flush();
    }
}

impl<W: Write + Send> View for TerminalView<W> {
    fn alert(&self, message: &str) {
        self.write_lines(&[format!("! {}", message)]);
    }

    fn present_result(&self, panel: &ResultPanel) {
        if panel.hidden {
            return;
        }

        self.write_lines(&[
            format!("Estimated fare: {}", panel.fare),
            format!("  {}", panel.meta),
        ]);
    }

    fn present_map(&self, map: &Map) {
        let viewport = &map.viewport;
        let mut lines = vec![format!(
            "Map: {:.4},{:.4} zoom {}",
            viewport.center.lat, viewport.center.lng, viewport.zoom
        )];

        if let Some(route) = map.directions.as_ref().and_then(|d| d.primary()) {
            let title = if route.summary.is_empty() {
                "Route".to_string()
            } else {
                format!("Route via {}", route.summary)
            };
            lines.push(format!(
                "{}: {:.1} km, {} min",
                title,
                route.distance_m() as f64 / 1000.0,
                (route.duration_s() + 59) / 60
            ));

            for leg in &route.legs {
                lines.push(format!(
                    "  {} -> {} ({}, {})",
                    leg.start_address, leg.end_address, leg.distance.text, leg.duration.text
                ));
            }
        }

        self.write_lines(&lines);
    }
}

#[cfg(test)]
fn rendered(view: TerminalView<Vec<u8>>) -> String {
    String::from_utf8(view.into_inner()).unwrap()
}

#[test]
fn hidden_panel_prints_nothing() {
    let view = TerminalView::new(Vec::new());

    view.present_result(&ResultPanel::default());

    assert_eq!(rendered(view), "");
}

#[test]
fn prints_alert_and_result() {
    let view = TerminalView::new(Vec::new());

    view.alert("Please enter both pickup and destination.");
    view.present_result(&ResultPanel {
        hidden: false,
        fare: "₹ 245.5".into(),
        meta: "Sedan • 12.3 km • 22 min".into(),
    });

    assert_eq!(
        rendered(view),
        "! Please enter both pickup and destination.\n\
         Estimated fare: ₹ 245.5\n  Sedan • 12.3 km • 22 min\n"
    );
}

#[test]
fn prints_route_summary() {
    use crate::entities::{
        Bounds, Coordinates, Directions, DirectionsRoute, Leg, TextValue, Viewport,
    };

    let mut map = Map::new(Viewport::default());
    map.directions = Some(Directions {
        routes: vec![DirectionsRoute {
            summary: "SV Rd".into(),
            bounds: Bounds {
                northeast: Coordinates { lat: 19.1, lng: 72.9 },
                southwest: Coordinates { lat: 19.0, lng: 72.8 },
            },
            legs: vec![Leg {
                distance: TextValue {
                    text: "8.1 km".into(),
                    value: 8100,
                },
                duration: TextValue {
                    text: "24 mins".into(),
                    value: 1430,
                },
                start_address: "Bandra".into(),
                end_address: "Andheri".into(),
            }],
            overview_polyline: None,
        }],
    });

    let view = TerminalView::new(Vec::new());
    view.present_map(&map);

    assert_eq!(
        rendered(view),
        "Map: 19.0760,72.8777 zoom 11\n\
         Route via SV Rd: 8.1 km, 24 min\n  Bandra -> Andheri (8.1 km, 24 mins)\n"
    );
}
