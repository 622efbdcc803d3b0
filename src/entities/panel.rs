use serde::{Deserialize, Serialize};

use crate::entities::Estimate;

/// The result panel: hidden until the first successful estimate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultPanel {
    pub hidden: bool,
    pub fare: String,
    pub meta: String,
}

impl Default for ResultPanel {
    fn default() -> Self {
        Self {
            hidden: true,
            fare: String::new(),
            meta: String::new(),
        }
    }
}

impl ResultPanel {
    pub fn render(&mut self, estimate: &Estimate) {
        let response = &estimate.response;

        self.hidden = false;
        self.fare = format_fare(response.predicted_dynamic_price);
        self.meta = format_meta(
            &estimate.vehicle_label(),
            response.distance_km,
            response.duration_min,
        );
    }
}

pub fn format_fare(price: f64) -> String {
    format!("₹ {}", price)
}

pub fn format_meta(vehicle: &str, distance_km: f64, duration_min: f64) -> String {
    format!("{} • {} km • {} min", vehicle, distance_km, duration_min)
}

#[test]
fn renders_fare_and_meta() {
    use crate::entities::{EstimateRequest, EstimateResponse, VehicleType};

    let request = EstimateRequest {
        origin: "Bandra".into(),
        destination: "Andheri".into(),
        vehicle_type: VehicleType::Economy,
        riders: 60,
        drivers: 25,
    };
    let response = EstimateResponse {
        predicted_dynamic_price: 245.5,
        vehicle_type: Some("Sedan".into()),
        distance_km: 12.3,
        duration_min: 22.0,
        base_cost: None,
        origin: None,
        destination: None,
    };

    let mut panel = ResultPanel::default();
    assert!(panel.hidden);

    panel.render(&Estimate::new(request, response));

    assert!(!panel.hidden);
    assert_eq!(panel.fare, "₹ 245.5");
    assert_eq!(panel.meta, "Sedan • 12.3 km • 22 min");
}

#[test]
fn whole_fares_drop_the_fraction() {
    assert_eq!(format_fare(245.0), "₹ 245");
    assert_eq!(format_fare(99.99), "₹ 99.99");
}
