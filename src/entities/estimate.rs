use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleType {
    Economy,
    Premium,
}

impl VehicleType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Economy => "Economy",
            Self::Premium => "Premium",
        }
    }
}

impl Default for VehicleType {
    fn default() -> Self {
        Self::Economy
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VehicleType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "economy" => Ok(Self::Economy),
            "premium" => Ok(Self::Premium),
            _ => Err(()),
        }
    }
}

/// Body of `POST /predict`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EstimateRequest {
    pub origin: String,
    pub destination: String,
    pub vehicle_type: VehicleType,
    #[serde(rename = "number_of_riders")]
    pub riders: u32,
    #[serde(rename = "number_of_drivers")]
    pub drivers: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EstimateResponse {
    pub predicted_dynamic_price: f64,
    #[serde(default)]
    pub vehicle_type: Option<String>,
    pub distance_km: f64,
    pub duration_min: f64,
    #[serde(default)]
    pub base_cost: Option<f64>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Estimate {
    pub token: Uuid,
    pub request: EstimateRequest,
    pub response: EstimateResponse,
    pub quoted_at: DateTime<Utc>,
}

impl Estimate {
    pub fn new(request: EstimateRequest, response: EstimateResponse) -> Self {
        Self {
            token: Uuid::new_v4(),
            request,
            response,
            quoted_at: Utc::now(),
        }
    }

    /// The label shown next to distance and duration. The service's label wins when present.
    pub fn vehicle_label(&self) -> String {
        self.response
            .vehicle_type
            .clone()
            .filter(|label| !label.trim().is_empty())
            .unwrap_or_else(|| self.request.vehicle_type.name().into())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub google_api_key: bool,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[test]
fn request_uses_wire_key_names() {
    let request = EstimateRequest {
        origin: "Bandra".into(),
        destination: "Andheri".into(),
        vehicle_type: VehicleType::Premium,
        riders: 60,
        drivers: 25,
    };

    let value = serde_json::to_value(&request).unwrap();
    let object = value.as_object().unwrap();

    let mut keys: Vec<&str> = object.keys().map(|k| k.as_str()).collect();
    keys.sort();
    assert_eq!(
        keys,
        vec![
            "destination",
            "number_of_drivers",
            "number_of_riders",
            "origin",
            "vehicle_type"
        ]
    );
    assert_eq!(
        value,
        serde_json::json!({
            "origin": "Bandra",
            "destination": "Andheri",
            "vehicle_type": "Premium",
            "number_of_riders": 60,
            "number_of_drivers": 25,
        })
    );
}

#[test]
fn response_tolerates_backend_extras_and_missing_label() {
    let response: EstimateResponse = serde_json::from_value(serde_json::json!({
        "origin": "CST Station, Mumbai",
        "destination": "BKC, Mumbai",
        "distance_km": 9.87,
        "duration_min": 31.5,
        "base_cost": 231.44,
        "predicted_dynamic_price": 402.1,
        "surge": "ignored"
    }))
    .unwrap();

    assert_eq!(response.vehicle_type, None);
    assert_eq!(response.base_cost, Some(231.44));
    assert_eq!(response.predicted_dynamic_price, 402.1);
}

#[test]
fn vehicle_label_prefers_response() {
    let request = EstimateRequest {
        origin: "Bandra".into(),
        destination: "Andheri".into(),
        vehicle_type: VehicleType::Economy,
        riders: 1,
        drivers: 1,
    };
    let mut response = EstimateResponse {
        predicted_dynamic_price: 245.5,
        vehicle_type: Some("Sedan".into()),
        distance_km: 12.3,
        duration_min: 22.0,
        base_cost: None,
        origin: None,
        destination: None,
    };

    let estimate = Estimate::new(request.clone(), response.clone());
    assert_eq!(estimate.vehicle_label(), "Sedan");

    response.vehicle_type = None;
    let estimate = Estimate::new(request, response);
    assert_eq!(estimate.vehicle_label(), "Economy");
}

#[test]
fn vehicle_type_parses_case_insensitively() {
    assert_eq!(" premium ".parse::<VehicleType>(), Ok(VehicleType::Premium));
    assert_eq!("ECONOMY".parse::<VehicleType>(), Ok(VehicleType::Economy));
    assert!("hovercraft".parse::<VehicleType>().is_err());
}
