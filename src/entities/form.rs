use serde::{Deserialize, Serialize};

use crate::entities::{EstimateRequest, VehicleType};
use crate::error::{validation_error, Error};

pub const VALIDATION_NOTICE: &str = "Please enter both pickup and destination.";
pub const VEHICLE_NOTICE: &str = "Please choose a vehicle type (Economy or Premium).";
pub const COUNT_NOTICE: &str = "Please enter whole numbers for riders and drivers.";

/// Field values as the user typed them.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TripForm {
    pub origin: String,
    pub destination: String,
    pub vehicle: String,
    pub riders: String,
    pub drivers: String,
}

impl TripForm {
    pub fn into_request(self) -> Result<EstimateRequest, Error> {
        let origin = self.origin.trim();
        let destination = self.destination.trim();

        if origin.is_empty() || destination.is_empty() {
            return Err(validation_error(VALIDATION_NOTICE));
        }

        let vehicle_type: VehicleType = self
            .vehicle
            .parse()
            .map_err(|_| validation_error(VEHICLE_NOTICE))?;

        Ok(EstimateRequest {
            origin: origin.into(),
            destination: destination.into(),
            vehicle_type,
            riders: parse_count(&self.riders)?,
            drivers: parse_count(&self.drivers)?,
        })
    }
}

fn parse_count(raw: &str) -> Result<u32, Error> {
    raw.trim()
        .parse()
        .map_err(|_| validation_error(COUNT_NOTICE))
}

#[cfg(test)]
fn form(origin: &str, destination: &str) -> TripForm {
    TripForm {
        origin: origin.into(),
        destination: destination.into(),
        vehicle: "Economy".into(),
        riders: "60".into(),
        drivers: "25".into(),
    }
}

#[test]
fn trims_locations() {
    let request = form("  Bandra ", "\tAndheri\n").into_request().unwrap();

    assert_eq!(request.origin, "Bandra");
    assert_eq!(request.destination, "Andheri");
    assert_eq!(request.vehicle_type, VehicleType::Economy);
    assert_eq!(request.riders, 60);
    assert_eq!(request.drivers, 25);
}

#[test]
fn blank_locations_are_rejected() {
    for (origin, destination) in [("", "Andheri"), ("Bandra", ""), ("   ", "Andheri"), (" ", "\t")] {
        let err = form(origin, destination).into_request().unwrap_err();

        assert!(err.is_validation());
        assert_eq!(err.message, VALIDATION_NOTICE);
    }
}

#[test]
fn missing_locations_win_over_other_bad_fields() {
    let mut bad = form("", "Andheri");
    bad.vehicle = "hovercraft".into();
    bad.riders = "many".into();

    let err = bad.into_request().unwrap_err();
    assert_eq!(err.message, VALIDATION_NOTICE);
}

#[test]
fn counts_must_be_whole_numbers() {
    for riders in ["", "-1", "2.5", "lots"] {
        let mut bad = form("Bandra", "Andheri");
        bad.riders = riders.into();

        let err = bad.into_request().unwrap_err();
        assert_eq!(err.message, COUNT_NOTICE);
    }
}

#[test]
fn unknown_vehicle_is_rejected() {
    let mut bad = form("Bandra", "Andheri");
    bad.vehicle = "Rickshaw".into();

    let err = bad.into_request().unwrap_err();
    assert_eq!(err.message, VEHICLE_NOTICE);
}
