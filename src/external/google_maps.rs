use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    api::MapsAPI,
    entities::{Coordinates, Directions, DirectionsRoute, PlaceSuggestion, TravelMode},
    error::{
        directions_status_error, invalid_input_error, missing_api_key_error, upstream_error,
        Error,
    },
};

pub type PlaceSuggestions = Vec<PlaceSuggestion>;

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response<T> {
    status: String,
    predictions: Option<T>,
    routes: Option<T>,
}

/// Google Maps web services: place autocomplete and directions.
#[derive(Clone, Debug)]
pub struct GoogleMaps {
    client: reqwest::Client,
    api_base: String,
    api_key: Option<String>,
}

impl GoogleMaps {
    pub fn new(api_base: &str, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn key(&self) -> Result<&str, Error> {
        self.api_key.as_deref().ok_or_else(missing_api_key_error)
    }
}

fn check_status_code(status_code: u16) -> Result<(), Error> {
    if (400..500).contains(&status_code) {
        return Err(invalid_input_error());
    } else if status_code != 200 {
        return Err(upstream_error());
    }

    Ok(())
}

#[async_trait]
impl MapsAPI for GoogleMaps {
    #[tracing::instrument(skip(self))]
    async fn find_place_suggestions(
        &self,
        input: String,
        location: Coordinates,
        radius: f64,
        session_token: String,
    ) -> Result<Vec<PlaceSuggestion>, Error> {
        let location: String = location.into();

        let url = format!("{}/maps/api/place/autocomplete/json", self.api_base);
        let key = self.key()?;

        let res = self
            .client
            .get(url)
            .query(&[("key", key)])
            .query(&[("input", input)])
            .query(&[("location", location)])
            .query(&[("radius", radius.to_string())])
            .query(&[("sessiontoken", session_token)])
            .send()
            .await?;

        check_status_code(res.status().as_u16())?;

        let data: Response<PlaceSuggestions> = res.json().await?;

        if data.status == "ZERO_RESULTS" {
            return Ok(vec![]);
        } else if data.status != "OK" {
            tracing::warn!("autocomplete returned status {}", data.status);
            return Err(upstream_error());
        }

        data.predictions.ok_or_else(upstream_error)
    }

    #[tracing::instrument(skip(self))]
    async fn find_directions(
        &self,
        origin: String,
        destination: String,
        mode: TravelMode,
    ) -> Result<Directions, Error> {
        let url = format!("{}/maps/api/directions/json", self.api_base);
        let key = self.key()?;

        let res = self
            .client
            .get(url)
            .query(&[("key", key)])
            .query(&[("origin", origin)])
            .query(&[("destination", destination)])
            .query(&[("mode", mode.name())])
            .send()
            .await?;

        check_status_code(res.status().as_u16())?;

        let data: Response<Vec<DirectionsRoute>> = res.json().await?;

        if data.status != "OK" {
            return Err(directions_status_error(&data.status));
        }

        Ok(Directions {
            routes: data.routes.ok_or_else(upstream_error)?,
        })
    }
}

#[test]
fn status_codes() {
    assert!(check_status_code(200).is_ok());
    assert_eq!(check_status_code(403).unwrap_err().code, 101);
    assert_eq!(check_status_code(500).unwrap_err().code, 4);
    assert_eq!(check_status_code(204).unwrap_err().code, 4);
}

#[test]
fn missing_key_fails_before_any_request() {
    use tokio_test::block_on;

    let maps = GoogleMaps::new("http://127.0.0.1:9", None);

    let err = block_on(maps.find_directions(
        "Bandra".into(),
        "Andheri".into(),
        TravelMode::Driving,
    ))
    .unwrap_err();

    assert_eq!(err.code, 7);
}
