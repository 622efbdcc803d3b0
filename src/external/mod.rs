pub mod fare_api;
pub mod google_maps;
