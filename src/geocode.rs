//! Place-name geocoding.
//!
//! The planning core treats geocoding as an opaque collaborator: it hands in
//! a place and country name and gets back a coordinate or a lookup failure.
//! The bundled implementation resolves against the offline world-cities
//! database, trying an exact city+country match first and falling back to a
//! city-name-only match before giving up.

use crate::error::SunsideError;
use crate::geo::Coordinate;

/// Resolves a place name to a coordinate.
pub trait Geocoder {
    fn resolve(&self, place: &str, country: &str) -> Result<Coordinate, SunsideError>;
}

/// Offline geocoder over the embedded world-cities database.
#[derive(Debug, Clone, Copy, Default)]
pub struct CityGeocoder;

impl Geocoder for CityGeocoder {
    fn resolve(&self, place: &str, country: &str) -> Result<Coordinate, SunsideError> {
        let place_lower = place.trim().to_lowercase();
        let country_lower = country.trim().to_lowercase();

        // primary: exact city within the requested country
        if !country_lower.is_empty() {
            let exact = cities::all().iter().find(|city| {
                city.city.to_lowercase() == place_lower
                    && city.country.to_lowercase() == country_lower
            });
            if let Some(city) = exact {
                return Ok(Coordinate::new(city.latitude, city.longitude));
            }
        }

        // fallback provider: the city name anywhere in the world
        let anywhere = cities::all()
            .iter()
            .find(|city| city.city.to_lowercase() == place_lower);
        if let Some(city) = anywhere {
            if !country_lower.is_empty() {
                log_warning!(
                    "'{place}' not found in '{country}'; using the match in {}",
                    city.country
                );
            }
            return Ok(Coordinate::new(city.latitude, city.longitude));
        }

        Err(SunsideError::PlaceNotFound {
            place: place.to_string(),
            country: country.to_string(),
        })
    }
}
