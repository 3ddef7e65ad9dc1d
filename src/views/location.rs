//! Location-intelligence view: geocoding, reverse geocoding, amenity
//! search, and static-map generation.

#[cfg(test)]
#[path = "location_test.rs"]
mod location_test;

use std::fmt::Write;

use crate::net::error::ApiError;
use crate::net::http::HttpClient;
use crate::net::types::{
    AmenitiesRequest, AmenitiesResponse, GenerateMapRequest, GeocodeRequest, GeocodeResponse,
    MapResponse, ReverseGeocodeRequest, ReverseGeocodeResponse,
};

/// Default amenity search radius in meters.
pub const DEFAULT_AMENITY_RADIUS_M: u32 = 5000;
/// Default static-map zoom level (street scale).
pub const DEFAULT_MAP_ZOOM: u8 = 15;
/// Default static-map pixel dimensions.
pub const DEFAULT_MAP_SIZE: &str = "640x640";
/// Default static-map rendering style.
pub const DEFAULT_MAP_TYPE: &str = "roadmap";

/// A coordinate pair outside the WGS84 value ranges.
#[derive(Debug, thiserror::Error)]
pub enum InvalidCoordinates {
    #[error("latitude {0} out of range (-90..=90)")]
    Latitude(f64),
    #[error("longitude {0} out of range (-180..=180)")]
    Longitude(f64),
}

/// Range-check a coordinate pair before it is sent anywhere.
///
/// # Errors
///
/// Returns which component is out of range.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), InvalidCoordinates> {
    if !(-90.0..=90.0).contains(&latitude) || latitude.is_nan() {
        return Err(InvalidCoordinates::Latitude(latitude));
    }
    if !(-180.0..=180.0).contains(&longitude) || longitude.is_nan() {
        return Err(InvalidCoordinates::Longitude(longitude));
    }
    Ok(())
}

/// Resolve a free-text address to coordinates.
///
/// # Errors
///
/// Propagates the classified transport error.
pub async fn geocode(client: &HttpClient, auth: Option<&str>, address: &str) -> Result<GeocodeResponse, ApiError> {
    client.post("/location/geocode", &GeocodeRequest { address }, auth).await
}

/// Resolve coordinates to address information.
///
/// # Errors
///
/// Propagates the classified transport error.
pub async fn reverse_geocode(
    client: &HttpClient,
    auth: Option<&str>,
    latitude: f64,
    longitude: f64,
) -> Result<ReverseGeocodeResponse, ApiError> {
    client
        .post("/location/reverse-geocode", &ReverseGeocodeRequest { latitude, longitude }, auth)
        .await
}

/// Search for amenities around a point.
///
/// # Errors
///
/// Propagates the classified transport error.
pub async fn find_amenities(
    client: &HttpClient,
    auth: Option<&str>,
    latitude: f64,
    longitude: f64,
    radius: u32,
) -> Result<AmenitiesResponse, ApiError> {
    client
        .post(
            "/location/amenities",
            &AmenitiesRequest {
                latitude,
                longitude,
                radius,
            },
            auth,
        )
        .await
}

/// Generate static and interactive map links for a point.
///
/// # Errors
///
/// Propagates the classified transport error.
pub async fn generate_map(
    client: &HttpClient,
    auth: Option<&str>,
    latitude: f64,
    longitude: f64,
    zoom: u8,
    size: &str,
    maptype: &str,
) -> Result<MapResponse, ApiError> {
    client
        .post(
            "/location/generate-map",
            &GenerateMapRequest {
                latitude,
                longitude,
                zoom,
                size,
                maptype,
            },
            auth,
        )
        .await
}

/// Format a geocoding result.
#[must_use]
pub fn render_geocode(response: &GeocodeResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Coordinates: {}, {}",
        response.coordinates.latitude, response.coordinates.longitude
    );
    let _ = writeln!(out, "Address:     {}", response.formatted_address);
    if let Some(city) = &response.address_components.city {
        let _ = writeln!(out, "City:        {city}");
    }
    if let Some(district) = &response.address_components.district {
        let _ = writeln!(out, "District:    {district}");
    }
    if let Some(province) = &response.address_components.province {
        let _ = writeln!(out, "Province:    {province}");
    }
    out
}

/// Format a reverse-geocoding result.
#[must_use]
pub fn render_reverse_geocode(response: &ReverseGeocodeResponse) -> String {
    let info = &response.address_info;
    let mut out = String::new();
    let _ = writeln!(out, "Address: {}", info.formatted_address);
    let mut parts = Vec::new();
    if let Some(city) = &info.components.city {
        parts.push(format!("City: {city}"));
    }
    if let Some(district) = &info.components.district {
        parts.push(format!("District: {district}"));
    }
    if let Some(province) = &info.components.province {
        parts.push(format!("Province: {province}"));
    }
    if !parts.is_empty() {
        let _ = writeln!(out, "{}", parts.join(", "));
    }
    out
}

/// Format an amenity search result, grouped by category.
#[must_use]
pub fn render_amenities(response: &AmenitiesResponse) -> String {
    let summary = &response.summary;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Found {} amenities in {} categories within {}m",
        summary.total_amenities, summary.categories_found, summary.search_radius
    );
    for (category, places) in &response.amenities {
        if places.is_empty() {
            continue;
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "{} ({})", category.replace('_', " "), places.len());
        for place in places {
            let _ = writeln!(out, "  {}", place.name);
            if let (Some(rating), Some(total)) = (place.rating, place.user_ratings_total) {
                let _ = writeln!(out, "      Rating: {rating} ({total} reviews)");
            }
        }
    }
    out
}

/// Format generated map links.
#[must_use]
pub fn render_map(response: &MapResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Static map:      {}", response.map_urls.static_map);
    if let Some(interactive) = &response.map_urls.interactive_map {
        let _ = writeln!(out, "Interactive map: {interactive}");
    }
    out
}
