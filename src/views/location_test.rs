use std::sync::Arc;

use axum::Json;
use axum::routing::post;
use serde_json::{Value, json};

use super::*;
use crate::testsupport::{RecordingNotifier, spawn_stub};

async fn client_for(router: axum::Router) -> HttpClient {
    let base = spawn_stub(router).await;
    HttpClient::new(&base, Arc::new(RecordingNotifier::default())).unwrap()
}

// =============================================================================
// Coordinate validation
// =============================================================================

#[test]
fn coordinates_inside_ranges_pass() {
    assert!(validate_coordinates(6.9271, 79.8612).is_ok());
    assert!(validate_coordinates(-90.0, -180.0).is_ok());
    assert!(validate_coordinates(90.0, 180.0).is_ok());
    assert!(validate_coordinates(0.0, 0.0).is_ok());
}

#[test]
fn latitude_out_of_range_fails() {
    assert!(matches!(
        validate_coordinates(90.1, 0.0),
        Err(InvalidCoordinates::Latitude(_))
    ));
    assert!(matches!(
        validate_coordinates(-91.0, 0.0),
        Err(InvalidCoordinates::Latitude(_))
    ));
}

#[test]
fn longitude_out_of_range_fails() {
    assert!(matches!(
        validate_coordinates(0.0, 180.5),
        Err(InvalidCoordinates::Longitude(_))
    ));
}

#[test]
fn nan_coordinates_fail() {
    assert!(validate_coordinates(f64::NAN, 0.0).is_err());
    assert!(validate_coordinates(0.0, f64::NAN).is_err());
}

#[test]
fn defaults_match_form_presets() {
    assert_eq!(DEFAULT_AMENITY_RADIUS_M, 5000);
    assert_eq!(DEFAULT_MAP_ZOOM, 15);
    assert_eq!(DEFAULT_MAP_SIZE, "640x640");
    assert_eq!(DEFAULT_MAP_TYPE, "roadmap");
}

// =============================================================================
// Requests
// =============================================================================

#[tokio::test]
async fn geocode_posts_address() {
    let router = axum::Router::new().route(
        "/location/geocode",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["address"], "Colombo Fort, Sri Lanka");
            Json(json!({
                "coordinates": {"latitude": 6.9344, "longitude": 79.8428},
                "formatted_address": "Colombo Fort, Colombo, Sri Lanka",
                "address_components": {"city": "Colombo"}
            }))
        }),
    );
    let client = client_for(router).await;

    let response = geocode(&client, Some("t1"), "Colombo Fort, Sri Lanka").await.unwrap();
    assert_eq!(response.formatted_address, "Colombo Fort, Colombo, Sri Lanka");
}

#[tokio::test]
async fn find_amenities_sends_radius() {
    let router = axum::Router::new().route(
        "/location/amenities",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["radius"], 2000);
            Json(json!({
                "summary": {"total_amenities": 0, "categories_found": 0, "search_radius": 2000},
                "amenities": {}
            }))
        }),
    );
    let client = client_for(router).await;

    let response = find_amenities(&client, Some("t1"), 6.9271, 79.8612, 2000).await.unwrap();
    assert_eq!(response.summary.search_radius, 2000);
}

#[tokio::test]
async fn generate_map_sends_rendering_options() {
    let router = axum::Router::new().route(
        "/location/generate-map",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["zoom"], 15);
            assert_eq!(body["size"], "640x640");
            assert_eq!(body["maptype"], "roadmap");
            Json(json!({
                "map_urls": {
                    "static_map": "https://maps.example/static.png",
                    "interactive_map": "https://maps.example/view"
                }
            }))
        }),
    );
    let client = client_for(router).await;

    let response = generate_map(
        &client,
        Some("t1"),
        6.9271,
        79.8612,
        DEFAULT_MAP_ZOOM,
        DEFAULT_MAP_SIZE,
        DEFAULT_MAP_TYPE,
    )
    .await
    .unwrap();
    assert_eq!(response.map_urls.static_map, "https://maps.example/static.png");
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn render_geocode_lists_components() {
    let response: GeocodeResponse = serde_json::from_value(json!({
        "coordinates": {"latitude": 6.9271, "longitude": 79.8612},
        "formatted_address": "Colombo, Sri Lanka",
        "address_components": {"city": "Colombo", "district": "Colombo", "province": "Western"}
    }))
    .unwrap();

    let text = render_geocode(&response);
    assert!(text.contains("6.9271, 79.8612"));
    assert!(text.contains("Colombo, Sri Lanka"));
    assert!(text.contains("Province:    Western"));
}

#[test]
fn render_reverse_geocode_joins_components() {
    let response: ReverseGeocodeResponse = serde_json::from_value(json!({
        "address_info": {
            "formatted_address": "12 Main St, Colombo",
            "components": {"city": "Colombo", "province": "Western"}
        }
    }))
    .unwrap();

    let text = render_reverse_geocode(&response);
    assert!(text.contains("Address: 12 Main St, Colombo"));
    assert!(text.contains("City: Colombo, Province: Western"));
}

#[test]
fn render_amenities_groups_and_skips_empty_categories() {
    let response: AmenitiesResponse = serde_json::from_value(json!({
        "summary": {"total_amenities": 2, "categories_found": 1, "search_radius": 5000},
        "amenities": {
            "schools": [
                {"name": "Royal College", "rating": 4.6, "user_ratings_total": 120},
                {"name": "Small School"}
            ],
            "banks": []
        }
    }))
    .unwrap();

    let text = render_amenities(&response);
    assert!(text.contains("Found 2 amenities in 1 categories within 5000m"));
    assert!(text.contains("schools (2)"));
    assert!(text.contains("Royal College"));
    assert!(text.contains("Rating: 4.6 (120 reviews)"));
    assert!(!text.contains("banks"));
}

#[test]
fn render_map_lists_links() {
    let response: MapResponse = serde_json::from_value(json!({
        "map_urls": {
            "static_map": "https://maps.example/static.png",
            "interactive_map": "https://maps.example/view"
        }
    }))
    .unwrap();

    let text = render_map(&response);
    assert!(text.contains("Static map:      https://maps.example/static.png"));
    assert!(text.contains("Interactive map: https://maps.example/view"));
}
