//! Wire DTOs for the valuation-platform REST endpoints.
//!
//! DESIGN
//! ======
//! These types mirror the backend's JSON shapes field for field so serde
//! does all validation at the transport boundary. Profile responses are
//! always taken wholesale; nothing here supports partial merges.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The authenticated user's profile as returned by the backend.
///
/// The backend is the system of record; any local copy is replaced in full
/// by the most recent server response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name.
    pub full_name: String,
    /// Honorific prefix (e.g. `"Mr."`, `"Dr."`), if set.
    #[serde(default)]
    pub honorable: Option<String>,
    /// Professional title shown under the display name.
    #[serde(default)]
    pub professional_title: Option<String>,
    /// IVSL registration identifier.
    #[serde(default)]
    pub ivsl_registration: Option<String>,
    /// IVSL membership identifier.
    #[serde(default)]
    pub ivsl_membership: Option<String>,
    /// Professional status (e.g. chartered, associate).
    #[serde(default)]
    pub professional_status: Option<String>,
    /// Free-text qualification strings, order-preserving.
    #[serde(default)]
    pub qualifications: Vec<String>,
    /// Whether the account's email address has been verified.
    #[serde(default)]
    pub is_verified: bool,
    /// Server-computed percentage of optional profile fields filled in.
    #[serde(default)]
    pub profile_completeness: u8,
    /// Account email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Landline contact number.
    #[serde(default)]
    pub contact_number: Option<String>,
    /// Mobile contact number.
    #[serde(default)]
    pub mobile_number: Option<String>,
    /// City line of the postal address.
    #[serde(default)]
    pub address_city: Option<String>,
    /// District line of the postal address.
    #[serde(default)]
    pub address_district: Option<String>,
}

/// `POST /auth/login` request body.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Success body for `POST /auth/login` and `POST /auth/register`.
#[derive(Clone, Debug, Deserialize)]
pub struct AuthResponse {
    /// The authenticated profile.
    pub user: UserProfile,
    /// Opaque bearer token for subsequent requests.
    pub token: String,
    /// Whether the account still needs email verification.
    #[serde(rename = "requiresVerification", default)]
    pub requires_verification: bool,
}

/// Registration payload for `POST /auth/register`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct NewRegistration {
    pub email: String,
    pub password: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub honorable: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professional_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ivsl_registration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ivsl_membership: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professional_status: Option<String>,
    /// Qualifications submitted with the registration, in entry order.
    pub qualifications: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_district: Option<String>,
}

/// Profile fields accepted by `PUT /users/profile`.
///
/// Absent fields are omitted from the payload entirely; the response
/// carries the full updated profile.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub honorable: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professional_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ivsl_registration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ivsl_membership: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professional_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_district: Option<String>,
}

/// Success body for `GET /auth/me`.
#[derive(Clone, Debug, Deserialize)]
pub struct MeResponse {
    pub user: UserProfile,
}

/// Success body for `PUT /users/profile`.
#[derive(Clone, Debug, Deserialize)]
pub struct ProfileResponse {
    pub user: UserProfile,
}

/// Confirmation body for verification endpoints.
#[derive(Clone, Debug, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `POST /auth/verify-email` request body.
#[derive(Debug, Serialize)]
pub struct VerifyEmailRequest<'a> {
    pub token: &'a str,
}

/// Success body for the qualification add/remove endpoints.
#[derive(Clone, Debug, Deserialize)]
pub struct QualificationsResponse {
    /// The full qualifications list after the mutation, in server order.
    pub qualifications: Vec<String>,
}

/// `POST /users/qualifications` request body.
#[derive(Debug, Serialize)]
pub struct QualificationRequest<'a> {
    pub qualification: &'a str,
}

/// Success body for `GET /users/dashboard`.
#[derive(Clone, Debug, Deserialize)]
pub struct DashboardResponse {
    pub statistics: DashboardStatistics,
    #[serde(default)]
    pub recent_reports: Vec<ReportSummary>,
}

/// Aggregate counters shown on the dashboard.
#[derive(Clone, Debug, Deserialize)]
pub struct DashboardStatistics {
    pub reports: ReportCounts,
    pub documents: DocumentCounts,
}

/// Valuation-report counters.
#[derive(Clone, Debug, Deserialize)]
pub struct ReportCounts {
    pub total: i64,
    pub completed: i64,
    pub draft: i64,
}

/// Uploaded-document counters.
#[derive(Clone, Debug, Deserialize)]
pub struct DocumentCounts {
    pub total: i64,
    pub processed: i64,
    pub pending: i64,
}

/// One row of the dashboard's recent-reports list.
#[derive(Clone, Debug, Deserialize)]
pub struct ReportSummary {
    pub id: i64,
    /// Human-facing reference, when the report has been assigned one.
    #[serde(default)]
    pub reference_number: Option<String>,
    /// Workflow status (e.g. `"draft"`, `"completed"`).
    pub status: String,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub property_address: Option<String>,
    /// ISO 8601 creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// `POST /location/geocode` request body.
#[derive(Debug, Serialize)]
pub struct GeocodeRequest<'a> {
    pub address: &'a str,
}

/// Success body for `POST /location/geocode`.
#[derive(Clone, Debug, Deserialize)]
pub struct GeocodeResponse {
    pub coordinates: Coordinates,
    pub formatted_address: String,
    #[serde(default)]
    pub address_components: AddressComponents,
}

/// A WGS84 coordinate pair.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Administrative address parts resolved by the geocoder.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AddressComponents {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
}

/// `POST /location/reverse-geocode` request body.
#[derive(Debug, Serialize)]
pub struct ReverseGeocodeRequest {
    pub latitude: f64,
    pub longitude: f64,
}

/// Success body for `POST /location/reverse-geocode`.
#[derive(Clone, Debug, Deserialize)]
pub struct ReverseGeocodeResponse {
    pub address_info: AddressInfo,
}

/// Resolved address for a coordinate pair.
#[derive(Clone, Debug, Deserialize)]
pub struct AddressInfo {
    pub formatted_address: String,
    #[serde(default)]
    pub components: AddressComponents,
}

/// `POST /location/amenities` request body.
#[derive(Debug, Serialize)]
pub struct AmenitiesRequest {
    pub latitude: f64,
    pub longitude: f64,
    /// Search radius in meters.
    pub radius: u32,
}

/// Success body for `POST /location/amenities`.
#[derive(Clone, Debug, Deserialize)]
pub struct AmenitiesResponse {
    pub summary: AmenitySummary,
    /// Amenities grouped by category name, each list nearest-first.
    #[serde(default)]
    pub amenities: BTreeMap<String, Vec<Amenity>>,
}

/// Headline numbers for an amenity search.
#[derive(Clone, Debug, Deserialize)]
pub struct AmenitySummary {
    pub total_amenities: i64,
    pub categories_found: i64,
    /// Radius actually searched, in meters.
    pub search_radius: i64,
}

/// A single nearby place.
#[derive(Clone, Debug, Deserialize)]
pub struct Amenity {
    pub name: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<i64>,
    #[serde(default)]
    pub vicinity: Option<String>,
}

/// `POST /location/generate-map` request body.
#[derive(Debug, Serialize)]
pub struct GenerateMapRequest<'a> {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
    /// Pixel dimensions as `"WIDTHxHEIGHT"`.
    pub size: &'a str,
    /// Map rendering style (`"roadmap"`, `"satellite"`, `"hybrid"`, `"terrain"`).
    pub maptype: &'a str,
}

/// Success body for `POST /location/generate-map`.
#[derive(Clone, Debug, Deserialize)]
pub struct MapResponse {
    pub map_urls: MapUrls,
}

/// Links produced by map generation.
#[derive(Clone, Debug, Deserialize)]
pub struct MapUrls {
    /// URL of the rendered static map image.
    pub static_map: String,
    /// Link opening the same view in the interactive map product.
    #[serde(default)]
    pub interactive_map: Option<String>,
}
