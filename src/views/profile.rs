//! Profile view: display, updates, and the qualifications list.
//!
//! Qualification add/remove hit their own endpoints and return the full
//! list after the mutation; the rendered list always comes from the
//! server's response, not local edits.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use std::fmt::Write;

use crate::net::error::ApiError;
use crate::net::http::HttpClient;
use crate::net::types::{QualificationRequest, QualificationsResponse, UserProfile};

/// Append a qualification; returns the updated list in server order.
///
/// # Errors
///
/// Propagates the classified transport error.
pub async fn add_qualification(
    client: &HttpClient,
    auth: Option<&str>,
    qualification: &str,
) -> Result<Vec<String>, ApiError> {
    let response: QualificationsResponse = client
        .post("/users/qualifications", &QualificationRequest { qualification }, auth)
        .await?;
    Ok(response.qualifications)
}

/// Remove the qualification at `index`; returns the updated list.
///
/// # Errors
///
/// Propagates the classified transport error.
pub async fn remove_qualification(
    client: &HttpClient,
    auth: Option<&str>,
    index: usize,
) -> Result<Vec<String>, ApiError> {
    let response: QualificationsResponse = client
        .delete(&format!("/users/qualifications/{index}"), auth)
        .await?;
    Ok(response.qualifications)
}

fn field(out: &mut String, label: &str, value: Option<&str>) {
    let _ = writeln!(out, "{label:<22}{}", value.unwrap_or("-"));
}

/// Format a profile for display.
#[must_use]
pub fn render(user: &UserProfile) -> String {
    let mut out = String::new();

    let name = match user.honorable.as_deref() {
        Some(honorable) => format!("{honorable} {}", user.full_name),
        None => user.full_name.clone(),
    };
    let _ = writeln!(out, "{name}");
    let _ = writeln!(
        out,
        "{} ({}% complete, {})",
        user.professional_title.as_deref().unwrap_or("Professional Valuer"),
        user.profile_completeness,
        if user.is_verified { "verified" } else { "unverified" }
    );
    let _ = writeln!(out);

    field(&mut out, "Email", user.email.as_deref());
    field(&mut out, "IVSL registration", user.ivsl_registration.as_deref());
    field(&mut out, "IVSL membership", user.ivsl_membership.as_deref());
    field(&mut out, "Professional status", user.professional_status.as_deref());
    field(&mut out, "Contact number", user.contact_number.as_deref());
    field(&mut out, "Mobile number", user.mobile_number.as_deref());
    field(&mut out, "City", user.address_city.as_deref());
    field(&mut out, "District", user.address_district.as_deref());

    let _ = writeln!(out);
    if user.qualifications.is_empty() {
        let _ = writeln!(out, "No qualifications added");
    } else {
        let _ = writeln!(out, "Qualifications:");
        for (index, qualification) in user.qualifications.iter().enumerate() {
            let _ = writeln!(out, "  [{index}] {qualification}");
        }
    }

    out
}

/// Format a bare qualifications list (shown after add/remove).
#[must_use]
pub fn render_qualifications(qualifications: &[String]) -> String {
    if qualifications.is_empty() {
        return "No qualifications added\n".to_owned();
    }
    let mut out = String::new();
    for (index, qualification) in qualifications.iter().enumerate() {
        let _ = writeln!(out, "  [{index}] {qualification}");
    }
    out
}
