//! Dashboard view: report/document statistics and recent reports.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use std::fmt::Write;

use crate::net::error::ApiError;
use crate::net::http::HttpClient;
use crate::net::types::{DashboardResponse, UserProfile};

/// Fetch the dashboard summary.
///
/// # Errors
///
/// Propagates the classified transport error after surfacing the view's
/// own load-failure message.
pub async fn load(client: &HttpClient, auth: Option<&str>) -> Result<DashboardResponse, ApiError> {
    match client.get("/users/dashboard", auth).await {
        Ok(data) => Ok(data),
        Err(error) => {
            client.notifier().error("Failed to load dashboard data");
            Err(error)
        }
    }
}

/// Format the dashboard for display.
#[must_use]
pub fn render(user: Option<&UserProfile>, data: &DashboardResponse) -> String {
    let mut out = String::new();

    if let Some(user) = user {
        let title = user.professional_title.as_deref().unwrap_or("Professional Valuer");
        let _ = writeln!(out, "Welcome back, {}", user.full_name);
        let _ = writeln!(out, "{title}");
        let _ = writeln!(out, "Profile {}% complete", user.profile_completeness);
        if !user.is_verified {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "Email verification required. Check your inbox, or run `resend-verification`."
            );
        }
    }

    let reports = &data.statistics.reports;
    let documents = &data.statistics.documents;
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Reports:   {} total ({} completed, {} draft)",
        reports.total, reports.completed, reports.draft
    );
    let _ = writeln!(
        out,
        "Documents: {} total ({} processed, {} pending)",
        documents.total, documents.processed, documents.pending
    );

    let _ = writeln!(out);
    if data.recent_reports.is_empty() {
        let _ = writeln!(out, "No reports yet.");
    } else {
        let _ = writeln!(out, "Recent reports:");
        for report in &data.recent_reports {
            let reference = report
                .reference_number
                .clone()
                .unwrap_or_else(|| format!("Report #{}", report.id));
            let _ = writeln!(out, "  {reference}  [{}]", report.status);
            if let (Some(property_type), Some(client_name)) = (&report.property_type, &report.client_name) {
                let _ = writeln!(out, "      {property_type} - {client_name}");
            }
            if let Some(address) = &report.property_address {
                let _ = writeln!(out, "      {address}");
            }
            if let Some(created_at) = &report.created_at {
                let _ = writeln!(out, "      created {created_at}");
            }
        }
    }

    out
}
