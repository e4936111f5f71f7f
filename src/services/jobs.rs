use crate::models::job::ExternalJob;
use crate::services::backend::{Backend, BackendError};

/// Category used when the caller's category has no platform equivalent.
pub const DEFAULT_PLATFORM_CATEGORY: &str = "general";

/// Translate a storefront category into the job platform's vocabulary.
pub fn map_category(category: Option<&str>) -> &'static str {
    let Some(category) = category.map(str::trim) else {
        return DEFAULT_PLATFORM_CATEGORY;
    };

    match category {
        "Garde d'enfants" | "Bika Kids" => "childcare",
        "Logistique quotidienne" | "Bika Maison" | "Ménage" => "housekeeping",
        "Aide aux seniors" | "Bika Seniors" => "eldercare",
        "Conciergerie" | "Bika Vie" => "concierge",
        "Voyage" | "Bika Travel" => "travel",
        "Animaux" | "Bika Animals" => "petcare",
        "Services aux entreprises" | "Bika Pro" => "business",
        "Jardinage" => "gardening",
        "Bricolage" => "handyman",
        _ => DEFAULT_PLATFORM_CATEGORY,
    }
}

/// Fetch jobs through the backend function, surfacing errors.
pub async fn try_fetch_external_jobs(
    backend: &dyn Backend,
    category: Option<&str>,
) -> Result<Vec<ExternalJob>, BackendError> {
    let platform_category = map_category(category);
    tracing::debug!(
        category = category.unwrap_or(""),
        platform_category,
        "Fetching external jobs"
    );
    backend.fetch_external_jobs(platform_category).await
}

/// Fetch jobs through the backend function. Never fails: any error is
/// logged and yields an empty list.
pub async fn fetch_external_jobs_securely(
    backend: &dyn Backend,
    category: Option<&str>,
) -> Vec<ExternalJob> {
    match try_fetch_external_jobs(backend, category).await {
        Ok(jobs) => {
            metrics::counter!("external_jobs_requests_total", "outcome" => "ok").increment(1);
            jobs
        }
        Err(e) => {
            metrics::counter!("external_jobs_requests_total", "outcome" => "error").increment(1);
            tracing::error!(
                category = category.unwrap_or(""),
                error = %e,
                "External jobs fetch failed, returning empty list"
            );
            Vec::new()
        }
    }
}
