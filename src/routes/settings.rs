use axum::{Json, Router, extract::State, routing::get};
use axum_valid::Valid;

use crate::{dto::settings::DonationSettings, services::stats_service, state::SharedState};

/// Routes backing the settings screen.
pub fn router() -> Router<SharedState> {
    Router::new().route("/settings/donation", get(get_donation).put(set_donation))
}

/// Current donation flag.
#[utoipa::path(
    get,
    path = "/settings/donation",
    tag = "settings",
    responses((status = 200, description = "Donation flag", body = DonationSettings))
)]
pub async fn get_donation(State(state): State<SharedState>) -> Json<DonationSettings> {
    Json(stats_service::donation(&state).await)
}

/// Persist the donation flag; donors stop seeing interstitials right away.
#[utoipa::path(
    put,
    path = "/settings/donation",
    tag = "settings",
    request_body = DonationSettings,
    responses((status = 200, description = "Donation flag after the update", body = DonationSettings))
)]
pub async fn set_donation(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<DonationSettings>>,
) -> Json<DonationSettings> {
    Json(stats_service::set_donation(&state, payload).await)
}
