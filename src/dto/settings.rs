use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Donation toggle from the settings screen.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, ToSchema, Validate)]
pub struct DonationSettings {
    /// Donors never see interstitials.
    pub donated: bool,
}
