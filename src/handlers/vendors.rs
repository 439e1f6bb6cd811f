use axum::{extract::Query, Json};
use serde::Deserialize;

use crate::models::*;

use super::ApiError;

#[derive(Debug, Deserialize)]
pub struct VendorQuery {
    #[serde(default)]
    pub vendor: String,
}

/// List all supported vendors
pub async fn list_vendors() -> Json<Vec<VendorSummary>> {
    Json(vendor_profiles().iter().map(VendorSummary::from).collect())
}

/// Get the form defaults for one vendor
pub async fn get_vendor_config(
    Query(query): Query<VendorQuery>,
) -> Result<Json<VendorDefaultsResponse>, ApiError> {
    let profile = find_vendor(&query.vendor)
        .ok_or_else(|| ApiError::bad_request(format!("Unsupported vendor: {}", query.vendor)))?;

    Ok(Json(VendorDefaultsResponse {
        success: true,
        vendor: profile.id.to_string(),
        config: VendorDefaults::from(profile),
    }))
}
