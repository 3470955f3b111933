//! AI-generated dossier for the selected location
//!
//! Every section is optional. A dossier with only `food` present is still a
//! valid dossier and the remaining sections simply stay empty.

use serde::{Deserialize, Serialize};

/// Maximum number of food or must-visit recommendations kept per dossier
pub const MAX_RECOMMENDATIONS: usize = 3;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotel_info: Option<HotelInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub food: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub must_visit: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub culture: Option<Culture>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seasonality: Option<Seasonality>,
}

impl EnrichmentResult {
    /// True when the backend returned nothing usable
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hotel_info.is_none()
            && self.food.is_empty()
            && self.must_visit.is_empty()
            && self.culture.is_none()
            && self.seasonality.is_none()
    }
}

/// Accommodation: whether the preferred brand (IHG) has a hotel there
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HotelInfo {
    #[serde(rename = "hasIHG")]
    pub has_preferred_brand: bool,
    #[serde(rename = "ihgName", skip_serializing_if = "Option::is_none")]
    pub brand_hotel_name: Option<String>,
    #[serde(rename = "ihgPetFriendly", skip_serializing_if = "Option::is_none")]
    pub brand_pet_friendly: Option<bool>,
    #[serde(rename = "alternativePetHotel", skip_serializing_if = "Option::is_none")]
    pub alternative_pet_hotel: Option<String>,
}

/// A local festival or folk custom
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Culture {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible_now: Option<bool>,
}

/// Whether this month is a good time to go
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Seasonality {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_vibe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<String>,
}
