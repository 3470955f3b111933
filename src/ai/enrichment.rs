//! Enrichment client: the travel dossier for one location

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Datelike;
use serde_json::{Value, json};
use tracing::{debug, info, instrument, warn};

use super::schema::Fields;
use super::{ContentBackend, GenerationRequest, with_timeout};
use crate::models::{Culture, EnrichmentResult, HotelInfo, MAX_RECOMMENDATIONS, Seasonality};
use crate::{ExplorerError, Result};

/// Stateless adapter that asks the backend for a location dossier
#[derive(Clone)]
pub struct EnrichmentClient {
    backend: Arc<dyn ContentBackend>,
    timeout: Duration,
}

impl EnrichmentClient {
    pub fn new(backend: Arc<dyn ContentBackend>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    /// Fetch the dossier for `location_name` for the current calendar month
    pub async fn fetch(&self, location_name: &str) -> Result<EnrichmentResult> {
        self.fetch_for_month(location_name, current_month()).await
    }

    /// Fetch the dossier for `location_name` for a given month (1-12)
    #[instrument(skip(self))]
    pub async fn fetch_for_month(
        &self,
        location_name: &str,
        month: u32,
    ) -> Result<EnrichmentResult> {
        let start_time = Instant::now();
        let request = GenerationRequest {
            prompt: build_prompt(location_name, month),
            schema: response_schema(),
        };

        let value = with_timeout(self.timeout, self.backend.generate(&request)).await?;
        let result = parse_response(&value)?;

        info!(
            "Enrichment for '{}' ready in {:.3}s",
            location_name,
            start_time.elapsed().as_secs_f64()
        );
        if result.is_empty() {
            warn!("Enrichment for '{}' contained no usable section", location_name);
        }

        Ok(result)
    }
}

/// Month of the local wall clock, read at call time
fn current_month() -> u32 {
    chrono::Local::now().month()
}

fn build_prompt(location_name: &str, month: u32) -> String {
    format!(
        "Write an in-depth travel analysis of {location_name} (China) for a visit in month {month}. \
Answer only in Simplified Chinese and return JSON:\n\
1. hotelInfo: is there an IHG group hotel? If so, is it pet friendly? If not, name one specific pet-friendly hotel instead.\n\
2. food: {MAX_RECOMMENDATIONS} specific local dishes.\n\
3. mustVisit: {MAX_RECOMMENDATIONS} specific spots most worth photographing.\n\
4. culture: one specific folk custom or festival, when it usually takes place, and whether it can be seen this month.\n\
5. seasonality: is now a good time to travel? Give a short verdict and a one-sentence description of the current atmosphere."
    )
}

fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "hotelInfo": {
                "type": "OBJECT",
                "properties": {
                    "hasIHG": { "type": "BOOLEAN" },
                    "ihgName": { "type": "STRING" },
                    "ihgPetFriendly": { "type": "BOOLEAN" },
                    "alternativePetHotel": { "type": "STRING" }
                }
            },
            "food": { "type": "ARRAY", "items": { "type": "STRING" } },
            "mustVisit": { "type": "ARRAY", "items": { "type": "STRING" } },
            "culture": {
                "type": "OBJECT",
                "properties": {
                    "name": { "type": "STRING" },
                    "description": { "type": "STRING" },
                    "timing": { "type": "STRING" },
                    "isVisibleNow": { "type": "BOOLEAN" }
                }
            },
            "seasonality": {
                "type": "OBJECT",
                "properties": {
                    "currentVibe": { "type": "STRING" },
                    "verdict": { "type": "STRING" }
                }
            }
        }
    })
}

/// Validate a backend response into a (possibly partial) dossier.
///
/// Only a non-object top level is fatal; every section is validated on its own.
pub fn parse_response(value: &Value) -> Result<EnrichmentResult> {
    let fields = Fields::of("enrichment", value)
        .map_err(|e| ExplorerError::backend(format!("unexpected enrichment response: {e}")))?;

    let mut food = fields.strings("food");
    food.truncate(MAX_RECOMMENDATIONS);
    let mut must_visit = fields.strings("mustVisit");
    must_visit.truncate(MAX_RECOMMENDATIONS);

    Ok(EnrichmentResult {
        hotel_info: fields
            .object("hotelInfo", "enrichment.hotelInfo")
            .and_then(parse_hotel),
        food,
        must_visit,
        culture: fields
            .object("culture", "enrichment.culture")
            .map(parse_culture)
            .filter(|culture| *culture != Culture::default()),
        seasonality: fields
            .object("seasonality", "enrichment.seasonality")
            .map(|section| Seasonality {
                current_vibe: section.string("currentVibe"),
                verdict: section.string("verdict"),
            })
            .filter(|seasonality| *seasonality != Seasonality::default()),
    })
}

fn parse_hotel(section: Fields<'_>) -> Option<HotelInfo> {
    let Some(has_preferred_brand) = section.bool("hasIHG") else {
        debug!("Dropping hotelInfo without a hasIHG flag");
        return None;
    };
    Some(HotelInfo {
        has_preferred_brand,
        brand_hotel_name: section.string("ihgName"),
        brand_pet_friendly: section.bool("ihgPetFriendly"),
        alternative_pet_hotel: section.string("alternativePetHotel"),
    })
}

fn parse_culture(section: Fields<'_>) -> Culture {
    Culture {
        name: section.string("name"),
        description: section.string("description"),
        timing: section.string("timing"),
        is_visible_now: section.bool("isVisibleNow"),
    }
}
