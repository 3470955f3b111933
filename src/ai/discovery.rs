//! Discovery client: new locations from the backend
//!
//! Both "explore more" and themed search go through the same request shape:
//! a count, the names already in the catalog, and an optional theme.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::{Value, json};
use tracing::{info, instrument, warn};

use super::schema::Fields;
use super::{ContentBackend, GenerationRequest, with_timeout};
use crate::models::{Category, Coordinates, LocationDraft, ORIGIN, ORIGIN_NAME};
use crate::{ExplorerError, Result};

/// What to ask the backend for
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryQuery {
    /// Number of new locations wanted
    pub count: usize,
    /// Display names the backend must not return again
    pub exclude: Vec<String>,
    /// Free-text theme for searches; `None` for "explore more"
    pub theme: Option<String>,
}

/// Stateless adapter that asks the backend for new locations
#[derive(Clone)]
pub struct DiscoveryClient {
    backend: Arc<dyn ContentBackend>,
    timeout: Duration,
}

impl DiscoveryClient {
    pub fn new(backend: Arc<dyn ContentBackend>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    /// Request new locations and keep only the entries that validate
    #[instrument(skip(self, query), fields(count = query.count, theme = ?query.theme, excluded = query.exclude.len()))]
    pub async fn discover(&self, query: &DiscoveryQuery) -> Result<Vec<LocationDraft>> {
        let start_time = Instant::now();
        let request = GenerationRequest {
            prompt: build_prompt(query),
            schema: response_schema(),
        };

        let value = with_timeout(self.timeout, self.backend.generate(&request)).await?;
        let drafts = parse_response(&value)?;

        info!(
            "Discovery returned {} valid locations in {:.3}s",
            drafts.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(drafts)
    }
}

fn build_prompt(query: &DiscoveryQuery) -> String {
    let exclude = query.exclude.join(", ");
    let ask = match &query.theme {
        Some(theme) => format!(
            "Recommend {} travel destinations in China that suit \"{}\".",
            query.count, theme
        ),
        None => format!(
            "Suggest {} distinctive travel destinations in China (intangible heritage, \
places of origin, landscapes or craft towns).",
            query.count
        ),
    };
    format!(
        "{ask} Do not include any of: {exclude}. Distances, drive times and tolls are \
measured by car from {ORIGIN_NAME}. Return JSON; all text must be in Simplified Chinese."
    )
}

fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "locations": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "category": { "type": "STRING", "enum": ["heritage", "origin", "geo", "craft"] },
                        "coordinates": {
                            "type": "OBJECT",
                            "properties": {
                                "lat": { "type": "NUMBER" },
                                "lng": { "type": "NUMBER" }
                            }
                        },
                        "specialtyTitle": { "type": "STRING" },
                        "specialtyDescription": { "type": "STRING" },
                        "distanceFromShanghaiKm": { "type": "NUMBER" },
                        "driveTimeHours": { "type": "NUMBER" },
                        "tollCostCNY": { "type": "NUMBER" },
                        "selfDrivingFriendly": { "type": "BOOLEAN" },
                        "tags": { "type": "ARRAY", "items": { "type": "STRING" } }
                    }
                }
            }
        }
    })
}

/// Validate a discovery response, dropping entries without a name or coordinates
pub fn parse_response(value: &Value) -> Result<Vec<LocationDraft>> {
    let fields = Fields::of("discovery", value)
        .map_err(|e| ExplorerError::backend(format!("unexpected discovery response: {e}")))?;

    let Some(entries) = fields.array("locations") else {
        warn!("Discovery response has no locations");
        return Ok(Vec::new());
    };

    let drafts = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| match parse_entry(entry) {
            Ok(draft) => Some(draft),
            Err(err) => {
                warn!("Dropping discovered location #{}: {}", index, err);
                None
            }
        })
        .collect();

    Ok(drafts)
}

fn parse_entry(entry: &Value) -> Result<LocationDraft> {
    let fields = Fields::of("discovery.location", entry)?;

    let name = fields
        .string("name")
        .ok_or_else(|| ExplorerError::validation("missing name"))?;

    let coordinates = fields
        .object("coordinates", "discovery.location.coordinates")
        .and_then(|c| Some(Coordinates::new(c.number("lat")?, c.number("lng")?)))
        .filter(Coordinates::is_valid)
        .ok_or_else(|| ExplorerError::validation(format!("'{name}' has no valid coordinates")))?;

    let category = match fields.string("category") {
        Some(raw) => Category::parse(&raw).unwrap_or_else(|| {
            warn!("Unknown category '{}' for '{}'", raw, name);
            Category::Geographic
        }),
        None => Category::Geographic,
    };

    let distance_from_shanghai_km = fields
        .number("distanceFromShanghaiKm")
        .unwrap_or_else(|| ORIGIN.distance_km(&coordinates).round());

    Ok(LocationDraft {
        category,
        coordinates,
        specialty_title: fields.string("specialtyTitle").unwrap_or_default(),
        specialty_description: fields.string("specialtyDescription").unwrap_or_default(),
        distance_from_shanghai_km,
        drive_time_hours: fields.number("driveTimeHours").unwrap_or_default(),
        toll_cost_cny: fields.number("tollCostCNY").unwrap_or_default(),
        self_driving_friendly: fields.bool("selfDrivingFriendly").unwrap_or_default(),
        tags: fields.strings("tags"),
        name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FixedBackend {
        response: Value,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ContentBackend for FixedBackend {
        async fn generate(&self, request: &GenerationRequest) -> Result<Value> {
            self.prompts.lock().unwrap().push(request.prompt.clone());
            Ok(self.response.clone())
        }
    }

    fn entry(name: &str, lat: f64, lng: f64) -> Value {
        json!({
            "name": name,
            "category": "craft",
            "coordinates": { "lat": lat, "lng": lng },
            "specialtyTitle": "竹编之乡",
            "specialtyDescription": "国家级非遗竹编。",
            "distanceFromShanghaiKm": 320,
            "driveTimeHours": 4,
            "tollCostCNY": 150,
            "selfDrivingFriendly": true,
            "tags": ["竹编"]
        })
    }

    #[test]
    fn test_parses_complete_entry() {
        let drafts = parse_response(&json!({ "locations": [entry("东阳", 29.289, 120.241)] })).unwrap();
        assert_eq!(drafts.len(), 1);
        let draft = &drafts[0];
        assert_eq!(draft.name, "东阳");
        assert_eq!(draft.category, Category::Craft);
        assert_eq!(draft.coordinates, Coordinates::new(29.289, 120.241));
        assert_eq!(draft.distance_from_shanghai_km, 320.0);
        assert_eq!(draft.toll_cost_cny, 150.0);
        assert!(draft.self_driving_friendly);
        assert_eq!(draft.tags, vec!["竹编"]);
    }

    #[test]
    fn test_drops_entries_without_name_or_coordinates() {
        let mut no_coordinates = entry("安吉", 30.6, 119.6);
        no_coordinates.as_object_mut().unwrap().remove("coordinates");
        let mut no_name = entry("", 30.0, 120.0);
        no_name.as_object_mut().unwrap().remove("name");
        let bad_coordinates = json!({ "name": "无处", "coordinates": { "lat": 123.0, "lng": 10.0 } });

        let value = json!({
            "locations": [
                no_coordinates,
                entry("东阳", 29.289, 120.241),
                no_name,
                bad_coordinates,
                "garbage"
            ]
        });
        let drafts = parse_response(&value).unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].name, "东阳");
    }

    #[test]
    fn test_minimal_entry_gets_defaults() {
        let value = json!({
            "locations": [{ "name": "嘉兴", "category": "museum", "coordinates": { "lat": 30.746, "lng": 120.755 } }]
        });
        let drafts = parse_response(&value).unwrap();
        let draft = &drafts[0];
        assert_eq!(draft.category, Category::Geographic);
        assert!(draft.specialty_title.is_empty());
        assert!(!draft.self_driving_friendly);
        assert!(draft.tags.is_empty());
        assert!(draft.distance_from_shanghai_km > 50.0 && draft.distance_from_shanghai_km < 120.0);
    }

    #[test]
    fn test_missing_locations_is_empty_list() {
        assert!(parse_response(&json!({})).unwrap().is_empty());
    }

    #[test]
    fn test_non_object_response_is_backend_error() {
        let err = parse_response(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, ExplorerError::Backend { .. }));
    }

    #[tokio::test]
    async fn test_prompt_lists_exclusions_and_theme() {
        let backend = Arc::new(FixedBackend {
            response: json!({ "locations": [] }),
            prompts: Mutex::new(Vec::new()),
        });
        let client = DiscoveryClient::new(backend.clone(), Duration::from_secs(1));

        let query = DiscoveryQuery {
            count: 3,
            exclude: vec!["苏州".to_string(), "南京".to_string()],
            theme: Some("丝绸".to_string()),
        };
        let drafts = client.discover(&query).await.unwrap();
        assert!(drafts.is_empty());

        let prompts = backend.prompts.lock().unwrap();
        assert!(prompts[0].contains("苏州, 南京"));
        assert!(prompts[0].contains("\"丝绸\""));
        assert!(prompts[0].contains("Recommend 3"));
    }
}
