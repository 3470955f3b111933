//! Location model for catalog entries and their coordinates

use serde::{Deserialize, Serialize};

/// Geographic coordinates in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both components are finite and inside the WGS84 ranges
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Great-circle distance to `other` in kilometers
    #[must_use]
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        haversine::distance(
            haversine::Location {
                latitude: self.lat,
                longitude: self.lng,
            },
            haversine::Location {
                latitude: other.lat,
                longitude: other.lng,
            },
            haversine::Units::Kilometers,
        )
    }

    /// Format as "lat, lng" with four decimals
    #[must_use]
    pub fn format(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lng)
    }
}

/// Closed set of location categories
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Intangible cultural heritage
    Heritage,
    /// Place of origin of a product (tea, jade, pearls, ...)
    Origin,
    /// Landscape and geology
    #[serde(rename = "geo", alias = "geographic")]
    Geographic,
    /// Craft and workshop towns
    Craft,
}

impl Category {
    /// Parse a wire value, accepting `geographic` as an alias of `geo`
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "heritage" => Some(Category::Heritage),
            "origin" => Some(Category::Origin),
            "geo" | "geographic" => Some(Category::Geographic),
            "craft" => Some(Category::Craft),
            _ => None,
        }
    }

    /// Short display label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Category::Heritage => "非遗",
            Category::Origin => "原产",
            Category::Geographic => "风光",
            Category::Craft => "工艺",
        }
    }
}

/// A catalog entry
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub coordinates: Coordinates,
    pub specialty_title: String,
    pub specialty_description: String,
    pub distance_from_shanghai_km: f64,
    pub drive_time_hours: f64,
    #[serde(rename = "tollCostCNY")]
    pub toll_cost_cny: f64,
    pub self_driving_friendly: bool,
    pub tags: Vec<String>,
}

/// A validated location returned by discovery, before it receives an id
#[derive(Debug, Clone, PartialEq)]
pub struct LocationDraft {
    pub name: String,
    pub category: Category,
    pub coordinates: Coordinates,
    pub specialty_title: String,
    pub specialty_description: String,
    pub distance_from_shanghai_km: f64,
    pub drive_time_hours: f64,
    pub toll_cost_cny: f64,
    pub self_driving_friendly: bool,
    pub tags: Vec<String>,
}

impl LocationDraft {
    /// Attach an identifier, turning the draft into a catalog entry
    #[must_use]
    pub fn into_location(self, id: String) -> Location {
        Location {
            id,
            name: self.name,
            category: self.category,
            coordinates: self.coordinates,
            specialty_title: self.specialty_title,
            specialty_description: self.specialty_description,
            distance_from_shanghai_km: self.distance_from_shanghai_km,
            drive_time_hours: self.drive_time_hours,
            toll_cost_cny: self.toll_cost_cny,
            self_driving_friendly: self.self_driving_friendly,
            tags: self.tags,
        }
    }
}
