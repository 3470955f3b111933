//! Map viewport targets derived from the active selection
//!
//! This module only says where the map should go. Animating there is the
//! presentation layer's job; the transition hint travels with the target.

use serde::{Deserialize, Serialize};

use crate::config::MapConfig;
use crate::models::{Coordinates, Location, ORIGIN};

/// Smoothing hint for the presentation layer
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    pub duration_secs: f64,
    pub ease_linearity: f64,
}

pub const FLY_TO: Transition = Transition {
    duration_secs: 1.2,
    ease_linearity: 0.25,
};

/// Center and zoom the map should show
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: Coordinates,
    pub zoom: u8,
    pub transition: Transition,
}

/// Line from the origin to the active location
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteOverlay {
    pub from: Coordinates,
    pub to: Coordinates,
    pub drive_friendly: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSync {
    detail_zoom: u8,
    overview: MapView,
}

impl Default for ViewportSync {
    fn default() -> Self {
        Self::new(&MapConfig::default())
    }
}

impl ViewportSync {
    #[must_use]
    pub fn new(config: &MapConfig) -> Self {
        Self {
            detail_zoom: config.detail_zoom,
            overview: MapView {
                center: Coordinates::new(config.overview_lat, config.overview_lng),
                zoom: config.overview_zoom,
                transition: FLY_TO,
            },
        }
    }

    /// View the map starts with
    #[must_use]
    pub fn initial(&self) -> MapView {
        self.overview
    }

    /// Where to move when `active` changes; `None` leaves the map where the user put it
    #[must_use]
    pub fn target(&self, active: Option<&Location>) -> Option<MapView> {
        active.map(|location| MapView {
            center: location.coordinates,
            zoom: self.detail_zoom,
            transition: FLY_TO,
        })
    }

    /// Route line from the origin to `active`
    #[must_use]
    pub fn route(&self, active: Option<&Location>) -> Option<RouteOverlay> {
        active.map(|location| RouteOverlay {
            from: ORIGIN,
            to: location.coordinates,
            drive_friendly: location.self_driving_friendly,
        })
    }
}
