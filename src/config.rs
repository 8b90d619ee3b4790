//! Map configuration.
//!
//! Defaults describe the initial view and route styling. Each value can be
//! overridden through environment variables; values that fail to parse keep
//! their default. The access token has no default: without it the map stays
//! inert and the rest of the planner keeps working.

use crate::error::MapError;
use crate::types::LngLat;

/// Environment variable holding the map access token.
pub const TOKEN_VAR: &str = "MISSION_MAP_TOKEN";
pub const STYLE_VAR: &str = "MISSION_MAP_STYLE";
pub const LAT_VAR: &str = "MISSION_MAP_LAT";
pub const LNG_VAR: &str = "MISSION_MAP_LNG";
pub const ZOOM_VAR: &str = "MISSION_MAP_ZOOM";

/// Route line paint and layout.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteStyle {
    pub color: String,
    pub width: f32,
    pub opacity: f32,
    pub round_joins: bool,
}

impl Default for RouteStyle {
    fn default() -> Self {
        Self {
            color: "#888".to_string(),
            width: 4.0,
            opacity: 0.8,
            round_joins: true,
        }
    }
}

/// Waypoint marker appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    pub color: String,
    pub draggable: bool,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            color: "#3FB1CE".to_string(),
            draggable: false,
        }
    }
}

/// Everything needed to bring up a map surface.
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub access_token: Option<String>,
    pub style_url: String,
    pub center: LngLat,
    pub zoom: f64,
    pub route: RouteStyle,
    pub marker: MarkerStyle,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            style_url: "mapbox://styles/mapbox/streets-v11".to_string(),
            center: LngLat::new(-100.0, 80.0),
            zoom: 9.0,
            route: RouteStyle::default(),
            marker: MarkerStyle::default(),
        }
    }
}

impl MapConfig {
    /// Defaults overridden from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let access_token = lookup(TOKEN_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        let style_url = lookup(STYLE_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.style_url);
        let lat = lookup(LAT_VAR)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.center.lat);
        let lng = lookup(LNG_VAR)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.center.lng);
        let zoom = lookup(ZOOM_VAR)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.zoom);

        Self {
            access_token,
            style_url,
            center: LngLat::new(lng, lat),
            zoom,
            ..defaults
        }
    }

    /// Override the token (command-line flag beats environment).
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// The access token, or the error that keeps the map inert.
    pub fn require_token(&self) -> Result<&str, MapError> {
        self.access_token
            .as_deref()
            .ok_or(MapError::MissingAccessToken(TOKEN_VAR))
    }
}
