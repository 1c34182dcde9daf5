//! Game settings
//!
//! Loaded from a JSON file; every field is optional and falls back to the
//! defaults, which reproduce the classic landscape tablet board.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::{BallColor, BoardLayout, NeighborSearch, Palette, TiltMapping};

/// Default run seed
const DEFAULT_SEED: u64 = 0x6d61_7262_6c65;

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed for reproducible boards
    pub seed: u64,
    pub board: BoardLayout,
    /// Colors new balls are drawn from; must not be empty
    pub palette: Vec<BallColor>,
    pub tilt: TiltMapping,
    pub neighbor_search: NeighborSearch,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            board: BoardLayout::default(),
            palette: BallColor::ALL.to_vec(),
            tilt: TiltMapping::default(),
            neighbor_search: NeighborSearch::Scan,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a file, using defaults if it is missing or invalid
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("Could not read {}: {}; using default settings", path.display(), err);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("Invalid settings in {}: {}; using default settings", path.display(), err);
                Self::default()
            }
        }
    }

    /// The configured palette, or `None` if it is empty
    pub fn palette(&self) -> Option<Palette> {
        Palette::new(self.palette.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::Orientation;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.board.ball_diameter, BALL_DIAMETER);
        assert_eq!(settings.board.top_margin, TOP_MARGIN);
        assert_eq!(settings.tilt.sensitivity, TILT_SENSITIVITY);
        assert_eq!(settings.tilt.orientation, Orientation::LandscapeRight);
        assert_eq!(settings.palette, BallColor::ALL.to_vec());
        assert_eq!(settings.neighbor_search, NeighborSearch::Scan);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(
            r#"{ "tilt": { "orientation": "landscape_left" }, "board": { "width": 640 } }"#,
        )
        .unwrap();

        assert_eq!(settings.tilt.orientation, Orientation::LandscapeLeft);
        assert_eq!(settings.tilt.sensitivity, TILT_SENSITIVITY);
        assert_eq!(settings.board.width, 640.0);
        assert_eq!(settings.board.height, BOARD_HEIGHT);
        assert_eq!(settings.seed, Settings::default().seed);
    }

    #[test]
    fn test_palette_and_search_from_json() {
        let settings = Settings::from_json(
            r#"{ "palette": ["red", "blue"], "neighbor_search": "spatial_hash" }"#,
        )
        .unwrap();

        assert_eq!(
            settings.palette().map(|p| p.colors().to_vec()),
            Some(vec![BallColor::Red, BallColor::Blue])
        );
        assert_eq!(settings.neighbor_search, NeighborSearch::SpatialHash);
    }

    #[test]
    fn test_short_names_load() {
        let settings =
            Settings::from_json(r#"{ "tilt": { "orientation": "left" }, "neighbor_search": "grid" }"#)
                .unwrap();
        assert_eq!(settings.tilt.orientation, Orientation::LandscapeLeft);
        assert_eq!(settings.neighbor_search, NeighborSearch::SpatialHash);
    }

    #[test]
    fn test_empty_palette_rejected() {
        let settings = Settings::from_json(r#"{ "palette": [] }"#).unwrap();
        assert!(settings.palette().is_none());
    }

    #[test]
    fn test_unknown_color_is_an_error() {
        assert!(Settings::from_json(r#"{ "palette": ["mauve"] }"#).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::default();
        settings.seed = 42;
        settings.tilt.orientation = Orientation::Portrait;

        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let settings = Settings::load_from("/nonexistent/marbles/settings.json");
        assert_eq!(settings, Settings::default());
    }
}
