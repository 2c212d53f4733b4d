use crate::ConfigError;
use plan_tree_layout::{Spacing, TreeLayout};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Geometry and camera settings of a plan view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub spacing: Spacing,

    /// Space kept free above the graph by the surrounding toolbar
    pub top_gap: f64,

    /// Length of the animated camera move when locating a node
    pub locate_duration_ms: u64,

    /// Zoom used when centering the camera
    pub zoom: f64,

    /// Upper bound on overlap resolution scans
    pub max_overlap_passes: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            spacing: Spacing::default(),
            top_gap: 40.0,
            locate_duration_ms: 500,
            zoom: 1.0,
            max_overlap_passes: TreeLayout::default().max_overlap_passes,
        }
    }
}

impl ViewConfig {
    /// Parse a config from RON, missing fields take their default
    ///
    /// # Errors
    /// Returns an error if the text is not a valid config
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    pub fn locate_duration(&self) -> Duration {
        Duration::from_millis(self.locate_duration_ms)
    }

    pub fn engine(&self) -> TreeLayout {
        TreeLayout::new(self.max_overlap_passes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn partial_config_keeps_defaults() {
        let config =
            ViewConfig::from_ron("(top_gap: 64.0, spacing: (node_width: 160.0))").unwrap();

        assert_eq!(config.top_gap, 64.0);
        assert_eq!(config.spacing.node_width, 160.0);
        assert_eq!(config.spacing.node_height, Spacing::default().node_height);
        assert_eq!(config.locate_duration(), Duration::from_millis(500));
    }

    #[test]
    fn config_round_trips_through_ron() {
        let config = ViewConfig {
            zoom: 1.5,
            ..Default::default()
        };

        let text = config.to_ron().unwrap();

        assert_eq!(ViewConfig::from_ron(&text).unwrap(), config);
    }

    #[test]
    fn rejects_garbage() {
        assert!(ViewConfig::from_ron("(top_gap: \"wide\")").is_err());
    }
}
