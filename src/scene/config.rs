use bevy::prelude::Resource;
use serde::Deserialize;

use super::list_scene::ListConfig;
use crate::layout::LayoutConfig;

/// Settings shipped with the binary
const BUNDLED: &str = include_str!("../../assets/visualizer.json");

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        WindowSettings {
            title: "Data Structure Visualizer".into(),
            width: 1280,
            height: 720,
        }
    }
}

/// Graph scene settings
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GraphSettings {
    /// Node count for the randomize command
    pub random_nodes: usize,
    pub random_edges: usize,
    pub directed: bool,
    pub weighted: bool,
    /// Distance of a weight label from its edge midpoint
    pub weight_label_offset: f32,
}

impl Default for GraphSettings {
    fn default() -> Self {
        GraphSettings {
            random_nodes: 6,
            random_edges: 8,
            directed: true,
            weighted: false,
            weight_label_offset: 14.0,
        }
    }
}

/// Files read by the load commands
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    pub graph: String,
    pub list: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        FileSettings {
            graph: "assets/graph.txt".into(),
            list: "assets/list.txt".into(),
        }
    }
}

/// Top-level visualizer configuration
#[derive(Resource, Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    pub window: WindowSettings,
    pub layout: LayoutConfig,
    pub graph: GraphSettings,
    pub list: ListConfig,
    pub files: FileSettings,
}

impl VisualizerConfig {
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// The bundled configuration, or the defaults if it does not parse
    pub fn load() -> Self {
        match Self::parse(BUNDLED) {
            Ok(config) => config,
            Err(err) => {
                log::error!("Bad bundled config ({}), using defaults", err);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Easing;
    use crate::layout::presets;

    #[test]
    fn test_bundled_config_parses() {
        assert!(VisualizerConfig::parse(BUNDLED).is_ok());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = VisualizerConfig::parse(r#"{ "list": { "radius": 100.0 } }"#).unwrap();

        assert_eq!(config.list.radius, 100.0);
        assert_eq!(config.list.scan_step, 0.5);
        assert_eq!(config.layout, presets::CLASSIC);
        assert_eq!(config.graph, GraphSettings::default());
    }

    #[test]
    fn test_easing_by_name() {
        let config = VisualizerConfig::parse(r#"{ "list": { "easing": "linear" } }"#).unwrap();
        assert_eq!(config.list.easing, Easing::Linear);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(VisualizerConfig::parse("{ not json").is_err());
    }
}
