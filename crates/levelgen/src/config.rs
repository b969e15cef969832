//! Tunable generation parameters. Physics constants are deliberately absent: the movement atlas
//! is only valid for the constants it was simulated with.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub rows: usize,
    pub cols: usize,
    pub ground_probability: f64,
    pub steps: usize,
    /// A solid tile survives with at least this many solid neighbours.
    pub death_limit: usize,
    /// An empty tile turns solid with more than this many solid neighbours.
    pub birth_limit: usize,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self { rows: 100, cols: 300, ground_probability: 0.3, steps: 5, death_limit: 5, birth_limit: 6 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub min_surface_size: usize,
    pub item_stride: usize,
    pub tunnel_attempts: usize,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self { min_surface_size: 100, item_stride: 5, tunnel_attempts: 10 }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    pub map: MapConfig,
    pub level: LevelConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults_for_missing_fields() {
        let settings: GeneratorSettings =
            serde_json::from_str(r#"{ "map": { "rows": 40 }, "level": { "item_stride": 3 } }"#)
                .expect("partial settings should parse");
        assert_eq!(settings.map.rows, 40);
        assert_eq!(settings.map.cols, 300);
        assert_eq!(settings.level.item_stride, 3);
        assert_eq!(settings.level.min_surface_size, 100);
    }
}
