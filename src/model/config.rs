use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::job::Color;

/// Configuration from config.toml. Every field has a default, so a missing
/// file (or a partial one) yields a working setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Quantization step for all durations, as a fraction of an hour
    #[serde(default = "default_unit")]
    pub unit: f64,
    /// Hour budget per weekday, Sunday first
    #[serde(default = "default_hours")]
    pub default_hours: [f64; 7],
    /// Display hex per palette color, in legend order
    #[serde(default = "default_colors")]
    pub colors: IndexMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            unit: default_unit(),
            default_hours: default_hours(),
            colors: default_colors(),
        }
    }
}

impl Config {
    /// Round `hours` to the nearest multiple of the unit
    pub fn quantize(&self, hours: f64) -> f64 {
        (hours / self.unit).round() * self.unit
    }

    /// Display hex for a palette color
    pub fn hex(&self, color: Color) -> &str {
        self.colors
            .get(color.name())
            .map(String::as_str)
            .unwrap_or("#ccc")
    }
}

/// Quarter-hour increments
fn default_unit() -> f64 {
    0.25
}

fn default_hours() -> [f64; 7] {
    [6.0; 7]
}

fn default_colors() -> IndexMap<String, String> {
    [
        ("red", "#fcc"),
        ("orange", "#fca"),
        ("yellow", "#fd6"),
        ("green", "#bdb"),
        ("blue", "#bde"),
        ("purple", "#edf"),
    ]
    .into_iter()
    .map(|(name, hex)| (name.to_string(), hex.to_string()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_stock_setup() {
        let config = Config::default();
        assert_eq!(config.unit, 0.25);
        assert_eq!(config.default_hours, [6.0; 7]);
        assert_eq!(config.colors.len(), 6);
        assert_eq!(config.colors.get("blue").unwrap(), "#bde");
    }

    #[test]
    fn quantize_rounds_to_the_unit() {
        let config = Config::default();
        assert_eq!(config.quantize(1.13), 1.25);
        assert_eq!(config.quantize(1.12), 1.0);
        assert_eq!(config.quantize(0.0), 0.0);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str("unit = 0.5").unwrap();
        assert_eq!(config.unit, 0.5);
        assert_eq!(config.default_hours, [6.0; 7]);
        assert_eq!(config.colors.len(), 6);
    }

    #[test]
    fn weekday_hours_parse_from_toml() {
        let config: Config =
            toml::from_str("default_hours = [0.0, 8.0, 8.0, 8.0, 8.0, 8.0, 0.0]").unwrap();
        assert_eq!(config.default_hours[0], 0.0);
        assert_eq!(config.default_hours[1], 8.0);
    }

    #[test]
    fn colors_keep_declared_order() {
        let config: Config = toml::from_str("[colors]\nteal = \"#aee\"\nred = \"#fcc\"\n").unwrap();
        let names: Vec<&String> = config.colors.keys().collect();
        assert_eq!(names, vec!["teal", "red"]);
    }
}
