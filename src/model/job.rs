use serde::{Deserialize, Serialize};

/// The closed display palette. Snapshots store the lowercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl Color {
    /// All palette entries, in legend order
    pub const ALL: [Color; 6] = [
        Color::Red,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Blue,
        Color::Purple,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Purple => "purple",
        }
    }

    /// Parse a palette name (as it appears in snapshots and CLI input)
    pub fn from_name(name: &str) -> Option<Color> {
        Color::ALL.iter().copied().find(|c| c.name() == name)
    }

    fn position(self) -> usize {
        Color::ALL.iter().position(|&c| c == self).unwrap_or(0)
    }
}

/// A schedulable unit of work. Hours are a non-negative multiple of the
/// configured unit; the CLI quantizes input before a job is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub name: String,
    pub hours: f64,
    pub color: Color,
}

impl Job {
    pub fn new(name: impl Into<String>, hours: f64, color: Color) -> Self {
        Job {
            name: name.into(),
            hours,
            color,
        }
    }
}

/// Pick a color for a job inserted at `index` that differs from both
/// neighbors. Scans the palette starting just past the left neighbor's
/// color so consecutive inserts don't all land on the same entry.
pub fn contrasting_color(list: &[Job], index: usize) -> Color {
    let prev = index.checked_sub(1).and_then(|i| list.get(i)).map(|j| j.color);
    let next = list.get(index).map(|j| j.color);
    let from = prev.map(|c| c.position() + 1).unwrap_or(0);
    for i in 0..Color::ALL.len() {
        let candidate = Color::ALL[(from + i) % Color::ALL.len()];
        if Some(candidate) != prev && Some(candidate) != next {
            return candidate;
        }
    }
    Color::ALL[from % Color::ALL.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_name_round_trip() {
        for color in Color::ALL {
            assert_eq!(Color::from_name(color.name()), Some(color));
        }
    }

    #[test]
    fn from_name_rejects_unknown() {
        assert_eq!(Color::from_name("mauve"), None);
        assert_eq!(Color::from_name("Red"), None);
    }

    #[test]
    fn color_serializes_as_lowercase_name() {
        let json = serde_json::to_string(&Color::Blue).unwrap();
        assert_eq!(json, "\"blue\"");
        let back: Color = serde_json::from_str("\"purple\"").unwrap();
        assert_eq!(back, Color::Purple);
    }

    #[test]
    fn contrasting_color_avoids_neighbors() {
        let list = vec![
            Job::new("a", 1.0, Color::Red),
            Job::new("b", 1.0, Color::Orange),
        ];
        // Inserting between: must match neither red nor orange
        let color = contrasting_color(&list, 1);
        assert_ne!(color, Color::Red);
        assert_ne!(color, Color::Orange);
    }

    #[test]
    fn contrasting_color_on_empty_list() {
        let color = contrasting_color(&[], 0);
        assert!(Color::ALL.contains(&color));
    }
}
