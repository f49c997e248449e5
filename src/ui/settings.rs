use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::engine::scoring_client::DEFAULT_SERVICE_URL;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ClientSettings {
    /// Base URL of the scoring service; `puzzle` and `guess` are appended.
    pub service_url: String,
    pub starting_puzzle: i32,
    pub ui_scale: f32,

    // Tint for rows that solved the puzzle
    pub victory_color: [u8; 4],
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.into(),
            starting_puzzle: 1,
            ui_scale: 1.0,
            victory_color: [40, 90, 60, 255],
        }
    }
}

impl ClientSettings {
    pub fn victory_color(&self) -> Color32 {
        let c = self.victory_color;
        Color32::from_rgba_unmultiplied(c[0], c[1], c[2], c[3])
    }

    pub fn set_victory_color(&mut self, color: Color32) {
        self.victory_color = [color.r(), color.g(), color.b(), color.a()];
    }

    /// `JOTTO_SERVICE_URL` and `JOTTO_STARTING_PUZZLE` win over the file.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("JOTTO_SERVICE_URL").filter(|u| !u.trim().is_empty()) {
            self.service_url = url.trim().to_string();
        }
        if let Some(puzzle) = lookup("JOTTO_STARTING_PUZZLE").and_then(|p| p.trim().parse().ok()) {
            self.starting_puzzle = puzzle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let parsed: ClientSettings = serde_json::from_str(r#"{ "ui_scale": 1.5 }"#).unwrap();
        assert_eq!(parsed.ui_scale, 1.5);
        assert_eq!(parsed.service_url, DEFAULT_SERVICE_URL);
        assert_eq!(parsed.starting_puzzle, 1);
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let env: HashMap<&str, &str> = [
            ("JOTTO_SERVICE_URL", "http://localhost:8080/jotto"),
            ("JOTTO_STARTING_PUZZLE", "16952"),
        ]
        .into_iter()
        .collect();

        let mut settings = ClientSettings::default();
        settings.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(settings.service_url, "http://localhost:8080/jotto");
        assert_eq!(settings.starting_puzzle, 16952);
    }

    #[test]
    fn unparsable_puzzle_override_is_ignored() {
        let mut settings = ClientSettings::default();
        settings.apply_env_overrides(|key| {
            (key == "JOTTO_STARTING_PUZZLE").then(|| "soon".to_string())
        });
        assert_eq!(settings, ClientSettings::default());
    }

    #[test]
    fn victory_color_round_trips_through_color32() {
        let mut settings = ClientSettings::default();
        settings.set_victory_color(Color32::from_rgb(1, 2, 3));
        assert_eq!(settings.victory_color, [1, 2, 3, 255]);
        assert_eq!(settings.victory_color(), Color32::from_rgb(1, 2, 3));
    }
}
