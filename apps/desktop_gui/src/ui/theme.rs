//! Appearance presets and the UI preferences persisted through eframe storage.

use serde::{Deserialize, Serialize};

use crate::controller::reducer::ViewKind;

pub const PREFERENCES_STORAGE_KEY: &str = "employee_desk.preferences";

pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(37, 99, 235);
pub const SUCCESS: egui::Color32 = egui::Color32::from_rgb(22, 163, 74);
pub const DANGER: egui::Color32 = egui::Color32::from_rgb(220, 38, 38);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Appearance {
    #[default]
    Light,
    Dark,
}

impl Appearance {
    pub fn toggled(self) -> Self {
        match self {
            Appearance::Light => Appearance::Dark,
            Appearance::Dark => Appearance::Light,
        }
    }

    pub fn toggle_icon(self) -> &'static str {
        match self {
            Appearance::Light => "🌙",
            Appearance::Dark => "☀",
        }
    }

    pub fn toggle_label(self) -> &'static str {
        match self {
            Appearance::Light => "Dark mode",
            Appearance::Dark => "Light mode",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiPreferences {
    pub appearance: Appearance,
    pub sidebar_expanded: bool,
    pub last_view: ViewKind,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            appearance: Appearance::Light,
            sidebar_expanded: true,
            last_view: ViewKind::Card,
        }
    }
}

impl UiPreferences {
    pub fn from_storage_text(text: &str) -> Option<Self> {
        match serde_json::from_str(text) {
            Ok(prefs) => Some(prefs),
            Err(err) => {
                tracing::warn!("discarding unreadable UI preferences: {err}");
                None
            }
        }
    }

    pub fn to_storage_text(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }
}

pub fn visuals_for(appearance: Appearance) -> egui::Visuals {
    let mut visuals = match appearance {
        Appearance::Light => {
            let mut v = egui::Visuals::light();
            v.panel_fill = egui::Color32::from_rgb(243, 244, 246);
            v.window_fill = egui::Color32::WHITE;
            v.extreme_bg_color = egui::Color32::WHITE;
            v.faint_bg_color = egui::Color32::from_rgb(249, 250, 251);
            v
        }
        Appearance::Dark => {
            let mut v = egui::Visuals::dark();
            v.panel_fill = egui::Color32::from_rgb(17, 24, 39);
            v.window_fill = egui::Color32::from_rgb(31, 41, 55);
            v.extreme_bg_color = egui::Color32::from_rgb(31, 41, 55);
            v.faint_bg_color = egui::Color32::from_rgb(37, 47, 63);
            v
        }
    };

    visuals.hyperlink_color = ACCENT;
    visuals.selection.bg_fill = ACCENT;
    visuals.window_corner_radius = egui::CornerRadius::same(10);
    visuals.menu_corner_radius = egui::CornerRadius::same(6);
    visuals.widgets.hovered.bg_fill = ACCENT.gamma_multiply(0.85);
    visuals
}

/// Sidebar background, darker than the content area in both appearances.
pub fn sidebar_fill(appearance: Appearance) -> egui::Color32 {
    match appearance {
        Appearance::Light => egui::Color32::from_rgb(30, 41, 59),
        Appearance::Dark => egui::Color32::from_rgb(3, 7, 18),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preferences_round_trip_through_storage_text() {
        let prefs = UiPreferences {
            appearance: Appearance::Dark,
            sidebar_expanded: false,
            last_view: ViewKind::Table,
        };
        let text = prefs.to_storage_text().expect("serialize");
        assert_eq!(UiPreferences::from_storage_text(&text), Some(prefs));
    }

    #[test]
    fn missing_preference_fields_take_defaults() {
        let prefs = UiPreferences::from_storage_text(r#"{"appearance":"Dark"}"#).expect("parse");
        assert_eq!(prefs.appearance, Appearance::Dark);
        assert!(prefs.sidebar_expanded);
        assert_eq!(prefs.last_view, ViewKind::Card);
    }

    #[test]
    fn garbage_preferences_are_discarded() {
        assert_eq!(UiPreferences::from_storage_text("not json"), None);
    }

    #[test]
    fn toggling_appearance_flips_between_light_and_dark() {
        assert_eq!(Appearance::Light.toggled(), Appearance::Dark);
        assert_eq!(Appearance::Dark.toggled().toggled(), Appearance::Dark);
        assert!(!visuals_for(Appearance::Light).dark_mode);
        assert!(visuals_for(Appearance::Dark).dark_mode);
    }
}
