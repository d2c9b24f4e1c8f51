//! Presentation preferences
//!
//! Persisted in LocalStorage. Nothing here affects the simulation.

use serde::{Deserialize, Serialize};

/// Player-facing display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Score/lives readout in the top-right corner
    pub show_hud: bool,
    /// Frame-rate readout in the top-left corner
    pub show_fps: bool,
    /// Opacity of the game-over backdrop (0.0 - 1.0)
    pub overlay_opacity: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_hud: true,
            show_fps: false,
            overlay_opacity: 0.7,
        }
    }
}

impl Settings {
    pub fn toggle_hud(&mut self) {
        self.show_hud = !self.show_hud;
    }

    pub fn toggle_fps(&mut self) {
        self.show_fps = !self.show_fps;
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "sky_blaster_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Discarding unreadable settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "show_fps": true }"#).unwrap();
        assert!(settings.show_fps);
        assert!(settings.show_hud);
        assert_eq!(settings.overlay_opacity, 0.7);
    }

    #[test]
    fn test_toggles() {
        let mut settings = Settings::default();
        settings.toggle_fps();
        settings.toggle_hud();
        assert!(settings.show_fps);
        assert!(!settings.show_hud);
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = Settings {
            show_hud: false,
            show_fps: true,
            overlay_opacity: 0.5,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, back);
    }
}
