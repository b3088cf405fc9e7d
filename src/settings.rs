use serde::{Deserialize, Serialize};

/// Environment variable that overrides the configured API base URL.
pub const API_BASE_URL_ENV: &str = "DIGIT_API_BASE_URL";

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    /// Base URL of the prediction service. The `DIGIT_API_BASE_URL`
    /// environment variable takes precedence when set.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// When enabled the application initialises the logger at debug level.
    /// Defaults to `false` when the field is missing in the settings file.
    #[serde(default)]
    pub debug_logging: bool,
    /// Logical size of the drawing canvas in pixels.
    #[serde(default = "default_canvas_size")]
    pub canvas_size: (u32, u32),
    /// Brush stroke width in pixels.
    #[serde(default = "default_brush_width")]
    pub brush_width: f32,
    /// Enable toast notifications in the UI.
    #[serde(default = "default_toasts")]
    pub enable_toasts: bool,
    /// Duration of toast notifications in seconds.
    #[serde(default = "default_toast_duration")]
    pub toast_duration: f32,
    /// Last known window size. If absent, a default size is used.
    #[serde(default)]
    pub window_size: Option<(i32, i32)>,
}

fn default_api_base_url() -> String {
    "http://localhost:8000".into()
}

fn default_canvas_size() -> (u32, u32) {
    (280, 280)
}

fn default_brush_width() -> f32 {
    15.0
}

fn default_toasts() -> bool {
    true
}

fn default_toast_duration() -> f32 {
    3.0
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            debug_logging: false,
            canvas_size: default_canvas_size(),
            brush_width: default_brush_width(),
            enable_toasts: true,
            toast_duration: default_toast_duration(),
            window_size: None,
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Effective API base URL: the environment override wins over the file.
    pub fn api_base_url(&self) -> String {
        match std::env::var(API_BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => url,
            _ => self.api_base_url.clone(),
        }
    }
}
