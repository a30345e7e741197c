use serde::{Deserialize, Serialize};

use super::mode::Mode;

/// Storage key of the persisted preferences blob.
pub const SETTINGS_KEY: &str = "readingAppSettings";

pub const MIN_FONT_SIZE: u32 = 12;
pub const MAX_FONT_SIZE: u32 = 32;
pub const MIN_LINE_SPACING: f32 = 1.0;
pub const MAX_LINE_SPACING: f32 = 3.0;

/// The part of the reading setup that survives restarts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub mode: Mode,

    #[serde(default = "default_font_size")]
    pub font_size: u32,

    #[serde(default = "default_line_spacing")]
    pub line_spacing: f32,
}

fn default_font_size() -> u32 {
    16
}

fn default_line_spacing() -> f32 {
    1.5
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            font_size: default_font_size(),
            line_spacing: default_line_spacing(),
        }
    }
}

pub fn clamp_font_size(size: u32) -> u32 {
    size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
}

/// Clamp to the slider range; NaN falls back to the default spacing.
pub fn clamp_line_spacing(spacing: f32) -> f32 {
    if spacing.is_nan() {
        return default_line_spacing();
    }
    spacing.clamp(MIN_LINE_SPACING, MAX_LINE_SPACING)
}

impl Preferences {
    /// Copy with every field pulled into its valid range.
    pub fn clamped(self) -> Self {
        Self {
            mode: self.mode,
            font_size: clamp_font_size(self.font_size),
            line_spacing: clamp_line_spacing(self.line_spacing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preferences() {
        let prefs = Preferences::default();
        assert_eq!(prefs.mode, Mode::General);
        assert_eq!(prefs.font_size, 16);
        assert_eq!(prefs.line_spacing, 1.5);
    }

    #[test]
    fn test_blob_format() {
        let prefs = Preferences {
            mode: Mode::Adhd,
            font_size: 20,
            line_spacing: 2.0,
        };
        let json = serde_json::to_string(&prefs).unwrap();
        assert!(json.contains("\"mode\":\"adhd\""));
        assert!(json.contains("\"fontSize\":20"));
        assert!(json.contains("\"lineSpacing\":2"));

        let loaded: Preferences = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, prefs);
    }

    #[test]
    fn test_partial_blob() {
        let prefs: Preferences = serde_json::from_str(r#"{"mode": "autism"}"#).unwrap();
        assert_eq!(prefs.mode, Mode::Autism);
        assert_eq!(prefs.font_size, 16);
        assert_eq!(prefs.line_spacing, 1.5);
    }

    #[test]
    fn test_clamping() {
        let prefs = Preferences {
            mode: Mode::Dyslexia,
            font_size: 99,
            line_spacing: 0.2,
        }
        .clamped();
        assert_eq!(prefs.font_size, 32);
        assert_eq!(prefs.line_spacing, 1.0);
        assert_eq!(clamp_font_size(4), 12);
        assert_eq!(clamp_line_spacing(f32::NAN), 1.5);
        assert_eq!(clamp_line_spacing(2.4), 2.4);
    }
}
