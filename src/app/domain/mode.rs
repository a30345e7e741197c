use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Accessibility preset. Catalog order is the cycling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Dyslexia,
    Adhd,
    Autism,
    #[default]
    General,
}

/// Static visual descriptor of a mode for one (light or dark) variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeStyle {
    pub background_color: &'static str,
    pub color: &'static str,
    pub font_family: Option<&'static str>,
    pub letter_spacing: Option<&'static str>,
    pub word_spacing: Option<&'static str>,
    pub padding: Option<&'static str>,
}

const DARK_BACKGROUND: &str = "#2D2D2D";
const LIGHT_TEXT: &str = "#000000";
const DARK_TEXT: &str = "#FFFFFF";

impl Mode {
    /// Get all modes in catalog order
    pub fn all() -> &'static [Mode] {
        &[Self::Dyslexia, Self::Adhd, Self::Autism, Self::General]
    }

    /// Key used in stored preferences and on the command line
    pub fn key(&self) -> &'static str {
        match self {
            Self::Dyslexia => "dyslexia",
            Self::Adhd => "adhd",
            Self::Autism => "autism",
            Self::General => "general",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Dyslexia => "Dyslexia Mode",
            Self::Adhd => "ADHD Mode",
            Self::Autism => "Autism Mode",
            Self::General => "General Mode",
        }
    }

    fn index(&self) -> usize {
        Self::all()
            .iter()
            .position(|m| m == self)
            .unwrap_or(0)
    }

    /// Next mode, wrapping past the end of the catalog
    pub fn next(&self) -> Mode {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    /// Previous mode, wrapping past the start of the catalog
    pub fn prev(&self) -> Mode {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }

    pub fn style(&self, dark: bool) -> ModeStyle {
        let color = if dark { DARK_TEXT } else { LIGHT_TEXT };
        let base = ModeStyle {
            background_color: DARK_BACKGROUND,
            color,
            font_family: None,
            letter_spacing: None,
            word_spacing: None,
            padding: None,
        };

        match self {
            Self::Dyslexia => ModeStyle {
                background_color: if dark { DARK_BACKGROUND } else { "#FFF9E6" },
                font_family: Some("Arial, sans-serif"),
                letter_spacing: Some("0.1em"),
                word_spacing: Some("0.2em"),
                ..base
            },
            Self::Adhd => ModeStyle {
                background_color: if dark { DARK_BACKGROUND } else { "#F0F7FF" },
                ..base
            },
            Self::Autism => ModeStyle {
                background_color: if dark { DARK_BACKGROUND } else { "#F5F5F5" },
                padding: Some("2rem"),
                ..base
            },
            Self::General => ModeStyle {
                background_color: if dark { DARK_BACKGROUND } else { "#FFFFFF" },
                ..base
            },
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|m| m.key() == wanted)
            .ok_or_else(|| {
                format!(
                    "unknown mode {:?} (expected one of: dyslexia, adhd, autism, general)",
                    s
                )
            })
    }
}
