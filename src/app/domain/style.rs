use std::fmt;
use std::str::FromStr;

use super::mode::Mode;

/// A `#RGB` or `#RRGGBB` color, stored as written with an uppercase body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HexColor(String);

impl HexColor {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for HexColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let body = trimmed
            .strip_prefix('#')
            .ok_or_else(|| format!("color {:?} must start with '#'", s))?;
        if !(body.len() == 3 || body.len() == 6) || !body.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("color {:?} is not #RGB or #RRGGBB", s));
        }
        Ok(Self(format!("#{}", body.to_ascii_uppercase())))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reader-chosen styling applied to the whole display buffer, in every mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleOverrides {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// `None` keeps the mode's text color.
    pub color: Option<HexColor>,
}

/// Mode-owned box styling around the text.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerStyle {
    pub background_color: String,
    pub padding: Option<String>,
    pub letter_spacing: Option<String>,
    pub word_spacing: Option<String>,
}

/// Typography of every rendered text block.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_size_px: u32,
    pub line_height: f32,
    pub font_family: String,
    pub font_weight: &'static str,
    pub font_style: &'static str,
    pub text_decoration: &'static str,
    pub color: String,
}

/// Merge a mode with the reader's typography.
///
/// The mode decides background, padding and spacing. Size, line height,
/// weight, style, decoration and an explicit color always come from the
/// reader. Italic text switches to a serif face.
pub fn compute_style(
    mode: Mode,
    dark: bool,
    overrides: &StyleOverrides,
    font_size_px: u32,
    line_height: f32,
) -> (ContainerStyle, TextStyle) {
    let mode_style = mode.style(dark);

    let container = ContainerStyle {
        background_color: mode_style.background_color.to_string(),
        padding: mode_style.padding.map(str::to_string),
        letter_spacing: mode_style.letter_spacing.map(str::to_string),
        word_spacing: mode_style.word_spacing.map(str::to_string),
    };

    let font_family = if overrides.italic {
        "serif".to_string()
    } else {
        mode_style.font_family.unwrap_or("inherit").to_string()
    };

    let text = TextStyle {
        font_size_px,
        line_height,
        font_family,
        font_weight: if overrides.bold { "bold" } else { "normal" },
        font_style: if overrides.italic { "italic" } else { "normal" },
        text_decoration: if overrides.underline { "underline" } else { "none" },
        color: overrides
            .color
            .as_ref()
            .map(|c| c.as_str().to_string())
            .unwrap_or_else(|| mode_style.color.to_string()),
    };

    (container, text)
}

impl ContainerStyle {
    pub fn to_css(&self) -> String {
        let mut css = format!("background-color: {};", self.background_color);
        if let Some(ref padding) = self.padding {
            css.push_str(&format!(" padding: {};", padding));
        }
        if let Some(ref spacing) = self.letter_spacing {
            css.push_str(&format!(" letter-spacing: {};", spacing));
        }
        if let Some(ref spacing) = self.word_spacing {
            css.push_str(&format!(" word-spacing: {};", spacing));
        }
        css
    }
}

impl TextStyle {
    pub fn to_css(&self) -> String {
        format!(
            "font-size: {}px; line-height: {}; font-family: {}; font-weight: {}; font-style: {}; text-decoration: {}; color: {};",
            self.font_size_px,
            self.line_height,
            self.font_family,
            self.font_weight,
            self.font_style,
            self.text_decoration,
            self.color
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_parsing() {
        assert_eq!("#ff8800".parse::<HexColor>().unwrap().as_str(), "#FF8800");
        assert_eq!("#abc".parse::<HexColor>().unwrap().as_str(), "#ABC");
        assert!("ff8800".parse::<HexColor>().is_err());
        assert!("#ff88".parse::<HexColor>().is_err());
        assert!("#gg0000".parse::<HexColor>().is_err());
    }

    #[test]
    fn test_bold_italic_win_in_every_mode() {
        let overrides = StyleOverrides {
            bold: true,
            italic: true,
            ..Default::default()
        };
        for mode in Mode::all() {
            for dark in [false, true] {
                let (_, text) = compute_style(*mode, dark, &overrides, 16, 1.5);
                assert_eq!(text.font_weight, "bold");
                assert_eq!(text.font_style, "italic");
                assert_eq!(text.font_family, "serif");
            }
        }
    }

    #[test]
    fn test_mode_controls_container_only() {
        let (container, text) = compute_style(Mode::Dyslexia, false, &StyleOverrides::default(), 20, 2.0);
        assert_eq!(container.background_color, "#FFF9E6");
        assert_eq!(container.letter_spacing.as_deref(), Some("0.1em"));
        assert_eq!(text.font_family, "Arial, sans-serif");
        assert_eq!(text.font_size_px, 20);
        assert_eq!(text.line_height, 2.0);
        assert_eq!(text.font_weight, "normal");
        assert_eq!(text.text_decoration, "none");
        assert_eq!(text.color, "#000000");
    }

    #[test]
    fn test_color_override_beats_dark_mode() {
        let overrides = StyleOverrides {
            color: Some("#336699".parse().unwrap()),
            underline: true,
            ..Default::default()
        };
        let (container, text) = compute_style(Mode::General, true, &overrides, 16, 1.5);
        assert_eq!(container.background_color, "#2D2D2D");
        assert_eq!(text.color, "#336699");
        assert_eq!(text.text_decoration, "underline");

        let (_, plain) = compute_style(Mode::General, true, &StyleOverrides::default(), 16, 1.5);
        assert_eq!(plain.color, "#FFFFFF");
    }

    #[test]
    fn test_css_output() {
        let (container, text) = compute_style(Mode::Autism, false, &StyleOverrides::default(), 18, 1.5);
        assert_eq!(container.to_css(), "background-color: #F5F5F5; padding: 2rem;");
        assert!(text.to_css().starts_with("font-size: 18px; line-height: 1.5;"));
    }
}
