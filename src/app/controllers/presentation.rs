use std::fs;
use std::path::{Path, PathBuf};

use crate::app::domain::{ContainerStyle, Mode, StyleOverrides, TextStyle, compute_style};
use crate::app::infrastructure::error::Result;

/// Background of a focus line under the pointer.
const FOCUS_HIGHLIGHT: &str = "#DBEAFE";

/// Everything the presentation depends on.
#[derive(Debug, Clone, Copy)]
pub struct RenderParams<'a> {
    pub text: &'a str,
    pub mode: Mode,
    pub dark: bool,
    pub overrides: &'a StyleOverrides,
    pub font_size: u32,
    pub line_spacing: f32,
    pub focus_line: bool,
}

/// A styled, ready-to-display document.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedView {
    pub mode: Mode,
    pub container: ContainerStyle,
    pub text_style: TextStyle,
    /// One entry for the whole text, or one per sentence in focus-line view.
    pub blocks: Vec<String>,
    pub focus_line: bool,
}

/// Render the display text. Pure: the same params give the same view.
pub fn render(params: &RenderParams) -> RenderedView {
    let (container, text_style) = compute_style(
        params.mode,
        params.dark,
        params.overrides,
        params.font_size,
        params.line_spacing,
    );

    let blocks = if params.focus_line {
        focus_line_segments(params.text)
    } else {
        vec![params.text.to_string()]
    };

    RenderedView {
        mode: params.mode,
        container,
        text_style,
        blocks,
        focus_line: params.focus_line,
    }
}

/// Split text into sentence lines for the focus-line view.
///
/// Splits on every `.`, trims, drops empty pieces and ends each piece with
/// a single period. Abbreviations and decimals split too.
pub fn focus_line_segments(text: &str) -> Vec<String> {
    text.split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("{}.", s))
        .collect()
}

impl RenderedView {
    /// Blocks separated by newlines.
    pub fn to_plain(&self) -> String {
        self.blocks.join("\n")
    }

    /// A standalone HTML page.
    pub fn to_html(&self) -> String {
        let mut body = String::new();
        for block in &self.blocks {
            if self.focus_line {
                body.push_str(&format!(
                    "    <p class=\"focus-line\">{}</p>\n",
                    escape_html(block)
                ));
            } else {
                body.push_str(&format!(
                    "    <div class=\"text\">{}</div>\n",
                    escape_html(block)
                ));
            }
        }

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>ReadEase - {mode}</title>
  <style>
    body {{ margin: 0; }}
    .reader {{ {container} min-height: 100vh; box-sizing: border-box; }}
    .text, .focus-line {{ {text} white-space: pre-wrap; margin: 0; }}
    .focus-line {{ padding: 0.25rem 0.5rem; border-radius: 0.25rem; }}
    .focus-line:hover {{ background-color: {highlight}; }}
  </style>
</head>
<body>
  <main class="reader">
{body}  </main>
</body>
</html>
"#,
            mode = self.mode.display_name(),
            container = self.container.to_css(),
            text = self.text_style.to_css(),
            highlight = FOCUS_HIGHLIGHT,
            body = body,
        )
    }
}

/// Escape text for HTML element content.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Default location for a rendered page opened in the browser.
pub fn preview_path() -> PathBuf {
    std::env::temp_dir().join("readease").join("preview.html")
}

/// Write the HTML page to `path`, creating parent directories.
pub fn write_html(view: &RenderedView, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, view.to_html())?;
    Ok(())
}
