use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use read_ease::app::{HexColor, Mode};

#[derive(Debug, Parser)]
#[command(name = "readease")]
#[command(author, version, about = "Read text from files, images and web pages in an accessible layout")]
pub struct Cli {
    /// Config file (default: <config dir>/readease/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Acquire text and render it
    Read(ReadArgs),
    /// Run the content cleaner on a local HTML file
    Clean(CleanArgs),
    /// Show or change saved preferences
    #[command(subcommand)]
    Prefs(PrefsCommand),
    /// Read text aloud
    Speak(SpeakArgs),
    /// Run the focus countdown
    Timer(TimerArgs),
    /// List the accessibility modes
    Modes,
}

/// Where the text comes from. Standard input is read when none is given.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Text to read
    #[arg(long, conflicts_with_all = ["file", "url"])]
    pub text: Option<String>,

    /// PDF or image file
    #[arg(long, conflicts_with = "url")]
    pub file: Option<PathBuf>,

    /// Declared media type of --file (default: from the extension)
    #[arg(long, requires = "file")]
    pub mime: Option<String>,

    /// Web page to fetch through the scraping service
    #[arg(long)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Html,
    Text,
}

#[derive(Debug, Args)]
pub struct ReadArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Accessibility mode (dyslexia, adhd, autism, general)
    #[arg(long)]
    pub mode: Option<Mode>,

    /// Font size in pixels (12-32)
    #[arg(long)]
    pub font_size: Option<u32>,

    /// Line spacing multiplier (1.0-3.0)
    #[arg(long)]
    pub line_spacing: Option<f32>,

    /// Show one sentence per line
    #[arg(long)]
    pub focus_line: bool,

    #[arg(long)]
    pub bold: bool,

    #[arg(long)]
    pub italic: bool,

    #[arg(long)]
    pub underline: bool,

    /// Text color as #RGB or #RRGGBB
    #[arg(long)]
    pub color: Option<HexColor>,

    /// Force the dark variant (default: follow the system theme)
    #[arg(long, conflicts_with = "light")]
    pub dark: bool,

    /// Force the light variant
    #[arg(long)]
    pub light: bool,

    /// Save --mode, --font-size and --line-spacing as preferences
    #[arg(long)]
    pub remember: bool,

    #[arg(long, value_enum, default_value = "html")]
    pub format: OutputFormat,

    /// Write to a file instead of standard output
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Open the rendered page in the browser
    #[arg(long)]
    pub open: bool,
}

#[derive(Debug, Args)]
pub struct CleanArgs {
    /// HTML file to clean
    pub input: PathBuf,

    /// Drop lines shorter than this many characters
    #[arg(long, default_value_t = read_ease::app::services::cleaner::MIN_LINE_CHARS)]
    pub min_chars: usize,
}

#[derive(Debug, Subcommand)]
pub enum PrefsCommand {
    /// Print the saved preferences
    Show,
    /// Change saved preferences
    Set(PrefsSetArgs),
    /// Restore the defaults
    Reset,
}

#[derive(Debug, Args)]
pub struct PrefsSetArgs {
    #[arg(long)]
    pub mode: Option<Mode>,

    #[arg(long)]
    pub font_size: Option<u32>,

    #[arg(long)]
    pub line_spacing: Option<f32>,
}

#[derive(Debug, Args)]
pub struct SpeakArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Debug, Args)]
pub struct TimerArgs {
    /// Countdown length in minutes (minimum 1)
    #[arg(long, default_value_t = 5)]
    pub minutes: u32,
}
