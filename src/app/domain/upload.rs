use std::fs;
use std::path::Path;

use crate::app::infrastructure::error::Result;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";
pub const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

/// Image extensions accepted by the OCR path.
const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff", "webp", "pbm", "pgm", "ppm",
];

/// A file handed to the acquirer, with its declared media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Read a file from disk. The media type is `media_type` when given,
    /// otherwise derived from the extension.
    pub fn from_path(path: &Path, media_type: Option<&str>) -> Result<Self> {
        let bytes = fs::read(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|s| !s.is_empty())
            .unwrap_or("upload")
            .to_string();
        let media_type = media_type
            .map(str::to_string)
            .unwrap_or_else(|| media_type_for_path(path));
        Ok(Self::new(name, media_type, bytes))
    }

    pub fn is_pdf(&self) -> bool {
        self.media_type == PDF_MEDIA_TYPE
    }

    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }
}

/// Media type from the file extension, case-insensitive.
pub fn media_type_for_path(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("pdf") => PDF_MEDIA_TYPE.to_string(),
        Some("jpg") => "image/jpeg".to_string(),
        Some("tif") => "image/tiff".to_string(),
        Some(e) if IMAGE_EXTENSIONS.contains(&e) => format!("image/{}", e),
        _ => UNKNOWN_MEDIA_TYPE.to_string(),
    }
}
