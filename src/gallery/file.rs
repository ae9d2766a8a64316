use std::path::Path;

use bytes::Bytes;
use image::ImageFormat;

use super::error::ValidationError;

const FALLBACK_CONTENT_TYPE: &'static str = "application/octet-stream";

/// A local file picked for upload, with the content type it declares.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    name: String,
    content_type: String,
    bytes: Bytes,
}

impl SelectedFile {
    pub fn new(name: &str, content_type: &str, bytes: impl Into<Bytes>) -> Self {
        SelectedFile {
            name: name.to_owned(),
            content_type: content_type.to_owned(),
            bytes: bytes.into(),
        }
    }

    /// Reads `path` and declares its type the way a file picker would: from
    /// the extension first, falling back to the leading magic bytes.
    pub async fn open(path: &Path) -> Result<Self, std::io::Error> {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let content_type = ImageFormat::from_path(path)
            .or_else(|_| image::guess_format(&bytes))
            .map(|format| format.to_mime_type())
            .unwrap_or(FALLBACK_CONTENT_TYPE);
        Ok(SelectedFile::new(&name, content_type, bytes))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

/// The file input of the page: holds at most one file, and upload is only
/// enabled while it does.
#[derive(Debug, Default)]
pub struct Selection {
    file: Option<SelectedFile>,
}

impl Selection {
    pub fn select(&mut self, file: SelectedFile) {
        self.file = Some(file);
    }

    pub fn reset(&mut self) {
        self.file = None;
    }

    pub fn upload_enabled(&self) -> bool {
        self.file.is_some()
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    /// The selected file, if it may be sent.
    pub fn validate(&self) -> Result<&SelectedFile, ValidationError> {
        let file = self.file.as_ref().ok_or(ValidationError::NoFileSelected)?;
        if !file.is_image() {
            return Err(ValidationError::NotAnImage);
        }
        Ok(file)
    }
}
