//! File Intake: validates a resume file and encodes it for transport.
//!
//! No content inspection happens here: PDF and TXT bytes are passed through to
//! the provider untouched, base64-encoded.

use std::fmt;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use tracing::{debug, info};

use crate::errors::AppError;

/// 5 MiB upper bound on the raw (pre-encoding) file size.
pub const MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

pub const FILE_TOO_LARGE_MESSAGE: &str = "File size exceeds 5MB limit.";
pub const UNSUPPORTED_TYPE_MESSAGE: &str = "Only PDF and TXT files are supported.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeMimeType {
    Pdf,
    Txt,
}

impl ResumeMimeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResumeMimeType::Pdf => "application/pdf",
            ResumeMimeType::Txt => "text/plain",
        }
    }

    /// Parses a declared MIME type. Parameters such as `; charset=utf-8` are ignored.
    pub fn from_declared(declared: &str) -> Option<Self> {
        let essence = declared.split(';').next().unwrap_or("").trim();
        match essence.to_ascii_lowercase().as_str() {
            "application/pdf" => Some(ResumeMimeType::Pdf),
            "text/plain" => Some(ResumeMimeType::Txt),
            _ => None,
        }
    }

    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(ResumeMimeType::Pdf),
            "txt" => Some(ResumeMimeType::Txt),
            _ => None,
        }
    }
}

impl fmt::Display for ResumeMimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated, encoded resume. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    name: String,
    mime_type: ResumeMimeType,
    content: String,
}

impl UploadedFile {
    /// Builds an `UploadedFile` from bytes already in memory, applying the same
    /// checks as `load_resume`. The type comes from `declared_mime` when given,
    /// otherwise from the extension of `name`.
    pub fn from_bytes(
        name: impl Into<String>,
        declared_mime: Option<&str>,
        bytes: &[u8],
    ) -> Result<Self, AppError> {
        let name = name.into();
        check_size(bytes.len() as u64)?;
        let mime_type = resolve_mime_type(Path::new(&name), declared_mime)?;
        Ok(Self::encode(name, mime_type, bytes))
    }

    fn encode(name: String, mime_type: ResumeMimeType, bytes: &[u8]) -> Self {
        Self {
            name,
            mime_type,
            content: BASE64.encode(bytes),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> ResumeMimeType {
        self.mime_type
    }

    /// Base64 content, ready to be sent as inline data.
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Validates and reads a resume from disk.
///
/// Size and type are checked before any content is read. I/O failures map to
/// `AppError::FileRead`.
pub async fn load_resume(path: &Path, declared_mime: Option<&str>) -> Result<UploadedFile, AppError> {
    let metadata = tokio::fs::metadata(path).await?;
    check_size(metadata.len())?;
    let mime_type = resolve_mime_type(path, declared_mime)?;

    let bytes = tokio::fs::read(path).await?;
    // The file can change between stat and read.
    check_size(bytes.len() as u64)?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    info!("Loaded resume '{}' ({} bytes, {})", name, bytes.len(), mime_type);
    Ok(UploadedFile::encode(name, mime_type, &bytes))
}

fn check_size(len: u64) -> Result<(), AppError> {
    if len > MAX_FILE_BYTES {
        debug!("Rejecting resume of {len} bytes (limit {MAX_FILE_BYTES})");
        return Err(AppError::validation(FILE_TOO_LARGE_MESSAGE));
    }
    Ok(())
}

fn resolve_mime_type(path: &Path, declared_mime: Option<&str>) -> Result<ResumeMimeType, AppError> {
    let resolved = match declared_mime {
        Some(declared) => ResumeMimeType::from_declared(declared),
        None => ResumeMimeType::from_extension(path),
    };
    resolved.ok_or_else(|| AppError::validation(UNSUPPORTED_TYPE_MESSAGE))
}
