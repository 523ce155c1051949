//! Upload constraints, file naming, and inline payload encoding.
//!
//! Size and content-type limits are enforced here, before anything is
//! recorded; step images carry no size limit at this layer.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::error::CoreError;
use crate::types::EntityId;

/// Maximum accepted profile photo size (5 MB).
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

/// Maximum accepted CV size (10 MB).
pub const MAX_CV_BYTES: usize = 10 * 1024 * 1024;

/// Fallback extension when the original file name has none.
const DEFAULT_EXTENSION: &str = "bin";

/// The kinds of file the application accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    ProfilePhoto,
    Cv,
    StepImage,
}

impl UploadKind {
    /// Storage folder for this kind of upload.
    pub fn folder(self) -> &'static str {
        match self {
            Self::ProfilePhoto | Self::StepImage => "Images",
            Self::Cv => "CVs",
        }
    }

    /// File-name prefix for this kind of upload.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::ProfilePhoto => "profile",
            Self::Cv => "cv",
            Self::StepImage => "step",
        }
    }

    /// Size ceiling in bytes, if this kind has one.
    pub fn max_bytes(self) -> Option<usize> {
        match self {
            Self::ProfilePhoto => Some(MAX_PHOTO_BYTES),
            Self::Cv => Some(MAX_CV_BYTES),
            Self::StepImage => None,
        }
    }
}

/// Validate an upload's content type and size against its kind's limits.
pub fn validate_upload(kind: UploadKind, content_type: &str, size: usize) -> Result<(), CoreError> {
    match kind {
        UploadKind::ProfilePhoto | UploadKind::StepImage => {
            if !content_type.starts_with("image/") {
                return Err(CoreError::Validation(format!(
                    "Expected an image upload, got '{content_type}'"
                )));
            }
        }
        UploadKind::Cv => {}
    }

    if let Some(max) = kind.max_bytes() {
        if size > max {
            return Err(CoreError::Validation(format!(
                "File size must be less than {} MB",
                max / (1024 * 1024)
            )));
        }
    }
    Ok(())
}

/// Build the stored file name for an upload: `<prefix>_<timestamp>.<ext>`,
/// with the extension taken from the original name.
pub fn upload_file_name(kind: UploadKind, original_name: &str, timestamp_ms: EntityId) -> String {
    let extension = original_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
        .unwrap_or(DEFAULT_EXTENSION);
    format!("{}_{timestamp_ms}.{extension}", kind.prefix())
}

/// Encode raw bytes as standard base64 for inline persistence.
pub fn encode_base64(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Encode an image as a self-contained `data:` URL reference.
///
/// Validates the content type first; the returned string is the opaque
/// image reference stored on a step.
pub fn step_image_data_url(content_type: &str, bytes: &[u8]) -> Result<String, CoreError> {
    validate_upload(UploadKind::StepImage, content_type, bytes.len())?;
    Ok(format!("data:{content_type};base64,{}", encode_base64(bytes)))
}
