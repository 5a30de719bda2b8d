use std::path::Path;

use crate::errors::{AnimatorError, Result};

/// MIME type registered for binary glTF.
pub const GLB_MIME: &str = "model/gltf-binary";
/// File extension accepted at ingestion.
pub const GLB_EXTENSION: &str = ".glb";
/// First four bytes of every GLB container (`"glTF"`).
pub const GLB_MAGIC: [u8; 4] = *b"glTF";
/// Container version this viewer understands.
pub const GLB_VERSION: u32 = 2;
const GLB_HEADER_LEN: usize = 12;

/// A user-selected file: its name and contents.
#[derive(Debug, Clone)]
pub struct LocalFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl LocalFile {
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Reads a file from disk, naming it after the path's file name.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();
        Ok(Self { name, bytes })
    }
}

#[must_use]
pub fn has_glb_extension(name: &str) -> bool {
    name.to_lowercase().ends_with(GLB_EXTENSION)
}

/// Checks extension and container header. Decoding is left to the renderer.
pub fn validate_glb(file: &LocalFile) -> Result<()> {
    let invalid = |reason: String| AnimatorError::InvalidAsset {
        file_name: file.name.clone(),
        reason,
    };

    if !has_glb_extension(&file.name) {
        return Err(invalid(format!("expected a '{GLB_EXTENSION}' file")));
    }
    if file.bytes.len() < GLB_HEADER_LEN {
        return Err(invalid(format!(
            "file is {} bytes, shorter than the GLB header",
            file.bytes.len()
        )));
    }
    if file.bytes[..4] != GLB_MAGIC {
        return Err(invalid("missing 'glTF' container signature".to_string()));
    }

    let version = u32::from_le_bytes([file.bytes[4], file.bytes[5], file.bytes[6], file.bytes[7]]);
    if version != GLB_VERSION {
        return Err(invalid(format!("unsupported GLB container version {version}")));
    }

    Ok(())
}
