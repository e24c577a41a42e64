use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Cover art image bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkData {
    /// Raw image bytes
    pub data: Vec<u8>,
    /// MIME type (e.g., "image/jpeg", "image/png")
    pub mime_type: String,
}

impl ArtworkData {
    /// Create new artwork data
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
        }
    }

    /// JPEG artwork
    pub fn jpeg(data: Vec<u8>) -> Self {
        Self::new(data, "image/jpeg")
    }

    /// Get the data as a base64-encoded string
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }

    /// Inline `data:` URL for previews
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }
}
