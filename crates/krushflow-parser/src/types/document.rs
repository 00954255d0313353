//! Uploaded document input and per-document parse results

use serde::{Deserialize, Deserializer, Serialize};

use super::now_iso;

/// Fallback for a missing filename or type
pub const UNKNOWN: &str = "unknown";

/// A document as uploaded by the browser client
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentInput {
    /// Original filename
    #[serde(default)]
    pub name: Option<String>,
    /// MIME type reported by the client
    #[serde(default, rename = "type")]
    pub doc_type: Option<String>,
    /// Client-side upload time
    #[serde(default, rename = "uploadedAt")]
    pub uploaded_at: Option<String>,
    /// Image payload. `Some` whenever the key exists, even for `null`.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub data: Option<serde_json::Value>,
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

/// Stored `null` names and types read back as `unknown`
fn deserialize_or_unknown<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(unknown))
}

fn deserialize_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn unknown() -> String {
    UNKNOWN.to_string()
}

/// Outcome of extracting a single image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseStatus {
    Success,
    Error,
}

/// Properties read from a decoded image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
    /// Container format tag, e.g. `PNG`
    pub format: String,
    /// Colour mode, e.g. `RGB`
    pub mode: String,
}

/// Metadata object: the image properties, or `{}` after a failed extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Metadata {
    Image(ImageMetadata),
    Empty {},
}

impl Metadata {
    /// Image properties, if extraction succeeded
    pub fn image(&self) -> Option<&ImageMetadata> {
        match self {
            Metadata::Image(meta) => Some(meta),
            Metadata::Empty {} => None,
        }
    }
}

/// Fields merged into a [`ParsedDocument`] when an image payload was supplied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    pub extracted_text: String,
    pub metadata: Metadata,
    pub status: ParseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Extraction {
    /// Successful extraction with the simulated OCR text
    pub fn success(metadata: ImageMetadata) -> Self {
        Self {
            extracted_text: format!(
                "[Simulated OCR extraction from {}x{} image]",
                metadata.width, metadata.height
            ),
            metadata: Metadata::Image(metadata),
            status: ParseStatus::Success,
            error: None,
        }
    }

    /// Failed extraction carrying the error description
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            extracted_text: String::new(),
            metadata: Metadata::Empty {},
            status: ParseStatus::Error,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ParseStatus::Success
    }
}

/// Per-file result record, persisted inside its owning session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDocument {
    #[serde(default = "unknown", deserialize_with = "deserialize_or_unknown")]
    pub filename: String,
    #[serde(
        rename = "type",
        default = "unknown",
        deserialize_with = "deserialize_or_unknown"
    )]
    pub doc_type: String,
    /// Client-supplied; older files may hold `null`
    #[serde(rename = "uploadedAt", default, deserialize_with = "deserialize_or_empty")]
    pub uploaded_at: String,
    #[serde(rename = "parsedAt")]
    pub parsed_at: String,
    /// Absent when the upload carried no `data`
    #[serde(flatten)]
    pub extraction: Option<Extraction>,
}

impl ParsedDocument {
    /// Stamp a result record from the uploaded fields
    pub fn from_input(input: &DocumentInput) -> Self {
        Self {
            filename: input.name.clone().unwrap_or_else(unknown),
            doc_type: input.doc_type.clone().unwrap_or_else(unknown),
            uploaded_at: input.uploaded_at.clone().unwrap_or_else(now_iso),
            parsed_at: now_iso(),
            extraction: None,
        }
    }

    /// Merge an extraction result into the record
    pub fn with_extraction(mut self, extraction: Extraction) -> Self {
        self.extraction = Some(extraction);
        self
    }
}
