use serde::Serialize;

/// An upload pulled out of the multipart body. The bytes are drained but never inspected.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub size: usize,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    Herniated,
    #[serde(rename = "Non-Herniated")]
    NonHerniated,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub class: Class,
    pub confidence: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}
