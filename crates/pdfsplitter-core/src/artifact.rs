//! Output artifacts produced by split and extraction operations.

/// Content kind of an [`Artifact`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OutputKind {
    /// A PDF document (split result).
    Pdf,
    /// Plain UTF-8 text (extraction result).
    Text,
}

impl OutputKind {
    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputKind::Pdf => "pdf",
            OutputKind::Text => "txt",
        }
    }

    /// MIME type for downloads.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputKind::Pdf => "application/pdf",
            OutputKind::Text => "text/plain",
        }
    }

    /// Short human label, e.g. for a "Download PDF" link.
    pub fn label(&self) -> &'static str {
        match self {
            OutputKind::Pdf => "PDF",
            OutputKind::Text => "Text",
        }
    }
}

/// Bytes plus a suggested filename.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Artifact {
    /// Suggested filename, extension included.
    pub filename: String,
    /// What the bytes contain.
    pub kind: OutputKind,
    /// Raw output bytes.
    pub bytes: Vec<u8>,
}

impl Artifact {
    /// Create an artifact.
    pub fn new(filename: impl Into<String>, kind: OutputKind, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            kind,
            bytes,
        }
    }

    /// Size of the payload in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The payload as text, if it is valid UTF-8.
    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }
}
