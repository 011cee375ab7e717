//! lopdf-based PDF backend.
//!
//! Implements [`PdfBackend`] on top of the [lopdf](https://crates.io/crates/lopdf)
//! crate. Page subsets are written by cloning the document, deleting every
//! page that was not requested, and pruning the objects nothing refers to
//! any more.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use pdfsplitter_core::PdfError;

use crate::backend::PdfBackend;
use crate::error::BackendError;
use crate::handler::TextHandler;
use crate::interpreter::TextInterpreter;

/// A parsed PDF document backed by lopdf.
#[derive(Clone)]
pub struct LopdfDocument {
    inner: Document,
    /// Page ObjectIds in page order (indexed by 0-based page number).
    page_ids: Vec<ObjectId>,
}

impl LopdfDocument {
    /// Access the underlying lopdf document.
    pub fn inner(&self) -> &Document {
        &self.inner
    }
}

impl std::fmt::Debug for LopdfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LopdfDocument")
            .field("page_count", &self.page_ids.len())
            .finish_non_exhaustive()
    }
}

/// The lopdf-based PDF backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfBackend;

impl PdfBackend for LopdfBackend {
    type Document = LopdfDocument;
    type Error = BackendError;

    fn open(bytes: &[u8]) -> Result<Self::Document, Self::Error> {
        let inner = Document::load_mem(bytes)
            .map_err(|e| BackendError::Parse(format!("failed to parse PDF: {e}")))?;

        if inner.is_encrypted() {
            return Err(BackendError::Core(PdfError::Encrypted));
        }

        // get_pages is keyed by 1-based page number, so values come out in page order.
        let page_ids: Vec<ObjectId> = inner.get_pages().into_values().collect();

        #[cfg(feature = "tracing")]
        tracing::debug!(pages = page_ids.len(), bytes = bytes.len(), "opened PDF");

        Ok(LopdfDocument { inner, page_ids })
    }

    fn page_count(doc: &Self::Document) -> usize {
        doc.page_ids.len()
    }

    fn interpret_page_text(
        doc: &Self::Document,
        index: usize,
        handler: &mut dyn TextHandler,
    ) -> Result<(), Self::Error> {
        let page_id = page_id(doc, index)?;
        let inner = &doc.inner;

        let page_dict = inner
            .get_object(page_id)
            .and_then(Object::as_dict)
            .map_err(|e| BackendError::Parse(format!("failed to get page dictionary: {e}")))?;
        let content = get_page_content_bytes(inner, page_dict)?;
        let resources = get_page_resources(inner, page_id)?;

        #[cfg(feature = "tracing")]
        tracing::trace!(page = index + 1, content_bytes = content.len(), "interpreting page");

        TextInterpreter::new(inner, handler).run(&content, resources)
    }

    fn assemble(doc: &Self::Document, pages: &[usize]) -> Result<Vec<u8>, Self::Error> {
        let page_count = doc.page_ids.len();
        let mut keep = BTreeSet::new();
        for &index in pages {
            if index >= page_count {
                return Err(BackendError::Core(PdfError::PageOutOfRange {
                    page: page_number(index),
                    page_count: to_u32(page_count),
                }));
            }
            if !keep.insert(index) {
                return Err(BackendError::Write(format!(
                    "page {} requested more than once",
                    index + 1
                )));
            }
        }
        if keep.is_empty() && page_count > 0 {
            return Err(BackendError::Core(PdfError::EmptySelection));
        }

        let mut out = doc.inner.clone();
        let removed: Vec<u32> = (0..page_count)
            .filter(|index| !keep.contains(index))
            .map(page_number)
            .collect();
        if !removed.is_empty() {
            out.delete_pages(&removed);
        }
        out.prune_objects();
        out.compress();

        let mut bytes = Vec::new();
        out.save_to(&mut bytes)
            .map_err(|e| BackendError::Write(e.to_string()))?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            kept = keep.len(),
            removed = removed.len(),
            bytes = bytes.len(),
            "assembled PDF"
        );

        Ok(bytes)
    }
}

fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

fn page_number(index: usize) -> u32 {
    to_u32(index.saturating_add(1))
}

fn page_id(doc: &LopdfDocument, index: usize) -> Result<ObjectId, BackendError> {
    doc.page_ids.get(index).copied().ok_or_else(|| {
        BackendError::Core(PdfError::PageOutOfRange {
            page: page_number(index),
            page_count: to_u32(doc.page_ids.len()),
        })
    })
}

/// Follow an indirect reference, returning the object itself otherwise.
pub(crate) fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        other => other,
    }
}

/// Resolve `obj` and view it as a dictionary.
pub(crate) fn resolve_dict<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Dictionary> {
    resolve(doc, obj).as_dict().ok()
}

/// Stream payload, decompressed if it declares a filter.
pub(crate) fn decode_stream(stream: &Stream) -> Result<Vec<u8>, BackendError> {
    if stream.dict.get(b"Filter").is_ok() {
        stream
            .decompressed_content()
            .map_err(|e| BackendError::Parse(format!("failed to decompress stream: {e}")))
    } else {
        Ok(stream.content.clone())
    }
}

/// Look up a key on the page, walking up `/Parent` links when absent.
fn resolve_inherited<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Result<Option<&'a Object>, BackendError> {
    let mut current_id = page_id;
    let mut visited = BTreeSet::new();
    while visited.insert(current_id) {
        let dict = doc
            .get_object(current_id)
            .and_then(Object::as_dict)
            .map_err(|e| BackendError::Parse(format!("failed to get page tree node: {e}")))?;

        if let Ok(value) = dict.get(key) {
            return Ok(Some(value));
        }

        match dict.get(b"Parent") {
            Ok(parent) => {
                current_id = parent
                    .as_reference()
                    .map_err(|e| BackendError::Parse(format!("invalid /Parent reference: {e}")))?;
            }
            Err(_) => return Ok(None),
        }
    }
    Err(BackendError::Parse("cycle in page tree".to_string()))
}

fn get_page_resources(doc: &Document, page_id: ObjectId) -> Result<&Dictionary, BackendError> {
    static EMPTY: LazyLock<Dictionary> = LazyLock::new(Dictionary::new);

    match resolve_inherited(doc, page_id, b"Resources")? {
        Some(obj) => resolve_dict(doc, obj)
            .ok_or_else(|| BackendError::Parse("/Resources is not a dictionary".to_string())),
        None => Ok(&EMPTY),
    }
}

/// Concatenated, decoded bytes of a page's `/Contents`.
fn get_page_content_bytes(doc: &Document, page_dict: &Dictionary) -> Result<Vec<u8>, BackendError> {
    let Ok(contents) = page_dict.get(b"Contents") else {
        return Ok(Vec::new());
    };

    match resolve(doc, contents) {
        Object::Stream(stream) => decode_stream(stream),
        Object::Array(parts) => {
            let mut content = Vec::new();
            for part in parts {
                let stream = resolve(doc, part).as_stream().map_err(|e| {
                    BackendError::Parse(format!("/Contents array item is not a stream: {e}"))
                })?;
                if !content.is_empty() {
                    content.push(b'\n');
                }
                content.extend_from_slice(&decode_stream(stream)?);
            }
            Ok(content)
        }
        _ => Err(BackendError::Parse(
            "/Contents is not a stream or array".to_string(),
        )),
    }
}
