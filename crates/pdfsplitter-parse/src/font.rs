//! Decoding of string operands into Unicode.
//!
//! A string shown with `Tj`/`TJ` is a sequence of character codes whose
//! meaning depends on the current font. When the font carries a
//! `/ToUnicode` CMap it is authoritative. Otherwise simple fonts are read as
//! WinAnsi (Windows-1252) and composite fonts, whose codes are glyph ids,
//! become U+FFFD.

use encoding_rs::WINDOWS_1252;
use lopdf::{Dictionary, Document, Object};

use crate::cmap::ToUnicodeMap;
use crate::lopdf_backend::{decode_stream, resolve};

/// Decoder for the codes of one font resource.
#[derive(Debug, Clone, Default)]
pub(crate) struct FontDecoder {
    two_byte: bool,
    to_unicode: Option<ToUnicodeMap>,
}

impl FontDecoder {
    /// Build a decoder from a `/Font` dictionary.
    pub(crate) fn from_font_dict(doc: &Document, dict: &Dictionary) -> Self {
        let two_byte = matches!(dict.get(b"Subtype"), Ok(Object::Name(name)) if name == b"Type0");
        let to_unicode = dict
            .get(b"ToUnicode")
            .ok()
            .map(|obj| resolve(doc, obj))
            .and_then(|obj| obj.as_stream().ok())
            .and_then(|stream| decode_stream(stream).ok())
            .map(|bytes| ToUnicodeMap::parse(&bytes));
        Self {
            two_byte,
            to_unicode,
        }
    }

    /// Decode a string operand shown in this font.
    pub(crate) fn decode(&self, bytes: &[u8]) -> String {
        let width = if self.two_byte { 2 } else { 1 };
        match &self.to_unicode {
            Some(map) => {
                let mut out = String::new();
                for chunk in bytes.chunks(width) {
                    let code = chunk.iter().fold(0u32, |acc, b| (acc << 8) | u32::from(*b));
                    match map.get(code) {
                        Some(text) => out.push_str(text),
                        None if width == 1 => out.push_str(&decode_simple(chunk)),
                        None => out.push(char::REPLACEMENT_CHARACTER),
                    }
                }
                out
            }
            None if self.two_byte => {
                std::iter::repeat_n(char::REPLACEMENT_CHARACTER, bytes.len().div_ceil(2)).collect()
            }
            None => decode_simple(bytes),
        }
    }
}

/// Decode bytes with no font information: UTF-16BE when they start with a
/// byte order mark, Windows-1252 otherwise.
pub(crate) fn decode_simple(bytes: &[u8]) -> String {
    if let [0xFE, 0xFF, rest @ ..] = bytes {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    let (text, _had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
    text.into_owned()
}
