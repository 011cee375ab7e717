//! Text-only content stream interpreter.
//!
//! Tracks just enough graphics and text state to know where each string is
//! drawn: the CTM (`cm`, `q`/`Q`), the text and line matrices (`BT`, `Tm`,
//! `Td`, `TD`, `T*`), leading, rise and the current font. Every
//! text-showing operator (`Tj`, `TJ`, `'`, `"`) yields one [`TextRun`]
//! whose `y` is the vertical translation of the text rendering matrix.
//!
//! Horizontal advance is not tracked, so glyph widths are never needed.
//! Form XObjects invoked with `Do` are interpreted recursively up to
//! [`MAX_FORM_DEPTH`].

use std::collections::HashMap;
use std::rc::Rc;

use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId};
use pdfsplitter_core::TextRun;

use crate::error::BackendError;
use crate::font::{FontDecoder, decode_simple};
use crate::handler::TextHandler;
use crate::lopdf_backend::{decode_stream, resolve, resolve_dict};

/// Nesting limit for form XObjects.
pub(crate) const MAX_FORM_DEPTH: usize = 8;

/// A TJ adjustment at or below this (thousandths of an em) reads as a gap
/// between words.
const WORD_GAP: f64 = -250.0;

type Matrix = [f64; 6];

const IDENTITY: Matrix = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

fn multiply(m: &Matrix, n: &Matrix) -> Matrix {
    [
        m[0] * n[0] + m[1] * n[2],
        m[0] * n[1] + m[1] * n[3],
        m[2] * n[0] + m[3] * n[2],
        m[2] * n[1] + m[3] * n[3],
        m[4] * n[0] + m[5] * n[2] + n[4],
        m[4] * n[1] + m[5] * n[3] + n[5],
    ]
}

fn translation(tx: f64, ty: f64) -> Matrix {
    [1.0, 0.0, 0.0, 1.0, tx, ty]
}

/// Graphics state entries saved by `q` and restored by `Q`.
#[derive(Debug, Clone)]
struct GraphicsState {
    ctm: Matrix,
    leading: f64,
    rise: f64,
    font: Option<Rc<FontDecoder>>,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            ctm: IDENTITY,
            leading: 0.0,
            rise: 0.0,
            font: None,
        }
    }
}

/// Per-stream text object state. Not part of the saved graphics state.
struct TextObject {
    matrix: Matrix,
    line: Matrix,
}

impl TextObject {
    fn new() -> Self {
        Self {
            matrix: IDENTITY,
            line: IDENTITY,
        }
    }

    fn move_line(&mut self, tx: f64, ty: f64) {
        self.line = multiply(&translation(tx, ty), &self.line);
        self.matrix = self.line;
    }

    fn set(&mut self, m: Matrix) {
        self.matrix = m;
        self.line = m;
    }
}

pub(crate) struct TextInterpreter<'a, 'h> {
    doc: &'a Document,
    handler: &'h mut dyn TextHandler,
    fonts: HashMap<ObjectId, Rc<FontDecoder>>,
}

impl<'a, 'h> TextInterpreter<'a, 'h> {
    pub(crate) fn new(doc: &'a Document, handler: &'h mut dyn TextHandler) -> Self {
        Self {
            doc,
            handler,
            fonts: HashMap::new(),
        }
    }

    /// Interpret a page's content with its resource dictionary.
    pub(crate) fn run(
        &mut self,
        content: &[u8],
        resources: &'a Dictionary,
    ) -> Result<(), BackendError> {
        self.run_stream(content, resources, GraphicsState::default(), 0)
    }

    fn run_stream(
        &mut self,
        content: &[u8],
        resources: &'a Dictionary,
        initial: GraphicsState,
        depth: usize,
    ) -> Result<(), BackendError> {
        let content = Content::decode(content)
            .map_err(|e| BackendError::Parse(format!("failed to decode content stream: {e}")))?;

        let mut gs = initial;
        let mut saved: Vec<GraphicsState> = Vec::new();
        let mut text = TextObject::new();

        for op in &content.operations {
            let operands = op.operands.as_slice();
            match op.operator.as_str() {
                "q" => saved.push(gs.clone()),
                "Q" => {
                    if let Some(previous) = saved.pop() {
                        gs = previous;
                    }
                }
                "cm" => {
                    if let Some(m) = matrix_operand(operands) {
                        gs.ctm = multiply(&m, &gs.ctm);
                    }
                }
                "BT" => text = TextObject::new(),
                "Tf" => {
                    if let Some(Object::Name(name)) = operands.first() {
                        gs.font = self.font(resources, name);
                    }
                }
                "TL" => {
                    if let Some(leading) = number(operands, 0) {
                        gs.leading = leading;
                    }
                }
                "Ts" => {
                    if let Some(rise) = number(operands, 0) {
                        gs.rise = rise;
                    }
                }
                "Td" => {
                    if let (Some(tx), Some(ty)) = (number(operands, 0), number(operands, 1)) {
                        text.move_line(tx, ty);
                    }
                }
                "TD" => {
                    if let (Some(tx), Some(ty)) = (number(operands, 0), number(operands, 1)) {
                        gs.leading = -ty;
                        text.move_line(tx, ty);
                    }
                }
                "Tm" => {
                    if let Some(m) = matrix_operand(operands) {
                        text.set(m);
                    }
                }
                "T*" => text.move_line(0.0, -gs.leading),
                "Tj" => {
                    if let Some(Object::String(bytes, _)) = operands.first() {
                        let decoded = decode(&gs, bytes);
                        self.emit(decoded, &text, &gs);
                    }
                }
                "TJ" => {
                    if let Some(Object::Array(items)) = operands.first() {
                        let decoded = decode_array(&gs, items);
                        self.emit(decoded, &text, &gs);
                    }
                }
                "'" => {
                    text.move_line(0.0, -gs.leading);
                    if let Some(Object::String(bytes, _)) = operands.first() {
                        let decoded = decode(&gs, bytes);
                        self.emit(decoded, &text, &gs);
                    }
                }
                "\"" => {
                    text.move_line(0.0, -gs.leading);
                    if let Some(Object::String(bytes, _)) = operands.get(2) {
                        let decoded = decode(&gs, bytes);
                        self.emit(decoded, &text, &gs);
                    }
                }
                "Do" => {
                    if let Some(Object::Name(name)) = operands.first() {
                        self.run_form(name, resources, &gs, depth)?;
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn run_form(
        &mut self,
        name: &[u8],
        resources: &'a Dictionary,
        gs: &GraphicsState,
        depth: usize,
    ) -> Result<(), BackendError> {
        if depth >= MAX_FORM_DEPTH {
            self.handler.on_warning(&format!(
                "form XObject nesting exceeds {MAX_FORM_DEPTH}, skipping /{}",
                String::from_utf8_lossy(name)
            ));
            return Ok(());
        }

        let doc = self.doc;
        let Some(stream) = resources
            .get(b"XObject")
            .ok()
            .and_then(|obj| resolve_dict(doc, obj))
            .and_then(|xobjects| xobjects.get(name).ok())
            .map(|obj| resolve(doc, obj))
            .and_then(|obj| obj.as_stream().ok())
        else {
            return Ok(());
        };

        let is_form = matches!(stream.dict.get(b"Subtype"), Ok(Object::Name(s)) if s == b"Form");
        if !is_form {
            return Ok(());
        }

        let content = decode_stream(stream)?;
        let mut inner = gs.clone();
        if let Ok(Object::Array(m)) = stream.dict.get(b"Matrix") {
            if let Some(m) = matrix_operand(m) {
                inner.ctm = multiply(&m, &inner.ctm);
            }
        }
        let form_resources = stream
            .dict
            .get(b"Resources")
            .ok()
            .and_then(|obj| resolve_dict(doc, obj))
            .unwrap_or(resources);

        self.run_stream(&content, form_resources, inner, depth + 1)
    }

    fn font(&mut self, resources: &'a Dictionary, name: &[u8]) -> Option<Rc<FontDecoder>> {
        let doc = self.doc;
        let entry = resources
            .get(b"Font")
            .ok()
            .and_then(|obj| resolve_dict(doc, obj))
            .and_then(|fonts| fonts.get(name).ok());

        let decoder = match entry {
            Some(Object::Reference(id)) => {
                if let Some(cached) = self.fonts.get(id) {
                    return Some(Rc::clone(cached));
                }
                let dict = doc.get_object(*id).and_then(Object::as_dict).ok();
                dict.map(|dict| {
                    let decoder = Rc::new(FontDecoder::from_font_dict(doc, dict));
                    self.fonts.insert(*id, Rc::clone(&decoder));
                    decoder
                })
            }
            Some(Object::Dictionary(dict)) => Some(Rc::new(FontDecoder::from_font_dict(doc, dict))),
            _ => None,
        };

        if decoder.is_none() {
            self.handler.on_warning(&format!(
                "font /{} not found in resources",
                String::from_utf8_lossy(name)
            ));
        }
        decoder
    }

    fn emit(&mut self, text: String, object: &TextObject, gs: &GraphicsState) {
        if text.is_empty() {
            return;
        }
        let m = multiply(&object.matrix, &gs.ctm);
        let y = gs.rise * m[3] + m[5];
        self.handler.on_text_run(TextRun::new(text, y));
    }
}

fn decode(gs: &GraphicsState, bytes: &[u8]) -> String {
    match &gs.font {
        Some(font) => font.decode(bytes),
        None => decode_simple(bytes),
    }
}

fn decode_array(gs: &GraphicsState, items: &[Object]) -> String {
    let mut out = String::new();
    for item in items {
        match item {
            Object::String(bytes, _) => out.push_str(&decode(gs, bytes)),
            other => {
                let gap = object_to_f64(other).is_some_and(|adjust| adjust <= WORD_GAP);
                if gap && !out.is_empty() && !out.ends_with(' ') {
                    out.push(' ');
                }
            }
        }
    }
    out
}

fn object_to_f64(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(f) => Some(f64::from(*f)),
        _ => None,
    }
}

fn number(operands: &[Object], index: usize) -> Option<f64> {
    operands.get(index).and_then(object_to_f64)
}

fn matrix_operand(operands: &[Object]) -> Option<Matrix> {
    if operands.len() < 6 {
        return None;
    }
    let mut m = [0.0; 6];
    for (slot, operand) in m.iter_mut().zip(operands) {
        *slot = object_to_f64(operand)?;
    }
    Some(m)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(content: &str) -> Vec<TextRun> {
        let doc = Document::with_version("1.5");
        let resources = Dictionary::new();
        let mut runs: Vec<TextRun> = Vec::new();
        TextInterpreter::new(&doc, &mut runs)
            .run(content.as_bytes(), &resources)
            .unwrap();
        runs
    }

    #[test]
    fn td_positions_runs() {
        let runs = run("BT 72 720 Td (Hello) Tj (World) Tj 0 -20 Td (Next) Tj ET");
        assert_eq!(
            runs,
            vec![
                TextRun::new("Hello", 720.0),
                TextRun::new("World", 720.0),
                TextRun::new("Next", 700.0),
            ]
        );
    }

    #[test]
    fn tm_sets_absolute_position() {
        let runs = run("BT 1 0 0 1 50 600 Tm (A) Tj 1 0 0 1 50 580 Tm (B) Tj ET");
        assert_eq!(runs[0].y, 600.0);
        assert_eq!(runs[1].y, 580.0);
    }

    #[test]
    fn leading_drives_t_star_and_quote() {
        let runs = run("BT 14 TL 0 100 Td (a) Tj T* (b) Tj (c) ' ET");
        let ys: Vec<f64> = runs.iter().map(|r| r.y).collect();
        assert_eq!(ys, vec![100.0, 86.0, 72.0]);
    }

    #[test]
    fn td_upper_sets_leading() {
        let runs = run("BT 0 500 Td (a) Tj 0 -12 TD (b) Tj T* (c) Tj ET");
        let ys: Vec<f64> = runs.iter().map(|r| r.y).collect();
        assert_eq!(ys, vec![500.0, 488.0, 476.0]);
    }

    #[test]
    fn double_quote_shows_third_operand() {
        let runs = run("BT 10 TL 0 50 Td 1 2 (x) \" ET");
        assert_eq!(runs, vec![TextRun::new("x", 40.0)]);
    }

    #[test]
    fn ctm_is_applied_and_restored() {
        let runs =
            run("q 1 0 0 1 0 100 cm BT 0 10 Td (in) Tj ET Q BT 0 10 Td (out) Tj ET");
        assert_eq!(runs[0].y, 110.0);
        assert_eq!(runs[1].y, 10.0);
    }

    #[test]
    fn rise_shifts_y() {
        let runs = run("BT 0 100 Td 5 Ts (sup) Tj ET");
        assert_eq!(runs[0].y, 105.0);
    }

    #[test]
    fn tj_array_joins_strings_and_marks_gaps() {
        let runs = run("BT [(Hel) -20 (lo) -400 (there)] TJ ET");
        assert_eq!(runs[0].text, "Hello there");
    }

    #[test]
    fn bt_resets_text_matrix() {
        let runs = run("BT 0 300 Td (a) Tj ET BT (b) Tj ET");
        assert_eq!(runs[1].y, 0.0);
    }

    #[test]
    fn empty_strings_are_not_reported() {
        let runs = run("BT () Tj [] TJ (x) Tj ET");
        assert_eq!(runs.len(), 1);
    }

    #[test]
    fn missing_font_warns_and_falls_back() {
        struct Recorder(Vec<TextRun>, Vec<String>);
        impl TextHandler for Recorder {
            fn on_text_run(&mut self, run: TextRun) {
                self.0.push(run);
            }
            fn on_warning(&mut self, message: &str) {
                self.1.push(message.to_string());
            }
        }

        let doc = Document::with_version("1.5");
        let resources = Dictionary::new();
        let mut recorder = Recorder(Vec::new(), Vec::new());
        TextInterpreter::new(&doc, &mut recorder)
            .run(b"BT /F9 12 Tf (ok) Tj ET", &resources)
            .unwrap();
        assert_eq!(recorder.0[0].text, "ok");
        assert!(recorder.1[0].contains("F9"));
    }

    #[test]
    fn matrix_multiply_composes_translations() {
        let m = multiply(&translation(1.0, 2.0), &translation(10.0, 20.0));
        assert_eq!(m, translation(11.0, 22.0));
    }
}
