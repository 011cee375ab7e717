//! Callback trait fed by the content stream interpreter.
//!
//! The interpreter calls [`TextHandler`] methods in content-stream order as
//! it meets text-showing operators. Collecting into a `Vec<TextRun>` is the
//! common case and is implemented directly on `Vec`.

use pdfsplitter_core::TextRun;

/// Receives text runs and non-fatal problems while a page is interpreted.
///
/// `on_warning` has a default no-op implementation.
pub trait TextHandler {
    /// Called once per text-showing operator with non-empty text.
    fn on_text_run(&mut self, run: TextRun);

    /// Called when something on the page could not be interpreted but the
    /// rest of the page still can, e.g. a font that failed to resolve.
    fn on_warning(&mut self, message: &str) {
        let _ = message;
    }
}

impl TextHandler for Vec<TextRun> {
    fn on_text_run(&mut self, run: TextRun) {
        self.push(run);
    }
}
