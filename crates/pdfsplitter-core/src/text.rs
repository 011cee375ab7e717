//! Plain-text assembly from positioned text runs.
//!
//! A page's text arrives as a sequence of [`TextRun`]s in content-stream
//! order, each tagged with the vertical coordinate it was drawn at. Line
//! breaks are inferred by a [`LineBreakStrategy`]. The default,
//! [`VerticalShift`], is a layout heuristic: it starts a new line whenever the
//! vertical position changes. It does not reconstruct reading order,
//! columns, or paragraphs, and runs drawn out of order stay out of order.

/// A piece of text drawn at a vertical position on a page.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextRun {
    /// Decoded text of the run.
    pub text: String,
    /// Vertical translation of the text rendering matrix, in PDF user
    /// space (origin at the bottom of the page).
    pub y: f64,
}

impl TextRun {
    /// Create a run.
    pub fn new(text: impl Into<String>, y: f64) -> Self {
        Self {
            text: text.into(),
            y,
        }
    }
}

/// Decides whether a newline goes between two consecutive runs.
pub trait LineBreakStrategy {
    /// Return `true` if `current` should start on a new line, given the run
    /// emitted before it on the same page.
    fn breaks_before(&self, previous: &TextRun, current: &TextRun) -> bool;
}

/// Break whenever the vertical coordinate differs from the previous run's.
///
/// Coordinates are compared exactly, so runs on the same baseline that were
/// positioned with different rounding still break.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerticalShift;

impl LineBreakStrategy for VerticalShift {
    fn breaks_before(&self, previous: &TextRun, current: &TextRun) -> bool {
        previous.y != current.y
    }
}

/// Separator line written before each page's text.
pub fn page_separator(page_number: u32) -> String {
    format!("--- Page {page_number} ---")
}

/// Append one page of text to `out`.
///
/// Layout: the separator line and a blank line, then each run followed by a
/// single space (with a newline before it when the strategy says so), then a
/// blank line.
pub fn assemble_page(
    page_number: u32,
    runs: &[TextRun],
    strategy: &dyn LineBreakStrategy,
    out: &mut String,
) {
    out.push_str(&page_separator(page_number));
    out.push_str("\n\n");

    let mut previous: Option<&TextRun> = None;
    for run in runs {
        if let Some(prev) = previous {
            if strategy.breaks_before(prev, run) {
                out.push('\n');
            }
        }
        out.push_str(&run.text);
        out.push(' ');
        previous = Some(run);
    }

    out.push_str("\n\n");
}

/// Assemble several pages in the given order.
pub fn assemble_document<'a, I>(pages: I, strategy: &dyn LineBreakStrategy) -> String
where
    I: IntoIterator<Item = (u32, &'a [TextRun])>,
{
    let mut out = String::new();
    for (page_number, runs) in pages {
        assemble_page(page_number, runs, strategy, &mut out);
    }
    out
}
