//! Page range expressions such as `"1,3-5"`.
//!
//! Input is 1-indexed (user-facing). A range expression is split on commas
//! into tokens; each token is either a single page number or a closed span
//! `start-end`. How invalid tokens are treated is decided by a
//! [`RangePolicy`]: the lenient policy drops them silently, the strict policy
//! rejects the whole expression.
//!
//! The lenient policy also reads tokens loosely: a span uses only its first
//! two hyphen-separated parts (`"1-2-3"` is `1-2`), and a single page uses its
//! leading digits (`"3abc"` and `"2.5"` are pages 3 and 2).

use std::fmt;

use crate::selection::PageSelection;

/// What to do with a token that is malformed or out of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum RangePolicy {
    /// Drop invalid tokens and keep the rest. Reversed spans select nothing.
    #[default]
    Lenient,
    /// Fail on the first invalid token, including reversed spans.
    Strict,
}

/// One comma-separated unit of a range expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeToken {
    /// A single page, e.g. `"3"`.
    Single(u32),
    /// A closed interval, e.g. `"2-4"`. `start > end` is representable and
    /// expands to nothing.
    Span(u32, u32),
}

impl RangeToken {
    /// Parse the syntax of one token without checking page bounds.
    ///
    /// A token containing a hyphen is split at the first hyphen and both
    /// sides must parse as unsigned integers.
    pub fn parse(token: &str) -> Result<Self, RangeError> {
        let token = token.trim();
        if let Some((start, end)) = token.split_once('-') {
            let start = parse_page_number(start, token)?;
            let end = parse_page_number(end, token)?;
            Ok(RangeToken::Span(start, end))
        } else {
            parse_page_number(token, token).map(RangeToken::Single)
        }
    }

    /// Loose reading used by [`RangePolicy::Lenient`].
    ///
    /// Spans keep only the first two `-`-separated parts, each of which must
    /// still be a whole number. A single page takes the leading digits of the
    /// token after an optional `+`. Returns `None` when nothing usable is left.
    pub fn parse_lenient(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.contains('-') {
            let mut parts = token.split('-');
            let start = parts.next()?.trim().parse::<u32>().ok()?;
            let end = parts.next()?.trim().parse::<u32>().ok()?;
            Some(RangeToken::Span(start, end))
        } else {
            let digits = token.strip_prefix('+').unwrap_or(token);
            let len = digits
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(digits.len());
            digits[..len].parse::<u32>().ok().map(RangeToken::Single)
        }
    }

    /// Check the token against the document's page count.
    ///
    /// Only the lower bound of the start and the upper bound of the end are
    /// checked; a reversed span passes and expands to nothing.
    pub fn check_bounds(&self, page_count: u32) -> Result<(), RangeError> {
        let (start, end) = self.bounds();
        if start < 1 || end > page_count {
            return Err(RangeError::OutOfBounds {
                token: self.to_string(),
                page_count,
            });
        }
        Ok(())
    }

    /// Whether this is a span whose start lies after its end.
    pub fn is_reversed(&self) -> bool {
        matches!(self, RangeToken::Span(start, end) if start > end)
    }

    /// Iterate the pages this token denotes, ascending.
    pub fn pages(&self) -> std::ops::RangeInclusive<u32> {
        let (start, end) = self.bounds();
        start..=end
    }

    fn bounds(&self) -> (u32, u32) {
        match *self {
            RangeToken::Single(page) => (page, page),
            RangeToken::Span(start, end) => (start, end),
        }
    }
}

impl fmt::Display for RangeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeToken::Single(page) => write!(f, "{page}"),
            RangeToken::Span(start, end) => write!(f, "{start}-{end}"),
        }
    }
}

/// Why a token was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// One side of the token is not an unsigned integer.
    InvalidNumber {
        /// The offending token, trimmed.
        token: String,
    },
    /// The token starts below page 1 or ends past the last page.
    OutOfBounds {
        /// The offending token.
        token: String,
        /// Number of pages in the document.
        page_count: u32,
    },
    /// A span whose start lies after its end (strict policy only).
    Reversed {
        /// The offending token.
        token: String,
    },
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeError::InvalidNumber { token } => write!(f, "invalid page number: '{token}'"),
            RangeError::OutOfBounds { token, page_count } => write!(
                f,
                "page range '{token}' is outside the document (pages 1-{page_count})"
            ),
            RangeError::Reversed { token } => {
                write!(f, "page range '{token}' starts after it ends")
            }
        }
    }
}

impl std::error::Error for RangeError {}

fn parse_page_number(part: &str, token: &str) -> Result<u32, RangeError> {
    part.trim()
        .parse::<u32>()
        .map_err(|_| RangeError::InvalidNumber {
            token: token.to_string(),
        })
}

/// Split an expression into tokens, skipping empty ones.
///
/// Each entry carries the syntax check result for that token; bounds are not
/// checked here.
pub fn tokenize(input: &str) -> Vec<Result<RangeToken, RangeError>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(RangeToken::parse)
        .collect()
}

/// Parse a range expression with the lenient policy.
///
/// Never fails: malformed and out-of-range tokens are dropped, and an empty
/// expression yields an empty selection.
///
/// ```
/// use pdfsplitter_core::parse;
///
/// let pages = parse("2-4,7", 5);
/// assert_eq!(pages.to_vec(), vec![2, 3, 4]);
/// ```
pub fn parse(input: &str, page_count: u32) -> PageSelection {
    let mut selection = PageSelection::new();
    let tokens = input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(RangeToken::parse_lenient);
    for token in tokens {
        if token.check_bounds(page_count).is_ok() {
            selection.extend(token.pages());
        }
    }
    selection
}

/// Parse a range expression under the given policy.
///
/// # Errors
///
/// With [`RangePolicy::Strict`], returns the first [`RangeError`]
/// encountered. [`RangePolicy::Lenient`] never returns an error.
pub fn parse_with_policy(
    input: &str,
    page_count: u32,
    policy: RangePolicy,
) -> Result<PageSelection, RangeError> {
    match policy {
        RangePolicy::Lenient => Ok(parse(input, page_count)),
        RangePolicy::Strict => {
            let mut selection = PageSelection::new();
            for token in tokenize(input) {
                let token = token?;
                token.check_bounds(page_count)?;
                if token.is_reversed() {
                    return Err(RangeError::Reversed {
                        token: token.to_string(),
                    });
                }
                selection.extend(token.pages());
            }
            Ok(selection)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(input: &str, page_count: u32) -> Vec<u32> {
        parse(input, page_count).to_vec()
    }

    #[test]
    fn comma_separated() {
        assert_eq!(pages("1,3,5", 10), vec![1, 3, 5]);
    }

    #[test]
    fn page_range() {
        assert_eq!(pages("2-4", 10), vec![2, 3, 4]);
    }

    #[test]
    fn out_of_range_token_dropped() {
        assert_eq!(pages("2-4,7", 5), vec![2, 3, 4]);
    }

    #[test]
    fn invalid_token_dropped() {
        assert!(parse("abc", 10).is_empty());
    }

    #[test]
    fn empty_input_is_empty() {
        assert!(parse("", 10).is_empty());
        assert!(parse("", 0).is_empty());
        assert!(parse("   ", 3).is_empty());
    }

    #[test]
    fn parse_is_idempotent() {
        let first = parse("1-3, 8, x, 5-2", 8);
        let second = parse("1-3, 8, x, 5-2", 8);
        assert_eq!(first, second);
    }

    #[test]
    fn span_crossing_end_is_dropped_entirely() {
        assert_eq!(pages("4-6,1", 5), vec![1]);
    }

    #[test]
    fn page_zero_dropped() {
        assert!(parse("0", 5).is_empty());
        assert!(parse("0-2", 5).is_empty());
    }

    #[test]
    fn reversed_span_selects_nothing() {
        assert!(parse("4-2", 5).is_empty());
    }

    #[test]
    fn leading_hyphen_is_dropped() {
        assert!(parse("-3", 5).is_empty());
        assert!(parse("3-", 5).is_empty());
    }

    #[test]
    fn extra_span_parts_are_ignored() {
        assert_eq!(pages("1-2-3", 5), vec![1, 2]);
        assert_eq!(pages("2-4-1, 5", 5), vec![2, 3, 4, 5]);
    }

    #[test]
    fn single_page_uses_leading_digits() {
        assert_eq!(pages("3abc", 5), vec![3]);
        assert_eq!(pages("2.5", 5), vec![2]);
        assert_eq!(pages("+4", 5), vec![4]);
        assert!(parse("abc3", 5).is_empty());
    }

    #[test]
    fn strict_keeps_rejecting_loose_tokens() {
        for input in ["1-2-3", "3abc", "2.5"] {
            let err = parse_with_policy(input, 5, RangePolicy::Strict).unwrap_err();
            assert!(matches!(err, RangeError::InvalidNumber { .. }), "{input}");
        }
    }

    #[test]
    fn duplicates_and_overlaps_merge() {
        assert_eq!(pages("1,1,2-3,3", 5), vec![1, 2, 3]);
    }

    #[test]
    fn whitespace_tolerance() {
        assert_eq!(pages(" 1 , 3 - 5 ", 5), vec![1, 3, 4, 5]);
    }

    #[test]
    fn empty_tokens_skipped() {
        assert_eq!(pages("1,,3,", 5), vec![1, 3]);
    }

    #[test]
    fn tokenize_reports_each_token() {
        let tokens = tokenize("1, 2-4, x");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0], Ok(RangeToken::Single(1)));
        assert_eq!(tokens[1], Ok(RangeToken::Span(2, 4)));
        assert!(matches!(tokens[2], Err(RangeError::InvalidNumber { .. })));
    }

    #[test]
    fn token_display_round_trips_syntax() {
        assert_eq!(RangeToken::Span(2, 4).to_string(), "2-4");
        assert_eq!(RangeToken::Single(7).to_string(), "7");
    }

    #[test]
    fn strict_accepts_valid_expression() {
        let selection = parse_with_policy("1-2,5", 5, RangePolicy::Strict).unwrap();
        assert_eq!(selection.to_vec(), vec![1, 2, 5]);
    }

    #[test]
    fn strict_rejects_out_of_bounds() {
        let err = parse_with_policy("2-4,7", 5, RangePolicy::Strict).unwrap_err();
        assert_eq!(
            err,
            RangeError::OutOfBounds {
                token: "7".to_string(),
                page_count: 5
            }
        );
        assert!(err.to_string().contains("outside"));
    }

    #[test]
    fn strict_rejects_malformed() {
        let err = parse_with_policy("1,abc", 5, RangePolicy::Strict).unwrap_err();
        assert!(matches!(err, RangeError::InvalidNumber { ref token } if token == "abc"));
    }

    #[test]
    fn strict_rejects_reversed() {
        let err = parse_with_policy("4-2", 5, RangePolicy::Strict).unwrap_err();
        assert!(matches!(err, RangeError::Reversed { .. }));
    }

    #[test]
    fn lenient_policy_never_fails() {
        let selection = parse_with_policy("x,9,2", 5, RangePolicy::Lenient).unwrap();
        assert_eq!(selection.to_vec(), vec![2]);
    }

    #[test]
    fn default_policy_is_lenient() {
        assert_eq!(RangePolicy::default(), RangePolicy::Lenient);
    }
}
