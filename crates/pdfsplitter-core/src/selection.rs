//! The set of pages a user has picked from the current document.

use std::collections::BTreeSet;

use crate::page_range::{RangeError, RangePolicy, parse_with_policy};

/// A set of 1-based page numbers.
///
/// Pages are unique and always iterated in ascending order, which is the
/// order used for output naming and for copying pages into a split document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PageSelection {
    pages: BTreeSet<u32>,
}

impl PageSelection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// A selection containing every page `1..=page_count`.
    pub fn all(page_count: u32) -> Self {
        Self {
            pages: (1..=page_count).collect(),
        }
    }

    /// Number of selected pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether no page is selected.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Whether `page` is selected.
    pub fn contains(&self, page: u32) -> bool {
        self.pages.contains(&page)
    }

    /// Add a page. Returns `true` if it was not already selected.
    pub fn insert(&mut self, page: u32) -> bool {
        self.pages.insert(page)
    }

    /// Remove a page. Returns `true` if it was selected.
    pub fn remove(&mut self, page: u32) -> bool {
        self.pages.remove(&page)
    }

    /// Check or uncheck a page, ignoring pages outside `1..=page_count`.
    pub fn set(&mut self, page: u32, selected: bool, page_count: u32) {
        if page < 1 || page > page_count {
            return;
        }
        if selected {
            self.pages.insert(page);
        } else {
            self.pages.remove(&page);
        }
    }

    /// Flip the state of a page. Returns the new state.
    ///
    /// Pages outside `1..=page_count` are left unselected.
    pub fn toggle(&mut self, page: u32, page_count: u32) -> bool {
        let selected = !self.contains(page);
        self.set(page, selected, page_count);
        self.contains(page)
    }

    /// Select every page of a `page_count`-page document.
    pub fn select_all(&mut self, page_count: u32) {
        self.pages.extend(1..=page_count);
    }

    /// Deselect every page.
    pub fn clear(&mut self) {
        self.pages.clear();
    }

    /// Replace the selection with the pages of a range expression.
    ///
    /// A blank expression leaves the selection untouched. Otherwise the
    /// current selection is cleared first and the parsed pages become the
    /// new selection. Returns the number of selected pages afterwards.
    ///
    /// # Errors
    ///
    /// Under [`RangePolicy::Strict`] an invalid expression is rejected and
    /// the selection is left as it was.
    pub fn apply_range(
        &mut self,
        input: &str,
        page_count: u32,
        policy: RangePolicy,
    ) -> Result<usize, RangeError> {
        if input.trim().is_empty() {
            return Ok(self.len());
        }
        let parsed = parse_with_policy(input, page_count, policy)?;
        *self = parsed;
        Ok(self.len())
    }

    /// Iterate selected pages in ascending order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = u32> + '_ {
        self.pages.iter().copied()
    }

    /// Lowest selected page.
    pub fn first(&self) -> Option<u32> {
        self.pages.first().copied()
    }

    /// Highest selected page.
    pub fn last(&self) -> Option<u32> {
        self.pages.last().copied()
    }

    /// Selected pages as an ascending vector.
    pub fn to_vec(&self) -> Vec<u32> {
        self.iter().collect()
    }

    /// Selected pages converted to ascending 0-based indices.
    pub fn to_zero_based(&self) -> Vec<usize> {
        self.iter()
            .filter_map(|page| (page as usize).checked_sub(1))
            .collect()
    }
}

impl Extend<u32> for PageSelection {
    fn extend<T: IntoIterator<Item = u32>>(&mut self, iter: T) {
        self.pages.extend(iter);
    }
}

impl FromIterator<u32> for PageSelection {
    fn from_iter<T: IntoIterator<Item = u32>>(iter: T) -> Self {
        Self {
            pages: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PageSelection {
    type Item = u32;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, u32>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter().copied()
    }
}
