//! Output-field selection state
//!
//! Tracks which output fields the next query should request. The state is a
//! single tagged value, so "all fields" and an explicit field list can never
//! both be active.

use std::collections::BTreeSet;

/// Name of the entry that selects every known field.
pub const SELECT_ALL_ENTRY: &str = "Get All Features";

/// The current selection mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every field in the catalog
    All,
    /// Only these fields (possibly none)
    Fields(BTreeSet<String>),
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Fields(BTreeSet::new())
    }
}

/// Toggleable set of output fields backed by a catalog of known fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionIndex {
    catalog: BTreeSet<String>,
    selection: Selection,
}

impl SelectionIndex {
    /// Creates an index over the given known fields with nothing selected.
    pub fn new<I, S>(catalog: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            catalog: catalog.into_iter().map(Into::into).collect(),
            selection: Selection::default(),
        }
    }

    /// Flips one entry.
    ///
    /// Toggling [`SELECT_ALL_ENTRY`] switches between "all" and an empty
    /// explicit set. Toggling a field while "all" is active starts a new
    /// explicit set containing just that field.
    pub fn toggle(&mut self, entry: &str) {
        if entry == SELECT_ALL_ENTRY {
            self.selection = match self.selection {
                Selection::All => Selection::Fields(BTreeSet::new()),
                Selection::Fields(_) => Selection::All,
            };
            return;
        }

        match &mut self.selection {
            Selection::All => {
                self.selection = Selection::Fields(BTreeSet::from([entry.to_string()]));
            }
            Selection::Fields(fields) => {
                if !fields.remove(entry) {
                    fields.insert(entry.to_string());
                }
            }
        }
    }

    /// Whether an entry shows as toggled on.
    ///
    /// Individual fields are never reported selected while "all" is active.
    pub fn is_selected(&self, entry: &str) -> bool {
        match &self.selection {
            Selection::All => entry == SELECT_ALL_ENTRY,
            Selection::Fields(fields) => fields.contains(entry),
        }
    }

    /// The fields the next query should request.
    pub fn effective_field_set(&self) -> BTreeSet<String> {
        match &self.selection {
            Selection::All => self.catalog.clone(),
            Selection::Fields(fields) => fields.clone(),
        }
    }

    pub fn select_all_flag(&self) -> bool {
        matches!(self.selection, Selection::All)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Known fields, in sorted order.
    pub fn catalog(&self) -> &BTreeSet<String> {
        &self.catalog
    }
}
