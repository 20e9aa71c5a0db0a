//! Breadcrumb-driven folder navigation
//!
//! [`NavigationState`] is a plain owned value. Every operation takes the
//! current state (and the catalog where it needs one) and returns the next
//! state, so the host decides when a session starts and ends. [`Navigator`]
//! bundles one state with a borrowed catalog for the interactive UI.
//!
//! Breadcrumbs carry display names only. Jumping back to an ancestor replays
//! the path by name from root; the first name that no longer matches resets
//! the location to root.

use crate::catalog::{Catalog, Entry, ROOT_ID};

/// Label of breadcrumb position 0
pub const ROOT_LABEL: &str = "My Drive";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    current_folder_id: String,
    breadcrumb: Vec<String>,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationState {
    /// Session start: root folder, breadcrumb `["My Drive"]`
    pub fn new() -> Self {
        Self {
            current_folder_id: ROOT_ID.to_string(),
            breadcrumb: vec![ROOT_LABEL.to_string()],
        }
    }

    pub fn current_folder_id(&self) -> &str {
        &self.current_folder_id
    }

    pub fn breadcrumb(&self) -> &[String] {
        &self.breadcrumb
    }

    pub fn depth(&self) -> usize {
        self.breadcrumb.len() - 1
    }

    pub fn is_at_root(&self) -> bool {
        self.breadcrumb.len() == 1
    }

    pub fn can_go_back(&self) -> bool {
        self.breadcrumb.len() > 1
    }

    /// Descend into a folder. The kind of `folder_id` is not checked.
    pub fn enter_folder(&self, folder_id: &str, folder_name: &str) -> Self {
        let mut breadcrumb = self.breadcrumb.clone();
        breadcrumb.push(folder_name.to_string());
        Self {
            current_folder_id: folder_id.to_string(),
            breadcrumb,
        }
    }

    /// Open a listed entry. Files have no navigation effect and return `None`.
    pub fn open_entry(&self, entry: &Entry) -> Option<Self> {
        entry
            .is_folder()
            .then(|| self.enter_folder(&entry.id, &entry.name))
    }

    /// Truncate the breadcrumb to `index` and re-resolve the folder id by name.
    ///
    /// Positions past the end are clamped to the last breadcrumb element.
    pub fn jump_to_breadcrumb(&self, catalog: &Catalog, index: usize) -> Self {
        if index == 0 {
            return Self::new();
        }

        let index = index.min(self.breadcrumb.len() - 1);
        let breadcrumb = self.breadcrumb[..=index].to_vec();
        let current_folder_id = resolve_path(catalog, &breadcrumb[1..]);

        Self {
            current_folder_id,
            breadcrumb,
        }
    }

    /// Jump to the parent breadcrumb; unchanged at root
    pub fn go_back_one_level(&self, catalog: &Catalog) -> Self {
        if self.can_go_back() {
            self.jump_to_breadcrumb(catalog, self.breadcrumb.len() - 2)
        } else {
            self.clone()
        }
    }

    /// Items of the current folder, in catalog order
    pub fn current_items<'c>(&self, catalog: &'c Catalog) -> &'c [Entry] {
        catalog.children(&self.current_folder_id)
    }

    /// Open folders by name from the current listing, one level at a time.
    ///
    /// Only folders are matched, so a file sharing a folder's name is skipped.
    /// Stops at the first name with no such folder. Returns the resulting state
    /// and how many names were consumed.
    pub fn enter_path<S: AsRef<str>>(&self, catalog: &Catalog, names: &[S]) -> (Self, usize) {
        let mut state = self.clone();
        for (consumed, name) in names.iter().enumerate() {
            let next = state
                .current_items(catalog)
                .iter()
                .find(|e| e.is_folder() && e.name == name.as_ref())
                .and_then(|e| state.open_entry(e));
            match next {
                Some(next) => state = next,
                None => return (state, consumed),
            }
        }
        (state, names.len())
    }
}

/// Walk `names` from root, matching each against the current folder's entries
/// (first match, any kind). Returns [`ROOT_ID`] on the first miss.
fn resolve_path(catalog: &Catalog, names: &[String]) -> String {
    let mut folder_id = ROOT_ID;
    for name in names {
        match catalog.children(folder_id).iter().find(|e| &e.name == name) {
            Some(entry) => folder_id = entry.id.as_str(),
            None => {
                tracing::debug!(missing = %name, "breadcrumb no longer resolves, returning to root");
                return ROOT_ID.to_string();
            }
        }
    }
    folder_id.to_string()
}

/// One browsing session over a catalog
#[derive(Debug, Clone)]
pub struct Navigator<'c> {
    catalog: &'c Catalog,
    state: NavigationState,
}

impl<'c> Navigator<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            state: NavigationState::new(),
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn current_folder_id(&self) -> &str {
        self.state.current_folder_id()
    }

    pub fn breadcrumb(&self) -> &[String] {
        self.state.breadcrumb()
    }

    pub fn current_items(&self) -> &'c [Entry] {
        self.state.current_items(self.catalog)
    }

    pub fn can_go_back(&self) -> bool {
        self.state.can_go_back()
    }

    pub fn enter_folder(&mut self, folder_id: &str, folder_name: &str) {
        self.state = self.state.enter_folder(folder_id, folder_name);
        tracing::debug!(folder_id, depth = self.state.depth(), "entered folder");
    }

    /// Returns whether the entry was a folder and navigation happened
    pub fn open_entry(&mut self, entry: &Entry) -> bool {
        match self.state.open_entry(entry) {
            Some(next) => {
                self.state = next;
                tracing::debug!(folder_id = %entry.id, depth = self.state.depth(), "entered folder");
                true
            }
            None => false,
        }
    }

    pub fn jump_to_breadcrumb(&mut self, index: usize) {
        self.state = self.state.jump_to_breadcrumb(self.catalog, index);
        tracing::debug!(
            index,
            folder_id = self.state.current_folder_id(),
            "jumped to breadcrumb"
        );
    }

    pub fn go_back_one_level(&mut self) {
        self.state = self.state.go_back_one_level(self.catalog);
    }

    pub fn enter_path<S: AsRef<str>>(&mut self, names: &[S]) -> usize {
        let (next, consumed) = self.state.enter_path(self.catalog, names);
        self.state = next;
        consumed
    }
}
