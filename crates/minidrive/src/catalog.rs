//! Read-only folder catalog: folder id -> ordered child entries

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Well-known id of the top-level folder
pub const ROOT_ID: &str = "root";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EntryKind {
    File {
        #[serde(default)]
        url: String,
        #[serde(default)]
        size: String,
    },
    Folder,
}

/// A file or folder shown in a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub kind: EntryKind,
    /// Display string, never parsed
    #[serde(rename = "modifiedDate", default)]
    pub modified_date: String,
}

impl Entry {
    pub fn folder(id: &str, name: &str, modified_date: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind: EntryKind::Folder,
            modified_date: modified_date.to_string(),
        }
    }

    pub fn file(id: &str, name: &str, modified_date: &str, url: &str, size: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind: EntryKind::File {
                url: url.to_string(),
                size: size.to_string(),
            },
            modified_date: modified_date.to_string(),
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, EntryKind::Folder)
    }

    /// Link target for files
    pub fn url(&self) -> Option<&str> {
        match &self.kind {
            EntryKind::File { url, .. } => Some(url.as_str()),
            EntryKind::Folder => None,
        }
    }

    /// Display size for files
    pub fn size(&self) -> Option<&str> {
        match &self.kind {
            EntryKind::File { size, .. } => Some(size.as_str()),
            EntryKind::Folder => None,
        }
    }
}

/// Mapping from folder id to the entries it directly contains.
///
/// Lookups never fail: a folder id without an entry list (including `root`
/// on an empty catalog) resolves to an empty slice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    folders: BTreeMap<String, Vec<Entry>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries directly inside `folder_id`, in catalog order
    pub fn children(&self, folder_id: &str) -> &[Entry] {
        self.folders
            .get(folder_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains_folder(&self, folder_id: &str) -> bool {
        self.folders.contains_key(folder_id)
    }

    /// Replace the entry list of a folder
    pub fn insert_folder(&mut self, folder_id: &str, entries: Vec<Entry>) {
        self.folders.insert(folder_id.to_string(), entries);
    }

    /// Remove a single entry from a folder's listing, returning it if present
    pub fn remove_entry(&mut self, folder_id: &str, entry_id: &str) -> Option<Entry> {
        let entries = self.folders.get_mut(folder_id)?;
        let idx = entries.iter().position(|e| e.id == entry_id)?;
        Some(entries.remove(idx))
    }

    /// Every (folder id, entries) pair
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Entry])> {
        self.folders
            .iter()
            .map(|(id, entries)| (id.as_str(), entries.as_slice()))
    }

    /// Number of folder listings
    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    /// Total number of entries across all listings
    pub fn entry_count(&self) -> usize {
        self.folders.values().map(Vec::len).sum()
    }

    /// Folder entries whose id has no listing of its own. These browse as empty.
    pub fn dangling_folders(&self) -> Vec<&Entry> {
        self.folders
            .values()
            .flatten()
            .filter(|e| e.is_folder() && !self.folders.contains_key(&e.id))
            .collect()
    }

    /// Depth-first listing from root. Each folder id is expanded at most once.
    pub fn walk(&self) -> Vec<(usize, &Entry)> {
        let mut out = Vec::new();
        let mut expanded = HashSet::new();
        expanded.insert(ROOT_ID);
        self.walk_folder(ROOT_ID, 0, &mut expanded, &mut out);
        out
    }

    fn walk_folder<'a>(
        &'a self,
        folder_id: &str,
        depth: usize,
        expanded: &mut HashSet<&'a str>,
        out: &mut Vec<(usize, &'a Entry)>,
    ) {
        for entry in self.children(folder_id) {
            out.push((depth, entry));
            if entry.is_folder() && expanded.insert(entry.id.as_str()) {
                self.walk_folder(&entry.id, depth + 1, expanded, out);
            }
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse catalog JSON")
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize catalog")
    }

    /// Load a catalog from a JSON file
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog from {}", path.display()))?;
        let catalog = Self::from_json_str(&contents)
            .with_context(|| format!("Invalid catalog in {}", path.display()))?;

        for entry in catalog.dangling_folders() {
            tracing::warn!(folder_id = %entry.id, name = %entry.name, "folder has no listing");
        }
        tracing::info!(
            path = %path.display(),
            folders = catalog.len(),
            entries = catalog.entry_count(),
            "loaded catalog"
        );

        Ok(catalog)
    }

    /// Write the catalog as JSON, creating parent directories
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        std::fs::write(path, self.to_json_string()?)
            .with_context(|| format!("Failed to write catalog to {}", path.display()))?;

        Ok(())
    }

    /// The demo drive: two top-level folders, a nested "Web App" folder and a few files
    pub fn sample() -> Self {
        let mut catalog = Self::new();

        catalog.insert_folder(
            ROOT_ID,
            vec![
                Entry::folder("folder-1", "Projects", "Nov 10, 2024"),
                Entry::folder("folder-2", "Personal", "Nov 8, 2024"),
                Entry::file(
                    "file-1",
                    "Budget 2025.xlsx",
                    "Nov 12, 2024",
                    "https://www.example.com/budget-2025.xlsx",
                    "2.4 MB",
                ),
                Entry::file(
                    "file-2",
                    "Presentation.pptx",
                    "Nov 11, 2024",
                    "https://www.example.com/presentation.pptx",
                    "5.1 MB",
                ),
            ],
        );
        catalog.insert_folder(
            "folder-1",
            vec![
                Entry::file(
                    "file-3",
                    "Design System.figma",
                    "Nov 9, 2024",
                    "https://www.figma.com",
                    "1.8 MB",
                ),
                Entry::folder("folder-3", "Web App", "Nov 7, 2024"),
                Entry::file(
                    "file-4",
                    "README.md",
                    "Nov 6, 2024",
                    "https://www.example.com/readme.md",
                    "4.2 KB",
                ),
            ],
        );
        catalog.insert_folder(
            "folder-2",
            vec![
                Entry::file(
                    "file-5",
                    "Travel Plans.docx",
                    "Nov 5, 2024",
                    "https://www.example.com/travel-plans.docx",
                    "156 KB",
                ),
                Entry::file(
                    "file-6",
                    "Photos.zip",
                    "Nov 3, 2024",
                    "https://www.example.com/photos.zip",
                    "245 MB",
                ),
            ],
        );
        catalog.insert_folder(
            "folder-3",
            vec![
                Entry::file(
                    "file-7",
                    "app.tsx",
                    "Nov 10, 2024",
                    "https://www.example.com/app.tsx",
                    "12.3 KB",
                ),
                Entry::file(
                    "file-8",
                    "styles.css",
                    "Nov 8, 2024",
                    "https://www.example.com/styles.css",
                    "8.7 KB",
                ),
            ],
        );

        catalog
    }
}
