use std::fmt;

/// What selecting a catalog item means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    /// A directory under the workspace root.
    Local { name: String },
    /// A remote repository with no local clone yet.
    Clonable { name: String },
    /// Caller-supplied entry, identified by an opaque key.
    Extra { key: String },
    /// Informational entry shown when remote listing failed.
    ErrorPlaceholder,
}

/// One selectable row of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    pub label: String,
    pub subtitle: String,
    pub kind: ItemKind,
    /// A live session exists for this project.
    pub active: bool,
}

impl CatalogItem {
    /// Stable key handed to the picker and matched back on selection.
    pub fn key(&self) -> String {
        self.kind.to_string()
    }

    pub fn project_name(&self) -> Option<&str> {
        match &self.kind {
            ItemKind::Local { name } | ItemKind::Clonable { name } => Some(name),
            ItemKind::Extra { .. } | ItemKind::ErrorPlaceholder => None,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Local { name } => write!(f, "local:{name}"),
            ItemKind::Clonable { name } => write!(f, "clone:{name}"),
            ItemKind::Extra { key } => write!(f, "extra:{key}"),
            ItemKind::ErrorPlaceholder => write!(f, "error:remote"),
        }
    }
}

/// Ordered catalog plus whether the remote listing failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub items: Vec<CatalogItem>,
    pub remote_error: Option<String>,
}

impl Catalog {
    pub fn has_remote_error(&self) -> bool {
        self.remote_error.is_some()
    }

    pub fn find(&self, key: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.key() == key)
    }

    pub fn local_items(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items
            .iter()
            .filter(|item| matches!(item.kind, ItemKind::Local { .. }))
    }
}
